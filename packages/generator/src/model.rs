//! Declaration model: what to generate for each decorated type

use crate::arguments::{ConcreteArguments, PropertyArguments};
use crate::namespaces::NamespaceSet;
use crate::options::DEFAULT_GLOBAL_HOOK_NAME;
use propforge_syntax::{NameScope, TypeKind, TypeRef};
use std::collections::HashMap;

/// Name of the change-notification event
pub const PROPERTY_CHANGED_EVENT: &str = "PropertyChanged";

/// Default name of the method raising the event
pub const DEFAULT_TRIGGER_METHOD: &str = "OnPropertyChanged";

/// A decorated backing field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub field_name: String,
    pub field_type: TypeRef,
    pub comments: Vec<String>,
    pub arguments: PropertyArguments,
    /// Filled by namespace resolution
    pub required_namespaces: NamespaceSet,
}

impl FieldDescriptor {
    /// Per-field hook, present only for extra-notify fields
    pub fn hook_name(&self) -> Option<String> {
        self.arguments
            .extra_notify
            .then(|| format!("On{}Changed", self.arguments.name))
    }
}

/// A property mirrored from an interface
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub property_name: String,
    pub property_type: TypeRef,
    /// The interface property has no setter
    pub read_only: bool,
    pub required_namespaces: NamespaceSet,
}

/// Event policy decided by the inheritance analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPolicy {
    pub generate_event: bool,
    pub trigger_method_name: String,
    /// Empty when the hook must not be declared
    pub global_partial_method_name: String,
}

impl EventPolicy {
    pub fn new(global_hook_name: &str) -> Self {
        Self {
            generate_event: true,
            trigger_method_name: DEFAULT_TRIGGER_METHOD.to_string(),
            global_partial_method_name: global_hook_name.to_string(),
        }
    }
}

impl Default for EventPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_GLOBAL_HOOK_NAME)
    }
}

/// One type receiving observable properties
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    pub namespace_name: Option<String>,
    pub class_name: String,
    pub kind: TypeKind,
    pub type_parameters: Vec<String>,
    /// Always ends with `partial`
    pub modifiers: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    /// Ancestors, nearest first
    pub base_type_full_names: Vec<String>,
    pub policy: EventPolicy,
    /// Imports in effect where the type is declared
    pub usings: Vec<String>,
}

impl ClassDescriptor {
    pub fn new(
        namespace_name: Option<&str>,
        class_name: impl Into<String>,
        kind: TypeKind,
    ) -> Self {
        Self {
            namespace_name: namespace_name.filter(|ns| !ns.is_empty()).map(str::to_string),
            class_name: class_name.into(),
            kind,
            type_parameters: Vec::new(),
            modifiers: vec!["partial".to_string()],
            fields: Vec::new(),
            base_type_full_names: Vec::new(),
            policy: EventPolicy::default(),
            usings: Vec::new(),
        }
    }

    pub fn qualified_name(&self) -> String {
        qualified_name(self.namespace_name.as_deref(), &self.class_name)
    }

    pub fn full_name(&self) -> String {
        full_name(self.namespace_name.as_deref(), &self.class_name)
    }

    pub fn scope(&self) -> NameScope {
        NameScope::new(self.namespace_name.as_deref(), &self.usings)
    }

    pub fn add_modifiers(&mut self, modifiers: &[String]) {
        merge_modifiers(&mut self.modifiers, modifiers);
    }

    pub fn add_usings(&mut self, usings: &[String]) {
        for using in usings {
            if !self.usings.contains(using) {
                self.usings.push(using.clone());
            }
        }
    }

    /// Only sealed classes and structs cannot be derived from
    pub fn is_inheritable(&self) -> bool {
        !matches!(self.kind, TypeKind::Struct | TypeKind::RecordStruct)
            && !self.modifiers.iter().any(|m| m == "sealed" || m == "static")
    }

    /// Whether the global hook is declared (and called) by this type
    pub fn has_global_hook(&self) -> bool {
        !self.policy.global_partial_method_name.is_empty()
    }
}

/// One type synthesized from an interface
#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteDescriptor {
    pub namespace_name: Option<String>,
    pub type_name: String,
    pub kind: TypeKind,
    pub type_parameters: Vec<String>,
    pub modifiers: Vec<String>,
    pub arguments: ConcreteArguments,
    /// Simple name of the interface, filled once it is resolved
    pub mocking_type_name: String,
    pub base_type_full_names: Vec<String>,
    pub properties: Vec<PropertyDescriptor>,
    pub namespaces: NamespaceSet,
}

impl ConcreteDescriptor {
    pub fn new(
        namespace_name: Option<&str>,
        type_name: impl Into<String>,
        kind: TypeKind,
        arguments: ConcreteArguments,
    ) -> Self {
        Self {
            namespace_name: namespace_name.filter(|ns| !ns.is_empty()).map(str::to_string),
            type_name: type_name.into(),
            kind,
            type_parameters: Vec::new(),
            modifiers: vec!["partial".to_string()],
            arguments,
            mocking_type_name: String::new(),
            base_type_full_names: Vec::new(),
            properties: Vec::new(),
            namespaces: NamespaceSet::new(),
        }
    }

    pub fn qualified_name(&self) -> String {
        qualified_name(self.namespace_name.as_deref(), &self.type_name)
    }

    pub fn full_name(&self) -> String {
        full_name(self.namespace_name.as_deref(), &self.type_name)
    }

    pub fn add_modifiers(&mut self, modifiers: &[String]) {
        merge_modifiers(&mut self.modifiers, modifiers);
    }
}

/// Registry key: `Namespace.Name`, with an empty namespace for global types
pub fn qualified_name(namespace: Option<&str>, name: &str) -> String {
    format!("{}.{}", namespace.unwrap_or(""), name)
}

/// Name as the semantic model knows it
pub fn full_name(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{}.{}", ns, name),
        None => name.to_string(),
    }
}

/// Merge modifiers in first-seen order, keeping `partial` last
fn merge_modifiers(target: &mut Vec<String>, modifiers: &[String]) {
    target.retain(|m| m != "partial");
    for modifier in modifiers {
        if modifier != "partial" && !target.contains(modifier) {
            target.push(modifier.clone());
        }
    }
    target.push("partial".to_string());
}

/// Descriptors of one batch, keyed by qualified name, in order of first sighting
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing entry for `key`, or a new one created by `create`
    pub fn get_or_insert_with(&mut self, key: &str, create: impl FnOnce() -> T) -> &mut T {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                self.entries.push((key.to_string(), create()));
                let position = self.entries.len() - 1;
                self.index.insert(key.to_string(), position);
                position
            }
        };
        &mut self.entries[position].1
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        let position = *self.index.get(key)?;
        self.entries.get_mut(position).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> IntoIterator for Registry<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
