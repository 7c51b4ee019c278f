//! Semantic model over declarations
//!
//! The generator never walks declaration trees to answer "what is this
//! name"; it asks a [`SemanticModel`]. [`InMemoryModel`] builds one from
//! compilation units and is what both the CLI and the tests use.

use crate::ast::{CompilationUnit, TypeDecl, TypeKind, TypeRef};
use crate::parser::parse_type;
use std::collections::HashMap;

/// A resolved type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSymbol {
    pub namespace: Option<String>,
    pub name: String,
    pub arity: usize,
    pub kind: TypeKind,
    /// Full name and arity of the base class, if any
    pub base_type: Option<(String, usize)>,
    pub members: Vec<MemberSymbol>,
    /// Namespaces imported where the type is declared
    pub usings: Vec<String>,
}

/// A member of a resolved type, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSymbol {
    Field {
        name: String,
        type_name: String,
    },
    Property {
        name: String,
        type_name: String,
        has_setter: bool,
    },
    Method {
        name: String,
        return_type: String,
        /// Parameter types, as written
        parameters: Vec<String>,
    },
    Event {
        name: String,
        type_name: String,
    },
}

impl MemberSymbol {
    pub fn name(&self) -> &str {
        match self {
            MemberSymbol::Field { name, .. }
            | MemberSymbol::Property { name, .. }
            | MemberSymbol::Method { name, .. }
            | MemberSymbol::Event { name, .. } => name,
        }
    }
}

impl TypeSymbol {
    pub fn new(namespace: Option<&str>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            name: name.into(),
            arity: 0,
            kind,
            base_type: None,
            members: Vec::new(),
            usings: Vec::new(),
        }
    }

    pub fn with_usings(mut self, usings: &[&str]) -> Self {
        self.usings = usings.iter().map(|u| u.to_string()).collect();
        self
    }

    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    pub fn with_base(mut self, full_name: impl Into<String>, arity: usize) -> Self {
        self.base_type = Some((full_name.into(), arity));
        self
    }

    pub fn with_member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }

    /// Convenience for the common `void Name(T1, T2)` shape
    pub fn with_method(self, name: &str, return_type: &str, parameters: &[&str]) -> Self {
        self.with_member(MemberSymbol::Method {
            name: name.to_string(),
            return_type: return_type.to_string(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
        })
    }

    pub fn with_event(self, name: &str, type_name: &str) -> Self {
        self.with_member(MemberSymbol::Event {
            name: name.to_string(),
            type_name: type_name.to_string(),
        })
    }

    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    pub fn is_reference_type(&self) -> bool {
        self.kind.is_reference_type()
    }

    /// Scope in which the type's own member types are written
    pub fn scope(&self) -> NameScope {
        NameScope::new(self.namespace.as_deref(), &self.usings)
    }

    pub fn members_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MemberSymbol> {
        self.members.iter().filter(move |m| m.name() == name)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members_named(name).next().is_some()
    }

    pub fn methods(&self) -> impl Iterator<Item = &MemberSymbol> {
        self.members
            .iter()
            .filter(|m| matches!(m, MemberSymbol::Method { .. }))
    }

    pub fn properties(&self) -> impl Iterator<Item = &MemberSymbol> {
        self.members
            .iter()
            .filter(|m| matches!(m, MemberSymbol::Property { .. }))
    }

    fn from_decl_header(decl: &TypeDecl) -> Self {
        TypeSymbol::new(decl.namespace.as_deref(), &decl.name, decl.kind).with_arity(decl.arity())
    }

    fn add_usings(&mut self, usings: &[String]) {
        for using in usings {
            if !self.usings.contains(using) {
                self.usings.push(using.clone());
            }
        }
    }

    fn extend_members(&mut self, decl: &TypeDecl) {
        for field in &decl.fields {
            if let (Some(name), Some(type_name)) = (&field.name, &field.type_name) {
                self.members.push(MemberSymbol::Field {
                    name: name.clone(),
                    type_name: type_name.clone(),
                });
            }
        }
        for property in &decl.properties {
            self.members.push(MemberSymbol::Property {
                name: property.name.clone(),
                type_name: property.type_name.clone(),
                has_setter: property.has_setter,
            });
        }
        for method in &decl.methods {
            self.members.push(MemberSymbol::Method {
                name: method.name.clone(),
                return_type: method.return_type.clone(),
                parameters: method
                    .parameters
                    .iter()
                    .map(|p| p.type_name.clone())
                    .collect(),
            });
        }
        for event in &decl.events {
            self.members.push(MemberSymbol::Event {
                name: event.name.clone(),
                type_name: event.type_name.clone(),
            });
        }
    }
}

/// Names visible at a declaration site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameScope {
    pub namespace: Option<String>,
    pub usings: Vec<String>,
}

impl NameScope {
    pub fn new(namespace: Option<&str>, usings: &[String]) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            usings: usings.to_vec(),
        }
    }

    /// Candidate full names for `name`, most specific first
    fn candidates(&self, name: &str) -> Vec<String> {
        let mut candidates = Vec::new();

        if name.contains('.') {
            candidates.push(name.to_string());
        }

        if let Some(ns) = &self.namespace {
            let mut prefix = ns.as_str();
            loop {
                candidates.push(format!("{}.{}", prefix, name));
                match prefix.rfind('.') {
                    Some(idx) => prefix = &prefix[..idx],
                    None => break,
                }
            }
        }

        for using in &self.usings {
            candidates.push(format!("{}.{}", using, name));
        }

        if !name.contains('.') {
            candidates.push(name.to_string());
        }

        candidates
    }
}

/// Lookup contract the generator resolves names against
pub trait SemanticModel {
    /// Find a type by full name (`Namespace.Name`) and generic arity
    fn lookup(&self, full_name: &str, arity: usize) -> Option<&TypeSymbol>;

    /// Find a type by metadata name, where generic arity is spelled `` Name`2 ``
    fn type_by_metadata_name(&self, metadata_name: &str) -> Option<&TypeSymbol> {
        match metadata_name.rsplit_once('`') {
            Some((name, arity)) => arity
                .parse::<usize>()
                .ok()
                .and_then(|arity| self.lookup(name, arity)),
            None => self.lookup(metadata_name, 0),
        }
    }

    /// Resolve a name as written at a declaration site
    fn resolve_type(&self, name: &str, arity: usize, scope: &NameScope) -> Option<&TypeSymbol> {
        scope
            .candidates(name)
            .iter()
            .find_map(|candidate| self.lookup(candidate, arity))
    }

    /// Resolve a parsed type reference; only named types resolve to a symbol
    fn resolve_type_ref(&self, ty: &TypeRef, scope: &NameScope) -> Option<&TypeSymbol> {
        match ty {
            TypeRef::Named { name, type_args } => self.resolve_type(name, type_args.len(), scope),
            _ => None,
        }
    }

    fn base_type(&self, symbol: &TypeSymbol) -> Option<&TypeSymbol> {
        symbol
            .base_type
            .as_ref()
            .and_then(|(name, arity)| self.lookup(name, *arity))
    }
}

/// Semantic model built from declaration manifests
#[derive(Debug, Clone, Default)]
pub struct InMemoryModel {
    symbols: HashMap<(String, usize), TypeSymbol>,
}

impl InMemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the model in two passes: register every type (merging partial
    /// declarations), then resolve base classes against the full set
    pub fn from_units(units: &[CompilationUnit]) -> Self {
        let mut model = Self::new();

        for unit in units {
            for decl in &unit.types {
                let key = (decl.full_name(), decl.arity());
                let symbol = model
                    .symbols
                    .entry(key)
                    .or_insert_with(|| TypeSymbol::from_decl_header(decl));
                symbol.extend_members(decl);
                symbol.add_usings(&unit.usings);
            }
        }

        let mut bases = Vec::new();
        for unit in units {
            for decl in &unit.types {
                let scope = NameScope::new(decl.namespace.as_deref(), &unit.usings);
                if let Some(base) = model.resolve_base_class(decl, &scope) {
                    bases.push(((decl.full_name(), decl.arity()), base));
                }
            }
        }

        for (key, base) in bases {
            if let Some(symbol) = model.symbols.get_mut(&key) {
                if symbol.base_type.is_none() {
                    symbol.base_type = Some(base);
                }
            }
        }

        model
    }

    /// Add or replace a symbol, typically one declared outside the manifests
    pub fn with_symbol(mut self, symbol: TypeSymbol) -> Self {
        self.insert(symbol);
        self
    }

    pub fn insert(&mut self, symbol: TypeSymbol) {
        self.symbols
            .insert((symbol.full_name(), symbol.arity), symbol);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn resolve_base_class(&self, decl: &TypeDecl, scope: &NameScope) -> Option<(String, usize)> {
        if !decl.kind.can_be_base_class() {
            return None;
        }

        decl.base_list.iter().find_map(|entry| {
            let ty = parse_type(entry).ok()?;
            let symbol = self.resolve_type_ref(&ty, scope)?;
            symbol
                .kind
                .can_be_base_class()
                .then(|| (symbol.full_name(), symbol.arity))
        })
    }
}

impl SemanticModel for InMemoryModel {
    fn lookup(&self, full_name: &str, arity: usize) -> Option<&TypeSymbol> {
        self.symbols.get(&(full_name.to_string(), arity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{EventDecl, MethodDecl, ParameterDecl};

    fn unit(usings: &[&str], types: Vec<TypeDecl>) -> CompilationUnit {
        CompilationUnit {
            path: None,
            usings: usings.iter().map(|u| u.to_string()).collect(),
            types,
        }
    }

    fn class(namespace: &str, name: &str, bases: &[&str]) -> TypeDecl {
        let mut decl = TypeDecl::new(Some(namespace), name, TypeKind::Class);
        decl.base_list = bases.iter().map(|b| b.to_string()).collect();
        decl
    }

    #[test]
    fn test_resolve_through_containing_namespaces() {
        let model = InMemoryModel::new()
            .with_symbol(TypeSymbol::new(Some("Outer"), "Helper", TypeKind::Class));

        let scope = NameScope::new(Some("Outer.Inner.Deep"), &[]);
        let symbol = model
            .resolve_type("Helper", 0, &scope)
            .expect("Helper should resolve");
        assert_eq!(symbol.full_name(), "Outer.Helper");
    }

    #[test]
    fn test_resolve_through_usings_and_global() {
        let model = InMemoryModel::new()
            .with_symbol(TypeSymbol::new(Some("NamespaceB"), "Gen", TypeKind::Class).with_arity(1))
            .with_symbol(TypeSymbol::new(None, "Loose", TypeKind::Struct));

        let scope = NameScope::new(Some("App"), &["NamespaceB".to_string()]);
        assert!(model.resolve_type("Gen", 1, &scope).is_some());
        assert!(model.resolve_type("Gen", 0, &scope).is_none());
        assert!(model.resolve_type("Loose", 0, &scope).is_some());
        assert!(model.resolve_type("NamespaceB.Gen", 1, &scope).is_some());
    }

    #[test]
    fn test_metadata_name_arity() {
        let model = InMemoryModel::new()
            .with_symbol(TypeSymbol::new(Some("Lib"), "Box", TypeKind::Class).with_arity(1));

        assert!(model.type_by_metadata_name("Lib.Box`1").is_some());
        assert!(model.type_by_metadata_name("Lib.Box").is_none());
        assert!(model.type_by_metadata_name("Lib.Box`x").is_none());
    }

    #[test]
    fn test_base_chain_from_units() {
        let mut base = class("Models", "Base", &[]);
        base.events.push(EventDecl {
            name: "PropertyChanged".to_string(),
            type_name: "PropertyChangedEventHandler?".to_string(),
        });
        base.methods.push(MethodDecl {
            name: "SomethingOnPropertyChangedXYZ".to_string(),
            return_type: "void".to_string(),
            modifiers: vec![],
            parameters: vec![ParameterDecl {
                name: "name".to_string(),
                type_name: "string".to_string(),
            }],
        });

        let units = vec![
            unit(
                &[],
                vec![class("App", "SomeClass", &["Intermediate", "IDisposable"])],
            ),
            unit(&["Models"], vec![class("App", "Intermediate", &["Base"])]),
            unit(&[], vec![base]),
        ];

        let model = InMemoryModel::from_units(&units);
        let some_class = model.lookup("App.SomeClass", 0).expect("SomeClass");
        let intermediate = model.base_type(some_class).expect("Intermediate");
        assert_eq!(intermediate.full_name(), "App.Intermediate");

        let base = model.base_type(intermediate).expect("Base");
        assert_eq!(base.full_name(), "Models.Base");
        assert!(base.has_member("PropertyChanged"));
        assert!(model.base_type(base).is_none());
    }

    #[test]
    fn test_interface_is_not_a_base_class() {
        let units = vec![unit(
            &[],
            vec![
                TypeDecl::new(Some("App"), "IThing", TypeKind::Interface),
                class("App", "Thing", &["IThing"]),
            ],
        )];

        let model = InMemoryModel::from_units(&units);
        let thing = model.lookup("App.Thing", 0).expect("Thing");
        assert!(thing.base_type.is_none());
    }

    #[test]
    fn test_partial_declarations_merge_members() {
        let mut first = class("App", "Split", &[]);
        first.events.push(EventDecl {
            name: "PropertyChanged".to_string(),
            type_name: "PropertyChangedEventHandler".to_string(),
        });
        let mut second = class("App", "Split", &[]);
        second.methods.push(MethodDecl {
            name: "Refresh".to_string(),
            return_type: "void".to_string(),
            modifiers: vec![],
            parameters: vec![],
        });

        let model = InMemoryModel::from_units(&[unit(&[], vec![first]), unit(&[], vec![second])]);
        let split = model.lookup("App.Split", 0).expect("Split");
        assert_eq!(split.members.len(), 2);
        assert_eq!(split.methods().count(), 1);
    }
}
