//! Namespaces a type reference depends on

use propforge_syntax::{NameScope, SemanticModel, TypeRef};

/// Insertion-ordered set of namespaces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceSet {
    items: Vec<String>,
}

impl NamespaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the namespace was already present
    pub fn insert(&mut self, namespace: impl Into<String>) -> bool {
        let namespace = namespace.into();
        if namespace.is_empty() || self.contains(&namespace) {
            return false;
        }
        self.items.push(namespace);
        true
    }

    pub fn extend<I, S>(&mut self, namespaces: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for namespace in namespaces {
            self.insert(namespace);
        }
    }

    pub fn remove(&mut self, namespace: &str) {
        self.items.retain(|item| item != namespace);
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.items.iter().any(|item| item == namespace)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Collect every namespace needed to reference `ty` from `scope`, in
/// first-seen order
pub fn resolve_namespaces<M: SemanticModel + ?Sized>(
    ty: &TypeRef,
    model: &M,
    scope: &NameScope,
) -> NamespaceSet {
    let mut namespaces = NamespaceSet::new();
    collect_namespaces(ty, model, scope, &mut namespaces);
    namespaces
}

pub fn collect_namespaces<M: SemanticModel + ?Sized>(
    ty: &TypeRef,
    model: &M,
    scope: &NameScope,
    namespaces: &mut NamespaceSet,
) {
    match ty {
        TypeRef::Predefined(_) => {}
        TypeRef::Named { name, type_args } => {
            if let Some(ns) = model
                .resolve_type(name, type_args.len(), scope)
                .and_then(|symbol| symbol.namespace.as_deref())
            {
                namespaces.insert(ns);
            }
            for arg in type_args {
                collect_namespaces(arg, model, scope, namespaces);
            }
        }
        TypeRef::Array { element, .. } => collect_namespaces(element, model, scope, namespaces),
        TypeRef::Tuple(elements) => {
            for element in elements {
                collect_namespaces(&element.ty, model, scope, namespaces);
            }
        }
        TypeRef::Nullable(inner) | TypeRef::Pointer(inner) => {
            collect_namespaces(inner, model, scope, namespaces)
        }
        // parameters include the return type
        TypeRef::FunctionPointer { parameters, .. } => {
            for parameter in parameters {
                collect_namespaces(parameter, model, scope, namespaces);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propforge_syntax::{parse_type, InMemoryModel, TypeKind, TypeSymbol};

    fn model() -> InMemoryModel {
        InMemoryModel::new()
            .with_symbol(TypeSymbol::new(Some("NamespaceB"), "Gen", TypeKind::Class).with_arity(1))
            .with_symbol(TypeSymbol::new(Some("NamespaceA1"), "A1", TypeKind::Class))
            .with_symbol(TypeSymbol::new(
                Some("NamespaceA1.NamespaceA2"),
                "A2",
                TypeKind::Struct,
            ))
    }

    fn scope() -> NameScope {
        NameScope::new(
            Some("App"),
            &[
                "NamespaceA1".to_string(),
                "NamespaceA1.NamespaceA2".to_string(),
                "NamespaceB".to_string(),
            ],
        )
    }

    fn resolve(source: &str) -> Vec<String> {
        let ty = parse_type(source).expect("type parses");
        resolve_namespaces(&ty, &model(), &scope())
            .iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_generic_tuple_namespaces_in_first_seen_order() {
        assert_eq!(
            resolve("Gen<Gen<(A1, A2)>>"),
            vec!["NamespaceB", "NamespaceA1", "NamespaceA1.NamespaceA2"]
        );
    }

    #[test]
    fn test_predefined_types_need_nothing() {
        assert!(resolve("int").is_empty());
        assert!(resolve("int[]").is_empty());
        assert!(resolve("(int, string)?").is_empty());
    }

    #[test]
    fn test_function_pointer_includes_return_type() {
        assert_eq!(
            resolve("delegate*<A1?, A2[]>"),
            vec!["NamespaceA1", "NamespaceA1.NamespaceA2"]
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let ty = parse_type("Gen<A2>[]").expect("type parses");
        let first = resolve_namespaces(&ty, &model(), &scope());
        let second = resolve_namespaces(&ty, &model(), &scope());
        assert_eq!(first, second);
    }

    #[test]
    fn test_unresolved_names_are_skipped() {
        assert_eq!(resolve("Missing<A1>"), vec!["NamespaceA1"]);
    }

    #[test]
    fn test_set_ignores_duplicates_and_empty() {
        let mut set = NamespaceSet::new();
        assert!(set.insert("System"));
        assert!(!set.insert("System"));
        assert!(!set.insert(""));
        set.extend(["Models", "System"]);
        set.remove("System");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Models"]);
    }
}
