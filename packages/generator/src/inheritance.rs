//! Inheritance analysis
//!
//! Decides, per decorated type, whether the change-notification event has to
//! be generated, which method raises it, and whether the global hook may be
//! declared. A chain must end up with exactly one definition of each.

use crate::error::{GenerateError, GenerateResult};
use crate::model::{EventPolicy, DEFAULT_TRIGGER_METHOD, PROPERTY_CHANGED_EVENT};
use propforge_syntax::{parse_type, MemberSymbol, SemanticModel, TypeRef, TypeSymbol};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Ancestors of `symbol`, nearest first
pub fn ancestor_chain<M: SemanticModel + ?Sized>(
    model: &M,
    symbol: &TypeSymbol,
) -> GenerateResult<Vec<TypeSymbol>> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    seen.insert(symbol.full_name());

    let mut current = model.base_type(symbol);
    while let Some(base) = current {
        if !seen.insert(base.full_name()) {
            return Err(GenerateError::BaseTypeCycle {
                type_name: symbol.full_name(),
            });
        }
        chain.push(base.clone());
        current = model.base_type(base);
    }

    Ok(chain)
}

/// Ancestor chains memoised for the lifetime of one batch
#[derive(Debug, Default)]
pub struct AncestorChains {
    cache: HashMap<(String, usize), Vec<TypeSymbol>>,
}

impl AncestorChains {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain<M: SemanticModel + ?Sized>(
        &mut self,
        model: &M,
        symbol: &TypeSymbol,
    ) -> GenerateResult<&[TypeSymbol]> {
        let key = (symbol.full_name(), symbol.arity);
        if !self.cache.contains_key(&key) {
            let chain = ancestor_chain(model, symbol)?;
            self.cache.insert(key.clone(), chain);
        }
        Ok(self.cache.get(&key).map(Vec::as_slice).unwrap_or(&[]))
    }
}

/// `string`, `string?`, `String` or `System.String`
fn is_string_type(type_name: &str) -> bool {
    match parse_type(type_name) {
        Ok(TypeRef::Nullable(inner)) => inner.is_string(),
        Ok(ty) => ty.is_string(),
        Err(_) => false,
    }
}

fn is_void(type_name: &str) -> bool {
    matches!(parse_type(type_name), Ok(TypeRef::Predefined(name)) if name == "void")
        || type_name.trim() == "System.Void"
}

/// A method that can raise the event: name contains `PropertyChanged`, one string parameter
fn is_trigger_candidate(member: &MemberSymbol) -> bool {
    match member {
        MemberSymbol::Method {
            name, parameters, ..
        } => {
            name.contains(PROPERTY_CHANGED_EVENT)
                && parameters.len() == 1
                && is_string_type(&parameters[0])
        }
        _ => false,
    }
}

/// `void <hook>(string)`
fn is_global_hook(member: &MemberSymbol, hook_name: &str) -> bool {
    match member {
        MemberSymbol::Method {
            name,
            return_type,
            parameters,
        } => {
            name == hook_name
                && is_void(return_type)
                && parameters.len() == 1
                && is_string_type(&parameters[0])
        }
        _ => false,
    }
}

/// Trigger method to call when the event is inherited. Candidates are taken
/// from the ancestor declaring the event and then further up the chain;
/// `OnPropertyChanged` wins over any other candidate.
pub fn find_trigger_method(chain: &[TypeSymbol]) -> Option<&str> {
    let declaring = chain
        .iter()
        .position(|ancestor| ancestor.has_member(PROPERTY_CHANGED_EVENT))?;

    let candidates: Vec<&str> = chain[declaring..]
        .iter()
        .flat_map(|ancestor| ancestor.methods())
        .filter(|member| is_trigger_candidate(member))
        .map(MemberSymbol::name)
        .collect();

    candidates
        .iter()
        .find(|name| **name == DEFAULT_TRIGGER_METHOD)
        .or_else(|| candidates.first())
        .copied()
}

/// Event policy of a type from its ancestor chain alone
pub fn analyze_chain(chain: &[TypeSymbol], global_hook_name: &str) -> EventPolicy {
    let mut policy = EventPolicy::new(global_hook_name);

    let has_event = chain
        .iter()
        .any(|ancestor| ancestor.has_member(PROPERTY_CHANGED_EVENT));

    if has_event {
        policy.generate_event = false;
        match find_trigger_method(chain) {
            Some(trigger) => policy.trigger_method_name = trigger.to_string(),
            None => {
                debug!(
                    "Inherited event without a matching trigger method, assuming {}",
                    DEFAULT_TRIGGER_METHOD
                );
            }
        }
    }

    if !global_hook_name.is_empty()
        && chain.iter().any(|ancestor| {
            ancestor
                .methods()
                .any(|member| is_global_hook(member, global_hook_name))
        })
    {
        policy.global_partial_method_name.clear();
    }

    policy
}

/// Policy of a type whose nearest decorated ancestor in the same batch
/// generates the event and the hook
pub fn inherit_from_batch_ancestor(ancestor: &EventPolicy) -> EventPolicy {
    EventPolicy {
        generate_event: false,
        trigger_method_name: ancestor.trigger_method_name.clone(),
        global_partial_method_name: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propforge_syntax::{InMemoryModel, TypeKind};

    fn chain_model(base: TypeSymbol) -> InMemoryModel {
        InMemoryModel::new()
            .with_symbol(
                TypeSymbol::new(Some("App"), "SomeClass", TypeKind::Class)
                    .with_base("App.Intermediate", 0),
            )
            .with_symbol(
                TypeSymbol::new(Some("App"), "Intermediate", TypeKind::Class)
                    .with_base("App.Base", 0),
            )
            .with_symbol(base)
    }

    fn policy_of(model: &InMemoryModel) -> EventPolicy {
        let some_class = model.lookup("App.SomeClass", 0).expect("SomeClass");
        let chain = ancestor_chain(model, some_class).expect("acyclic");
        analyze_chain(&chain, "OnOnePropertyHasChanged")
    }

    #[test]
    fn test_inherited_event_uses_ancestor_trigger() {
        let model = chain_model(
            TypeSymbol::new(Some("App"), "Base", TypeKind::Class)
                .with_event("PropertyChanged", "PropertyChangedEventHandler?")
                .with_method("SomethingOnPropertyChangedXYZ", "void", &["string"]),
        );

        let policy = policy_of(&model);
        assert!(!policy.generate_event);
        assert_eq!(policy.trigger_method_name, "SomethingOnPropertyChangedXYZ");
    }

    #[test]
    fn test_absent_event_is_generated() {
        let model = chain_model(TypeSymbol::new(Some("App"), "Base", TypeKind::Class));

        let policy = policy_of(&model);
        assert!(policy.generate_event);
        assert_eq!(policy.trigger_method_name, "OnPropertyChanged");
        assert_eq!(policy.global_partial_method_name, "OnOnePropertyHasChanged");
    }

    #[test]
    fn test_canonical_trigger_preferred() {
        let model = chain_model(
            TypeSymbol::new(Some("App"), "Base", TypeKind::Class)
                .with_event("PropertyChanged", "PropertyChangedEventHandler")
                .with_method("RaisePropertyChanged", "void", &["string"])
                .with_method("OnPropertyChanged", "void", &["string?"]),
        );
        assert_eq!(policy_of(&model).trigger_method_name, "OnPropertyChanged");
    }

    #[test]
    fn test_candidates_need_one_string_parameter() {
        let model = chain_model(
            TypeSymbol::new(Some("App"), "Base", TypeKind::Class)
                .with_event("PropertyChanged", "PropertyChangedEventHandler")
                .with_method("OnPropertyChanged", "void", &["PropertyChangedEventArgs"])
                .with_method("NotifyPropertyChanged", "void", &["string", "bool"])
                .with_method("RaisePropertyChanged", "void", &["System.String"]),
        );
        assert_eq!(policy_of(&model).trigger_method_name, "RaisePropertyChanged");
    }

    #[test]
    fn test_event_without_trigger_falls_back_to_canonical_name() {
        let model = chain_model(
            TypeSymbol::new(Some("App"), "Base", TypeKind::Class)
                .with_event("PropertyChanged", "PropertyChangedEventHandler"),
        );
        let policy = policy_of(&model);
        assert!(!policy.generate_event);
        assert_eq!(policy.trigger_method_name, "OnPropertyChanged");
    }

    #[test]
    fn test_declared_global_hook_is_suppressed() {
        let model = chain_model(
            TypeSymbol::new(Some("App"), "Base", TypeKind::Class)
                .with_method("OnOnePropertyHasChanged", "void", &["string"]),
        );
        let policy = policy_of(&model);
        assert!(policy.generate_event);
        assert!(policy.global_partial_method_name.is_empty());

        // a non-void overload does not count
        let model = chain_model(
            TypeSymbol::new(Some("App"), "Base", TypeKind::Class)
                .with_method("OnOnePropertyHasChanged", "bool", &["string"]),
        );
        assert_eq!(
            policy_of(&model).global_partial_method_name,
            "OnOnePropertyHasChanged"
        );
    }

    #[test]
    fn test_no_base_type() {
        let model = InMemoryModel::new()
            .with_symbol(TypeSymbol::new(Some("App"), "Root", TypeKind::Class));
        let root = model.lookup("App.Root", 0).expect("Root");
        let chain = ancestor_chain(&model, root).expect("acyclic");
        assert!(chain.is_empty());
        assert!(analyze_chain(&chain, "OnOnePropertyHasChanged").generate_event);
    }

    #[test]
    fn test_cycle_is_an_error() {
        let model = InMemoryModel::new()
            .with_symbol(TypeSymbol::new(Some("App"), "A", TypeKind::Class).with_base("App.B", 0))
            .with_symbol(TypeSymbol::new(Some("App"), "B", TypeKind::Class).with_base("App.A", 0));
        let a = model.lookup("App.A", 0).expect("A");
        assert!(matches!(
            ancestor_chain(&model, a),
            Err(GenerateError::BaseTypeCycle { .. })
        ));
    }

    #[test]
    fn test_chains_are_memoised() {
        let model = chain_model(TypeSymbol::new(Some("App"), "Base", TypeKind::Class));
        let some_class = model.lookup("App.SomeClass", 0).expect("SomeClass");

        let mut chains = AncestorChains::new();
        let names: Vec<String> = chains
            .chain(&model, some_class)
            .expect("acyclic")
            .iter()
            .map(TypeSymbol::full_name)
            .collect();
        assert_eq!(names, vec!["App.Intermediate", "App.Base"]);
        assert_eq!(chains.chain(&model, some_class).expect("cached").len(), 2);
    }
}
