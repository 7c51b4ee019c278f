//! Observable-property synthesis
//!
//! Turns a `ClassDescriptor` into the tree of its companion partial type:
//! the `INotifyPropertyChanged` plumbing (unless an ancestor owns it), one
//! property per decorated field and the partial hook declarations.

use crate::error::{GenerateError, GenerateResult};
use crate::model::{ClassDescriptor, FieldDescriptor, PROPERTY_CHANGED_EVENT};
use crate::namespaces::NamespaceSet;
use crate::naming::is_valid_identifier;
use crate::options::GeneratorOptions;
use crate::tree::{Accessors, CompilationUnit, Expr, Member, Parameter, Statement, TypeDeclaration};
use propforge_syntax::TypeRef;
use std::collections::HashSet;

/// Imports every observable unit starts with
pub const INFRASTRUCTURE_USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.ComponentModel",
    "System.Runtime.CompilerServices",
];

const NOTIFY_INTERFACE: &str = "INotifyPropertyChanged";
const EVENT_HANDLER_TYPE: &str = "PropertyChangedEventHandler";
const EVENT_ARGS_TYPE: &str = "PropertyChangedEventArgs";
const EVENT_DOC: &str = "Event triggered when a property changes its value";
const GLOBAL_HOOK_DOC: &str =
    "This partial method is called from all the properties generated with the 'ExtraNotify' flag";

/// Reject property names that would not compile
pub fn validate_fields(descriptor: &ClassDescriptor) -> GenerateResult<()> {
    let type_name = descriptor.qualified_name();
    let mut seen = HashSet::new();

    for field in &descriptor.fields {
        let name = &field.arguments.name;
        if !is_valid_identifier(name) || *name == descriptor.class_name {
            return Err(GenerateError::invalid_property_name(&type_name, name));
        }
        if *name == field.field_name || !seen.insert(name.as_str()) {
            return Err(GenerateError::duplicate_property(&type_name, name));
        }
    }

    Ok(())
}

/// Build the companion unit for one observable type
pub fn synthesize_observable(
    descriptor: &ClassDescriptor,
    options: &GeneratorOptions,
) -> GenerateResult<CompilationUnit> {
    validate_fields(descriptor)?;

    let mut members = Vec::new();
    if descriptor.policy.generate_event {
        members.push(event_field(options));
        members.push(trigger_method(descriptor, options));
    }

    for field in &descriptor.fields {
        members.push(property(descriptor, field));
        if let Some(hook) = field.hook_name() {
            members.push(Member::partial_method(
                Vec::new(),
                hook,
                vec![
                    Parameter::new(field.field_type.clone(), "oldValue"),
                    Parameter::new(field.field_type.clone(), "newValue"),
                ],
            ));
        }
    }

    if descriptor.has_global_hook() {
        members.push(Member::partial_method(
            vec![GLOBAL_HOOK_DOC.to_string()],
            descriptor.policy.global_partial_method_name.clone(),
            vec![Parameter::new(TypeRef::predefined("string"), "propertyName")],
        ));
    }

    Ok(CompilationUnit {
        nullable_context: options.nullable_context,
        usings: usings(descriptor),
        namespace: descriptor.namespace_name.clone(),
        declaration: TypeDeclaration {
            docs: Vec::new(),
            modifiers: descriptor.modifiers.clone(),
            kind: descriptor.kind,
            name: descriptor.class_name.clone(),
            type_parameters: descriptor.type_parameters.clone(),
            base_list: vec![NOTIFY_INTERFACE.to_string()],
            members,
        },
    })
}

fn usings(descriptor: &ClassDescriptor) -> Vec<String> {
    let mut set = NamespaceSet::new();
    for using in INFRASTRUCTURE_USINGS {
        set.insert(*using);
    }
    for field in &descriptor.fields {
        set.extend(field.required_namespaces.iter());
    }
    if let Some(namespace) = &descriptor.namespace_name {
        set.remove(namespace);
    }
    set.iter().map(str::to_string).collect()
}

fn nullable_if(ty: TypeRef, nullable_context: bool) -> TypeRef {
    if nullable_context {
        ty.nullable()
    } else {
        ty
    }
}

fn event_field(options: &GeneratorOptions) -> Member {
    Member::EventField {
        docs: vec![EVENT_DOC.to_string()],
        modifiers: vec!["public".to_string()],
        ty: nullable_if(TypeRef::named(EVENT_HANDLER_TYPE), options.nullable_context),
        name: PROPERTY_CHANGED_EVENT.to_string(),
    }
}

fn trigger_method(descriptor: &ClassDescriptor, options: &GeneratorOptions) -> Member {
    let modifiers = if descriptor.is_inheritable() {
        vec!["protected".to_string(), "virtual".to_string()]
    } else {
        vec!["private".to_string()]
    };

    let parameter = Parameter::new(
        nullable_if(TypeRef::predefined("string"), options.nullable_context),
        "propertyName",
    )
    .with_attribute("CallerMemberName")
    .with_default(Expr::Null);

    let raise = Statement::Expression(Expr::ConditionalInvoke {
        target: Box::new(Expr::ident(PROPERTY_CHANGED_EVENT)),
        method: "Invoke".to_string(),
        args: vec![
            Expr::This,
            Expr::New {
                ty: TypeRef::named(EVENT_ARGS_TYPE),
                args: vec![Expr::ident("propertyName")],
            },
        ],
    });

    Member::Method {
        docs: Vec::new(),
        modifiers,
        return_type: TypeRef::predefined("void"),
        name: descriptor.policy.trigger_method_name.clone(),
        parameters: vec![parameter],
        body: Some(vec![raise]),
    }
}

/// Setter body: guard, capture, assign, trigger, per-field hook, global hook
pub fn setter_body(descriptor: &ClassDescriptor, field: &FieldDescriptor) -> Vec<Statement> {
    let backing = field.field_name.as_str();
    let property_name = field.arguments.name.as_str();
    let hook = field.hook_name();
    let mut body = Vec::new();

    if field.arguments.compare_values {
        body.push(Statement::If {
            condition: Expr::equals(Expr::ident(backing), Expr::ident("value")),
            then: Box::new(Statement::Return),
        });
    }

    if hook.is_some() {
        body.push(Statement::LocalVar {
            name: "oldValue".to_string(),
            value: Expr::ident(backing),
        });
    }

    body.push(Statement::assign(backing, Expr::ident("value")));

    // an inherited trigger may not have a caller-name default
    let trigger_args = if descriptor.policy.generate_event {
        Vec::new()
    } else {
        vec![Expr::string(property_name)]
    };
    body.push(Statement::call(
        descriptor.policy.trigger_method_name.clone(),
        trigger_args,
    ));

    if let Some(hook) = hook {
        body.push(Statement::call(
            hook,
            vec![Expr::ident("oldValue"), Expr::ident(backing)],
        ));
        if descriptor.has_global_hook() {
            body.push(Statement::call(
                descriptor.policy.global_partial_method_name.clone(),
                vec![Expr::string(property_name)],
            ));
        }
    }

    body
}

fn property(descriptor: &ClassDescriptor, field: &FieldDescriptor) -> Member {
    Member::Property {
        docs: field.comments.clone(),
        modifiers: vec!["public".to_string()],
        ty: field.field_type.clone(),
        name: field.arguments.name.clone(),
        accessors: Accessors::Backed {
            field: field.field_name.clone(),
            setter: setter_body(descriptor, field),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::PropertyArguments;
    use crate::options::LineEnding;
    use crate::printer::print_unit;
    use propforge_syntax::TypeKind;

    fn field(
        name: &str,
        property: &str,
        extra_notify: bool,
        compare_values: bool,
    ) -> FieldDescriptor {
        FieldDescriptor {
            field_name: name.to_string(),
            field_type: TypeRef::predefined("int"),
            comments: Vec::new(),
            arguments: PropertyArguments {
                name: property.to_string(),
                extra_notify,
                compare_values,
            },
            required_namespaces: NamespaceSet::new(),
        }
    }

    fn descriptor(fields: Vec<FieldDescriptor>) -> ClassDescriptor {
        let mut descriptor = ClassDescriptor::new(Some("App"), "Vm", TypeKind::Class);
        descriptor.fields = fields;
        descriptor
    }

    fn print_setter(statements: &[Statement]) -> Vec<String> {
        let unit = CompilationUnit {
            nullable_context: false,
            usings: Vec::new(),
            namespace: None,
            declaration: TypeDeclaration {
                docs: Vec::new(),
                modifiers: Vec::new(),
                kind: TypeKind::Class,
                name: "T".to_string(),
                type_parameters: Vec::new(),
                base_list: Vec::new(),
                members: vec![Member::Constructor {
                    docs: Vec::new(),
                    modifiers: Vec::new(),
                    name: "T".to_string(),
                    parameters: Vec::new(),
                    body: statements.to_vec(),
                }],
            },
        };
        print_unit(&unit, LineEnding::Lf)
            .lines()
            .map(str::trim)
            .filter(|line| !matches!(*line, "{" | "}" | "class T" | "T()"))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_status_setter_order() {
        let vm = descriptor(vec![field("_status", "Status", true, true)]);
        let lines = print_setter(&setter_body(&vm, &vm.fields[0]));
        assert_eq!(
            lines,
            vec![
                "if (_status == value) return;",
                "var oldValue = _status;",
                "_status = value;",
                "OnPropertyChanged();",
                "OnStatusChanged(oldValue, _status);",
                "OnOnePropertyHasChanged(\"Status\");",
            ]
        );
    }

    #[test]
    fn test_plain_setter() {
        let vm = descriptor(vec![field("_count", "Count", false, false)]);
        let lines = print_setter(&setter_body(&vm, &vm.fields[0]));
        assert_eq!(lines, vec!["_count = value;", "OnPropertyChanged();"]);
    }

    #[test]
    fn test_inherited_trigger_receives_property_name() {
        let mut vm = descriptor(vec![field("_count", "Count", false, false)]);
        vm.policy.generate_event = false;
        vm.policy.trigger_method_name = "RaisePropertyChanged".to_string();
        let lines = print_setter(&setter_body(&vm, &vm.fields[0]));
        assert_eq!(lines, vec!["_count = value;", "RaisePropertyChanged(\"Count\");"]);
    }

    #[test]
    fn test_suppressed_global_hook_is_not_called() {
        let mut vm = descriptor(vec![field("_a", "A", true, false)]);
        vm.policy.global_partial_method_name.clear();
        let lines = print_setter(&setter_body(&vm, &vm.fields[0]));
        assert_eq!(lines.last().map(String::as_str), Some("OnAChanged(oldValue, _a);"));

        let unit = synthesize_observable(&vm, &GeneratorOptions::default()).expect("unit");
        let hooks = unit
            .declaration
            .members
            .iter()
            .filter(|m| matches!(m, Member::Method { body: None, .. }))
            .count();
        assert_eq!(hooks, 1);
    }

    #[test]
    fn test_event_members_follow_policy() {
        let mut vm = descriptor(vec![field("_a", "A", false, false)]);
        let unit = synthesize_observable(&vm, &GeneratorOptions::default()).expect("unit");
        assert!(matches!(unit.declaration.members[0], Member::EventField { .. }));

        vm.policy.generate_event = false;
        let unit = synthesize_observable(&vm, &GeneratorOptions::default()).expect("unit");
        assert!(matches!(unit.declaration.members[0], Member::Property { .. }));
    }

    #[test]
    fn test_sealed_type_gets_private_trigger() {
        let mut vm = descriptor(vec![field("_a", "A", false, false)]);
        vm.add_modifiers(&["sealed".to_string()]);
        let unit = synthesize_observable(&vm, &GeneratorOptions::default()).expect("unit");
        match &unit.declaration.members[1] {
            Member::Method { modifiers, .. } => assert_eq!(modifiers, &vec!["private".to_string()]),
            other => panic!("expected trigger method, got {:?}", other),
        }
    }

    #[test]
    fn test_own_namespace_removed_from_usings() {
        let mut vm = descriptor(vec![field("_a", "A", false, false)]);
        vm.fields[0].required_namespaces.insert("App");
        vm.fields[0].required_namespaces.insert("App.Models");
        vm.fields[0].required_namespaces.insert("System");
        assert_eq!(
            usings(&vm),
            vec![
                "System",
                "System.Collections.Generic",
                "System.ComponentModel",
                "System.Runtime.CompilerServices",
                "App.Models",
            ]
        );
    }

    #[test]
    fn test_invalid_and_duplicate_names() {
        let vm = descriptor(vec![field("_a", "has space", false, false)]);
        assert!(matches!(
            validate_fields(&vm),
            Err(GenerateError::InvalidPropertyName { .. })
        ));

        let vm = descriptor(vec![field("_a", "Vm", false, false)]);
        assert!(matches!(
            validate_fields(&vm),
            Err(GenerateError::InvalidPropertyName { .. })
        ));

        let vm = descriptor(vec![field("_a", "A", false, false), field("_b", "A", false, false)]);
        assert!(matches!(
            validate_fields(&vm),
            Err(GenerateError::DuplicateProperty { .. })
        ));

        let vm = descriptor(vec![field("A", "A", false, false)]);
        assert!(validate_fields(&vm).is_err());
    }
}
