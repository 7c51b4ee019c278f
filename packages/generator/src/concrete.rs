//! Concrete types synthesized from an interface

use crate::arguments::ConcreteArguments;
use crate::error::{GenerateError, GenerateResult};
use crate::model::{ConcreteDescriptor, PropertyDescriptor};
use crate::namespaces::{resolve_namespaces, NamespaceSet};
use crate::naming::parameter_names;
use crate::options::GeneratorOptions;
use crate::tree::{
    Accessors, CompilationUnit, Expr, Member, Parameter, SetterKind, Statement, TypeDeclaration,
};
use propforge_syntax::{parse_type, MemberSymbol, NameScope, SemanticModel, TypeRef, TypeSymbol};

/// `System` value types a manifest rarely declares
const WELL_KNOWN_VALUE_TYPES: &[&str] = &[
    "Boolean", "Byte", "SByte", "Char", "Decimal", "Double", "Single", "Int16", "UInt16",
    "Int32", "UInt32", "Int64", "UInt64", "IntPtr", "UIntPtr", "DateTime", "DateTimeOffset",
    "DateOnly", "TimeOnly", "TimeSpan", "Guid",
];

/// Whether `ty` has reference semantics. Names the model cannot resolve are
/// treated as references unless they are well-known `System` structs.
pub fn is_reference_type<M: SemanticModel + ?Sized>(
    ty: &TypeRef,
    model: &M,
    scope: &NameScope,
) -> bool {
    match ty {
        TypeRef::Predefined(_) => ty.is_predefined_reference(),
        TypeRef::Named { name, type_args } => {
            match model.resolve_type(name, type_args.len(), scope) {
                Some(symbol) => symbol.is_reference_type(),
                None => {
                    let simple = name.strip_prefix("System.").unwrap_or(name);
                    !(type_args.is_empty() && WELL_KNOWN_VALUE_TYPES.contains(&simple))
                }
            }
        }
        TypeRef::Array { .. } => true,
        TypeRef::Tuple(_)
        | TypeRef::Nullable(_)
        | TypeRef::Pointer(_)
        | TypeRef::FunctionPointer { .. } => false,
    }
}

/// Apply the nullability flags to a mirrored property type
pub fn apply_nullability(
    ty: TypeRef,
    is_reference: bool,
    arguments: &ConcreteArguments,
    nullable_context: bool,
) -> TypeRef {
    if ty.is_nullable() {
        return ty;
    }
    let wrap = if is_reference {
        arguments.make_reference_types_nullable && nullable_context
    } else {
        arguments.make_value_types_nullable
    };
    if wrap {
        ty.nullable()
    } else {
        ty
    }
}

/// Mirror the interface's own properties, in declaration order
pub fn describe_properties<M: SemanticModel + ?Sized>(
    interface: &TypeSymbol,
    model: &M,
    arguments: &ConcreteArguments,
    options: &GeneratorOptions,
) -> GenerateResult<Vec<PropertyDescriptor>> {
    let scope = interface.scope();
    let mut properties = Vec::new();

    for member in interface.properties() {
        let MemberSymbol::Property {
            name,
            type_name,
            has_setter,
        } = member
        else {
            continue;
        };

        let parsed =
            parse_type(type_name).map_err(|e| GenerateError::invalid_type(type_name.clone(), e))?;
        let required_namespaces = resolve_namespaces(&parsed, model, &scope);
        let is_reference = is_reference_type(&parsed, model, &scope);

        properties.push(PropertyDescriptor {
            property_name: name.clone(),
            property_type: apply_nullability(
                parsed,
                is_reference,
                arguments,
                options.nullable_context,
            ),
            read_only: !has_setter,
            required_namespaces,
        });
    }

    Ok(properties)
}

/// A generic interface named by its metadata name carries no type
/// arguments, so it cannot be written in the base list
pub fn check_interface_base(
    descriptor: &ConcreteDescriptor,
    interface: &TypeSymbol,
) -> GenerateResult<()> {
    if descriptor.arguments.implement_interface && interface.arity > 0 {
        return Err(GenerateError::GenericInterfaceBase {
            type_name: descriptor.full_name(),
            interface: interface.full_name(),
        });
    }
    Ok(())
}

/// Setter of a mirrored property
pub fn setter_kind(descriptor: &ConcreteDescriptor, property: &PropertyDescriptor) -> SetterKind {
    let arguments = &descriptor.arguments;
    if property.read_only
        && arguments.make_setters_private
        && arguments.generate_initializing_constructor
        && !descriptor.properties.is_empty()
    {
        SetterKind::None
    } else if arguments.make_setters_private {
        SetterKind::Private
    } else {
        SetterKind::Public
    }
}

/// Build the unit for one concrete type
pub fn synthesize_concrete(
    descriptor: &ConcreteDescriptor,
    options: &GeneratorOptions,
) -> CompilationUnit {
    let mut members = Vec::new();

    if descriptor.arguments.generate_initializing_constructor && !descriptor.properties.is_empty() {
        members.push(constructor(descriptor));
    }

    for property in &descriptor.properties {
        members.push(Member::Property {
            docs: vec![format!(
                "Implements {}.{}",
                descriptor.mocking_type_name, property.property_name
            )],
            modifiers: vec!["public".to_string()],
            ty: property.property_type.clone(),
            name: property.property_name.clone(),
            accessors: Accessors::Auto {
                setter: setter_kind(descriptor, property),
            },
        });
    }

    let base_list = if descriptor.arguments.implement_interface {
        vec![descriptor.mocking_type_name.clone()]
    } else {
        Vec::new()
    };

    CompilationUnit {
        nullable_context: options.nullable_context,
        usings: usings(descriptor),
        namespace: descriptor.namespace_name.clone(),
        declaration: TypeDeclaration {
            docs: Vec::new(),
            modifiers: descriptor.modifiers.clone(),
            kind: descriptor.kind,
            name: descriptor.type_name.clone(),
            type_parameters: descriptor.type_parameters.clone(),
            base_list,
            members,
        },
    }
}

fn usings(descriptor: &ConcreteDescriptor) -> Vec<String> {
    let mut set = NamespaceSet::new();
    set.extend(descriptor.namespaces.iter());
    for property in &descriptor.properties {
        set.extend(property.required_namespaces.iter());
    }
    if let Some(namespace) = &descriptor.namespace_name {
        set.remove(namespace);
    }
    set.iter().map(str::to_string).collect()
}

fn constructor(descriptor: &ConcreteDescriptor) -> Member {
    let names = parameter_names(
        descriptor
            .properties
            .iter()
            .map(|property| property.property_name.as_str()),
    );

    let (parameters, body) = descriptor
        .properties
        .iter()
        .zip(names)
        .map(|(property, parameter)| {
            (
                Parameter::new(property.property_type.clone(), parameter.clone()),
                Statement::assign(property.property_name.clone(), Expr::ident(parameter)),
            )
        })
        .unzip();

    Member::Constructor {
        docs: Vec::new(),
        modifiers: vec!["public".to_string()],
        name: descriptor.type_name.clone(),
        parameters,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propforge_syntax::{InMemoryModel, TypeKind};

    fn model() -> InMemoryModel {
        InMemoryModel::new()
            .with_symbol(TypeSymbol::new(Some("Lib.Models"), "Address", TypeKind::Class))
            .with_symbol(TypeSymbol::new(Some("Lib.Models"), "Point", TypeKind::Struct))
    }

    fn scope() -> NameScope {
        NameScope::new(Some("Lib"), &["Lib.Models".to_string()])
    }

    #[test]
    fn test_reference_classification() {
        let model = model();
        let scope = scope();
        let check = |text: &str| is_reference_type(&parse_type(text).expect("type"), &model, &scope);

        assert!(check("string"));
        assert!(check("object"));
        assert!(!check("int"));
        assert!(check("Address"));
        assert!(!check("Point"));
        assert!(check("int[]"));
        assert!(!check("(int, string)"));
        assert!(!check("DateTime"));
        assert!(!check("System.Guid"));
        assert!(check("Unknown"));
    }

    #[test]
    fn test_nullability_flags() {
        let arguments = ConcreteArguments {
            make_reference_types_nullable: true,
            ..Default::default()
        };
        let string = TypeRef::predefined("string");
        assert_eq!(
            apply_nullability(string.clone(), true, &arguments, true).to_string(),
            "string?"
        );
        assert_eq!(
            apply_nullability(string, true, &arguments, false).to_string(),
            "string"
        );
        assert_eq!(
            apply_nullability(TypeRef::predefined("int"), false, &arguments, true).to_string(),
            "int"
        );

        let arguments = ConcreteArguments {
            make_value_types_nullable: true,
            ..Default::default()
        };
        let already = TypeRef::predefined("int").nullable();
        assert_eq!(
            apply_nullability(already, false, &arguments, true).to_string(),
            "int?"
        );
    }

    #[test]
    fn test_setter_kinds() {
        let read_only = PropertyDescriptor {
            property_name: "Id".to_string(),
            property_type: TypeRef::predefined("int"),
            read_only: true,
            required_namespaces: NamespaceSet::new(),
        };
        let writable = PropertyDescriptor {
            read_only: false,
            ..read_only.clone()
        };

        let mut descriptor = ConcreteDescriptor::new(
            Some("App"),
            "Person",
            TypeKind::Class,
            ConcreteArguments {
                make_setters_private: true,
                ..Default::default()
            },
        );
        descriptor.properties = vec![read_only.clone(), writable.clone()];
        assert_eq!(setter_kind(&descriptor, &read_only), SetterKind::None);
        assert_eq!(setter_kind(&descriptor, &writable), SetterKind::Private);

        descriptor.arguments.generate_initializing_constructor = false;
        assert_eq!(setter_kind(&descriptor, &read_only), SetterKind::Private);

        descriptor.arguments.make_setters_private = false;
        assert_eq!(setter_kind(&descriptor, &read_only), SetterKind::Public);
    }

    #[test]
    fn test_constructor_omitted_without_properties() {
        let descriptor = ConcreteDescriptor::new(
            Some("App"),
            "Empty",
            TypeKind::Class,
            ConcreteArguments::default(),
        );
        let unit = synthesize_concrete(&descriptor, &GeneratorOptions::default());
        assert!(unit.declaration.members.is_empty());
        assert!(unit.declaration.base_list.is_empty());
    }

    #[test]
    fn test_describe_properties() {
        let model = model();
        let interface = TypeSymbol::new(Some("Lib"), "IPerson", TypeKind::Interface)
            .with_usings(&["Lib.Models"])
            .with_member(MemberSymbol::Property {
                name: "Home".to_string(),
                type_name: "Address".to_string(),
                has_setter: false,
            })
            .with_member(MemberSymbol::Property {
                name: "Age".to_string(),
                type_name: "int".to_string(),
                has_setter: true,
            })
            .with_method("Greet", "void", &[]);

        let arguments = ConcreteArguments {
            make_reference_types_nullable: true,
            ..Default::default()
        };
        let properties =
            describe_properties(&interface, &model, &arguments, &GeneratorOptions::default())
                .expect("properties");

        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].property_type.to_string(), "Address?");
        assert!(properties[0].read_only);
        assert!(properties[0].required_namespaces.contains("Lib.Models"));
        assert_eq!(properties[1].property_type.to_string(), "int");
        assert!(!properties[1].read_only);
    }

    #[test]
    fn test_unparseable_property_type() {
        let interface = TypeSymbol::new(Some("Lib"), "IBroken", TypeKind::Interface).with_member(
            MemberSymbol::Property {
                name: "Bad".to_string(),
                type_name: "List<".to_string(),
                has_setter: true,
            },
        );
        let result = describe_properties(
            &interface,
            &model(),
            &ConcreteArguments::default(),
            &GeneratorOptions::default(),
        );
        assert!(matches!(result, Err(GenerateError::InvalidType { .. })));
    }
}
