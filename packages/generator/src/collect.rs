//! Builds the declaration model by walking compilation units

use crate::comments::extract_comments;
use crate::marker::{find_concrete_marker, find_property_marker};
use crate::model::{qualified_name, ClassDescriptor, ConcreteDescriptor, FieldDescriptor, Registry};
use crate::namespaces::NamespaceSet;
use propforge_syntax::{parse_type, CompilationUnit, TypeDecl, TypeKind};
use tracing::{debug, warn};

/// Kinds that can receive generated members
fn is_generatable(kind: TypeKind) -> bool {
    matches!(
        kind,
        TypeKind::Class | TypeKind::Struct | TypeKind::RecordClass | TypeKind::RecordStruct
    )
}

fn decl_key(decl: &TypeDecl) -> String {
    qualified_name(decl.namespace.as_deref().filter(|ns| !ns.is_empty()), &decl.name)
}

/// Collect every type with at least one `MakeProperty` field. Fields of
/// partial declarations accumulate into the same descriptor.
pub fn collect_observable(units: &[CompilationUnit]) -> Registry<ClassDescriptor> {
    let mut registry = Registry::new();

    for unit in units {
        for decl in &unit.types {
            for field in &decl.fields {
                let Some(arguments) = find_property_marker(&field.attributes) else {
                    continue;
                };

                let (Some(field_name), Some(raw_type)) = (&field.name, &field.type_name) else {
                    debug!(
                        type_name = %decl.name,
                        "Skipping decorated field without name or type"
                    );
                    continue;
                };

                if arguments.name.is_empty() {
                    debug!(
                        type_name = %decl.name,
                        field = %field_name,
                        "Skipping field with empty property name"
                    );
                    continue;
                }

                if !is_generatable(decl.kind) {
                    debug!(
                        type_name = %decl.name,
                        kind = decl.kind.keyword(),
                        "Skipping field of non-generatable type"
                    );
                    continue;
                }

                let field_type = match parse_type(raw_type) {
                    Ok(ty) => ty,
                    Err(e) => {
                        warn!(
                            type_name = %decl.name,
                            field = %field_name,
                            error = %e,
                            "Skipping field with unreadable type"
                        );
                        continue;
                    }
                };

                let descriptor = registry.get_or_insert_with(&decl_key(decl), || {
                    let mut descriptor =
                        ClassDescriptor::new(decl.namespace.as_deref(), &decl.name, decl.kind);
                    descriptor.type_parameters = decl.type_parameters.clone();
                    descriptor
                });
                descriptor.add_usings(&unit.usings);

                descriptor.fields.push(FieldDescriptor {
                    field_name: field_name.clone(),
                    field_type,
                    comments: extract_comments(field.doc.as_deref()),
                    arguments,
                    required_namespaces: NamespaceSet::new(),
                });
            }
        }
    }

    // modifiers may be spread over parts without decorated fields
    for unit in units {
        for decl in &unit.types {
            if let Some(descriptor) = registry.get_mut(&decl_key(decl)) {
                descriptor.add_modifiers(&decl.modifiers);
            }
        }
    }

    debug!(types = registry.len(), "Collected observable types");
    registry
}

/// Collect every type carrying the `MakeConcrete` marker; the first
/// declaration seen for a type wins
pub fn collect_concrete(units: &[CompilationUnit]) -> Registry<ConcreteDescriptor> {
    let mut registry = Registry::new();

    for unit in units {
        for decl in &unit.types {
            let Some(arguments) = find_concrete_marker(&decl.attributes) else {
                continue;
            };

            if !is_generatable(decl.kind) {
                debug!(
                    type_name = %decl.name,
                    kind = decl.kind.keyword(),
                    "Skipping marker on non-generatable type"
                );
                continue;
            }

            let key = decl_key(decl);
            if registry.contains_key(&key) {
                continue;
            }

            registry.get_or_insert_with(&key, || {
                let mut descriptor = ConcreteDescriptor::new(
                    decl.namespace.as_deref(),
                    &decl.name,
                    decl.kind,
                    arguments,
                );
                descriptor.type_parameters = decl.type_parameters.clone();
                descriptor
            });
        }
    }

    for unit in units {
        for decl in &unit.types {
            if let Some(descriptor) = registry.get_mut(&decl_key(decl)) {
                descriptor.add_modifiers(&decl.modifiers);
            }
        }
    }

    debug!(types = registry.len(), "Collected concrete types");
    registry
}
