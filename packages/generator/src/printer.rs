//! Deterministic printer for generated compilation units
//!
//! Layout: four-space indentation, braces on their own lines, one blank line
//! between members, expression-bodied getters, partial method declarations
//! ending in `;`.

use crate::options::LineEnding;
use crate::tree::{
    Accessors, CompilationUnit, Expr, Member, Parameter, SetterKind, Statement, TypeDeclaration,
};
use crate::writer::CodeWriter;

/// Print a unit to source text
pub fn print_unit(unit: &CompilationUnit, line_ending: LineEnding) -> String {
    let mut writer = CodeWriter::new(line_ending);

    if unit.nullable_context {
        writer.add_line("#nullable enable");
    }

    for using in &unit.usings {
        writer.add_line(&format!("using {};", using));
    }
    if !unit.usings.is_empty() {
        writer.new_line();
    }

    match &unit.namespace {
        Some(namespace) => {
            writer.add_line(&format!("namespace {}", namespace));
            writer.open_block();
            print_type(&mut writer, &unit.declaration);
            writer.close_block();
        }
        None => print_type(&mut writer, &unit.declaration),
    }

    if unit.nullable_context {
        writer.add_line("#nullable restore");
    }

    writer.into_output()
}

fn print_docs(writer: &mut CodeWriter, docs: &[String]) {
    if docs.is_empty() {
        return;
    }
    writer.add_line("/// <summary>");
    for line in docs {
        writer.add_line(&format!("/// {}", line));
    }
    writer.add_line("/// </summary>");
}

fn with_modifiers(modifiers: &[String], rest: &str) -> String {
    if modifiers.is_empty() {
        rest.to_string()
    } else {
        format!("{} {}", modifiers.join(" "), rest)
    }
}

fn print_type(writer: &mut CodeWriter, declaration: &TypeDeclaration) {
    print_docs(writer, &declaration.docs);

    let mut header = format!("{} {}", declaration.kind.keyword(), declaration.name);
    if !declaration.type_parameters.is_empty() {
        header.push_str(&format!("<{}>", declaration.type_parameters.join(", ")));
    }
    if !declaration.base_list.is_empty() {
        header.push_str(&format!(" : {}", declaration.base_list.join(", ")));
    }
    writer.add_line(&with_modifiers(&declaration.modifiers, &header));

    writer.open_block();
    for (i, member) in declaration.members.iter().enumerate() {
        if i > 0 {
            writer.new_line();
        }
        print_member(writer, member);
    }
    writer.close_block();
}

fn print_member(writer: &mut CodeWriter, member: &Member) {
    match member {
        Member::EventField {
            docs,
            modifiers,
            ty,
            name,
        } => {
            print_docs(writer, docs);
            writer.add_line(&with_modifiers(modifiers, &format!("event {} {};", ty, name)));
        }
        Member::Method {
            docs,
            modifiers,
            return_type,
            name,
            parameters,
            body,
        } => {
            print_docs(writer, docs);
            let signature = format!("{} {}({})", return_type, name, print_parameters(parameters));
            let signature = with_modifiers(modifiers, &signature);
            match body {
                Some(statements) => {
                    writer.add_line(&signature);
                    print_block(writer, statements);
                }
                None => writer.add_line(&format!("{};", signature)),
            }
        }
        Member::Constructor {
            docs,
            modifiers,
            name,
            parameters,
            body,
        } => {
            print_docs(writer, docs);
            let signature = format!("{}({})", name, print_parameters(parameters));
            writer.add_line(&with_modifiers(modifiers, &signature));
            print_block(writer, body);
        }
        Member::Property {
            docs,
            modifiers,
            ty,
            name,
            accessors,
        } => {
            print_docs(writer, docs);
            let declaration = with_modifiers(modifiers, &format!("{} {}", ty, name));
            match accessors {
                Accessors::Auto { setter } => {
                    let setter = match setter {
                        SetterKind::None => "",
                        SetterKind::Public => " set;",
                        SetterKind::Private => " private set;",
                    };
                    writer.add_line(&format!("{} {{ get;{} }}", declaration, setter));
                }
                Accessors::Backed { field, setter } => {
                    writer.add_line(&declaration);
                    writer.open_block();
                    writer.add_line(&format!("get => {};", field));
                    writer.add_line("set");
                    print_block(writer, setter);
                    writer.close_block();
                }
            }
        }
    }
}

fn print_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|parameter| {
            let mut text = String::new();
            for attribute in &parameter.attributes {
                text.push_str(&format!("[{}] ", attribute));
            }
            text.push_str(&format!("{} {}", parameter.ty, parameter.name));
            if let Some(default) = &parameter.default {
                text.push_str(&format!(" = {}", print_expr(default)));
            }
            text
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_block(writer: &mut CodeWriter, statements: &[Statement]) {
    writer.open_block();
    for statement in statements {
        writer.add_line(&print_statement(statement));
    }
    writer.close_block();
}

fn print_statement(statement: &Statement) -> String {
    match statement {
        Statement::If { condition, then } => {
            format!("if ({}) {}", print_expr(condition), print_statement(then))
        }
        Statement::Return => "return;".to_string(),
        Statement::LocalVar { name, value } => format!("var {} = {};", name, print_expr(value)),
        Statement::Assign { target, value } => {
            format!("{} = {};", print_expr(target), print_expr(value))
        }
        Statement::Expression(expr) => format!("{};", print_expr(expr)),
    }
}

fn print_args(args: &[Expr]) -> String {
    args.iter().map(print_expr).collect::<Vec<_>>().join(", ")
}

fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Identifier(name) => name.clone(),
        Expr::StringLiteral(value) => format!("\"{}\"", escape_string(value)),
        Expr::Null => "null".to_string(),
        Expr::This => "this".to_string(),
        Expr::Equals(left, right) => format!("{} == {}", print_expr(left), print_expr(right)),
        Expr::Invoke { target, args } => format!("{}({})", print_expr(target), print_args(args)),
        Expr::ConditionalInvoke {
            target,
            method,
            args,
        } => format!("{}?.{}({})", print_expr(target), method, print_args(args)),
        Expr::New { ty, args } => format!("new {}({})", ty, print_args(args)),
    }
}

fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use propforge_syntax::{TypeKind, TypeRef};

    fn unit(members: Vec<Member>, namespace: Option<&str>) -> CompilationUnit {
        CompilationUnit {
            nullable_context: false,
            usings: Vec::new(),
            namespace: namespace.map(str::to_string),
            declaration: TypeDeclaration {
                docs: Vec::new(),
                modifiers: vec!["partial".to_string()],
                kind: TypeKind::Struct,
                name: "Point".to_string(),
                type_parameters: vec!["T".to_string()],
                base_list: Vec::new(),
                members,
            },
        }
    }

    #[test]
    fn test_global_namespace_unit() {
        let text = print_unit(&unit(Vec::new(), None), LineEnding::Lf);
        assert_eq!(text, "partial struct Point<T>\n{\n}\n");
    }

    #[test]
    fn test_auto_properties_and_blank_lines() {
        let members = vec![
            Member::Property {
                docs: Vec::new(),
                modifiers: vec!["public".to_string()],
                ty: TypeRef::predefined("int"),
                name: "X".to_string(),
                accessors: Accessors::Auto {
                    setter: SetterKind::None,
                },
            },
            Member::Property {
                docs: vec!["The Y".to_string()],
                modifiers: vec!["public".to_string()],
                ty: TypeRef::predefined("int").nullable(),
                name: "Y".to_string(),
                accessors: Accessors::Auto {
                    setter: SetterKind::Private,
                },
            },
        ];
        let text = print_unit(&unit(members, Some("Geo")), LineEnding::Lf);
        let expected = "\
namespace Geo
{
    partial struct Point<T>
    {
        public int X { get; }

        /// <summary>
        /// The Y
        /// </summary>
        public int? Y { get; private set; }
    }
}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_statements() {
        let guard = Statement::If {
            condition: Expr::equals(Expr::ident("_a"), Expr::ident("value")),
            then: Box::new(Statement::Return),
        };
        assert_eq!(print_statement(&guard), "if (_a == value) return;");

        let raise = Statement::Expression(Expr::ConditionalInvoke {
            target: Box::new(Expr::ident("PropertyChanged")),
            method: "Invoke".to_string(),
            args: vec![
                Expr::This,
                Expr::New {
                    ty: TypeRef::named("PropertyChangedEventArgs"),
                    args: vec![Expr::ident("propertyName")],
                },
            ],
        });
        assert_eq!(
            print_statement(&raise),
            "PropertyChanged?.Invoke(this, new PropertyChangedEventArgs(propertyName));"
        );

        assert_eq!(
            print_statement(&Statement::call("Hook", vec![Expr::string("a\"b")])),
            "Hook(\"a\\\"b\");"
        );
    }

    #[test]
    fn test_partial_method_declaration() {
        let member = Member::partial_method(
            Vec::new(),
            "OnXChanged",
            vec![
                Parameter::new(TypeRef::predefined("int"), "oldValue"),
                Parameter::new(TypeRef::predefined("int"), "newValue"),
            ],
        );
        let mut writer = CodeWriter::new(LineEnding::Lf);
        print_member(&mut writer, &member);
        assert_eq!(
            writer.into_output(),
            "partial void OnXChanged(int oldValue, int newValue);\n"
        );
    }
}
