use serde::{Deserialize, Serialize};
use std::fmt;

/// Keywords that name built-in types
pub const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "nint",
    "nuint", "long", "ulong", "short", "ushort", "object", "string", "dynamic", "void",
];

/// Built-in types with reference semantics
const PREDEFINED_REFERENCE_TYPES: &[&str] = &["object", "string", "dynamic"];

pub fn is_predefined_type(name: &str) -> bool {
    PREDEFINED_TYPES.contains(&name)
}

/// A syntactic type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Built-in keyword type (`int`, `string`, ...)
    Predefined(String),
    /// Simple, qualified or generic name (`List<int>`, `System.Text.StringBuilder`)
    Named { name: String, type_args: Vec<TypeRef> },
    /// `T[]`, `T[,]`
    Array { element: Box<TypeRef>, rank: usize },
    /// `(A, B)`, `(int Count, string Name)`
    Tuple(Vec<TupleElement>),
    /// `T?`
    Nullable(Box<TypeRef>),
    /// `T*`
    Pointer(Box<TypeRef>),
    /// `delegate*<A, B, TResult>`; the last entry is the return type
    FunctionPointer {
        calling_convention: Option<String>,
        parameters: Vec<TypeRef>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleElement {
    pub ty: TypeRef,
    pub name: Option<String>,
}

impl TypeRef {
    pub fn predefined(keyword: impl Into<String>) -> Self {
        TypeRef::Predefined(keyword.into())
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, type_args: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            name: name.into(),
            type_args,
        }
    }

    pub fn nullable(self) -> Self {
        match self {
            TypeRef::Nullable(_) => self,
            other => TypeRef::Nullable(Box::new(other)),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeRef::Nullable(_))
    }

    /// Whether this is a built-in keyword type with reference semantics
    pub fn is_predefined_reference(&self) -> bool {
        matches!(
            self,
            TypeRef::Predefined(name) if PREDEFINED_REFERENCE_TYPES.contains(&name.as_str())
        )
    }

    /// Whether the reference denotes `string` / `System.String`
    pub fn is_string(&self) -> bool {
        match self {
            TypeRef::Predefined(name) => name == "string",
            TypeRef::Named { name, type_args } => {
                type_args.is_empty() && (name == "String" || name == "System.String")
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Predefined(keyword) => f.write_str(keyword),
            TypeRef::Named { name, type_args } => {
                f.write_str(name)?;
                if !type_args.is_empty() {
                    f.write_str("<")?;
                    write_list(f, type_args)?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeRef::Array { element, rank } => {
                write!(f, "{}[{}]", element, ",".repeat(rank.saturating_sub(1)))
            }
            TypeRef::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element.ty)?;
                    if let Some(name) = &element.name {
                        write!(f, " {}", name)?;
                    }
                }
                f.write_str(")")
            }
            TypeRef::Nullable(inner) => write!(f, "{}?", inner),
            TypeRef::Pointer(inner) => write!(f, "{}*", inner),
            TypeRef::FunctionPointer {
                calling_convention,
                parameters,
            } => {
                f.write_str("delegate*")?;
                if let Some(convention) = calling_convention {
                    write!(f, " {}", convention)?;
                }
                f.write_str("<")?;
                write_list(f, parameters)?;
                f.write_str(">")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[TypeRef]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

/// One source file worth of declarations, as exported by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationUnit {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub usings: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    #[default]
    #[serde(rename = "class")]
    Class,
    #[serde(rename = "struct")]
    Struct,
    #[serde(rename = "record", alias = "record class")]
    RecordClass,
    #[serde(rename = "record struct")]
    RecordStruct,
    #[serde(rename = "interface")]
    Interface,
    #[serde(rename = "enum")]
    Enum,
}

impl TypeKind {
    /// Keyword(s) introducing a declaration of this kind
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::RecordClass => "record",
            TypeKind::RecordStruct => "record struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }

    pub fn is_reference_type(&self) -> bool {
        matches!(
            self,
            TypeKind::Class | TypeKind::RecordClass | TypeKind::Interface
        )
    }

    /// Kinds that may appear as the base class of another type
    pub fn can_be_base_class(&self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::RecordClass)
    }
}

/// A class, struct, record, interface or enum declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Base class and interfaces, as written
    #[serde(default)]
    pub base_list: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Raw documentation comment (`/// <summary>...`)
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub events: Vec<EventDecl>,
}

impl TypeDecl {
    pub fn new(namespace: Option<&str>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    /// `Namespace.Name`, or `.Name` when the type lives in the global namespace
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace.as_deref().unwrap_or(""), self.name)
    }

    pub fn full_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }

    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }
}

/// An attribute application with its raw argument tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl Attribute {
    pub fn new<I, S>(name: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_true")]
    pub has_getter: bool,
    #[serde(default)]
    pub has_setter: bool,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    #[serde(default = "default_void")]
    pub return_type: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

fn default_true() -> bool {
    true
}

fn default_void() -> String {
    "void".to_string()
}
