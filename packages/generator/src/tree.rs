//! Immutable tree of the generated compilation unit
//!
//! Synthesis builds these values and never mutates them afterwards; the
//! printer turns a finished tree into text in one pass.

use propforge_syntax::{TypeKind, TypeRef};

#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub nullable_context: bool,
    pub usings: Vec<String>,
    /// Block-scoped namespace, or the global namespace when `None`
    pub namespace: Option<String>,
    pub declaration: TypeDeclaration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub docs: Vec<String>,
    pub modifiers: Vec<String>,
    pub kind: TypeKind,
    pub name: String,
    pub type_parameters: Vec<String>,
    pub base_list: Vec<String>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterKind {
    None,
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Accessors {
    /// `{ get; set; }` style auto-property
    Auto { setter: SetterKind },
    /// `get => field;` with a block-bodied setter
    Backed {
        field: String,
        setter: Vec<Statement>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub attributes: Vec<String>,
    pub ty: TypeRef,
    pub name: String,
    pub default: Option<Expr>,
}

impl Parameter {
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            ty,
            name: name.into(),
            default: None,
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn with_default(mut self, default: Expr) -> Self {
        self.default = Some(default);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    EventField {
        docs: Vec<String>,
        modifiers: Vec<String>,
        ty: TypeRef,
        name: String,
    },
    Method {
        docs: Vec<String>,
        modifiers: Vec<String>,
        return_type: TypeRef,
        name: String,
        parameters: Vec<Parameter>,
        /// `None` for a declaration ending in `;`
        body: Option<Vec<Statement>>,
    },
    Constructor {
        docs: Vec<String>,
        modifiers: Vec<String>,
        name: String,
        parameters: Vec<Parameter>,
        body: Vec<Statement>,
    },
    Property {
        docs: Vec<String>,
        modifiers: Vec<String>,
        ty: TypeRef,
        name: String,
        accessors: Accessors,
    },
}

impl Member {
    /// `partial void Name(params);`
    pub fn partial_method(
        docs: Vec<String>,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Member::Method {
            docs,
            modifiers: vec!["partial".to_string()],
            return_type: TypeRef::predefined("void"),
            name: name.into(),
            parameters,
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Printed on one line when the branch is a simple statement
    If {
        condition: Expr,
        then: Box<Statement>,
    },
    Return,
    LocalVar {
        name: String,
        value: Expr,
    },
    Assign {
        target: Expr,
        value: Expr,
    },
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(String),
    StringLiteral(String),
    Null,
    This,
    Equals(Box<Expr>, Box<Expr>),
    /// `target(args)`
    Invoke { target: Box<Expr>, args: Vec<Expr> },
    /// `target?.method(args)`
    ConditionalInvoke {
        target: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// `new Type(args)`
    New { ty: TypeRef, args: Vec<Expr> },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLiteral(value.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Invoke {
            target: Box::new(Expr::ident(name)),
            args,
        }
    }

    pub fn equals(left: Expr, right: Expr) -> Self {
        Expr::Equals(Box::new(left), Box::new(right))
    }
}

impl Statement {
    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        Statement::Assign {
            target: Expr::ident(target),
            value,
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Statement::Expression(Expr::call(name, args))
    }
}
