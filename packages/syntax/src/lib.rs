pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod semantic;

pub use ast::{
    Attribute, CompilationUnit, EventDecl, FieldDecl, MethodDecl, ParameterDecl, PropertyDecl,
    TupleElement, TypeDecl, TypeKind, TypeRef,
};
pub use error::{ParseError, ParseResult};
pub use lexer::{lex, Token, TokenSpan};
pub use parser::{parse_type, Parser};
pub use semantic::{InMemoryModel, MemberSymbol, NameScope, SemanticModel, TypeSymbol};
