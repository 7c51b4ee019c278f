//! # Propforge Generator
//!
//! Source generation for C#-shaped declarations. Two batches are provided:
//!
//! - **Observable properties**: every field marked `[MakeProperty("Name")]`
//!   gets a public property raising `PropertyChanged`, with optional value
//!   comparison and per-property hooks
//! - **Concrete types**: a type marked `[MakeConcrete("Ns.IContract")]` gets
//!   the interface's properties and an initializing constructor
//!
//! Inheritance chains are analysed so that the event, its trigger method and
//! the global hook are declared once per chain.
//!
//! ## Example
//!
//! ```rust
//! use propforge_generator::{CollectedOutput, Generator, GeneratorOptions};
//! use propforge_syntax::{Attribute, CompilationUnit, FieldDecl, InMemoryModel, TypeDecl, TypeKind};
//!
//! let mut vm = TypeDecl::new(Some("App"), "MainViewModel", TypeKind::Class);
//! vm.modifiers = vec!["public".to_string(), "partial".to_string()];
//! vm.fields.push(FieldDecl {
//!     name: Some("_status".to_string()),
//!     type_name: Some("int".to_string()),
//!     attributes: vec![Attribute::new("MakeProperty", ["\"Status\"", "true", "true"])],
//!     ..Default::default()
//! });
//! let units = vec![CompilationUnit {
//!     types: vec![vm],
//!     ..Default::default()
//! }];
//!
//! let model = InMemoryModel::from_units(&units);
//! let generator = Generator::new(&model, GeneratorOptions::default());
//! let mut output = CollectedOutput::new();
//! let report = generator.generate_observable(&units, &mut output);
//!
//! assert_eq!(report.generated, vec!["MainViewModel"]);
//! let text = output.source("MainViewModel").unwrap();
//! assert!(text.contains("if (_status == value) return;"));
//! assert!(text.contains("OnStatusChanged(oldValue, _status);"));
//! ```

pub mod arguments;
pub mod bootstrap;
pub mod collect;
pub mod comments;
pub mod concrete;
pub mod diagnostic;
pub mod error;
pub mod inheritance;
pub mod marker;
pub mod model;
pub mod namespaces;
pub mod naming;
pub mod observable;
pub mod options;
pub mod orchestrator;
pub mod output;
pub mod printer;
pub mod tree;
pub mod writer;


// Re-export main types for convenience
pub use arguments::{ConcreteArguments, PropertyArguments};
pub use bootstrap::{ATTRIBUTES_IDENTIFIER, ATTRIBUTES_SOURCE};
pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticLevel};
pub use error::{GenerateError, GenerateResult};
pub use marker::{Marker, MarkerKind};
pub use model::{
    ClassDescriptor, ConcreteDescriptor, EventPolicy, FieldDescriptor, PropertyDescriptor,
};
pub use namespaces::{resolve_namespaces, NamespaceSet};
pub use options::{GeneratorOptions, LineEnding};
pub use orchestrator::{BatchReport, Generator};
pub use output::{CollectedOutput, GeneratedSource, GeneratorOutput};
pub use printer::print_unit;
