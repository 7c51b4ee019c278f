use crate::diagnostic::DiagnosticCode;
use propforge_syntax::ParseError;
use thiserror::Error;

/// Errors raised while generating a batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("Base type chain of '{type_name}' is cyclic")]
    BaseTypeCycle { type_name: String },

    #[error("'{name}' is not a valid property name in '{type_name}'")]
    InvalidPropertyName { type_name: String, name: String },

    #[error("Property '{name}' is generated more than once in '{type_name}'")]
    DuplicateProperty { type_name: String, name: String },

    #[error("The interface full type name is missing or empty in '{type_name}'")]
    MissingInterfaceName { type_name: String },

    #[error("'{type_name}' cannot implement the open generic interface '{interface}'")]
    GenericInterfaceBase { type_name: String, interface: String },

    #[error("Invalid type expression '{source_text}': {error}")]
    InvalidType {
        source_text: String,
        error: ParseError,
    },
}

impl GenerateError {
    pub fn invalid_property_name(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidPropertyName {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    pub fn duplicate_property(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateProperty {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    pub fn invalid_type(source_text: impl Into<String>, error: ParseError) -> Self {
        Self::InvalidType {
            source_text: source_text.into(),
            error,
        }
    }

    /// Diagnostic reported for this error
    pub fn code(&self) -> DiagnosticCode {
        match self {
            GenerateError::InvalidPropertyName { .. }
            | GenerateError::DuplicateProperty { .. }
            | GenerateError::GenericInterfaceBase { .. }
            | GenerateError::InvalidType { .. } => DiagnosticCode::MalformedInput,
            GenerateError::MissingInterfaceName { .. } => DiagnosticCode::MissingTypeName,
            GenerateError::BaseTypeCycle { .. } => DiagnosticCode::GenerationFailed,
        }
    }

    /// Whether only the offending type is skipped, rather than the batch
    pub fn skips_type(&self) -> bool {
        self.code() == DiagnosticCode::MalformedInput
    }
}

pub type GenerateResult<T> = Result<T, GenerateError>;
