use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

/// Codes reported by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// PF001: unexpected failure, the batch was aborted
    #[serde(rename = "PF001")]
    GenerationFailed,
    /// PF002: input would produce invalid code, the type was skipped
    #[serde(rename = "PF002")]
    MalformedInput,
    /// PF003: a required type name was missing or empty
    #[serde(rename = "PF003")]
    MissingTypeName,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::GenerationFailed => "PF001",
            DiagnosticCode::MalformedInput => "PF002",
            DiagnosticCode::MissingTypeName => "PF003",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DiagnosticCode::GenerationFailed => "Exception during code generation",
            DiagnosticCode::MalformedInput => "Malformed input prevents code generation",
            DiagnosticCode::MissingTypeName => "Type name is missing or empty",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic produced while generating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub level: DiagnosticLevel,
    pub message: String,

    /// Qualified name of the type being generated, when known
    pub type_name: Option<String>,
}

impl Diagnostic {
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            level: DiagnosticLevel::Warning,
            message: message.into(),
            type_name: None,
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.code, self.code.title(), self.message)
    }
}
