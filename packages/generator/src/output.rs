use crate::diagnostic::Diagnostic;

/// Receives what a batch produces
pub trait GeneratorOutput {
    /// Register a generated source; identifiers are unique within a batch
    fn add_source(&mut self, identifier: &str, text: String);

    fn report(&mut self, diagnostic: Diagnostic);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    pub identifier: String,
    pub text: String,
}

/// Output sink that keeps everything in memory
#[derive(Debug, Clone, Default)]
pub struct CollectedOutput {
    pub sources: Vec<GeneratedSource>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, identifier: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|source| source.identifier == identifier)
            .map(|source| source.text.as_str())
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.sources
            .iter()
            .map(|source| source.identifier.as_str())
            .collect()
    }
}

impl GeneratorOutput for CollectedOutput {
    fn add_source(&mut self, identifier: &str, text: String) {
        self.sources.push(GeneratedSource {
            identifier: identifier.to_string(),
            text,
        });
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
