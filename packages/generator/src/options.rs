use serde::{Deserialize, Serialize};

/// Name of the hook called after every extra-notify property changes
pub const DEFAULT_GLOBAL_HOOK_NAME: &str = "OnOnePropertyHasChanged";

/// Line terminator used by the printer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Configuration options for source generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Wrap each unit in `#nullable enable` / `#nullable restore` and
    /// annotate generated reference types accordingly
    pub nullable_context: bool,

    pub line_ending: LineEnding,

    /// Hook invoked after every extra-notify property changes.
    /// An empty name disables the hook altogether
    pub global_hook_name: String,

    /// Emit the marker attribute source alongside generated types
    pub emit_attributes: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            nullable_context: true,
            line_ending: LineEnding::Lf,
            global_hook_name: DEFAULT_GLOBAL_HOOK_NAME.to_string(),
            emit_attributes: true,
        }
    }
}

impl GeneratorOptions {
    /// Output for projects without nullable reference types
    pub fn legacy() -> Self {
        Self {
            nullable_context: false,
            ..Default::default()
        }
    }

    /// Output with Windows line endings
    pub fn windows() -> Self {
        Self {
            line_ending: LineEnding::Crlf,
            ..Default::default()
        }
    }

    /// Only the generated types: no global hook, no attribute source
    pub fn minimal() -> Self {
        Self {
            nullable_context: true,
            line_ending: LineEnding::Lf,
            global_hook_name: String::new(),
            emit_attributes: false,
        }
    }
}
