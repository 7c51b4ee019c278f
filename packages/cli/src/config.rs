use propforge_generator::{GeneratorOptions, LineEnding};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "propforge.config.json";

/// Propforge configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory searched for `*.decl.json` manifests
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Where generated `.g.cs` files are written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_true")]
    pub nullable_context: bool,

    #[serde(default)]
    pub line_ending: LineEnding,

    /// Empty to disable the global hook
    #[serde(default = "default_global_hook_name")]
    pub global_hook_name: String,

    #[serde(default = "default_true")]
    pub emit_attributes: bool,
}

fn default_src_dir() -> String {
    ".".to_string()
}

fn default_out_dir() -> String {
    "Generated".to_string()
}

fn default_true() -> bool {
    true
}

fn default_global_hook_name() -> String {
    GeneratorOptions::default().global_hook_name
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            nullable_context: self.nullable_context,
            line_ending: self.line_ending,
            global_hook_name: self.global_hook_name.clone(),
            emit_attributes: self.emit_attributes,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            nullable_context: true,
            line_ending: LineEnding::default(),
            global_hook_name: default_global_hook_name(),
            emit_attributes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "srcDir": "decls",
            "outDir": "obj/Generated",
            "nullableContext": false,
            "lineEnding": "crlf",
            "globalHookName": ""
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "decls");
        assert_eq!(config.out_dir, "obj/Generated");
        assert!(!config.nullable_context);
        assert_eq!(config.line_ending, LineEnding::Crlf);
        assert!(config.emit_attributes);

        let options = config.generator_options();
        assert!(options.global_hook_name.is_empty());
        assert_eq!(options.line_ending, LineEnding::Crlf);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.src_dir, ".");
        assert_eq!(config.generator_options(), GeneratorOptions::default());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.out_dir, "Generated");
        assert_eq!(config.global_hook_name, "OnOnePropertyHasChanged");
    }
}
