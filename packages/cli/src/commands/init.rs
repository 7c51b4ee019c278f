use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory holding the declaration manifests
    #[arg(short, long, default_value = "decls")]
    pub src_dir: String,

    /// Output directory for generated sources
    #[arg(short, long, default_value = "Generated")]
    pub out_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

const EXAMPLE_MANIFEST: &str = r#"{
    "usings": ["System"],
    "types": [
        {
            "namespace": "Example",
            "name": "PersonViewModel",
            "modifiers": ["public", "partial"],
            "fields": [
                {
                    "name": "_name",
                    "type": "string",
                    "attributes": [
                        { "name": "MakeProperty", "arguments": ["\"Name\"", "true", "true"] }
                    ],
                    "doc": "/// <summary>\n/// Display name\n/// </summary>"
                }
            ]
        }
    ]
}
"#;

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Propforge project...".bright_blue().bold()
    );

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("example.decl.json");
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_MANIFEST)?;
        println!("  {} Created example.decl.json", "✓".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: args.out_dir.clone(),
        ..Config::default()
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Export declarations to {}/*.decl.json", args.src_dir);
    println!("  2. Run: propforge generate");
    println!("  3. Check output in {}/", args.out_dir);

    Ok(())
}
