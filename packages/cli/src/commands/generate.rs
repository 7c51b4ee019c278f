use crate::config::Config;
use crate::manifest::{find_manifest_files, load_manifest};
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use propforge_generator::{BatchReport, CollectedOutput, DiagnosticLevel, Generator};
use propforge_syntax::InMemoryModel;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Observable properties from `MakeProperty` fields
    Observable,
    /// Concrete types from `MakeConcrete` interfaces
    Concrete,
    All,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Manifest file or directory (defaults to the configured source directory)
    pub path: Option<String>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Generate without nullable annotations
    #[arg(long)]
    pub no_nullable: bool,

    /// Which batches to run
    #[arg(short, long, value_enum, default_value = "all")]
    pub mode: Mode,
}

pub fn generate(args: GenerateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut options = config.generator_options();
    if args.no_nullable {
        options.nullable_context = false;
    }

    let input = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_src_dir(cwd),
    };
    if !input.exists() {
        return Err(anyhow!("Input path does not exist: {:?}", input));
    }

    println!("{}", "🔨 Generating sources...".bright_blue().bold());

    let manifests = if input.is_file() {
        vec![input.clone()]
    } else {
        find_manifest_files(&input)?
    };
    if manifests.is_empty() {
        println!("{}", "⚠️  No .decl.json manifests found".yellow());
        return Ok(());
    }

    let mut units = Vec::new();
    for manifest in &manifests {
        units.extend(load_manifest(manifest)?);
    }
    println!(
        "Found {} manifests, {} compilation units",
        manifests.len(),
        units.len()
    );

    let model = InMemoryModel::from_units(&units);
    debug!(types = model.len(), "Semantic model built");

    let generator = Generator::new(&model, options);
    let mut output = CollectedOutput::new();
    let mut reports: Vec<BatchReport> = Vec::new();

    if generator.options().emit_attributes {
        generator.generate_attributes(&mut output);
    }
    if matches!(args.mode, Mode::Observable | Mode::All) {
        reports.push(generator.generate_observable(&units, &mut output));
    }
    if matches!(args.mode, Mode::Concrete | Mode::All) {
        reports.push(generator.generate_concrete(&units, &mut output));
    }

    for diagnostic in &output.diagnostics {
        let label = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };
        match &diagnostic.type_name {
            Some(type_name) => {
                eprintln!("  {} {} ({})", label, diagnostic, type_name.bright_white())
            }
            None => eprintln!("  {} {}", label, diagnostic),
        }
    }

    if args.stdout {
        for source in &output.sources {
            println!("// {}.g.cs", source.identifier);
            println!("{}", source.text);
        }
    } else {
        let out_dir = match &args.out_dir {
            Some(out) => PathBuf::from(cwd).join(out),
            None => config.get_out_dir(cwd),
        };
        fs::create_dir_all(&out_dir)?;

        for source in &output.sources {
            let output_file = out_dir.join(format!("{}.g.cs", source.identifier));
            fs::write(&output_file, &source.text)?;
            println!("  {} {}", "✓".green(), output_file.display());
        }
    }

    let skipped: usize = reports.iter().map(|r| r.skipped.len()).sum();
    let aborted = reports.iter().filter(|r| r.aborted).count();

    println!();
    if output.diagnostics.is_empty() && aborted == 0 {
        println!(
            "{} Generated {} files successfully",
            "✅".green(),
            output.sources.len()
        );
    } else {
        println!(
            "{} Generated {} files, {} skipped types, {} aborted batches",
            "⚠️".yellow(),
            output.sources.len(),
            skipped,
            aborted
        );
    }

    Ok(())
}
