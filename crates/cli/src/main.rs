use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lockscan_cli::blocks::vendor_id_from_path;
use lockscan_cli::report::{assess_text, AssessmentReport};
use lockscan_engine::{compare, Comparison, DEFAULT_WORST_LIMIT};
use lockscan_rules::{Category, RuleSet, TemplateLibrary};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lockscan")]
#[command(about = "Contract lock-in risk assessment", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Load a TOML rule set instead of the built-in one
    #[arg(long, global = true)]
    ruleset: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single contract file
    Assess {
        /// Plain-text contract file
        file: PathBuf,

        /// Vendor identifier (defaults to the file stem)
        #[arg(long)]
        id: Option<String>,

        /// Write the JSON report to this path instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Assess several contract files and rank the vendors
    Compare {
        /// Plain-text contract files (at least two)
        files: Vec<PathBuf>,

        /// Size of the worst-vendors short list
        #[arg(long, default_value_t = DEFAULT_WORST_LIMIT)]
        top_k: usize,

        /// Write the JSON report to this path instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print a summary of the active rule set
    Rules,
}

/// Combined output of the `compare` subcommand.
#[derive(Serialize)]
struct ComparisonReport {
    individual: Vec<AssessmentReport>,
    comparison: Comparison,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let loaded;
    let rules: &RuleSet = match &cli.ruleset {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading rule set {}", path.display()))?;
            loaded = RuleSet::from_toml_str(&text)
                .with_context(|| format!("loading rule set {}", path.display()))?;
            &loaded
        }
        None => RuleSet::builtin(),
    };
    let library = TemplateLibrary::builtin();

    match cli.command {
        Commands::Assess { file, id, output } => {
            let report = assess_file(rules, library, &file, id)?;
            log::info!(
                "{}: score {:.1}/100, risk {:?}",
                report.assessment.document_id,
                report.assessment.total_score,
                report.assessment.risk_level
            );
            emit_json(&report, output.as_deref())
        }
        Commands::Compare {
            files,
            top_k,
            output,
        } => {
            if files.len() < 2 {
                bail!("compare requires at least two contract files, got {}", files.len());
            }

            let mut individual = Vec::with_capacity(files.len());
            for file in &files {
                individual.push(assess_file(rules, library, file, None)?);
            }

            let assessments: Vec<_> = individual
                .iter()
                .map(|r| r.assessment.clone())
                .collect();
            let comparison = compare(&assessments, top_k)?;
            emit_json(
                &ComparisonReport {
                    individual,
                    comparison,
                },
                output.as_deref(),
            )
        }
        Commands::Rules => {
            print_rules(rules);
            Ok(())
        }
    }
}

fn assess_file(
    rules: &RuleSet,
    library: &TemplateLibrary,
    path: &Path,
    id: Option<String>,
) -> Result<AssessmentReport> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading contract {}", path.display()))?;
    let document_id = id.unwrap_or_else(|| vendor_id_from_path(path));
    Ok(assess_text(rules, library, &document_id, &text))
}

fn emit_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing report")?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            log::info!("report written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn print_rules(rules: &RuleSet) {
    println!("category                weight  min_matches  expected_clauses  keywords");
    for category in Category::ALL {
        let rule = rules.rule(category);
        println!(
            "{:<22}  {:>6}  {:>11}  {:>16.1}  {:>8}",
            category.label(),
            rule.weight,
            rule.min_matches,
            rule.expected_clauses,
            rule.keywords.len()
        );
    }
    println!("\nmechanisms: {}", rules.mechanisms().len());
    for mechanism in rules.mechanisms().iter() {
        println!(
            "  {:<24}  {:?} ({:.1}x)",
            mechanism.name,
            mechanism.severity,
            mechanism.severity.multiplier()
        );
    }
}
