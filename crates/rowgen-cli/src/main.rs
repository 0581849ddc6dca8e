//! rowgen CLI: preview the rows a YAML data-set plan generates.

use clap::{Parser, Subcommand, ValueEnum};
use rowgen_cli::{parse_yaml_plan, PlanDoc};
use rowgen_core::config::GeneratorConfig;
use rowgen_set::RowDisposition;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rowgen")]
#[command(about = "Lazy combinatorial row generation for data-driven tests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Jsonl,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and print every row of a plan
    Run {
        /// Path to the plan YAML file
        #[arg(short, long)]
        plan: PathBuf,

        /// Cap on materialized rows (overrides config and environment)
        #[arg(long)]
        max_rows: Option<usize>,

        /// Stop after printing this many rows
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Parse and build a plan without iterating it
    Validate {
        #[arg(short, long)]
        plan: PathBuf,
    },

    /// Print the cursor tree a plan builds, plus its row fingerprint
    Explain {
        #[arg(short, long)]
        plan: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            plan,
            max_rows,
            limit,
            format,
        } => run_plan(&plan, max_rows, limit, format),
        Commands::Validate { plan } => validate_plan(&plan).map(|()| {
            println!("✓ Plan is valid");
        }),
        Commands::Explain { plan } => explain_plan(&plan),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load(path: &Path) -> Result<PlanDoc, Box<dyn std::error::Error>> {
    let yaml = fs::read_to_string(path)?;
    Ok(parse_yaml_plan(&yaml)?)
}

fn effective_config(doc: &PlanDoc, max_rows: Option<usize>) -> GeneratorConfig {
    let mut cfg = doc.generator_config();
    if let Some(rows) = max_rows {
        cfg.max_materialized_rows = rows;
    }
    cfg
}

fn run_plan(
    path: &Path,
    max_rows: Option<usize>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(path)?;
    let cfg = effective_config(&doc, max_rows);
    let set = doc.build(&cfg)?;
    tracing::info!(plan = %path.display(), max_rows = cfg.max_materialized_rows, "running plan");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut counts = [0u64; 3];
    for generated in set.runnable_rows().take(limit.unwrap_or(usize::MAX)) {
        let generated = generated?;
        counts[match generated.disposition {
            RowDisposition::Run => 0,
            RowDisposition::Excluded => 1,
            RowDisposition::NotApplicable => 2,
        }] += 1;
        match format {
            OutputFormat::Jsonl => writeln!(out, "{}", serde_json::to_string(&generated)?)?,
            OutputFormat::Table => writeln!(
                out,
                "{:>6}  {:<14}  {}",
                generated.index,
                format!("{:?}", generated.disposition),
                generated.row
            )?,
        }
    }

    tracing::debug!(
        run = counts[0],
        excluded = counts[1],
        not_applicable = counts[2],
        "plan finished"
    );
    if matches!(format, OutputFormat::Table) {
        writeln!(
            out,
            "-- {} to run, {} excluded, {} not applicable",
            counts[0], counts[1], counts[2]
        )?;
    }
    Ok(())
}

fn validate_plan(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(path)?;
    let cfg = effective_config(&doc, None);
    let _ = doc.build(&cfg)?;
    Ok(())
}

fn explain_plan(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(path)?;
    let cfg = effective_config(&doc, None);
    let set = doc.build(&cfg)?;

    println!("Data Set Plan");
    println!("=============");
    println!();
    println!("Max materialized rows: {}", cfg.max_materialized_rows);
    match set.not_applicable_reason() {
        _ if set.is_applicable() => println!("Applicable: yes"),
        Some(reason) => println!("Applicable: no ({})", reason),
        None => println!("Applicable: no"),
    }
    if !set.excluded().is_empty() {
        println!("Excluded rows: {}", set.excluded());
    }
    println!();
    println!("Cursor tree:");
    for line in set.explain().lines() {
        println!("  {}", line);
    }
    println!();
    println!("Rows: {}", set.count()?);
    println!("Fingerprint: {}", set.fingerprint()?);
    Ok(())
}
