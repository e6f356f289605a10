//! Capshape CLI - Reshape personnel skill-assessment CSV tables
//!
//! # Commands
//!
//! ```bash
//! capshape tidy input.csv -o tidy.csv        # Wide table -> tidy observations
//! capshape skill tidy.csv -o skill.csv       # Tidy observations -> skill table
//! capshape reshape input.csv -o skill.csv    # Wide table -> skill table
//! capshape generate people.txt -o mock.csv   # Synthetic dataset (basic)
//! capshape generate people.txt -o mock.csv --capacity --seed 7
//! ```

use capshape::{
    generate_capacity_dataset, generate_dataset, melt_csv, pivot_csv, read_personnel, reshape_csv,
    write_wide_table, GenerateParams, ReshapeOptions, Schema, DEFAULT_DATE_FORMAT,
    WRITE_DATE_FORMAT,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "capshape")]
#[command(about = "Reshape personnel skill-assessment CSV tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Melt a wide assessment CSV into tidy observations
    Tidy {
        /// Input wide CSV file
        input: PathBuf,

        /// Output tidy CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Parse format for the Date column
        #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
        date_format: String,

        /// Omit the header row in the output
        #[arg(long)]
        no_header: bool,
    },

    /// Pivot a tidy CSV into a skill-keyed capacity table
    Skill {
        /// Input tidy CSV file
        input: PathBuf,

        /// Output skill CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Parse format for the Date column
        #[arg(long, default_value = WRITE_DATE_FORMAT)]
        date_format: String,

        /// Omit the header row in the output
        #[arg(long)]
        no_header: bool,

        /// Include scorer-attributed skill fields (not implemented; fails fast)
        #[arg(long)]
        include_scorer_fields: bool,
    },

    /// Full pipeline: wide CSV -> tidy -> skill CSV
    Reshape {
        /// Input wide CSV file
        input: PathBuf,

        /// Output skill CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Parse format for the Date column
        #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
        date_format: String,

        /// Omit the header row in the output
        #[arg(long)]
        no_header: bool,
    },

    /// Generate a synthetic wide dataset from a personnel list
    Generate {
        /// Newline-delimited personnel list
        personnel: PathBuf,

        /// Output wide CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Derive current/targeted capacities per person (capacity-aware variant)
        #[arg(long)]
        capacity: bool,

        /// JSON file with generation parameters (missing keys use defaults)
        #[arg(long)]
        params: Option<PathBuf>,

        /// Baseline date (ISO, overrides params)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Number of time-series iterations (overrides params)
        #[arg(long)]
        iters: Option<u32>,

        /// Months advanced per iteration (overrides params)
        #[arg(long)]
        step_months: Option<u32>,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Omit the header row in the output
        #[arg(long)]
        no_header: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tidy {
            input,
            output,
            date_format,
            no_header,
        } => cmd_tidy(&input, &output, date_format, no_header),

        Commands::Skill {
            input,
            output,
            date_format,
            no_header,
            include_scorer_fields,
        } => cmd_skill(&input, &output, date_format, no_header, include_scorer_fields),

        Commands::Reshape {
            input,
            output,
            date_format,
            no_header,
        } => cmd_reshape(&input, &output, date_format, no_header),

        Commands::Generate {
            personnel,
            output,
            capacity,
            params,
            start_date,
            iters,
            step_months,
            seed,
            no_header,
        } => cmd_generate(
            &personnel,
            &output,
            capacity,
            params.as_deref(),
            start_date,
            iters,
            step_months,
            seed,
            no_header,
        ),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_tidy(
    input: &Path,
    output: &Path,
    date_format: String,
    no_header: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Melting: {}", input.display());

    let schema = Schema::standard();
    let options = ReshapeOptions {
        date_format,
        include_header: !no_header,
        include_scorer_fields: false,
    };

    let report = melt_csv(input, output, &schema, &options)?;
    eprintln!("   Wide rows: {}", report.wide_rows);
    eprintln!("✅ Emitted {} tidy observations", report.tidy_rows);
    eprintln!("💾 Saved to: {}", output.display());
    Ok(())
}

fn cmd_skill(
    input: &Path,
    output: &Path,
    date_format: String,
    no_header: bool,
    include_scorer_fields: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Pivoting: {}", input.display());

    let options = ReshapeOptions {
        date_format,
        include_header: !no_header,
        include_scorer_fields,
    };

    let report = pivot_csv(input, output, &options)?;
    eprintln!("   Tidy rows: {}", report.tidy_rows);
    eprintln!("✅ Emitted {} skill records", report.skill_rows);
    eprintln!("💾 Saved to: {}", output.display());
    Ok(())
}

fn cmd_reshape(
    input: &Path,
    output: &Path,
    date_format: String,
    no_header: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Reshaping: {}", input.display());

    let schema = Schema::standard();
    let options = ReshapeOptions {
        date_format,
        include_header: !no_header,
        include_scorer_fields: false,
    };

    let report = reshape_csv(input, output, &schema, &options)?;
    eprintln!("   Wide rows: {}", report.wide_rows);
    eprintln!("   Tidy observations: {}", report.tidy_rows);
    eprintln!("✅ Emitted {} skill records", report.skill_rows);
    eprintln!("💾 Saved to: {}", output.display());
    Ok(())
}

fn cmd_generate(
    personnel_path: &Path,
    output: &Path,
    capacity: bool,
    params_path: Option<&Path>,
    start_date: Option<NaiveDate>,
    iters: Option<u32>,
    step_months: Option<u32>,
    seed: Option<u64>,
    no_header: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Personnel list: {}", personnel_path.display());
    let personnel = read_personnel(personnel_path)?;
    eprintln!("   {} people", personnel.len());

    let mut params = match params_path {
        Some(path) => GenerateParams::from_json(&fs::read_to_string(path)?)?,
        None => GenerateParams::default(),
    };
    if let Some(date) = start_date {
        params.start_date = date;
    }
    if let Some(n) = iters {
        params.timeseries_iters = n;
    }
    if let Some(n) = step_months {
        params.timeseries_months_step = n;
    }
    params.validate()?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let schema = Schema::standard();
    eprintln!(
        "⚙️  Generating {} dataset ({} iterations x {} months)...",
        if capacity { "capacity-aware" } else { "basic" },
        params.timeseries_iters,
        params.timeseries_months_step,
    );

    let dataset = if capacity {
        generate_capacity_dataset(&schema, &personnel, &params, &mut rng)?
    } else {
        generate_dataset(&schema, &personnel, &params, &mut rng)?
    };

    let baseline_rows = personnel.len() * schema.scorers().len();
    write_wide_table(output, &schema, &dataset, !no_header)?;
    eprintln!(
        "✅ Generated {} rows ({} baseline + {} period rows)",
        dataset.len(),
        baseline_rows,
        dataset.len() - baseline_rows,
    );
    eprintln!("💾 Saved to: {}", output.display());
    Ok(())
}
