mod commands;
mod output;

use challan_core::report::ReportLayout;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "challan",
    version,
    about = "Extract TDS challan receipts into a deposit reconciliation report"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Predefined policy: standard (default), deposit-month, legacy
    #[arg(short, long = "preset", value_name = "NAME", conflicts_with = "policy")]
    preset: Option<String>,

    /// Custom JSON policy file
    #[arg(long = "policy", value_name = "FILE")]
    policy: Option<PathBuf>,

    /// Run pdftotext in -layout mode
    #[arg(long)]
    layout: bool,
}

#[derive(clap::Args)]
struct ColumnArgs {
    /// Prepend an "S.No" running serial column
    #[arg(long)]
    serial: bool,

    /// Add an "Expected Interest" column implied by the statutory rate
    #[arg(long)]
    expected_interest: bool,
}

impl ColumnArgs {
    fn layout(&self) -> ReportLayout {
        ReportLayout {
            serial_number: self.serial,
            expected_interest: self.expected_interest,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract challans from PDF or text receipts and print the records
    Parse {
        /// Challan receipts (PDF or pdftotext output)
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        #[command(flatten)]
        input: InputArgs,

        /// Show how every derived field was computed
        #[arg(long)]
        verbose: bool,

        #[command(flatten)]
        columns: ColumnArgs,
    },
    /// Write the reconciliation spreadsheet
    Report {
        /// Challan receipts (PDF or pdftotext output)
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Spreadsheet to write
        #[arg(
            short = 'O',
            long = "out",
            value_name = "FILE",
            default_value = "challan_report.xlsx"
        )]
        out: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        columns: ColumnArgs,
    },
    /// Inspect and validate derivation policies
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
}

#[derive(Subcommand)]
enum PolicyAction {
    /// List predefined policies
    List,
    /// Explain a policy in plain language
    Explain {
        /// Preset name (e.g., "standard")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom policy file
    Validate {
        /// Path to JSON policy file
        file: PathBuf,
    },
}

fn main() {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input_files,
            output,
            input,
            verbose,
            columns,
        } => commands::resolve_policy(input.preset.as_deref(), input.policy.as_deref())
            .and_then(|p| {
                let options = commands::BatchArgs {
                    policy: p,
                    layout: input.layout,
                };
                commands::parse::run(
                    &input_files,
                    &output,
                    &options,
                    verbose,
                    columns.layout(),
                )
            }),
        Commands::Report {
            input_files,
            out,
            input,
            columns,
        } => commands::resolve_policy(input.preset.as_deref(), input.policy.as_deref())
            .and_then(|p| {
                let options = commands::BatchArgs {
                    policy: p,
                    layout: input.layout,
                };
                commands::report::run(&input_files, &out, &options, columns.layout())
            }),
        Commands::Policy { action } => match action {
            PolicyAction::List => commands::policy::list(),
            PolicyAction::Explain { preset } => commands::policy::explain(&preset),
            PolicyAction::Schema => commands::policy::schema(),
            PolicyAction::Validate { file } => commands::policy::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
