use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "medivision", version)]
#[command(about = "Structure prescription OCR text and export printable reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML)
    #[arg(long, env = "MEDIVISION_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Args)]
struct Input {
    /// OCR text file, or `-` for stdin
    input: PathBuf,

    /// Document type predicted by an upstream classifier
    #[arg(long)]
    document_type: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the structured record as JSON
    Classify {
        #[command(flatten)]
        input: Input,
        /// Show which slot each line went to instead of the record
        #[arg(long)]
        explain: bool,
    },
    /// Print the on-screen report sections
    Render {
        #[command(flatten)]
        input: Input,
        /// Input is a serialized record rather than OCR text
        #[arg(long)]
        record: bool,
        /// Expand the collapsed OCR text section
        #[arg(long)]
        show_raw: bool,
    },
    /// Write the report as a PDF
    Export {
        #[command(flatten)]
        input: Input,
        /// Input is a serialized record rather than OCR text
        #[arg(long)]
        record: bool,
        /// Output path (defaults to the configured file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = commands::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { input, explain } => {
            let content = commands::read_input(&input.input)?;
            let out = commands::classify_output(
                &content,
                input.document_type.as_deref(),
                explain,
                &settings,
            )?;
            print!("{out}");
            if !explain {
                println!();
            }
        }
        Commands::Render { input, record, show_raw } => {
            let content = commands::read_input(&input.input)?;
            let record =
                commands::load_record(&content, record, input.document_type.as_deref(), &settings)?;
            print!("{}", commands::render_output(&record, show_raw, &settings));
        }
        Commands::Export { input, record, output } => {
            let content = commands::read_input(&input.input)?;
            let record =
                commands::load_record(&content, record, input.document_type.as_deref(), &settings)?;
            let path = commands::export(&record, output, &settings)?;
            tracing::info!("Report saved: {}", path.display());
        }
    }

    Ok(())
}
