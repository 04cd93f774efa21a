// src/main.rs
use std::path::PathBuf;

use clap::Parser;
use planning_extractor::extractors::pipeline::{debug_patterns, ResponseParser};
use planning_extractor::extractors::ParserConfig;
use planning_extractor::response::load_response;
use planning_extractor::storage::StorageManager;
use planning_extractor::utils::{self, AppError};

/// Command Line Interface for the planning response parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bot response to parse: a text file, a JSON file of message strings, or `-` for stdin
    #[arg(short, long)]
    input: PathBuf,

    /// Planning application reference, used to name the output files
    #[arg(short, long, default_value = "10001")]
    reference: String,

    /// Output directory for parsed reports
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Print the parsed report to stdout as well
    #[arg(short, long)]
    print: bool,

    /// Debug mode - save an annotated copy of the response
    #[arg(short, long)]
    debug: bool,

    /// Minimum length of a separator line (overrides PLANNING_SEPARATOR_MIN_LEN)
    #[arg(long)]
    separator_min_len: Option<usize>,

    /// Lines allowed between a MISSING FIELDS header and its first file (overrides PLANNING_MISSING_FIELDS_LOOKAHEAD)
    #[arg(long)]
    missing_fields_lookahead: Option<usize>,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Environment thresholds, then command-line overrides
    let mut config = ParserConfig::from_env()?;
    if let Some(len) = args.separator_min_len {
        tracing::debug!("Setting separator_min_len to {} from command-line argument", len);
        config.separator_min_len = len;
    }
    if let Some(lines) = args.missing_fields_lookahead {
        tracing::debug!("Setting missing_fields_lookahead to {} from command-line argument", lines);
        config.missing_fields_lookahead = lines;
    }

    // 4. Load the bot response
    let response = load_response(&args.input)?;
    tracing::info!("Loaded {} response fragment(s)", response.fragments.len());
    if response.has_permission_request() {
        tracing::warn!("The assistant is asking for additional permissions; the report will likely be empty");
    }

    // 5. Parse
    let parser = ResponseParser::new(config);
    let report = parser.parse(&response);

    // 6. Save
    let storage = StorageManager::new(&args.output_dir)?;
    let report_path = storage.save_report(&args.reference, &report)?;
    if let Err(e) = storage.save_report_metadata(&args.reference, &report) {
        tracing::error!("Failed to save report metadata: {}", e);
    }

    if args.debug {
        let debug_dir = args.output_dir.join(&args.reference).join("debug");
        std::fs::create_dir_all(&debug_dir)?;

        let owned_patterns = debug_patterns();
        let patterns: Vec<(&str, &str)> = owned_patterns.iter().map(|(p, k)| (p.as_str(), *k)).collect();
        let debug_path = debug_dir.join("response_annotated.txt");
        if let Err(e) = utils::debug::create_debug_text(&response.joined(), &debug_path, &patterns) {
            tracing::warn!("Failed to create annotated response: {}", e);
        }
    }

    if args.print {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Config(format!("Failed to render report: {}", e)))?;
        println!("{}", json);
    }

    tracing::info!(
        "Processing finished. {} of {} documents complete, report at {}",
        report.complete_count(),
        report.documents.len(),
        report_path.display()
    );
    Ok(())
}
