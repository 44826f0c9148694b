use clap::Parser;
use covid_map_etl::config::toml_config::BatchConfig;
use covid_map_etl::core::batch::run_batch;
use covid_map_etl::utils::{logger, validation::Validate};
use covid_map_etl::LocalStorage;

#[derive(Parser)]
#[command(name = "batch-etl")]
#[command(about = "Validate every dataset listed in a TOML batch file")]
struct Args {
    /// Path to TOML batch file
    #[arg(short, long, default_value = "datasets.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Override the compression setting from the batch file
    #[arg(long)]
    compress: Option<bool>,

    /// Print the resolved datasets without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_logger(args.verbose, args.log_json);

    tracing::info!("🚀 Starting batch ETL");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match BatchConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(compress) = args.compress {
        config.load.compress = Some(compress);
        tracing::info!("🔧 Compression overridden to: {}", compress);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        return Ok(());
    }

    let report = match run_batch(&config, LocalStorage::current_dir()).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("❌ Batch failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.severity().exit_code().max(1));
        }
    };

    for outcome in &report.outcomes {
        println!(
            "✅ {} ({}): {} records → {}",
            outcome.summary.name,
            outcome.summary.kind,
            outcome.summary.record_count,
            outcome.output_path
        );
    }
    for (name, e) in &report.failures {
        eprintln!("❌ {}: {}", name, e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
    }
    if let Some(mismatches) = &report.mismatches {
        println!("🔎 {} province(s) with facility count mismatches", mismatches.len());
    }

    if let Some(severity) = report.worst_severity() {
        let exit_code = severity.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn display_config_summary(config: &BatchConfig) {
    println!("📋 Batch: {}", config.batch.name);
    if let Some(description) = &config.batch.description {
        println!("  {}", description);
    }
    println!("  Output: {}", config.load.output_path);
    println!("  Compress: {}", config.compress());
    println!("  Reconcile: {}", config.reconcile_enabled());

    for dataset in &config.datasets {
        let state = if dataset.enabled.unwrap_or(true) { "" } else { " (disabled)" };
        println!("  • {} [{}] ← {}{}", dataset.name, dataset.kind, dataset.source, state);
    }

    println!();
}
