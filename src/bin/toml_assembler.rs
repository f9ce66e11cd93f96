use anyhow::Context;
use clap::Parser;
use cv_assembler::core::ConfigProvider;
use cv_assembler::utils::{logger, validation::Validate};
use cv_assembler::{AssemblyEngine, CvPipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-assembler")]
#[command(about = "CV assembly driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "cv-assembler.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the year that "present" resolves to
    #[arg(long)]
    current_year: Option<i32>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based CV assembly");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if let Some(year) = args.current_year {
        config.matrix.get_or_insert_with(Default::default).current_year = Some(year);
        tracing::info!("🔧 Current year overridden to: {}", year);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code().max(1));
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args)?;

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path());
    let pipeline = CvPipeline::new(storage, config);
    let engine = AssemblyEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ CV assembly completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ CV assembly failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) -> anyhow::Result<()> {
    println!("📋 Configuration Summary:");
    println!("  Document: {}", config.document.title);
    println!("  Data: {}", config.data_source());
    println!("  Output: {}/{}", config.output_path(), config.bundle_filename());
    println!("  Formats: {}", config.load.output_formats.join(", "));
    match config.current_year() {
        Some(year) => println!("  Present resolves to: {}", year),
        None => println!("  Present resolves to: current year"),
    }

    for (name, id) in config.template_document_ids()? {
        println!("  Template {}: {}", name, id);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
    Ok(())
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Data Source Analysis:");
    println!("  Source: {}", config.data_source());
    if cv_assembler::utils::validation::is_remote_source(config.data_source()) {
        println!("  Type: HTTP");
        if let Some(timeout) = config.source.timeout_seconds {
            println!("  Timeout: {}s", timeout);
        }
    } else {
        let exists = tokio::fs::try_exists(config.data_source()).await.unwrap_or(false);
        println!("  Type: local file ({})", if exists { "found" } else { "missing" });
    }

    if let Some(template) = config.text_template() {
        println!();
        println!("📝 Text template: {}", template);
    }

    println!();
    println!("💾 Output Configuration:");
    println!("  Bundle: {}/{}", config.output_path(), config.bundle_filename());
    println!("  Formats: {}", config.load.output_formats.join(", "));

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
