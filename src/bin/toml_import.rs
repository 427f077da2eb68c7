use clap::Parser;
use eduatlas::core::ConfigProvider;
use eduatlas::utils::error::ErrorSeverity;
use eduatlas::utils::{logger, validation::Validate};
use eduatlas::{
    EtlEngine, Importer, LocalStorage, MatrixPipeline, MemoryStore, TomlConfig, XlsxSource,
};

#[derive(Parser)]
#[command(name = "toml-import")]
#[command(about = "Seeds the education catalog using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "eduatlas.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show the resolved configuration without reading the workbook
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.log_format() == Some("json") {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose());
    }

    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No workbook will be read");
        return Ok(());
    }

    let store = MemoryStore::new();
    let source = XlsxSource::from_config(&config);

    let result = if config.export_enabled() {
        let storage = LocalStorage::new(config.output_path());
        let pipeline = MatrixPipeline::new(source, store, storage, config.clone());
        EtlEngine::new(pipeline).run().await
    } else {
        let (first, last) = config.row_range();
        Importer::new(&store)
            .import_from_source(&source, first, last)
            .await
            .map(|report| format!("{} countries imported", report.countries_created()))
    };

    match result {
        Ok(summary) => {
            tracing::info!("✅ Seeding completed: {}", summary);
            println!("✅ {}", summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Seeding failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

fn display_config_summary(config: &TomlConfig) {
    let (first, last) = config.row_range();
    tracing::info!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        tracing::info!("   {}", description);
    }
    tracing::info!(
        "📄 Workbook: {} (sheet {}, rows {}..={})",
        config.workbook_path(),
        config.sheet_index(),
        first,
        last
    );
    match config.export_bundle() {
        Some(bundle) if config.export_enabled() => tracing::info!(
            "📦 Export: {:?} bundled into {}/{}",
            config.export_formats(),
            config.output_path(),
            bundle
        ),
        _ if config.export_enabled() => tracing::info!(
            "📦 Export: {:?} into {}",
            config.export_formats(),
            config.output_path()
        ),
        _ => tracing::info!("📦 Export disabled"),
    }
}
