use clap::Parser;
use eduatlas::core::affinity::{display_duration, AffinityReport};
use eduatlas::core::ConfigProvider;
use eduatlas::utils::error::{AtlasError, ErrorSeverity};
use eduatlas::utils::{logger, validation::Validate};
use eduatlas::{
    CatalogService, CliConfig, EtlEngine, Importer, LocalStorage, MatrixPipeline, MemoryStore,
    XlsxSource,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting eduatlas");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store = MemoryStore::new();
    let source = XlsxSource::from_config(&config);

    let outcome = if config.no_export {
        let (first, last) = config.row_range();
        Importer::new(&store)
            .import_from_source(&source, first, last)
            .await
            .map(|report| {
                format!(
                    "{} countries, {} programs imported",
                    report.countries_created(),
                    report.programs_created()
                )
            })
    } else {
        let storage = LocalStorage::new(config.output_path.clone());
        let pipeline = MatrixPipeline::new(source, store.clone(), storage, config.clone());
        EtlEngine::new(pipeline).run().await
    };

    match outcome {
        Ok(summary) => {
            tracing::info!("✅ Import completed successfully!");
            println!("✅ Import completed: {}", summary);
        }
        Err(e) => fail(e),
    }

    let service = CatalogService::new(store);

    if let Some(name) = &config.representative {
        match representative(&service, name).await {
            Ok(line) => println!("{}", line),
            Err(e) => fail(e),
        }
    }

    if let [first, second] = config.compare.as_slice() {
        match service.compare(first, second).await {
            Ok(report) => print_report(&report),
            Err(e) => fail(e),
        }
    }

    Ok(())
}

async fn representative(
    service: &CatalogService<MemoryStore>,
    name: &str,
) -> eduatlas::Result<String> {
    let country = service.find_country_by_name(name).await?;
    let program = service.representative_program_for(country.id).await?;
    Ok(format!(
        "{}: {} ({} years, {} ECTS, EQF {}{})",
        country.name,
        program.official_denomination,
        display_duration(&country, &program),
        program.total_credits,
        program.eqf_level,
        if program.is_special_program { ", special" } else { "" }
    ))
}

fn print_report(report: &AffinityReport) {
    println!("{} vs {}", report.first_country, report.second_country);
    for row in &report.rows {
        println!(
            "  {:<18} {:>14} | {:<14} {}",
            row.category, row.first, row.second, row.level
        );
    }
    println!("  FINAL AFFINITY RATE: {}", report.overall);
}

fn fail(e: AtlasError) -> ! {
    tracing::error!(
        "❌ Failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
