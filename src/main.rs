use clap::Parser;
use service_definition_model::domain::ports::ConfigProvider;
use service_definition_model::utils::error::ErrorSeverity;
use service_definition_model::utils::{logger, validation::Validate};
use service_definition_model::{
    CliConfig, HttpFetcher, LocalStorage, ModelGenerator, TerminalPrompter,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting service-definition-model CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_dir().to_string());
    let generator = ModelGenerator::new(storage, config.clone(), HttpFetcher::new());
    let mut prompter = TerminalPrompter::stdio();

    match generator.run(&mut prompter).await {
        Ok(output) => {
            tracing::info!(
                "✅ Rendered {} services of '{}'",
                output.context.services.len(),
                output.context.name
            );
            println!("📄 Diagram source: {}/{}", config.output_dir(), output.diagram_file);
            if let Some(image) = &output.image_file {
                println!("🖼 Diagram: {}/{}", config.output_dir(), image);
            }
            println!("🔗 {}", output.url);
        }
        Err(e) => {
            tracing::error!(
                "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

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
        }
    }

    Ok(())
}
