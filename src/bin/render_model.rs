//! Renders an already saved model without prompting: prints the diagram
//! source and the rendering-server URL.

use clap::Parser;
use service_definition_model::core::encoding::DiagramVariant;
use service_definition_model::utils::{logger, validation::Validate};
use service_definition_model::{GeneratorConfig, HttpFetcher, LocalStorage, ModelGenerator};

#[derive(Parser)]
#[command(name = "render-model")]
#[command(about = "Compile a saved service model into a PlantUML URL")]
struct Args {
    /// Directory containing data.json
    #[arg(short, long, default_value = "./dist")]
    dir: String,

    /// Link to the editable markup rendition instead of the SVG
    #[arg(long)]
    markup: bool,

    /// Print only the URL
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_json_logger();

    let mut config = GeneratorConfig::default();
    config.output.dir = args.dir.clone();
    config.renderer.variant = DiagramVariant::from_change_flag(args.markup);
    config.validate()?;

    let storage = LocalStorage::new(args.dir);
    let generator = ModelGenerator::new(storage, config, HttpFetcher::new());
    let output = generator.compile().await?;

    if !args.quiet {
        print!("{}", output.diagram);
    }
    println!("{}", output.url);

    Ok(())
}
