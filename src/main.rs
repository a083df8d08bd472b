use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use tiktok_recipe::server::{self, AppState};
use tiktok_recipe::{render_recipe_pdf, AppConfig, Recipe, RecipeExtractor};

#[derive(Parser)]
#[command(name = "tiktok-recipe", version, about = "Turn TikTok cooking videos into recipes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Extract a recipe and print it as JSON
    Extract {
        url: String,
        /// Also render the recipe to this PDF file
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Render a recipe JSON file as a PDF
    Pdf {
        recipe: PathBuf,
        /// Output path (defaults to the derived file name)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Command::Serve { host, port } => {
            let state = AppState::from_config(&config)?;
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            server::serve(state, &host, port).await?;
        }
        Command::Extract { url, pdf } => {
            let extractor = RecipeExtractor::from_config(&config)?;
            let recipe = match extractor.extract(&url).await {
                Ok(recipe) => recipe,
                Err(e) => {
                    error!("Extraction failed: {}", e);
                    return Err(e.into());
                }
            };
            println!("{}", serde_json::to_string_pretty(&recipe)?);

            if let Some(path) = pdf {
                let rendered = render_recipe_pdf(&extractor, recipe).await?;
                tokio::fs::write(&path, &rendered.bytes).await?;
                info!("Wrote {}", path.display());
            }
        }
        Command::Pdf { recipe, out } => {
            let json = tokio::fs::read_to_string(&recipe).await?;
            let recipe: Recipe = serde_json::from_str(&json)?;
            let extractor = RecipeExtractor::from_config(&config)?;
            let rendered = render_recipe_pdf(&extractor, recipe).await?;

            let path = out.unwrap_or_else(|| PathBuf::from(&rendered.file_name));
            tokio::fs::write(&path, &rendered.bytes).await?;
            info!("Wrote {} ({} bytes)", path.display(), rendered.bytes.len());
            println!("{}", path.display());
        }
    }

    Ok(())
}
