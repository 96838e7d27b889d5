use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use prodex_extract::{metadata, ExtractRequest, Extractor, RawParams};
use prodex_store::{load_snapshot, CatalogStore, InMemoryCatalog};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prodex-cli")]
#[command(about = "Catalog feed extractor command line interface")]
struct Cli {
    /// Catalog snapshot to read.
    #[arg(
        long,
        global = true,
        env = "PRODEX_CATALOG_PATH",
        default_value = "./config/catalog.yaml"
    )]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the feed envelope for a request, without token validation.
    Extract {
        /// Shop base URL used to build permalinks.
        #[arg(long, env = "PRODEX_SITE_URL")]
        site_url: String,
        /// Emit priced variations in place of their variable products.
        #[arg(long)]
        variations: bool,
        /// Items per page; `-1` returns every match.
        #[arg(long, allow_hyphen_values = true)]
        limit: Option<i64>,
        #[arg(long)]
        page: Option<i64>,
        /// Comma-separated product ids.
        #[arg(long)]
        products: Option<String>,
        /// Comma-separated, optionally URL-encoded slugs.
        #[arg(long)]
        slugs: Option<String>,
        #[arg(long, env = "PRODEX_DEFAULT_PAGE_SIZE", default_value_t = 10)]
        default_page_size: u32,
    },
    /// Load and validate a catalog snapshot.
    Validate,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let fallback_level = std::env::var("PRODEX_LOG_LEVEL").unwrap_or_else(|_| "warn".to_owned());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract {
            site_url,
            variations,
            limit,
            page,
            products,
            slugs,
            default_page_size,
        } => {
            let params = RawParams {
                token: None,
                variation: variations.then(|| "1".to_owned()),
                limit: limit.map(|n| n.to_string()),
                page: page.map(|n| n.to_string()),
                products,
                slugs,
            };
            let output = run_extract(&cli.catalog, &site_url, &params, default_page_size)?;
            println!("{output}");
        }
        Commands::Validate => println!("{}", run_validate(&cli.catalog)?),
    }

    Ok(())
}

fn run_extract(
    catalog: &Path,
    site_url: &str,
    params: &RawParams,
    default_page_size: u32,
) -> anyhow::Result<String> {
    let store = InMemoryCatalog::new(load_snapshot(catalog)?, site_url);
    let request = ExtractRequest::from_params(params, default_page_size);
    let extraction = Extractor::new(&store).extract(&request);
    tracing::info!(
        emitted = extraction.products.len(),
        skipped = extraction.skipped,
        "extraction complete"
    );

    let envelope = extraction.into_envelope(metadata(&store.info(), env!("CARGO_PKG_VERSION")));
    Ok(serde_json::to_string_pretty(&envelope)?)
}

fn run_validate(catalog: &Path) -> anyhow::Result<String> {
    let snapshot = load_snapshot(catalog)?;
    let variations = snapshot
        .products
        .iter()
        .filter(|p| p.is_variation())
        .count();
    let top_level = snapshot.products.len() - variations;
    Ok(format!(
        "{}: {top_level} products, {variations} variations, {} categories, {} taxonomies",
        catalog.display(),
        snapshot.categories.len(),
        snapshot.taxonomies.len(),
    ))
}

#[cfg(test)]
mod tests;
