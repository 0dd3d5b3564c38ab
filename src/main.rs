//! SauceNAO-RS command line: run one reverse image search and print the matches

use anyhow::{Context, Result};
use clap::Parser;
use saucenao_rs::{
    config::{self, Settings},
    DanbooruData, DbMask, Error, SearchClient, SearchRequest, SearchResponse,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "saucenao", version, about = "Reverse image search with SauceNAO")]
struct Cli {
    /// Image URL (http:// or https://) or path to a local image file
    image: String,

    /// Path to a settings file
    #[arg(short, long, env = "SAUCENAO_SETTINGS_PATH")]
    config: Option<PathBuf>,

    /// Number of results to request
    #[arg(short, long)]
    numres: Option<u32>,

    /// Limit matches to one per index
    #[arg(long)]
    test_mode: bool,

    /// Bitmask of indexes to search
    #[arg(long)]
    dbmask: Option<u64>,

    /// Bitmask of indexes to skip
    #[arg(long)]
    dbmaski: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if matches!(e.downcast_ref::<Error>(), Some(Error::Quota)) {
                error!("Search quota exhausted, try again later");
            } else {
                error!("{:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = match cli.config {
        Some(ref path) => config::load_from(path.clone())?,
        None => config::load_settings()?,
    };
    if settings.api_key.is_empty() {
        info!("No API key configured, searching anonymously");
    }

    let client = SearchClient::from_settings(&settings)?;
    let request = build_request(&cli, &settings).await?;

    info!("Searching for {}", cli.image);
    let response = client.search(request).await?;
    print_response(&response)?;

    Ok(())
}

async fn build_request(cli: &Cli, settings: &Settings) -> Result<SearchRequest> {
    let request = if cli.image.starts_with("http://") || cli.image.starts_with("https://") {
        SearchRequest::url(cli.image.as_str())
    } else {
        SearchRequest::file(&cli.image)
            .await
            .with_context(|| format!("failed to open {}", cli.image))?
    };

    let defaults = &settings.search;
    Ok(request
        .num_results(cli.numres.unwrap_or(defaults.num_results))
        .test_mode(cli.test_mode || defaults.test_mode)
        .db_mask(cli.dbmask.map(DbMask::from_bits).unwrap_or(defaults.db_mask))
        .db_mask_exclude(
            cli.dbmaski
                .map(DbMask::from_bits)
                .unwrap_or(defaults.db_mask_exclude),
        ))
}

fn print_response(response: &SearchResponse) -> Result<()> {
    let header = &response.header;
    if !header.is_success() {
        info!("Service reported status {}", header.status);
    }
    println!(
        "{} results (min similarity {}%), quota {}/{} short, {}/{} long",
        header.results_returned,
        header.minimum_similarity,
        header.short_remaining,
        header.short_limit,
        header.long_remaining,
        header.long_limit
    );

    for result in &response.results {
        println!(
            "{:>6.2}%  {}",
            result.header.similarity, result.header.index_name
        );
        if result.is::<DanbooruData>() {
            let data = result.as_danbooru()?;
            println!("         post {} by {}", data.danbooru_id, data.creator);
            if !data.characters.is_empty() {
                println!("         characters: {}", data.characters);
            }
            if !data.source.is_empty() {
                println!("         source: {}", data.source);
            }
        }
        for url in result.common()?.ext_urls {
            println!("         {}", url);
        }
    }

    Ok(())
}
