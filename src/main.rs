mod chapter;
mod citation;
mod client;
mod deeplink;
mod enrich;
mod error;
mod output;
mod parser;
mod search;

use std::time::Instant;

use clap::Parser;

use chapter::ChapterCache;
use client::{ApiClient, DEFAULT_BASE_URL};
use search::SearchParams;

/// Number of results echoed to stderr.
const SUMMARY_LIMIT: usize = 5;

#[derive(Parser)]
#[command(
    name = "iw_search",
    about = "Search the Incarnate Word corpus and build paragraph deep links"
)]
struct Cli {
    /// Site root for both the search and chapter APIs
    #[arg(long, env = "IW_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(flatten)]
    params: SearchParams,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let params = &cli.params;

    let client = ApiClient::new(&cli.base_url)?;
    let response = search::search(&client, params).await?;

    let mut cache = ChapterCache::new();
    let enriched = enrich::enrich(
        &client,
        &response.results,
        &params.q,
        params.deep_link,
        &mut cache,
    )
    .await;

    let results: Vec<_> = response
        .results
        .iter()
        .map(|r| output::clean_result(r, params.strip_html, params.snippet_limit()))
        .collect();

    eprintln!(
        "Found {} results (total: {}).",
        results.len(),
        response
            .total()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".into())
    );
    if !results.is_empty() {
        eprintln!("\nTop results:\n");
        for (i, (r, e)) in results.iter().zip(&enriched).take(SUMMARY_LIMIT).enumerate() {
            eprintln!("--- {} ---", i + 1);
            eprintln!(
                "{}",
                output::format_result(r, client.base_url(), e.deep_url.as_deref())
            );
            eprintln!();
        }
    }

    let out = output::Output {
        query: params,
        total: response.total(),
        pages: response.pages(),
        results,
        suggesters: &response.suggesters,
        citations: enriched.into_iter().map(|e| e.citation).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);

    tracing::debug!(
        "Done in {:.1}s ({} chapters cached)",
        t0.elapsed().as_secs_f64(),
        cache.len()
    );
    Ok(())
}
