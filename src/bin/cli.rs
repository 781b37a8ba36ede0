//! PartScout CLI client.
//!
//! Issues a search against a running partscout-server, routing the
//! request through the offline cache layer: the first successful response
//! for a query is stored, and the same query keeps working when the
//! server or network is unreachable.
//!
//! Usage: `partscout <query> [source,source,...] [--server <url>]`

use partscout::offline::{HttpFetcher, OfflineCache, RequestKey};
use partscout::{AppConfig, AppError};
use std::sync::Arc;

fn usage() -> ! {
    eprintln!("usage: partscout <query> [source,source,...] [--server <url>]");
    std::process::exit(2);
}

struct CliArgs {
    query: String,
    sources: Option<String>,
    server: Option<String>,
}

fn parse_args(mut args: std::env::Args) -> CliArgs {
    let _program = args.next();
    let mut positionals = Vec::new();
    let mut server = None;

    while let Some(arg) = args.next() {
        if arg == "--server" {
            server = args.next().or_else(|| usage());
        } else if arg == "--help" || arg == "-h" {
            usage();
        } else {
            positionals.push(arg);
        }
    }

    let mut positionals = positionals.into_iter();
    let Some(query) = positionals.next() else {
        usage();
    };
    CliArgs {
        query,
        sources: positionals.next(),
        server,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    partscout::logging::init();
    let args = parse_args(std::env::args());

    let mut config = AppConfig::default();
    if let Some(server) = &args.server {
        config.offline.origin = server.trim_end_matches('/').to_string();
    }

    let cache = OfflineCache::open(config.offline.clone(), Arc::new(HttpFetcher::new()))?;
    let purged = cache.activate()?;
    if !purged.is_empty() {
        tracing::debug!(?purged, "activated cache version");
    }

    let mut url = format!(
        "{}{}?q={}",
        config.offline.origin.trim_end_matches('/'),
        config.offline.api_prefix,
        urlencoding::encode(&args.query)
    );
    if let Some(sources) = &args.sources {
        url.push_str("&sources=");
        url.push_str(&urlencoding::encode(sources));
    }

    let response = cache
        .handle(&RequestKey::get(url))
        .await?
        .ok_or_else(|| AppError::Offline("search request yielded no response".into()))?;

    let body: serde_json::Value = serde_json::from_slice(&response.body)
        .map_err(|e| AppError::Offline(format!("unreadable response body: {e}")))?;

    if response.status != 200 {
        let message = body["error"].as_str().unwrap_or("request failed");
        anyhow::bail!("server error ({}): {message}", response.status);
    }

    if body["meta"]["error"] == "offline" {
        eprintln!("offline — no cached copy of this search yet");
    }

    let items = body["items"].as_array().cloned().unwrap_or_default();
    if items.is_empty() {
        println!("no results for \"{}\"", args.query);
        return Ok(());
    }

    println!("{} result(s) for \"{}\":", items.len(), args.query);
    for item in &items {
        let source = item["source"].as_str().unwrap_or("?");
        let title = item["title"].as_str().unwrap_or("(untitled)");
        let part_number = item["part_number"].as_str().unwrap_or("");
        let price = item["price"].as_str().unwrap_or("");
        let mut line = format!("  [{source}] {title}");
        if !part_number.is_empty() {
            line.push_str(&format!("  #{part_number}"));
        }
        if !price.is_empty() {
            line.push_str(&format!("  {price}"));
        }
        println!("{line}");
    }
    Ok(())
}
