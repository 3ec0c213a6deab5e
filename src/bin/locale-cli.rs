use std::path::PathBuf;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri};
use clap::{Parser, Subcommand};
use serde_json::json;

use locale_router::config::load_config;
use locale_router::lifecycle::load_site;
use locale_router::locale::parse_preferred;
use locale_router::routing::{
    absolute_locale_url, relative_locale_url, RequestContext,
};

#[derive(Parser)]
#[command(name = "locale-cli")]
#[command(about = "Inspect locale routing decisions for a site", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "locale-router.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path or URL to a routing decision
    Resolve {
        /// `/new-site/pt/start` or `https://example.pt/start`
        url: String,
        /// Extra request header, `Name: value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
    /// Intersect an Accept-Language header with the configured locales
    Preferred { header: String },
    /// Print the URL of a path in every configured locale
    Urls { path: String },
    /// Validate the configuration file
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { url, headers } => {
            let site = load_site(&cli.config)?;
            let uri: Uri = url.parse()?;
            let ctx = RequestContext::from_request_parts(&uri, &parse_headers(&headers)?);
            let decision = site.resolver.resolve(&ctx, &site.pages);
            print_json(&json!({
                "host": ctx.host(),
                "protocol": ctx.protocol(),
                "decision": decision,
            }))?;
        }
        Commands::Preferred { header } => {
            let (_, locales) = load_config(&cli.config)?;
            let preferred = parse_preferred(&header, &locales);
            print_json(&json!({
                "primary": preferred.primary_label(),
                "list": preferred.list(),
            }))?;
        }
        Commands::Urls { path } => {
            let (_, locales) = load_config(&cli.config)?;
            let urls: Vec<_> = locales
                .locales()
                .iter()
                .map(|locale| {
                    json!({
                        "locale": locale.path(),
                        "relative": relative_locale_url(&locales, locale.path(), &path),
                        "absolute": absolute_locale_url(&locales, locale.path(), &path),
                    })
                })
                .collect();
            print_json(&json!(urls))?;
        }
        Commands::Check => match load_config(&cli.config) {
            Ok((_, locales)) => {
                print_json(&json!({
                    "valid": true,
                    "strategy": locales.strategy(),
                    "default_locale": locales.default_locale().path(),
                    "locales": locales.locales().iter().map(|l| l.path()).collect::<Vec<_>>(),
                    "base": locales.base(),
                }))?;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn parse_headers(raw: &[String]) -> Result<HeaderMap, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    for entry in raw {
        let (name, value) = entry
            .split_once(':')
            .ok_or_else(|| format!("header `{entry}` must look like `Name: value`"))?;
        headers.append(
            HeaderName::from_bytes(name.trim().as_bytes())?,
            HeaderValue::from_str(value.trim())?,
        );
    }
    Ok(headers)
}

fn print_json(value: &serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
