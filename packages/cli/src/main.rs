//! `ghsearch` — GitHub repository search from the command line.
//!
//! Provides two subcommands:
//!
//! - **`search`** — query `GET /search/repositories` and print the hits.
//! - **`decode`** — decode a saved search response from a file or stdin,
//!   through the same pipeline the live request uses.
//!
//! Both print a human-readable summary by default, or the decoded result as
//! JSON with `--json`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use ghsearch::render::{render_repository, render_search, render_search_header};
use ghsearch::Repository;
use ghsearch_api::{SearchRepositories, SearchResult};
use ghsearch_client::{decode_body, ClientConfig, RequestExecutor};
use url::Url;

/// ghsearch — GitHub repository search
///
/// Search repositories and inspect typed search results.
#[derive(Parser)]
#[command(name = "ghsearch", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search GitHub repositories.
    ///
    /// QUERY is passed verbatim as the `q` parameter, so qualifiers work:
    ///   ghsearch search "tetris language:assembly"
    ///   ghsearch search hatena --page 2 --json
    ///
    /// Exits 0 on success, 1 if the request or decoding fails.
    Search {
        /// Search keywords and qualifiers.
        query: String,

        /// Result page to fetch (1-based).
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Print the decoded result as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// API origin to query instead of https://api.github.com.
        #[arg(long, env = "GHSEARCH_API_ORIGIN", value_name = "URL")]
        origin: Option<Url>,
    },

    /// Decode a saved search response.
    ///
    /// Reads the raw JSON body of a `/search/repositories` response and
    /// decodes it exactly as a live response would be. Exits 1 on the first
    /// decode error.
    ///
    /// Pass `-` as FILE to read from stdin.
    Decode {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,

        /// Print the decoded result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ghsearch_client=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search {
            query,
            page,
            json,
            origin,
        } => {
            let mut config =
                ClientConfig::from_env().unwrap_or_else(|e| fatal(&e.to_string()));
            if let Some(origin) = origin {
                config.api_origin = origin;
            }

            let executor = RequestExecutor::from_config(&config)
                .unwrap_or_else(|e| fatal(&format!("failed to build HTTP client: {}", e)));

            match executor.send(&SearchRepositories::new(query, page)).await {
                Ok(result) => print_result(&result, json),
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(1);
                }
            }
        }

        Command::Decode { file, json } => {
            let body = read_input(&file);
            match decode_body::<SearchResult<Repository>>(&body) {
                Ok(result) => print_result(&result, json),
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}

/// Print a page either as JSON or as text.
fn print_result(result: &SearchResult<Repository>, json: bool) {
    if json {
        let out = serde_json::to_string_pretty(result)
            .unwrap_or_else(|e| fatal(&format!("failed to serialise result: {}", e)));
        println!("{}", out);
    } else {
        print!("{}", render_text(result));
    }
}

/// A single hit is rendered in full detail under the page summary; several
/// hits use the one-line-per-repository list.
fn render_text(result: &SearchResult<Repository>) -> String {
    match result.items.as_slice() {
        [only] => format!(
            "{}{}",
            render_search_header(result.total_count, result.incomplete_results, 1),
            render_repository(only)
        ),
        items => render_search(result.total_count, result.incomplete_results, items),
    }
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &PathBuf) -> Vec<u8> {
    if path.to_str() == Some("-") {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read(path).unwrap_or_else(|e| fatal(&format!("failed to read {}: {}", path.display(), e)))
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("ghsearch: {}", msg);
    process::exit(2);
}
