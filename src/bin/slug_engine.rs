use clap::Parser;
use slug_core::bulk::BulkOptions;
use slug_core::config::{default_config_path, Config};
use slug_core::SlugEngine;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Line-oriented slug service for hosts that talk over stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "slug_engine", version, about)]
struct Args {
    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Site snapshot path, overriding the config
    #[arg(long)]
    store: Option<PathBuf>,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // stdout carries the protocol; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> slug_core::Result<()> {
    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(default_config_path);
    let mut config = Config::load(&config_path)?;
    if let Some(store) = args.store {
        config.store_path = store;
    }
    init_logging(&config.log_level);
    info!(store = %config.store_path.display(), "slug engine starting");

    let mut engine = SlugEngine::from_file_or_new(&config.store_path);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        debug!(input = %input, "<-");
        let (command, rest) = input
            .split_once(|c: char| c == ' ' || c == '\t')
            .unwrap_or((input.as_str(), ""));

        if command == "EXIT" {
            info!("received EXIT, saving site");
            if let Err(e) = engine.save() {
                warn!(error = %e, "could not save site");
            }
            break;
        }

        let reply = handle_command(command, rest, &mut engine, &config);
        debug!(reply = %reply, "->");
        writeln!(stdout, "{}", reply)?;
        stdout.flush()?;
    }

    info!("shutting down");
    Ok(())
}

fn handle_command(command: &str, rest: &str, engine: &mut SlugEngine, config: &Config) -> String {
    match command {
        "TRANSLITERATE" => format!("SLUG {}", engine.transliterate(rest)),
        "IS_LATIN" => format!("BOOL {}", slug_core::is_latin_slug(rest)),
        "HAS_PERSIAN" => format!("BOOL {}", slug_core::has_persian_or_arabic(rest)),
        "INSPECT" => match serde_json::to_string(&engine.inspect(rest)) {
            Ok(json) => format!("JSON {}", json),
            Err(e) => format!("ERR {}", e),
        },
        "RESOLVE" => {
            let fields: Vec<&str> = rest.split('\t').collect();
            let (taxonomy, slug) = match fields.as_slice() {
                [taxonomy, slug] => (*taxonomy, *slug),
                _ => match rest.split_once(' ') {
                    Some(pair) => pair,
                    None => return "ERR usage: RESOLVE <taxonomy> <slug>".to_string(),
                },
            };
            match engine.resolve(slug, taxonomy) {
                Some(resolved) => format!("RESOLVED {}", resolved),
                None => "UNRESOLVED".to_string(),
            }
        }
        "REQUEST" => {
            let mut query_vars = parse_query(rest);
            let rewritten = engine.normalize_request(&mut query_vars);
            let sorted: BTreeMap<_, _> = query_vars.into_iter().collect();
            match serde_json::to_string(&sorted) {
                Ok(json) => format!("REWRITTEN {} {}", rewritten, json),
                Err(e) => format!("ERR {}", e),
            }
        }
        "ADD_TERM" => {
            let fields: Vec<&str> = rest.split('\t').collect();
            match fields.as_slice() {
                [taxonomy, slug, name] => match engine.add_term(taxonomy, slug, name) {
                    Ok(()) => "OK".to_string(),
                    Err(e) => format!("ERR {}", e),
                },
                _ => "ERR usage: ADD_TERM <taxonomy>\\t<slug>\\t<name>".to_string(),
            }
        }
        "ADD_POST" => {
            let fields: Vec<&str> = rest.split('\t').collect();
            match fields.as_slice() {
                [post_type, slug, title] => format!("OK {}", engine.add_post(post_type, title, slug)),
                _ => "ERR usage: ADD_POST <post_type>\\t<slug>\\t<title>".to_string(),
            }
        }
        "BULK" => match parse_bulk_args(rest, config) {
            Ok(options) => {
                let report = engine.bulk_update(&options);
                format!("REPORT changed={} skipped={}", report.changed, report.skipped)
            }
            Err(message) => format!("ERR {}", message),
        },
        "SAVE" => match engine.save() {
            Ok(()) => "OK".to_string(),
            Err(e) => format!("ERR {}", e),
        },
        _ => {
            warn!(command, "unknown command");
            format!("ERR unknown command {:?}", command)
        }
    }
}

/// `key=value&key=value`; values stay percent-encoded for the resolver.
fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

/// `BULK [offset] [limit] [force|noforce] [post_type]`, defaults from config.
fn parse_bulk_args(rest: &str, config: &Config) -> Result<BulkOptions, String> {
    let mut options = config.bulk.options(0);
    let mut parts = rest.split_whitespace();

    if let Some(offset) = parts.next() {
        options.offset = offset.parse().map_err(|_| format!("bad offset {:?}", offset))?;
    }
    if let Some(limit) = parts.next() {
        options.limit = limit.parse().map_err(|_| format!("bad limit {:?}", limit))?;
    }
    match parts.next() {
        Some("force") => options.force = true,
        Some("noforce") => options.force = false,
        Some(other) => return Err(format!("bad force flag {:?}", other)),
        None => {}
    }
    if let Some(post_type) = parts.next() {
        options.post_type = post_type.to_string();
    }
    Ok(options)
}
