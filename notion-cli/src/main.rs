// Command-line interface for notion-md
//
// Converts a Notion page or database into Markdown using the notion-babel crate.
//
// Usage:
//  notion-md <locator> [-o <file>]             - Convert a page (or a database URL with ?v=)
//  notion-md <locator> --database              - Force database interpretation of the locator
//  notion-md <locator> --collapsible           - Wrap the output in a <details> section
//
// The locator is a Notion URL, a 32-digit id or a dashed UUID.
//
// Configuration:
//
// Settings come from the embedded defaults, then ./notion.toml if present, then --config PATH,
// then the flags below. The API token is read from --token or from the environment variable named
// by api.token_env (NOTION_TOKEN by default).
//
// Logging goes to stderr (RUST_LOG is honored; -v / -vv raise the default level), stdout only
// ever carries Markdown.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use notion_babel::{
    classify, classify_as, render_section, ClientOptions, Converter, LocatorKind, MarkdownRules,
    NotionClient,
};
use notion_config::{ConfigError, Loader, NotionConfig, LOCAL_CONFIG_FILE};
use std::fs;

const TOGGLE_STYLES: &[&str] = &["flatten", "details"];

fn build_cli() -> Command {
    Command::new("notion-md")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Notion pages and databases to Markdown")
        .long_about(
            "notion-md fetches a Notion page (or database) through the public API and prints it \
            as Markdown.\n\n\
            Sub-pages are embedded up to --max-depth levels deep; deeper ones, and any that \
            can't be fetched, become links.\n\n\
            Examples:\n  \
            notion-md https://www.notion.so/acme/Roadmap-0123abcd456789ef0123456789abcdef\n  \
            notion-md 0123abcd456789ef0123456789abcdef -o roadmap.md\n  \
            notion-md <database-url>?v=<view> --no-properties\n  \
            NOTION_TOKEN=secret notion-md <id> --toggle-style details -vv",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("locator")
                .help("Notion URL, page id or database id")
                .required(true)
                .index(1)
                .value_hint(ValueHint::Url),
        )
        .arg(
            Arg::new("database")
                .long("database")
                .help("Treat the locator as a database even without a view parameter")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the Markdown to FILE instead of stdout")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a notion.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .value_name("TOKEN")
                .help("Integration token (defaults to the variable named by api.token_env)"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .value_name("N")
                .help("Levels of sub-pages whose content is embedded (0 links every sub-page)")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("no-properties")
                .long("no-properties")
                .help("Omit the page property table")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("toggle-style")
                .long("toggle-style")
                .value_name("STYLE")
                .help("Render toggles flattened or as <details> disclosures")
                .value_parser(clap::builder::PossibleValuesParser::new(TOGGLE_STYLES)),
        )
        .arg(
            Arg::new("collapsible")
                .long("collapsible")
                .help("Wrap the document in a <details> section titled with the page title")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_count("verbose"));

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &matches,
    )
    .unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    });

    let raw_locator = matches
        .get_one::<String>("locator")
        .expect("locator is required");
    let locator = if matches.get_flag("database") {
        classify_as(raw_locator, LocatorKind::Database)
    } else {
        classify(raw_locator)
    }
    .unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });

    let token = resolve_token(
        matches.get_one::<String>("token").map(|s| s.as_str()),
        &config.api.token_env,
        std::env::var(&config.api.token_env).ok(),
    )
    .unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });

    let client = NotionClient::new(token, ClientOptions::from(&config.api));
    let converter = Converter::new(client)
        .with_fetch_options(config.fetch_options())
        .with_rules(MarkdownRules::from(&config.render));

    let document = converter.convert(&locator).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });

    let output = if matches.get_flag("collapsible") {
        render_section(&document.title, document.icon.as_ref(), &document.markdown)
    } else {
        document.markdown
    };

    match matches.get_one::<String>("output") {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            }
            log::info!("wrote {} bytes to {path}", output.len());
        }
        None => print!("{output}"),
    }
}

/// Default level for the given `-v` count. `RUST_LOG` still wins.
fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(level_for_verbosity(verbosity))
        .parse_default_env()
        .init();
}

/// Layer defaults, ./notion.toml, the explicit file and the command-line flags.
fn load_cli_config(
    explicit_path: Option<&str>,
    matches: &ArgMatches,
) -> Result<NotionConfig, ConfigError> {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let mut loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    if let Some(depth) = matches.get_one::<u32>("max-depth") {
        loader = loader.set_override("fetch.max_depth", i64::from(*depth))?;
    }
    if matches.get_flag("no-properties") {
        loader = loader.set_override("render.include_properties", false)?;
    }
    if let Some(style) = matches.get_one::<String>("toggle-style") {
        loader = loader.set_override("render.toggle_style", style.as_str())?;
    }

    loader.build()
}

/// Pick the explicit token, else the environment value.
fn resolve_token(
    explicit: Option<&str>,
    env_name: &str,
    env_value: Option<String>,
) -> Result<String, String> {
    match explicit {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => env_value
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| format!("no API token: pass --token or set {env_name}")),
    }
}
