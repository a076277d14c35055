use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the toggle styles accepted by src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const TOGGLE_STYLES: &[&str] = &["flatten", "details"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("notion-md")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Notion pages and databases to Markdown")
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
                .help("Treat the locator as a database")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the Markdown to FILE instead of stdout")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a notion.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(Arg::new("token").long("token").help("Integration token"))
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Levels of sub-pages whose content is embedded"),
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
                .help("Render toggles flattened or as <details> disclosures")
                .value_parser(clap::builder::PossibleValuesParser::new(TOGGLE_STYLES)),
        )
        .arg(
            Arg::new("collapsible")
                .long("collapsible")
                .help("Wrap the document in a <details> section")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity")
                .action(ArgAction::Count),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "notion-md", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "notion-md", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "notion-md", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
