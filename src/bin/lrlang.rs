//! Command-line interface for lrlang
//!
//! Usage:
//!   lrlang tokens --language `<def.toml>` `<input>`                 - Print the token stream
//!   lrlang parse --language `<def.toml>` `<input>` [--format `<f>`] - Parse and print the AST
//!   lrlang table --language `<def.toml>` [--format text|json]     - Dump the parse table
//!
//! `-v` raises the log level (repeatable), `-q` limits it to errors.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use lrlang::config::Loader;
use lrlang::formats::{table_to_json, table_to_text, FormatRegistry};
use lrlang::Language;

fn language_arg() -> Arg {
    Arg::new("language")
        .long("language")
        .short('l')
        .help("Path to the TOML language definition")
        .required(true)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Path to the input file")
        .required(true)
        .index(1)
}

fn main() -> Result<()> {
    let matches = Command::new("lrlang")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize and parse text with a TOML language definition")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log output (-v info, -vv debug, -vvv trace)"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Only log errors"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of an input")
                .arg(language_arg())
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse an input and print its tree")
                .arg(language_arg())
                .arg(input_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (treeviz, json, yaml)")
                        .default_value("treeviz"),
                )
                .arg(
                    Arg::new("tree")
                        .long("tree")
                        .action(ArgAction::SetTrue)
                        .help("Print the concrete parse tree instead of the AST"),
                )
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .action(ArgAction::SetTrue)
                        .help("Print the reductions performed, in order"),
                ),
        )
        .subcommand(
            Command::new("table")
                .about("Dump the parse table built from a definition")
                .arg(language_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        Some(("tokens", sub)) => handle_tokens_command(sub),
        Some(("parse", sub)) => handle_parse_command(sub),
        Some(("table", sub)) => handle_table_command(sub),
        _ => unreachable!(),
    }
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("quiet") {
        log::LevelFilter::Error
    } else {
        match matches.get_count("verbose") {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn load_language(matches: &ArgMatches) -> Result<Language> {
    let path = matches
        .get_one::<String>("language")
        .context("missing --language")?;
    let definition = Loader::new()
        .with_file(path)
        .build()
        .with_context(|| format!("failed to load language definition {}", path))?;
    log::info!("loaded language definition {}", path);
    definition
        .build()
        .with_context(|| format!("invalid language definition {}", path))
}

fn read_input(matches: &ArgMatches) -> Result<String> {
    let path = matches
        .get_one::<String>("input")
        .context("missing input path")?;
    std::fs::read_to_string(path).with_context(|| format!("failed to read input file {}", path))
}

fn handle_tokens_command(matches: &ArgMatches) -> Result<()> {
    let language = load_language(matches)?;
    let source = read_input(matches)?;
    let tokenized = language.tokenize(&source);
    let lexer = language.lexer();
    for token in &tokenized.tokens {
        println!(
            "{:>5}..{:<5} {:<12} {:?}",
            token.span.start,
            token.span.end,
            lexer.class_name(token.class),
            token.value
        );
    }
    if !tokenized.success {
        bail!(
            "could not tokenize input near {:?} (state {})",
            tokenized.excerpt(),
            lexer.state_name(tokenized.state)
        );
    }
    Ok(())
}

fn handle_parse_command(matches: &ArgMatches) -> Result<()> {
    let language = load_language(matches)?;
    let source = read_input(matches)?;
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("treeviz");

    let derivation = language.derive(&source)?;
    if matches.get_flag("trace") {
        let grammar = language.parser().grammar();
        for (step, reduction) in derivation.reductions.iter().enumerate() {
            println!(
                "{:>4}  {}",
                step + 1,
                grammar.describe_alternative(reduction.rule, reduction.alt)
            );
        }
        println!();
    }

    let node = if matches.get_flag("tree") {
        derivation.tree
    } else {
        derivation.tree.into_ast()
    };
    let output = FormatRegistry::default().serialize(&node, format)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn handle_table_command(matches: &ArgMatches) -> Result<()> {
    let language = load_language(matches)?;
    let parser = language.parser();
    let output = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => table_to_json(parser.grammar(), parser.tables())?,
        _ => table_to_text(parser.grammar(), parser.tables()),
    };
    println!("{}", output);
    Ok(())
}
