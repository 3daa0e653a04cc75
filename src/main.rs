//! fountain2html - Fountain screenplay to HTML converter
//!
//! Usage:
//!   fountain2html render <path> [-t <theme>] [-o <file>]  - Render a screenplay to HTML
//!   fountain2html tokens <path>                           - Print the parsed token stream

mod config;

use clap::{Parser, Subcommand};
use config::{Config, ConfigError};
use encoding_rs::{UTF_8, WINDOWS_1252};
use fountain_parser::{Document, Token, Theme, parse, render};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "fountain2html")]
#[command(author, version, about = "Fountain screenplay to HTML converter")]
struct Cli {
    /// Config file (defaults to ./fountain2html.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Fountain file to an HTML page
    Render {
        /// Path to the Fountain file
        path: PathBuf,
        /// Theme name (default, cjk, colorful, dark, ocean)
        #[arg(short, long)]
        theme: Option<String>,
        /// Write the page here instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the token stream of a Fountain file
    Tokens {
        /// Path to the Fountain file
        path: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("could not write {}: {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Render { path, theme, output } => {
            render_command(&path, theme, output, cli.config.as_deref())
        }
        Commands::Tokens { path } => tokens_command(&path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn render_command(
    path: &Path,
    theme: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let config = Config::load(config_path)?;
    let theme = theme.or(config.theme);
    let output = output.or(config.output);
    debug!("theme {:?} resolves to {}", theme, Theme::resolve(theme.as_deref()).as_str());

    let document = read_document(path)?;
    let html = render(Some(&document), theme.as_deref());

    match output {
        Some(output) => {
            fs::write(&output, html).map_err(|source| CliError::Write {
                path: output.clone(),
                source,
            })?;
            eprintln!("    \x1b[1;32mFinished\x1b[0m {}", output.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

fn tokens_command(path: &Path) -> Result<(), CliError> {
    let document = read_document(path)?;
    for token in &document.tokens {
        println!("{}", describe_token(token));
    }
    Ok(())
}

fn read_document(path: &Path) -> Result<Document, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_source(&bytes);
    let document = parse(&text);
    info!("{}: {} tokens", path.display(), document.tokens.len());
    Ok(document)
}

/// Decodes a screenplay file: BOM-sniffed, UTF-8 by default, Windows-1252 for
/// legacy files that are not valid UTF-8.
fn decode_source(bytes: &[u8]) -> String {
    let (cow, encoding, had_errors) = UTF_8.decode(bytes);
    if had_errors && encoding == UTF_8 {
        debug!("input is not valid UTF-8, decoding as windows-1252");
        let (cow, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
        return cow.into_owned();
    }
    cow.into_owned()
}

/// One line per token: kind, type-specific fields, then the quoted text.
fn describe_token(token: &Token) -> String {
    let mut line = token.kind().as_str().to_string();
    match token {
        Token::SceneHeading { scene_number: Some(number), .. } => {
            line.push_str(&format!(" #{number}"));
        }
        Token::Section { depth, .. } => line.push_str(&format!(" depth={depth}")),
        Token::DialogueBegin { dual } => line.push_str(&format!(" dual={}", dual.as_str())),
        _ => {}
    }
    if let Some(text) = token.text() {
        line.push_str(&format!(" {text:?}"));
    }
    line
}

fn print_error(e: &CliError) {
    eprintln!("\x1b[1;31merror\x1b[0m: {}", e);
}
