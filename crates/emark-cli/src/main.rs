//! emark CLI

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use emark_error::{DiagnosticRenderer, SourceCache};
use emark_lexer::{Lexer, SyntaxError, Token};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing::Level;

/// How `lex` prints tokens
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    /// One token per line
    #[default]
    Table,
    /// A JSON array of tokens
    Json,
}

#[derive(Parser)]
#[command(name = "emark")]
#[command(version)]
#[command(about = "Lexer for a small LaTeX-style markup", long_about = None)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable ANSI colors in diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the tokens of a file
    Lex {
        /// Input file, or `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: Format,
    },

    /// Checks that a file lexes without errors
    Check {
        /// Input file, or `-` for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_logging(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_writer(io::stderr)
        .try_init();
}

/// Reads `path`, treating `-` as stdin, and returns the display name with the text
fn read_source(path: &Path) -> io::Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        return Ok(("<stdin>".to_string(), source));
    }
    let source = std::fs::read_to_string(path)?;
    Ok((path.display().to_string(), source))
}

fn load(path: &Path, cache: &mut SourceCache) -> (u32, String) {
    match read_source(path) {
        Ok((name, source)) => {
            tracing::info!(file = %name, bytes = source.len(), "loaded source");
            let file_id = cache.add(name, source.as_str());
            (file_id, source)
        }
        Err(e) => {
            eprintln!("Error reading {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn report(err: &SyntaxError, cache: &SourceCache, no_color: bool) {
    let mut renderer = DiagnosticRenderer::new(cache);
    if no_color {
        renderer = renderer.without_colors();
    }
    eprintln!("{}", renderer.render(&err.to_diagnostic()));
}

fn print_token(token: &Token<'_>) {
    println!(
        "  {:4}:{:<3}  {:<10}  {:?}",
        token.span.start.line, token.span.start.column, token.kind, token.text
    );
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut cache = SourceCache::new();

    match cli.command {
        Commands::Lex { input, format } => {
            let (file_id, source) = load(&input, &mut cache);
            let lexer = Lexer::new(&source, file_id);

            match format {
                Format::Table => {
                    let mut count = 0usize;
                    for result in lexer {
                        match result {
                            Ok(token) => {
                                print_token(&token);
                                count += 1;
                            }
                            Err(err) => {
                                report(&err, &cache, cli.no_color);
                                process::exit(1);
                            }
                        }
                    }
                    println!("\nTotal: {} tokens", count);
                }
                Format::Json => {
                    let tokens = match lexer.collect::<Result<Vec<_>, _>>() {
                        Ok(tokens) => tokens,
                        Err(err) => {
                            report(&err, &cache, cli.no_color);
                            process::exit(1);
                        }
                    };
                    match serde_json::to_string_pretty(&tokens) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("Error serializing tokens: {}", e);
                            process::exit(1);
                        }
                    }
                }
            }
        }

        Commands::Check { input } => {
            let (file_id, source) = load(&input, &mut cache);

            match Lexer::new(&source, file_id).tokenize() {
                Ok(tokens) => println!("ok: {} tokens", tokens.len()),
                Err(err) => {
                    report(&err, &cache, cli.no_color);
                    process::exit(1);
                }
            }
        }
    }
}
