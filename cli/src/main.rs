//! unmgp CLI - MagicPoint presentation conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use unmgp::{parse_file_with_options, render, Error, JsonFormat, ParseOptions};

#[derive(Parser)]
#[command(name = "unmgp")]
#[command(version)]
#[command(about = "Convert MagicPoint presentations to text and JSON", long_about = None)]
struct Cli {
    /// Input MagicPoint files
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (stdout if not specified; single input only)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit the presentation model as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Output compact JSON (implies --json)
    #[arg(long)]
    compact: bool,

    /// Allow %filter regions to run external commands
    #[arg(long = "unsafe")]
    unsafe_filters: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.output.is_some() && cli.inputs.len() > 1 {
        eprintln!(
            "{}: --output cannot be combined with multiple inputs",
            "Error".red().bold()
        );
        std::process::exit(2);
    }

    let mut failed = false;
    for input in &cli.inputs {
        if let Err(e) = convert(input, &cli) {
            report(input, &e);
            failed = true;
        }
    }
    if failed {
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn convert(input: &Path, cli: &Cli) -> unmgp::Result<()> {
    let rendered = render_input(input, cli)?;
    log::info!("converted {}", input.display());

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn render_input(input: &Path, cli: &Cli) -> unmgp::Result<String> {
    let options = ParseOptions::new().with_unsafe_filters(cli.unsafe_filters);
    let presentation = parse_file_with_options(input, options)?;
    log::debug!(
        "{}: {} slides",
        input.display(),
        presentation.slide_count()
    );

    if cli.json || cli.compact {
        let format = if cli.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        render::to_json(&presentation, format)
    } else {
        Ok(render::to_text(&presentation))
    }
}

fn report(input: &Path, error: &Error) {
    match error {
        Error::Syntax { line, message } => {
            eprintln!(
                "{}: {}:{}: {}",
                "Error".red().bold(),
                input.display(),
                line,
                message
            );
        }
        other => {
            eprintln!("{}: {}: {}", "Error".red().bold(), input.display(), other);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_deck(dir: &tempfile::TempDir, source: &str) -> PathBuf {
        let path = dir.path().join("deck.mgp");
        fs::write(&path, source).unwrap();
        path
    }

    #[test]
    fn test_render_text_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let deck = write_deck(&dir, "%page\nHello\n");
        let cli = Cli::parse_from(["unmgp", deck.to_str().unwrap()]);
        let rendered = render_input(&deck, &cli).unwrap();
        assert_eq!(rendered, "--- Slide 1 ---\nHello\n");
    }

    #[test]
    fn test_render_json_flag() {
        let dir = tempfile::tempdir().unwrap();
        let deck = write_deck(&dir, "%page\nHello\n");
        let cli = Cli::parse_from(["unmgp", "--json", deck.to_str().unwrap()]);
        let rendered = render_input(&deck, &cli).unwrap();
        assert!(rendered.contains("\"Hello\""));
        assert!(rendered.contains('\n'));
    }

    #[test]
    fn test_compact_implies_json() {
        let dir = tempfile::tempdir().unwrap();
        let deck = write_deck(&dir, "%page\nHello\n");
        let cli = Cli::parse_from(["unmgp", "--compact", deck.to_str().unwrap()]);
        let rendered = render_input(&deck, &cli).unwrap();
        assert!(rendered.contains("\"Hello\""));
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_syntax_errors_carry_the_line() {
        let dir = tempfile::tempdir().unwrap();
        let deck = write_deck(&dir, "%page\n%size nonsense\n");
        let cli = Cli::parse_from(["unmgp", deck.to_str().unwrap()]);
        let err = render_input(&deck, &cli).unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_unsafe_flag_reaches_the_parser() {
        let dir = tempfile::tempdir().unwrap();
        let deck = write_deck(
            &dir,
            "%page\n%filter \"tr a-z A-Z\"\nhello\n%endfilter\n",
        );

        let safe = Cli::parse_from(["unmgp", deck.to_str().unwrap()]);
        let rendered = render_input(&deck, &safe).unwrap();
        assert!(rendered.contains("disabled, use --unsafe to enable"));

        let unsafe_cli = Cli::parse_from(["unmgp", "--unsafe", deck.to_str().unwrap()]);
        let rendered = render_input(&deck, &unsafe_cli).unwrap();
        assert!(rendered.contains("HELLO"));
    }
}
