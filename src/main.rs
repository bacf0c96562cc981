use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hoax_guard::{HoaxError, ScoringConfig, VerificationResult, Verifier};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "hoax-guard",
    about = "Estimate the credibility of Portuguese news text and URLs",
    version
)]
struct Cli {
    /// Text to verify
    #[arg(long)]
    text: Option<String>,

    /// URL of the article, scored alongside each text
    #[arg(long)]
    url: Option<String>,

    /// TOML file overriding scoring constants
    #[arg(long, env = "HOAX_GUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Files to verify (reads stdin if no text, file or URL is given)
    files: Vec<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print(result: &VerificationResult) -> Result<(), HoaxError> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| HoaxError::Io(std::io::Error::other(e)))?;
    println!("{json}");
    Ok(())
}

fn run(cli: Cli) -> Result<(), HoaxError> {
    let config = match &cli.config {
        Some(path) => ScoringConfig::from_path(path)?,
        None => ScoringConfig::default(),
    };
    let verifier = Verifier::new().with_config(config);
    let url = cli.url.as_deref();

    if let Some(text) = &cli.text {
        print(&verifier.verify(Some(text), url))?;
    }
    for path in &cli.files {
        let text = std::fs::read_to_string(path).map_err(|e| {
            HoaxError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", path.display()),
            ))
        })?;
        print(&verifier.verify(Some(&text), url))?;
    }

    if cli.text.is_none() && cli.files.is_empty() {
        if url.is_some() {
            print(&verifier.verify(None, url))?;
        } else {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            print(&verifier.verify(Some(&input), None))?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
