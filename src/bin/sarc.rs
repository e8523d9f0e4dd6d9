//! SARC CLI — classify text and overlay the result on the context graph.
//!
//! Usage:
//!   sarc classify --text <TEXT> --labels <A,B,C> --kind <KIND> [--phase <PHASE>] [--no-graph]
//!   sarc session            (one JSON action per stdin line)
//!   sarc labels [--locale ru]

use clap::{Parser, Subcommand};
use sarc::config::display_locale;
use sarc::{
    parse_labels, ActionOutcome, ActionRequest, BundleKind, Config, HttpClassifier, Locale,
    PhaseMode, Session, SpaceSnapshot,
};
use serde_json::json;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "sarc",
    version,
    about = "Zero-shot classification relay with a bundle/phase context graph"
)]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/sarc/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single classification action
    Classify {
        /// Text to classify
        #[arg(long)]
        text: String,
        /// Comma-separated candidate labels
        #[arg(long)]
        labels: String,
        /// Bundle kind (any locale)
        #[arg(long)]
        kind: String,
        /// Phase mode (any locale)
        #[arg(long, default_value = "Activation")]
        phase: String,
        /// Optional bundle description
        #[arg(long)]
        description: Option<String>,
        /// Do not record the outcome in the context graph
        #[arg(long)]
        no_graph: bool,
        /// Print the outcome and snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read one JSON action per line from stdin against a single session
    Session,
    /// Show bundle kind and phase mode labels
    Labels {
        /// Display locale (en, ru); defaults to the configured one
        #[arg(long)]
        locale: Option<Locale>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_outcome(outcome: &ActionOutcome, locale: Locale) {
    println!(
        "Bundle {} ({}) with block {}",
        outcome.bundle.id(),
        outcome.bundle.kind().display(locale),
        outcome.block.id()
    );
    println!("{:<32}  {:>7}", "LABEL", "SCORE");
    println!("{}", "-".repeat(41));
    for (label, score) in outcome.result.pairs() {
        println!("{:<32}  {:>7.4}", label, score);
    }
    match &outcome.event {
        Some(event) => println!(
            "Recorded: {}",
            serde_json::to_string(event).unwrap_or_else(|e| format!("<unprintable: {}>", e))
        ),
        None => println!("Context graph inactive; nothing recorded"),
    }
}

fn print_snapshot(snapshot: &SpaceSnapshot) {
    println!("{:<16}  {:>7}  {:<24}", "CONTEXT", "WEIGHT", "UPDATED");
    println!("{}", "-".repeat(51));
    for (name, record) in &snapshot.contexts {
        let weight = record
            .weight()
            .map(|w| format!("{:.4}", w))
            .unwrap_or_else(|| "-".into());
        println!("{:<16}  {:>7}  {:<24}", name, weight, record.updated_at.to_rfc3339());
    }
    println!("Links: {}", snapshot.links.len());
}

fn cmd_labels(locale: Locale) -> i32 {
    println!("{:<16}  {:<24}", "BUNDLE KIND", "DISPLAY");
    for kind in BundleKind::ALL {
        println!("{:<16}  {:<24}", kind.as_str(), kind.display(locale));
    }
    println!();
    println!("{:<16}  {:<24}", "PHASE MODE", "DISPLAY");
    for phase in PhaseMode::ALL {
        println!("{:<16}  {:<24}", phase.as_str(), phase.display(locale));
    }
    0
}

async fn cmd_classify(config: &Config, request: ActionRequest, as_json: bool) -> i32 {
    let mut session = Session::from_config(HttpClassifier::new(config), config);
    match session.run(&request).await {
        Ok(outcome) => {
            let snapshot = session.finish();
            if as_json {
                let body = json!({ "outcome": outcome, "snapshot": snapshot });
                match serde_json::to_string_pretty(&body) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return 1;
                    }
                }
            } else {
                print_outcome(&outcome, config.locale);
                println!();
                print_snapshot(&snapshot);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_session(config: &Config) -> i32 {
    let mut session = Session::from_config(HttpClassifier::new(config), config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: reading stdin: {}", e);
                return 1;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<ActionRequest>(&line) {
            Ok(request) => match session.run(&request).await {
                Ok(outcome) => json!({ "ok": outcome }),
                Err(e) => json!({ "error": e.to_string() }),
            },
            Err(e) => json!({ "error": format!("invalid action: {}", e) }),
        };
        println!("{}", reply);
    }
    let snapshot = session.finish();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Labels { locale } = &cli.command {
        let locale = match locale {
            Some(locale) => *locale,
            None => match display_locale(cli.config.as_deref()) {
                Ok(locale) => locale,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(2);
                }
            },
        };
        std::process::exit(cmd_labels(locale));
    }

    // no credential, no calls
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let code = match cli.command {
        Commands::Classify {
            text,
            labels,
            kind,
            phase,
            description,
            no_graph,
            json,
        } => {
            let mut request = ActionRequest::new(text, parse_labels(&labels), kind, phase);
            request.description = description;
            request.activate_graph = !no_graph;
            cmd_classify(&config, request, json).await
        }
        Commands::Session => cmd_session(&config).await,
        Commands::Labels { .. } => 0,
    };
    std::process::exit(code);
}
