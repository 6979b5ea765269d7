//! CLI command definitions, routing, and tracing setup.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use codetutor_engine::{KnowledgeStore, ResponseEngine};
use codetutor_shared::{AppConfig, TokenizerConfig, init_config, load_config};
use codetutor_tokenizer::{TokenCounter, VocabTokenizer};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// CodeTutor — canned programming answers from a static topic table.
#[derive(Parser)]
#[command(
    name = "codetutor",
    version,
    about = "Answer canned programming questions by pattern-matching against a topic table.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Ask a single question and print the answer.
    Ask {
        /// The question, e.g. `codetutor ask write a recursive fibonacci function`.
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Start an interactive chat session on stdin/stdout.
    Chat,

    /// List the loaded topic table.
    Topics,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "codetutor=info",
        1 => "codetutor=debug",
        _ => "codetutor=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> color_eyre::eyre::Result<()> {
    match cli.command {
        Command::Ask { query } => cmd_ask(&query.join(" ")).await,
        Command::Chat => cmd_chat().await,
        Command::Topics => cmd_topics().await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Engine assembly
// ---------------------------------------------------------------------------

/// Collect topic records: built-ins first, then the optional user topic file.
fn collect_topics(config: &AppConfig) -> codetutor_shared::Result<Vec<codetutor_shared::TopicDef>> {
    let mut defs = codetutor_topics::builtin_topics();
    if let Some(path) = &config.topics.file {
        defs.extend(codetutor_topics::load_topic_file(Path::new(path))?);
    }
    Ok(defs)
}

/// Build the tokenizer collaborator, if configured.
///
/// A missing or broken model directory is a warning, not a failure: the
/// engine transparently substitutes a whitespace word count.
fn build_tokenizer(config: &TokenizerConfig) -> Option<Box<dyn TokenCounter + Send>> {
    let dir = config.model_dir.as_ref()?;
    match VocabTokenizer::load(Path::new(dir)) {
        Ok(tokenizer) => Some(Box::new(tokenizer)),
        Err(e) => {
            warn!(model_dir = %dir, error = %e, "tokenizer unavailable, using word count");
            None
        }
    }
}

/// Load config and assemble a ready engine. Topic-table errors are fatal.
fn build_engine() -> color_eyre::eyre::Result<ResponseEngine> {
    let config = load_config()?;
    let store = Arc::new(KnowledgeStore::load(collect_topics(&config)?)?);
    let tokenizer = build_tokenizer(&config.tokenizer);

    info!(
        topics = store.len(),
        tokenizer = tokenizer.is_some(),
        max_history = config.engine.max_history,
        "engine ready"
    );

    Ok(ResponseEngine::new(
        store,
        tokenizer,
        config.engine.max_history,
    ))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_ask(query: &str) -> color_eyre::eyre::Result<()> {
    let mut engine = build_engine()?;
    println!("{}", engine.generate_response(query));
    Ok(())
}

async fn cmd_chat() -> color_eyre::eyre::Result<()> {
    let mut engine = build_engine()?;

    println!("{}", "=".repeat(70));
    println!("  CodeTutor — ask about Python code, algorithms, OOP, files, regex");
    println!("  Type 'exit', 'quit', or 'bye' to leave.");
    println!("{}", "=".repeat(70));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();

    loop {
        print!("\nYou > ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF (piped input or Ctrl-D).
            break;
        }

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query.to_lowercase().as_str(), "exit" | "quit" | "bye") {
            println!("Goodbye!");
            break;
        }

        println!("\nTutor >");
        println!("{}", engine.generate_response(query));
    }

    Ok(())
}

async fn cmd_topics() -> color_eyre::eyre::Result<()> {
    let config = load_config()?;
    let store = KnowledgeStore::load(collect_topics(&config)?)?;

    println!("{} topics loaded:", store.len());
    println!();
    for topic in store.entries() {
        let first = topic
            .patterns
            .first()
            .map(|p| p.as_str())
            .unwrap_or_default();
        println!(
            "  {:<24} {} patterns (e.g. {first})",
            topic.id,
            topic.patterns.len()
        );
    }

    Ok(())
}

async fn cmd_config_init() -> color_eyre::eyre::Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> color_eyre::eyre::Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
