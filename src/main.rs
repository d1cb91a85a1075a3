use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use safeefah_guide::session::INSTRUCTIONS;
use safeefah_guide::{Config, Responder, Session, UserProfile, classify};

/// Safeefah - museum tour assistant for khoos palm leaf weaving
#[derive(Parser)]
#[command(name = "safeefah", version, about)]
struct Cli {
    /// Answer table file (.json or .toml) replacing the built-in one
    #[arg(long, global = true, env = "SAFEEFAH_TABLE")]
    table: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Visitor details given on the command line
#[derive(clap::Args)]
struct ProfileArgs {
    /// Visitor age in years
    #[arg(short, long, allow_negative_numbers = true)]
    age: Option<i64>,

    /// How interested the visitor is in history (free text)
    #[arg(short, long)]
    interest: Option<String>,

    /// JSON profile file; --age and --interest override its fields
    #[arg(long)]
    profile: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a single question
    Ask {
        #[command(flatten)]
        profile: ProfileArgs,

        /// The visitor's question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Show which tier a visitor falls into
    Classify {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Hold a conversation over stdin/stdout
    Chat {
        /// Don't print the "> " marker before each question
        #[arg(long)]
        no_prompt: bool,
    },
    /// Print the active answer table as JSON
    Table,
    /// Print the assistant's standing instructions
    Instructions,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,safeefah_guide=info",
        1 => "info,safeefah_guide=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load().with_table_override(cli.table);

    match cli.command {
        Command::Ask { profile, question } => {
            let responder = Responder::new(config.answer_table()?);
            let profile = resolve_profile(profile)?;
            let question = question.join(" ");
            println!("{}", responder.converse(&profile, &question));
        }
        Command::Classify { profile } => {
            let profile = resolve_profile(profile)?;
            println!("{}", classify(&profile));
        }
        Command::Chat { no_prompt } => {
            let responder = Responder::new(config.answer_table()?);
            let session = Session::new(&responder, &config.session).with_prompt(!no_prompt);
            let answered = session
                .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
            tracing::debug!(answered, "chat finished");
        }
        Command::Table => {
            let table = config.answer_table()?;
            println!("{}", table.to_json_pretty()?);
        }
        Command::Instructions => println!("{INSTRUCTIONS}"),
    }

    Ok(())
}

/// Build a profile from an optional JSON file overlaid with CLI flags
fn resolve_profile(args: ProfileArgs) -> anyhow::Result<UserProfile> {
    let mut profile = match &args.profile {
        Some(path) => UserProfile::from_file(path)?,
        None => UserProfile::default(),
    };

    if let Some(age) = args.age {
        profile.age = age;
    }
    if let Some(interest) = args.interest {
        profile.interest_in_history = interest;
    }

    Ok(profile)
}
