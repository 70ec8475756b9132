use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use quizgen::commands::session;
use quizgen::config::GeneratorSettings;
use quizgen::console::Console;
use quizgen::llm::{self, KeyCheck, OpenAiCompletion};

#[derive(Parser, Debug)]
#[command(
    name = "quizgen",
    version,
    about = "Generate multiple-choice quizzes with an LLM and take them in the terminal.",
    long_about = None,
    propagate_version = true,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    settings: GeneratorSettings,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take quizzes interactively (the default)
    Quiz,
    /// Manage the stored OpenAI API key
    Llm {
        /// Store an API key in the local auth file. Prompts for it when no value is given
        #[arg(long, value_name = "KEY", num_args = 0..=1, conflicts_with = "clear")]
        set: Option<Option<String>>,
        /// Remove the stored API key from the local auth file
        #[arg(long, conflicts_with = "test")]
        clear: bool,
        /// Verify the configured API key by calling the OpenAI API
        #[arg(long, conflicts_with = "clear")]
        test: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run_cli().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<()> {
    #[cfg(feature = "env-file")]
    quizgen::config::load_env_file();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Quiz) {
        Command::Quiz => run_quiz(&cli.settings).await?,
        Command::Llm { set, clear, test } => handle_llm_command(set, clear, test).await?,
    }

    Ok(())
}

async fn run_quiz(settings: &GeneratorSettings) -> Result<()> {
    let lookup = llm::load_api_key();
    KeyCheck::inspect(lookup.api_key.as_deref()).report();
    if let Some(source) = lookup.source {
        log::debug!("using API key from the {}", source.description());
    }

    let backend = OpenAiCompletion::new(lookup.api_key.as_deref());
    let mut console = Console::stdio();
    session::run(&backend, settings, &mut console)
        .await
        .context("Lost access to the terminal")
}

async fn handle_llm_command(set: Option<Option<String>>, clear: bool, test: bool) -> Result<()> {
    let mut action_taken = false;

    if let Some(key) = set {
        let key = match key {
            Some(key) => key,
            None => llm::prompt_for_api_key()?,
        };
        llm::store_api_key(&key)?;
        println!("Stored OpenAI API key in the local auth file.");
        KeyCheck::inspect(Some(key.trim())).report();
        action_taken = true;
    }

    if clear {
        let removed = llm::clear_api_key()?;
        if removed {
            println!("Removed the stored OpenAI API key.");
        } else {
            println!("No OpenAI API key found in the auth file.");
        }
        action_taken = true;
    }

    if test {
        let source = llm::test_configured_api_key().await?;
        println!("OpenAI API key from the {} is valid.", source.description());
        action_taken = true;
    }

    if !action_taken {
        bail!("No action provided. Use --set, --clear, or --test.");
    }
    Ok(())
}
