// commit-gen - Draft a commit message for staged changes with an LLM, confirm, and commit

mod config;
mod confirm;
mod git;
mod llm;
mod message;
mod pipeline;
mod prompts;

use anyhow::{Context, Result};
use clap::Parser;
use std::io;

use config::{API_KEY_ENV, CommitGenConfig};
use confirm::SystemClipboard;
use git::GitCli;
use llm::MessageGenerator;
use pipeline::Pipeline;

#[derive(Parser, Debug)]
#[command(name = "commit-gen")]
#[command(about = "Generate a commit message for staged changes using AI", long_about = None)]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Model to use instead of the configured one
    #[arg(short, long)]
    model: Option<String>,

    /// Don't copy the final message to the clipboard
    #[arg(long, default_value_t = false)]
    no_clipboard: bool,

    /// Text placed before the generated message
    #[arg(trailing_var_arg = true)]
    prefix: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // A missing .env is fine; the key may come from the environment
    if let Err(e) = dotenvy::dotenv() {
        log::debug!("No .env file loaded: {}", e);
    }

    let api_key = llm_client::api_key_from_env("OpenAI", API_KEY_ENV)
        .context("Missing API credential (environment or .env file)")?;

    let config = CommitGenConfig::load().context("Failed to load configuration")?;
    let model = args.model.as_deref().unwrap_or(&config.model);

    let generator = MessageGenerator::from_config(&config, model, api_key)?;
    let vcs = GitCli::new();
    let prefix = message::prefix_from_args(&args.prefix);

    let mut clipboard = (!args.no_clipboard).then(SystemClipboard::default);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let outcome = Pipeline::new(&vcs, &generator, &config.exclude)
        .run(&prefix, clipboard.as_mut(), &mut input, &mut output)
        .await?;

    log::debug!("Finished: {:?}", outcome);
    Ok(())
}
