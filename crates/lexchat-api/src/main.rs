//! Lex chat server entry point.
//!
//! Binary name: `lexchat`

mod cli;

use clap::Parser;
use clap_complete::generate;

use lexchat_infra::config::{load_config, load_env_file};
use lexchat_observe::tracing_setup::{init_tracing, level_directive, shutdown_tracing};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before parsing, so `.env` can also supply `LEXCHAT_CONFIG`
    let env_file = load_env_file(None);
    let cli = Cli::parse();

    // Shell completions don't need config or logging
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "lexchat", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(level_directive(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    match env_file {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded .env"),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Serve { host, port } => cli::serve::run(config, host, port).await,
        Commands::Check => cli::check::run(&config),
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
