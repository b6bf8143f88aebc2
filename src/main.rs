use anyhow::Context;
use clap::Parser;

use recipe_search::api::SearchClient;
use recipe_search::cli::Cli;
use recipe_search::config::Config;
use recipe_search::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    cli.apply_to(&mut config);
    config.validate().context("Invalid command-line overrides")?;

    tracing::info!(
        base_url = %config.api.base_url,
        page_size = config.search.page_size,
        omission = ?config.search.omission,
        "Starting recipe-search"
    );

    let client = SearchClient::new(&config.api).context("Failed to create HTTP client")?;
    recipe_search::ui::run(
        client,
        config.search.controller_settings(),
        config.ui.tick_rate(),
        cli.initial_state(),
    )
    .context("Terminal UI failed")?;

    tracing::info!("Exited cleanly");
    Ok(())
}
