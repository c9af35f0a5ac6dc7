mod app;
mod effects;
pub mod logging;
mod settings;
mod ui;

use anyhow::Context;
use pokedex_logging::dex_info;

use crate::{Cli, Command};

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    logging::initialize(cli.log, cli.verbose);
    dex_info!("pokedex {} starting", env!("CARGO_PKG_VERSION"));

    let settings = settings::load_settings(&cli.settings);
    let runner = effects::EffectRunner::new(settings.engine_config())
        .context("failed to start the engine")?;

    match cli.command {
        Command::List {
            search,
            limit,
            offset,
        } => app::run_list(&runner, search, limit.unwrap_or(settings.list_limit), offset),
        Command::Show { name } => app::run_show(&runner, &name),
    }
}
