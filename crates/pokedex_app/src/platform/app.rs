use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use pokedex_core::{update_list, DetailViewModel, ListMsg, ListState, ListViewModel, Phase};
use pokedex_engine::EngineEvent;
use pokedex_logging::{dex_debug, dex_warn};

use super::effects::EffectRunner;
use super::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(75);

/// Loads one page, applies the search and prints the matching rows.
pub fn run_list(
    runner: &EffectRunner,
    search: Option<String>,
    limit: u32,
    offset: u32,
) -> anyhow::Result<()> {
    let mut screen = ListScreen::new(runner);
    if let Some(query) = search {
        screen.dispatch(ListMsg::SearchChanged(query));
    }
    screen.dispatch(ListMsg::Requested { limit, offset });

    while screen.state.is_loading() {
        match runner.next_event(POLL_INTERVAL)? {
            Some(EngineEvent::ListSettled(msg)) => screen.dispatch(msg),
            Some(EngineEvent::DetailChanged { request_id, .. }) => {
                dex_debug!("Ignoring detail event for request {}", request_id);
            }
            None => {}
        }
    }

    print_screen(&ui::render::render_list(&screen.view))?;
    if let Some(message) = screen.state.error_message() {
        anyhow::bail!("{message}");
    }
    Ok(())
}

/// Opens the detail pipeline for `name` and prints the screen once it settles.
pub fn run_show(runner: &EffectRunner, name: &str) -> anyhow::Result<()> {
    let request_id = runner.open_detail(name);
    let mut latest: Option<DetailViewModel> = None;
    let mut announced = false;

    loop {
        match runner.next_event(POLL_INTERVAL)? {
            Some(EngineEvent::DetailChanged {
                request_id: id,
                view,
            }) if id == request_id => {
                if view.is_loading && !announced {
                    eprintln!("{}", ui::render::render_detail(&view).trim_end());
                    announced = true;
                }
                let settled = matches!(view.phase, Phase::Ready | Phase::Failed);
                latest = Some(view);
                if settled {
                    break;
                }
            }
            Some(EngineEvent::DetailChanged { request_id: id, .. }) => {
                dex_warn!("Dropping event for stale request {}", id);
            }
            Some(EngineEvent::ListSettled(_)) => {
                dex_debug!("Ignoring list result while showing {}", name);
            }
            None => {}
        }
    }

    let view = latest.context("detail pipeline ended without a snapshot")?;
    print_screen(&ui::render::render_detail(&view))?;
    if let Some(message) = view.error_message {
        anyhow::bail!("{message}");
    }
    Ok(())
}

struct ListScreen<'a> {
    runner: &'a EffectRunner,
    state: ListState,
    view: ListViewModel,
}

impl<'a> ListScreen<'a> {
    fn new(runner: &'a EffectRunner) -> Self {
        let state = ListState::new();
        let view = state.view();
        Self {
            runner,
            state,
            view,
        }
    }

    fn dispatch(&mut self, msg: ListMsg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update_list(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.runner.enqueue_list(effects);
    }
}

fn print_screen(text: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write to stdout")
}
