//! Detail aggregation: runs the effects requested by the core state machine
//! and feeds their results back into it.
//!
//! Effects run concurrently as futures polled by one loop. That loop is the
//! only writer of the [`DetailState`]; each finished effect becomes a single
//! [`DetailMsg`] applied through [`update_detail`], and observers see a fresh
//! snapshot after every change.

use futures_util::future::{join_all, BoxFuture};
use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};
use pokedex_core::{
    update_detail, DetailEffect, DetailMsg, DetailState, DetailViewModel, ListEffect, ListMsg,
};
use pokedex_logging::{dex_debug, dex_info, dex_warn};

use crate::client::ResourceClient;

pub(crate) const DETAIL_SUBJECT: &str = "Pokemon details";
pub(crate) const LIST_SUBJECT: &str = "Pokemon list";

/// Receives detail snapshots as the pipeline makes progress.
pub trait StateObserver: Send + Sync {
    fn publish(&self, view: &DetailViewModel);
}

/// Observer for callers that only want the final state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StateObserver for NoopObserver {
    fn publish(&self, _view: &DetailViewModel) {}
}

/// Runs the whole pipeline for `name` and returns the terminal state.
pub async fn run_detail_pipeline(
    client: &ResourceClient,
    name: &str,
    observer: &dyn StateObserver,
) -> DetailState {
    dex_info!("Detail pipeline start name={}", name);
    let mut in_flight: FuturesUnordered<BoxFuture<'_, DetailMsg>> = FuturesUnordered::new();

    let mut state = apply(
        DetailState::new(name),
        DetailMsg::Start,
        client,
        observer,
        &mut in_flight,
    );
    while let Some(msg) = in_flight.next().await {
        state = apply(state, msg, client, observer, &mut in_flight);
    }

    dex_info!(
        "Detail pipeline end name={} phase={:?} types={} moves={} evolutions={}",
        name,
        state.phase(),
        state.type_infos().len(),
        state.move_infos().len(),
        state.evolution_names().len()
    );
    state
}

fn apply<'a>(
    state: DetailState,
    msg: DetailMsg,
    client: &'a ResourceClient,
    observer: &dyn StateObserver,
    in_flight: &mut FuturesUnordered<BoxFuture<'a, DetailMsg>>,
) -> DetailState {
    let (mut state, effects) = update_detail(state, msg);
    if state.consume_dirty() {
        observer.publish(&state.view());
    }
    for effect in effects {
        in_flight.push(execute_detail_effect(client, effect));
    }
    state
}

/// Turns one effect into a future resolving to the message that reports it.
pub fn execute_detail_effect(
    client: &ResourceClient,
    effect: DetailEffect,
) -> BoxFuture<'_, DetailMsg> {
    match effect {
        DetailEffect::FetchPrimary { name } => async move {
            let (detail, species) =
                tokio::join!(client.fetch_detail(&name), client.fetch_species(&name));
            match detail.and_then(|detail| species.map(|species| (detail, species))) {
                Ok((detail, species)) => DetailMsg::PrimaryLoaded { detail, species },
                Err(err) => {
                    dex_warn!("Primary fetch failed name={}: {}", name, err);
                    DetailMsg::PrimaryFailed {
                        message: err.user_message(DETAIL_SUBJECT),
                    }
                }
            }
        }
        .boxed(),
        DetailEffect::FetchEvolution { url } => async move {
            match client.fetch_evolution_chain(&url).await {
                Ok(chain) => DetailMsg::EvolutionResolved(Some(chain)),
                Err(err) => {
                    dex_debug!("Evolution chain dropped url={}: {}", url, err);
                    DetailMsg::EvolutionResolved(None)
                }
            }
        }
        .boxed(),
        DetailEffect::FetchTypes { names } => async move {
            let lookups = names
                .iter()
                .map(|name| async move { (name, client.fetch_type(name).await) });
            let type_infos = join_all(lookups)
                .await
                .into_iter()
                .filter_map(|(name, result)| match result {
                    Ok(info) => Some(info),
                    Err(err) => {
                        dex_debug!("Type lookup dropped name={}: {}", name, err);
                        None
                    }
                })
                .collect();
            DetailMsg::TypesResolved(type_infos)
        }
        .boxed(),
        DetailEffect::FetchMoves { names } => async move {
            let lookups = names
                .iter()
                .map(|name| async move { (name, client.fetch_move(name).await) });
            let move_infos = join_all(lookups)
                .await
                .into_iter()
                .filter_map(|(name, result)| match result {
                    Ok(info) => Some(info),
                    Err(err) => {
                        dex_debug!("Move lookup dropped name={}: {}", name, err);
                        None
                    }
                })
                .collect();
            DetailMsg::MovesResolved(move_infos)
        }
        .boxed(),
    }
}

/// Runs a list effect to completion.
pub async fn execute_list_effect(client: &ResourceClient, effect: ListEffect) -> ListMsg {
    match effect {
        ListEffect::FetchPage { limit, offset } => match client.fetch_list(limit, offset).await {
            Ok(page) => ListMsg::PageLoaded(page),
            Err(err) => {
                dex_warn!("List fetch failed limit={} offset={}: {}", limit, offset, err);
                ListMsg::PageFailed {
                    message: err.user_message(LIST_SUBJECT),
                }
            }
        },
    }
}
