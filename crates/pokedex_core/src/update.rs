use crate::state::SecondaryTier;
use crate::{derivation, DetailEffect, DetailMsg, DetailState, ListEffect, ListMsg, ListState, Phase};

/// How many of a creature's moves are looked up in detail.
pub const MOVE_LOOKUP_LIMIT: usize = 10;

/// Pure update function for a detail screen: applies a message and returns any effects.
///
/// Messages that arrive outside the phase they belong to are ignored, so a
/// late or duplicated result can never reopen a finished pipeline.
pub fn update_detail(mut state: DetailState, msg: DetailMsg) -> (DetailState, Vec<DetailEffect>) {
    let effects = match msg {
        DetailMsg::Start => {
            if state.phase() != Phase::Idle {
                return (state, Vec::new());
            }
            state.begin_loading();
            vec![DetailEffect::FetchPrimary {
                name: state.name().to_string(),
            }]
        }
        DetailMsg::PrimaryLoaded { detail, species } => {
            if state.phase() != Phase::Loading || state.detail().is_some() {
                return (state, Vec::new());
            }
            let mut tiers = Vec::with_capacity(3);
            let mut effects = Vec::with_capacity(3);

            if let Some(url) = species.evolution_chain_url.clone() {
                tiers.push(SecondaryTier::Evolution);
                effects.push(DetailEffect::FetchEvolution { url });
            }
            let type_names = detail.type_names();
            if !type_names.is_empty() {
                tiers.push(SecondaryTier::Types);
                effects.push(DetailEffect::FetchTypes { names: type_names });
            }
            let move_names = detail.leading_move_names(MOVE_LOOKUP_LIMIT);
            if !move_names.is_empty() {
                tiers.push(SecondaryTier::Moves);
                effects.push(DetailEffect::FetchMoves { names: move_names });
            }

            state.merge_primary(detail, species);
            state.await_tiers(tiers);
            effects
        }
        DetailMsg::PrimaryFailed { message } => {
            if state.phase() == Phase::Loading && state.detail().is_none() {
                state.fail(message);
            }
            Vec::new()
        }
        DetailMsg::EvolutionResolved(chain) => {
            if state.is_pending(SecondaryTier::Evolution) {
                let names = chain
                    .as_ref()
                    .map(derivation::flatten_evolution)
                    .unwrap_or_default();
                state.set_evolution_names(names);
            }
            Vec::new()
        }
        DetailMsg::TypesResolved(type_infos) => {
            if state.is_pending(SecondaryTier::Types) {
                state.set_type_infos(type_infos);
            }
            Vec::new()
        }
        DetailMsg::MovesResolved(mut move_infos) => {
            if state.is_pending(SecondaryTier::Moves) {
                move_infos.sort_by(|a, b| a.name.cmp(&b.name));
                state.set_move_infos(move_infos);
            }
            Vec::new()
        }
        DetailMsg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Pure update function for the list screen.
pub fn update_list(mut state: ListState, msg: ListMsg) -> (ListState, Vec<ListEffect>) {
    let effects = match msg {
        ListMsg::Requested { limit, offset } => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            state.begin_loading();
            vec![ListEffect::FetchPage { limit, offset }]
        }
        ListMsg::PageLoaded(page) => {
            if state.is_loading() {
                state.apply_page(page);
            }
            Vec::new()
        }
        ListMsg::PageFailed { message } => {
            if state.is_loading() {
                state.apply_failure(message);
            }
            Vec::new()
        }
        ListMsg::SearchChanged(query) => {
            state.set_query(query);
            Vec::new()
        }
        ListMsg::NoOp => Vec::new(),
    };

    (state, effects)
}
