//! Pokedex core: domain model, derivations and pure state machines.
mod derivation;
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use derivation::{
    effective_against, filter_by_name, flatten_evolution, pokedex_entry, weak_against,
};
pub use effect::{DetailEffect, ListEffect};
pub use model::{
    EntityDetail, EvolutionNode, FlavorText, ListEntry, ListPage, MoveInfo, NamedRef,
    SpeciesInfo, TypeInfo, TypeRef,
};
pub use msg::{DetailMsg, ListMsg};
pub use state::{DetailState, ListState, Phase};
pub use update::{update_detail, update_list, MOVE_LOOKUP_LIMIT};
pub use view_model::{DetailViewModel, ListViewModel, MoveRowView};
