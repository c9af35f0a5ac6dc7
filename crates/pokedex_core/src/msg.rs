use crate::{EntityDetail, EvolutionNode, ListPage, MoveInfo, SpeciesInfo, TypeInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailMsg {
    /// Detail screen opened; kicks off the primary tier.
    Start,
    /// Detail and species both resolved.
    PrimaryLoaded {
        detail: EntityDetail,
        species: SpeciesInfo,
    },
    /// Detail or species failed; `message` is user-facing.
    PrimaryFailed { message: String },
    /// Evolution chain lookup settled. `None` when it failed.
    EvolutionResolved(Option<EvolutionNode>),
    /// Type fan-out settled with whichever lookups succeeded.
    TypesResolved(Vec<TypeInfo>),
    /// Move fan-out settled with whichever lookups succeeded.
    MovesResolved(Vec<MoveInfo>),
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMsg {
    /// List screen asked for a page.
    Requested { limit: u32, offset: u32 },
    PageLoaded(ListPage),
    PageFailed { message: String },
    /// User edited the search box.
    SearchChanged(String),
    NoOp,
}
