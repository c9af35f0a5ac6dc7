use crate::{ListEntry, Phase};

/// Everything a detail screen renders, with derived sets already computed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailViewModel {
    /// Name the screen was opened with.
    pub name: String,
    pub phase: Phase,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub id: Option<u32>,
    /// Name as reported by the API, once the primary tier loaded.
    pub display_name: Option<String>,
    pub sprite_urls: Vec<String>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub type_names: Vec<String>,
    pub pokedex_entry: Option<String>,
    pub effective_against: Vec<String>,
    pub weak_against: Vec<String>,
    pub evolution_names: Vec<String>,
    pub moves: Vec<MoveRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRowView {
    pub name: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListViewModel {
    pub query: String,
    /// Loaded entries that match `query`.
    pub rows: Vec<ListEntry>,
    pub loaded: usize,
    /// Total number of entries the API reports.
    pub count: u32,
    pub has_more: bool,
    pub is_loading: bool,
    pub error_message: Option<String>,
}
