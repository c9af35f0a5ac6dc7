#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEffect {
    /// Fetch base detail and species for `name` concurrently.
    FetchPrimary { name: String },
    FetchEvolution { url: String },
    FetchTypes { names: Vec<String> },
    FetchMoves { names: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEffect {
    FetchPage { limit: u32, offset: u32 },
}
