use crate::derivation;
use crate::view_model::{DetailViewModel, ListViewModel, MoveRowView};
use crate::{EntityDetail, ListEntry, ListPage, MoveInfo, SpeciesInfo, TypeInfo};

/// Lifecycle of one detail pipeline. `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Secondary fetch tiers that run after the primary tier succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SecondaryTier {
    Evolution,
    Types,
    Moves,
}

/// Aggregated state for one creature's detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailState {
    name: String,
    phase: Phase,
    detail: Option<EntityDetail>,
    species: Option<SpeciesInfo>,
    type_infos: Vec<TypeInfo>,
    evolution_names: Vec<String>,
    move_infos: Vec<MoveInfo>,
    error_message: Option<String>,
    pending: Vec<SecondaryTier>,
    dirty: bool,
}

impl DetailState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Ready | Phase::Failed)
    }

    pub fn detail(&self) -> Option<&EntityDetail> {
        self.detail.as_ref()
    }

    pub fn species(&self) -> Option<&SpeciesInfo> {
        self.species.as_ref()
    }

    pub fn type_infos(&self) -> &[TypeInfo] {
        &self.type_infos
    }

    pub fn evolution_names(&self) -> &[String] {
        &self.evolution_names
    }

    pub fn move_infos(&self) -> &[MoveInfo] {
        &self.move_infos
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn effective_against(&self) -> Vec<String> {
        derivation::effective_against(&self.type_infos)
    }

    pub fn weak_against(&self) -> Vec<String> {
        derivation::weak_against(&self.type_infos)
    }

    pub fn pokedex_entry(&self) -> Option<String> {
        derivation::pokedex_entry(self.species.as_ref())
    }

    pub fn view(&self) -> DetailViewModel {
        let detail = self.detail.as_ref();
        DetailViewModel {
            name: self.name.clone(),
            phase: self.phase,
            is_loading: self.is_loading(),
            error_message: self.error_message.clone(),
            id: detail.map(|d| d.id),
            display_name: detail.map(|d| d.name.clone()),
            sprite_urls: detail.map(|d| d.sprite_urls.clone()).unwrap_or_default(),
            height: detail.map(|d| d.height),
            weight: detail.map(|d| d.weight),
            type_names: detail.map(EntityDetail::type_names).unwrap_or_default(),
            pokedex_entry: self.pokedex_entry(),
            effective_against: self.effective_against(),
            weak_against: self.weak_against(),
            evolution_names: self.evolution_names.clone(),
            moves: self
                .move_infos
                .iter()
                .map(|info| MoveRowView {
                    name: info.name.clone(),
                    type_name: info.type_name.clone(),
                })
                .collect(),
        }
    }

    /// Returns true once per batch of changes; the caller re-renders when it does.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
        self.error_message = None;
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.phase = Phase::Failed;
        self.error_message = Some(message);
        self.pending.clear();
        self.mark_dirty();
    }

    pub(crate) fn merge_primary(&mut self, detail: EntityDetail, species: SpeciesInfo) {
        self.detail = Some(detail);
        self.species = Some(species);
        self.mark_dirty();
    }

    pub(crate) fn await_tiers(&mut self, tiers: Vec<SecondaryTier>) {
        self.pending = tiers;
        self.finish_if_settled();
    }

    pub(crate) fn is_pending(&self, tier: SecondaryTier) -> bool {
        self.phase == Phase::Loading && self.pending.contains(&tier)
    }

    pub(crate) fn set_evolution_names(&mut self, names: Vec<String>) {
        self.evolution_names = names;
        self.settle(SecondaryTier::Evolution);
    }

    pub(crate) fn set_type_infos(&mut self, type_infos: Vec<TypeInfo>) {
        self.type_infos = type_infos;
        self.settle(SecondaryTier::Types);
    }

    pub(crate) fn set_move_infos(&mut self, move_infos: Vec<MoveInfo>) {
        self.move_infos = move_infos;
        self.settle(SecondaryTier::Moves);
    }

    fn settle(&mut self, tier: SecondaryTier) {
        self.pending.retain(|pending| *pending != tier);
        self.mark_dirty();
        self.finish_if_settled();
    }

    fn finish_if_settled(&mut self) {
        if self.phase == Phase::Loading && self.pending.is_empty() {
            self.phase = Phase::Ready;
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// State of the searchable creature index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    entries: Vec<ListEntry>,
    query: String,
    count: u32,
    next: Option<String>,
    is_loading: bool,
    error_message: Option<String>,
    dirty: bool,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn view(&self) -> ListViewModel {
        ListViewModel {
            query: self.query.clone(),
            rows: derivation::filter_by_name(&self.entries, &self.query),
            loaded: self.entries.len(),
            count: self.count,
            has_more: self.next.is_some(),
            is_loading: self.is_loading,
            error_message: self.error_message.clone(),
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
        self.dirty = true;
    }

    pub(crate) fn apply_page(&mut self, page: ListPage) {
        self.count = page.count;
        self.next = page.next;
        self.entries = page.entries;
        self.is_loading = false;
        self.dirty = true;
    }

    pub(crate) fn apply_failure(&mut self, message: String) {
        self.is_loading = false;
        self.error_message = Some(message);
        self.dirty = true;
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if self.query != query {
            self.query = query;
            self.dirty = true;
        }
    }
}
