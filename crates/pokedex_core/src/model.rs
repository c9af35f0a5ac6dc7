use std::collections::BTreeSet;

/// One row of the paginated creature index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub url: String,
}

/// A page of the creature index, with the API's pagination links.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub entries: Vec<ListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRef {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub slot: u32,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDetail {
    pub id: u32,
    pub name: String,
    /// Every sprite URL found in the payload, deduplicated, in document order.
    pub sprite_urls: Vec<String>,
    pub moves: Vec<NamedRef>,
    pub types: Vec<TypeRef>,
    pub height: u32,
    pub weight: u32,
}

impl EntityDetail {
    /// Distinct type names ordered by slot.
    pub fn type_names(&self) -> Vec<String> {
        let mut refs: Vec<&TypeRef> = self.types.iter().collect();
        refs.sort_by_key(|type_ref| type_ref.slot);
        let mut names: Vec<String> = Vec::with_capacity(refs.len());
        for type_ref in refs {
            if !names.contains(&type_ref.name) {
                names.push(type_ref.name.clone());
            }
        }
        names
    }

    /// The first `limit` move names in listed order.
    pub fn leading_move_names(&self, limit: usize) -> Vec<String> {
        self.moves
            .iter()
            .take(limit)
            .map(|entry| entry.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorText {
    pub text: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesInfo {
    pub id: u32,
    pub flavor_text_entries: Vec<FlavorText>,
    /// Absolute link to the species' evolution chain, when the API has one.
    pub evolution_chain_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeInfo {
    pub name: String,
    pub double_damage_to: BTreeSet<String>,
    pub double_damage_from: BTreeSet<String>,
}

/// A node of an evolution tree. Children are listed in API order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionNode {
    pub species_name: String,
    pub evolves_to: Vec<EvolutionNode>,
}

impl EvolutionNode {
    pub fn leaf(species_name: impl Into<String>) -> Self {
        Self {
            species_name: species_name.into(),
            evolves_to: Vec::new(),
        }
    }

    pub fn with_children(species_name: impl Into<String>, evolves_to: Vec<EvolutionNode>) -> Self {
        Self {
            species_name: species_name.into(),
            evolves_to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveInfo {
    pub id: u32,
    pub name: String,
    pub type_name: String,
}
