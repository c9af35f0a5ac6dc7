//! Pure derivations recomputed from the current detail state on demand.
use std::collections::BTreeSet;

use crate::{EvolutionNode, ListEntry, SpeciesInfo, TypeInfo};

const ENTRY_LANGUAGE: &str = "en";

/// Sorted union of the types every loaded type deals double damage to.
pub fn effective_against(type_infos: &[TypeInfo]) -> Vec<String> {
    type_infos
        .iter()
        .flat_map(|info| info.double_damage_to.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted union of the types every loaded type takes double damage from.
pub fn weak_against(type_infos: &[TypeInfo]) -> Vec<String> {
    type_infos
        .iter()
        .flat_map(|info| info.double_damage_from.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First English flavor text with line breaks and form feeds flattened.
pub fn pokedex_entry(species: Option<&SpeciesInfo>) -> Option<String> {
    let entry = species?
        .flavor_text_entries
        .iter()
        .find(|entry| entry.language == ENTRY_LANGUAGE)?;
    Some(normalize_flavor_text(&entry.text))
}

fn normalize_flavor_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{000C}' => ' ',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Pre-order walk: node first, then each child subtree in listed order.
pub fn flatten_evolution(root: &EvolutionNode) -> Vec<String> {
    let mut names = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        names.push(node.species_name.clone());
        stack.extend(node.evolves_to.iter().rev());
    }
    names
}

/// Case-insensitive substring match on the entry name. A blank query keeps everything.
pub fn filter_by_name(entries: &[ListEntry], query: &str) -> Vec<ListEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

