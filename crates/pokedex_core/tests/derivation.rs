use std::collections::BTreeSet;

use pokedex_core::{
    effective_against, filter_by_name, flatten_evolution, pokedex_entry, weak_against,
    EvolutionNode, FlavorText, ListEntry, SpeciesInfo, TypeInfo,
};
use pretty_assertions::assert_eq;

fn type_info(name: &str, to: &[&str], from: &[&str]) -> TypeInfo {
    TypeInfo {
        name: name.to_string(),
        double_damage_to: to.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        double_damage_from: from.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
    }
}

fn species(entries: &[(&str, &str)]) -> SpeciesInfo {
    SpeciesInfo {
        id: 1,
        flavor_text_entries: entries
            .iter()
            .map(|(text, language)| FlavorText {
                text: text.to_string(),
                language: language.to_string(),
            })
            .collect(),
        evolution_chain_url: None,
    }
}

#[test]
fn effectiveness_is_sorted_union_and_idempotent() {
    let infos = vec![
        type_info("grass", &["water", "ground", "rock"], &["fire", "ice", "flying", "poison", "bug"]),
        type_info("poison", &["grass", "fairy"], &["ground", "psychic"]),
    ];

    let first = effective_against(&infos);
    assert_eq!(first, vec!["fairy", "grass", "ground", "rock", "water"]);
    assert_eq!(effective_against(&infos), first);

    let weak = weak_against(&infos);
    assert_eq!(
        weak,
        vec!["bug", "fire", "flying", "ground", "ice", "poison", "psychic"]
    );
    assert_eq!(weak_against(&infos), weak);
}

#[test]
fn effectiveness_of_nothing_is_empty() {
    assert!(effective_against(&[]).is_empty());
    assert!(weak_against(&[]).is_empty());
}

#[test]
fn evolution_tree_flattens_pre_order() {
    let tree = EvolutionNode::with_children(
        "A",
        vec![
            EvolutionNode::with_children("B", vec![EvolutionNode::leaf("D")]),
            EvolutionNode::leaf("C"),
        ],
    );

    assert_eq!(flatten_evolution(&tree), vec!["A", "B", "D", "C"]);
}

#[test]
fn evolution_flattening_handles_deep_branching_chains() {
    let tree = EvolutionNode::with_children(
        "eevee",
        vec![
            EvolutionNode::leaf("vaporeon"),
            EvolutionNode::with_children(
                "x",
                vec![EvolutionNode::with_children("y", vec![EvolutionNode::leaf("z")])],
            ),
            EvolutionNode::leaf("flareon"),
        ],
    );

    assert_eq!(
        flatten_evolution(&tree),
        vec!["eevee", "vaporeon", "x", "y", "z", "flareon"]
    );
}

#[test]
fn search_filter_is_case_insensitive() {
    let entries = ["Bulbasaur", "Charmander"]
        .iter()
        .map(|name| ListEntry {
            name: name.to_string(),
            url: format!("https://example.test/{name}"),
        })
        .collect::<Vec<_>>();

    let filtered = filter_by_name(&entries, "char");
    assert_eq!(
        filtered.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        vec!["Charmander"]
    );
    assert_eq!(filter_by_name(&entries, "").len(), 2);
    assert_eq!(filter_by_name(&entries, "   ").len(), 2);
}

#[test]
fn search_filter_trims_query() {
    let entries = vec![ListEntry {
        name: "pikachu".to_string(),
        url: "https://example.test/25".to_string(),
    }];
    assert_eq!(filter_by_name(&entries, "  PIKA "), entries);
    assert!(filter_by_name(&entries, "zu").is_empty());
}

#[test]
fn pokedex_entry_picks_first_english_and_flattens_breaks() {
    let species = species(&[
        ("Une graine", "fr"),
        ("A strange seed was\nplanted on its\u{000C}back at birth.\r\n", "en"),
        ("Second english entry", "en"),
    ]);
    assert_eq!(
        pokedex_entry(Some(&species)).as_deref(),
        Some("A strange seed was planted on its back at birth.")
    );
}

#[test]
fn pokedex_entry_is_none_without_english() {
    assert_eq!(pokedex_entry(Some(&species(&[("Samen", "de")]))), None);
    assert_eq!(pokedex_entry(None), None);
}

#[test]
fn single_node_chain_flattens_to_itself() {
    assert_eq!(flatten_evolution(&EvolutionNode::leaf("ditto")), vec!["ditto"]);
}
