//! JSON shapes of the REST API and their conversion into domain values.
//!
//! Only the fields the app reads are modelled; everything else in a payload
//! is ignored. `sprites` is kept untyped because its shape varies between
//! API generations.

use pokedex_core::{
    EntityDetail, EvolutionNode, FlavorText, ListEntry, ListPage, MoveInfo, NamedRef,
    SpeciesInfo, TypeInfo, TypeRef,
};
use serde::Deserialize;

use crate::sprites::harvest_urls;

#[derive(Debug, Deserialize)]
pub(crate) struct NamedResource {
    name: String,
    url: String,
}

impl From<NamedResource> for NamedRef {
    fn from(value: NamedResource) -> Self {
        NamedRef {
            name: value.name,
            url: value.url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    count: u32,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<NamedResource>,
}

impl From<ListResponse> for ListPage {
    fn from(value: ListResponse) -> Self {
        ListPage {
            count: value.count,
            next: value.next,
            previous: value.previous,
            entries: value
                .results
                .into_iter()
                .map(|item| ListEntry {
                    name: item.name,
                    url: item.url,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailResponse {
    id: u32,
    name: String,
    sprites: serde_json::Value,
    moves: Vec<MoveSlot>,
    types: Vec<TypeSlot>,
    height: u32,
    weight: u32,
}

#[derive(Debug, Deserialize)]
struct MoveSlot {
    #[serde(rename = "move")]
    move_ref: NamedResource,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    slot: u32,
    #[serde(rename = "type")]
    type_ref: NamedResource,
}

impl From<DetailResponse> for EntityDetail {
    fn from(value: DetailResponse) -> Self {
        EntityDetail {
            id: value.id,
            name: value.name,
            sprite_urls: harvest_urls(&value.sprites),
            moves: value
                .moves
                .into_iter()
                .map(|slot| slot.move_ref.into())
                .collect(),
            types: value
                .types
                .into_iter()
                .map(|slot| TypeRef {
                    slot: slot.slot,
                    name: slot.type_ref.name,
                    url: slot.type_ref.url,
                })
                .collect(),
            height: value.height,
            weight: value.weight,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpeciesResponse {
    id: u32,
    flavor_text_entries: Vec<FlavorTextEntry>,
    evolution_chain: Option<ApiLink>,
}

#[derive(Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Debug, Deserialize)]
struct ApiLink {
    url: String,
}

impl From<SpeciesResponse> for SpeciesInfo {
    fn from(value: SpeciesResponse) -> Self {
        SpeciesInfo {
            id: value.id,
            flavor_text_entries: value
                .flavor_text_entries
                .into_iter()
                .map(|entry| FlavorText {
                    text: entry.flavor_text,
                    language: entry.language.name,
                })
                .collect(),
            evolution_chain_url: value.evolution_chain.map(|link| link.url),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TypeResponse {
    name: String,
    damage_relations: DamageRelations,
}

#[derive(Debug, Deserialize)]
struct DamageRelations {
    double_damage_from: Vec<NamedResource>,
    double_damage_to: Vec<NamedResource>,
}

impl From<TypeResponse> for TypeInfo {
    fn from(value: TypeResponse) -> Self {
        TypeInfo {
            name: value.name,
            double_damage_to: value
                .damage_relations
                .double_damage_to
                .into_iter()
                .map(|t| t.name)
                .collect(),
            double_damage_from: value
                .damage_relations
                .double_damage_from
                .into_iter()
                .map(|t| t.name)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvolutionChainResponse {
    chain: ChainLink,
}

#[derive(Debug, Deserialize)]
struct ChainLink {
    species: NamedResource,
    evolves_to: Vec<ChainLink>,
}

impl From<ChainLink> for EvolutionNode {
    fn from(value: ChainLink) -> Self {
        EvolutionNode {
            species_name: value.species.name,
            evolves_to: value.evolves_to.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<EvolutionChainResponse> for EvolutionNode {
    fn from(value: EvolutionChainResponse) -> Self {
        value.chain.into()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoveResponse {
    id: u32,
    name: String,
    #[serde(rename = "type")]
    type_ref: NamedResource,
}

impl From<MoveResponse> for MoveInfo {
    fn from(value: MoveResponse) -> Self {
        MoveInfo {
            id: value.id,
            name: value.name,
            type_name: value.type_ref.name,
        }
    }
}
