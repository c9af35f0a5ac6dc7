//! In-memory API used by the engine tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pokedex_engine::{
    AlwaysOnline, ClientSettings, ResourceClient, Transport, TransportError, TransportFailureKind,
};
use serde_json::{json, Value};
use url::Url;

pub const BASE: &str = "https://pokeapi.test/api/v2/";
const BASE_PATH: &str = "/api/v2/";

pub fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(pokedex_logging::initialize_for_tests);
}

pub fn fast_settings() -> ClientSettings {
    ClientSettings {
        base_url: BASE.to_string(),
        max_retries: 2,
        backoff_unit: Duration::from_millis(1),
    }
}

pub fn client_for(transport: Arc<dyn Transport>) -> ResourceClient {
    ResourceClient::new(transport, Arc::new(AlwaysOnline), fast_settings()).unwrap()
}

enum Route {
    Body(Vec<u8>),
    Fail(TransportFailureKind),
}

/// Routes keyed by the path below the API base, e.g. `pokemon/bulbasaur`.
/// Unknown routes answer 404. Every request is recorded.
#[derive(Default)]
pub struct FakeApi {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, key: &str, body: Value) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(key.to_string(), Route::Body(body.to_string().into_bytes()));
        self
    }

    pub fn raw(self, key: &str, body: &str) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(key.to_string(), Route::Body(body.as_bytes().to_vec()));
        self
    }

    pub fn failing(self, key: &str, kind: TransportFailureKind) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(key.to_string(), Route::Fail(kind));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|key| key.starts_with(prefix))
            .count()
    }
}

fn route_key(url: &Url) -> String {
    let path = url.path().strip_prefix(BASE_PATH).unwrap_or(url.path());
    match url.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}

#[async_trait::async_trait]
impl Transport for FakeApi {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        let key = route_key(url);
        self.requests.lock().unwrap().push(key.clone());
        match self.routes.lock().unwrap().get(&key) {
            Some(Route::Body(bytes)) => Ok(bytes.clone()),
            Some(Route::Fail(kind)) => Err(TransportError::new(kind.clone(), "scripted failure")),
            None => Err(TransportError::new(
                TransportFailureKind::HttpStatus(404),
                "404 Not Found",
            )),
        }
    }
}

/// Answers each call with the next scripted result.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Vec<u8>, TransportError>>>,
    calls: Mutex<usize>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<Vec<u8>, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, _url: &Url) -> Result<Vec<u8>, TransportError> {
        *self.calls.lock().unwrap() += 1;
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(TransportError::new(
                TransportFailureKind::Network,
                "script exhausted",
            ))
        })
    }
}

pub fn network_down() -> Result<Vec<u8>, TransportError> {
    Err(TransportError::new(
        TransportFailureKind::Network,
        "connection reset",
    ))
}

pub fn pokemon_json(id: u32, name: &str, types: &[(u32, &str)], moves: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "base_experience": 64,
        "sprites": {
            "front_default": format!("https://img.test/{id}.png"),
            "back_default": null,
            "other": {
                "official-artwork": { "front_default": format!("https://img.test/art/{id}.png") },
                "home": { "front_default": format!("https://img.test/{id}.png") }
            }
        },
        "types": types.iter().map(|(slot, type_name)| json!({
            "slot": slot,
            "type": { "name": type_name, "url": format!("{BASE}type/{type_name}/") }
        })).collect::<Vec<_>>(),
        "moves": moves.iter().map(|move_name| json!({
            "move": { "name": move_name, "url": format!("{BASE}move/{move_name}/") },
            "version_group_details": []
        })).collect::<Vec<_>>()
    })
}

pub fn species_json(id: u32, chain: Option<u32>) -> Value {
    json!({
        "id": id,
        "name": "species",
        "flavor_text_entries": [
            { "flavor_text": "Une graine.", "language": { "name": "fr", "url": "" } },
            {
                "flavor_text": "A strange seed was\nplanted on its\u{000C}back at birth.",
                "language": { "name": "en", "url": "" },
                "version": { "name": "red", "url": "" }
            }
        ],
        "evolution_chain": chain.map(|chain_id| json!({ "url": format!("{BASE}evolution-chain/{chain_id}/") }))
    })
}

pub fn type_json(name: &str, to: &[&str], from: &[&str]) -> Value {
    let refs = |names: &[&str]| {
        names
            .iter()
            .map(|n| json!({ "name": n, "url": format!("{BASE}type/{n}/") }))
            .collect::<Vec<_>>()
    };
    json!({
        "id": 1,
        "name": name,
        "damage_relations": {
            "double_damage_to": refs(to),
            "double_damage_from": refs(from),
            "half_damage_to": [],
            "half_damage_from": [],
            "no_damage_to": [],
            "no_damage_from": []
        }
    })
}

pub fn move_json(id: u32, name: &str, type_name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": { "name": type_name, "url": format!("{BASE}type/{type_name}/") },
        "power": 40
    })
}

pub fn chain_link(name: &str, evolves_to: Vec<Value>) -> Value {
    json!({
        "species": { "name": name, "url": "" },
        "evolves_to": evolves_to,
        "is_baby": false
    })
}

pub fn chain_json(id: u32, root: Value) -> Value {
    json!({ "id": id, "chain": root })
}

/// A complete bulbasaur: two types, three moves, linear chain of three.
pub fn bulbasaur_api() -> FakeApi {
    FakeApi::new()
        .json(
            "pokemon/bulbasaur",
            pokemon_json(1, "bulbasaur", &[(1, "grass"), (2, "poison")], &["tackle", "vine-whip", "growl"]),
        )
        .json("pokemon-species/bulbasaur", species_json(1, Some(1)))
        .json(
            "evolution-chain/1/",
            chain_json(
                1,
                chain_link(
                    "bulbasaur",
                    vec![chain_link("ivysaur", vec![chain_link("venusaur", vec![])])],
                ),
            ),
        )
        .json("type/grass", type_json("grass", &["water", "ground", "rock"], &["fire", "ice", "flying", "psychic", "bug"]))
        .json("type/poison", type_json("poison", &["grass", "fairy"], &["ground", "psychic"]))
        .json("move/tackle", move_json(33, "tackle", "normal"))
        .json("move/vine-whip", move_json(22, "vine-whip", "grass"))
        .json("move/growl", move_json(45, "growl", "normal"))
}
