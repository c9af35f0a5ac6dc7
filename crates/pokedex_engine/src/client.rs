use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use pokedex_core::{EntityDetail, EvolutionNode, ListPage, MoveInfo, SpeciesInfo, TypeInfo};
use pokedex_logging::{dex_debug, dex_trace, dex_warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::connectivity::Connectivity;
use crate::transport::Transport;
use crate::wire::{
    DetailResponse, EvolutionChainResponse, ListResponse, MoveResponse, SpeciesResponse,
    TypeResponse,
};
use crate::ClientError;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";
pub const DEFAULT_LIST_LIMIT: u32 = 151;

const LOGGED_BODY_CHARS: usize = 256;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// Retries after the first attempt; `2` means three attempts in total.
    pub max_retries: u32,
    /// The delay before retry `n` is `backoff_unit * 2^n`.
    pub backoff_unit: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: 2,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

/// Where a resource lives: relative to the API base, or a link the API handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Path(String),
    Absolute(String),
    /// One named resource of a collection; `key` is always a single path segment.
    Resource { collection: String, key: String },
}

impl Locator {
    pub fn path(path: impl Into<String>) -> Self {
        Locator::Path(path.into())
    }

    pub fn absolute(url: impl Into<String>) -> Self {
        Locator::Absolute(url.into())
    }

    pub fn resource(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Locator::Resource {
            collection: collection.into(),
            key: key.into(),
        }
    }

    pub fn resolve(&self, base: &Url) -> Result<Url, ClientError> {
        let invalid = |err: url::ParseError| ClientError::InvalidLocator(format!("{self}: {err}"));
        let resolved = match self {
            Locator::Path(path) => base.join(path.trim_start_matches('/')).map_err(invalid)?,
            Locator::Absolute(url) => Url::parse(url.trim()).map_err(invalid)?,
            Locator::Resource { collection, key } => {
                if matches!(key.as_str(), "" | "." | "..") {
                    return Err(ClientError::InvalidLocator(format!(
                        "{self}: not a resource name"
                    )));
                }
                let mut url = base
                    .join(&format!("{}/", collection.trim_matches('/')))
                    .map_err(invalid)?;
                url.path_segments_mut()
                    .map_err(|()| {
                        ClientError::InvalidLocator(format!("{self}: base cannot take a path"))
                    })?
                    .pop_if_empty()
                    .push(key);
                url
            }
        };
        ensure_http(resolved)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Path(path) => write!(f, "path {path:?}"),
            Locator::Absolute(url) => write!(f, "url {url:?}"),
            Locator::Resource { collection, key } => write!(f, "{collection} {key:?}"),
        }
    }
}

fn ensure_http(url: Url) -> Result<Url, ClientError> {
    let http = matches!(url.scheme(), "http" | "https");
    if !http || url.host_str().is_none() {
        return Err(ClientError::InvalidLocator(format!(
            "{url} is not an http(s) url"
        )));
    }
    Ok(url)
}

/// Typed access to the REST API with connectivity checks and retry/backoff.
///
/// Every call goes to the network; nothing is cached.
#[derive(Clone)]
pub struct ResourceClient {
    transport: Arc<dyn Transport>,
    connectivity: Arc<dyn Connectivity>,
    base_url: Url,
    max_retries: u32,
    backoff_unit: Duration,
}

impl ResourceClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        connectivity: Arc<dyn Connectivity>,
        settings: ClientSettings,
    ) -> Result<Self, ClientError> {
        let mut base = settings.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|err| ClientError::InvalidLocator(format!("base url {base:?}: {err}")))
            .and_then(ensure_http)?;

        Ok(Self {
            transport,
            connectivity,
            base_url,
            max_retries: settings.max_retries,
            backoff_unit: settings.backoff_unit,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Delay slept before the given retry (1-based).
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        self.backoff_unit.saturating_mul(2u32.saturating_pow(retry))
    }

    /// Fetch and decode one resource.
    ///
    /// Transient transport failures are retried; invalid locators, permanent
    /// HTTP statuses and bodies of the wrong shape fail at once.
    pub async fn fetch<T: DeserializeOwned>(&self, locator: &Locator) -> Result<T, ClientError> {
        let url = locator.resolve(&self.base_url)?;
        if !self.connectivity.is_online() {
            dex_debug!("Offline, not requesting {}", url);
            return Err(ClientError::NoConnection);
        }

        let bytes = self.get_with_retry(&url).await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            dex_warn!(
                "Decoding error for {}: {} body={}",
                url,
                err,
                pokedex_logging::body_excerpt(&bytes, LOGGED_BODY_CHARS)
            );
            ClientError::Decode(err.to_string())
        })
    }

    async fn get_with_retry(&self, url: &Url) -> Result<Vec<u8>, ClientError> {
        let mut retry = 0;
        loop {
            match self.transport.get(url).await {
                Ok(bytes) => {
                    dex_trace!("GET {} -> {} bytes", url, bytes.len());
                    return Ok(bytes);
                }
                Err(err) if err.is_transient() && retry < self.max_retries => {
                    retry += 1;
                    let delay = self.backoff_delay(retry);
                    dex_debug!(
                        "GET {} failed ({}), retry {}/{} in {:?}",
                        url,
                        err,
                        retry,
                        self.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    dex_warn!("Request failed: {} for URL: {}", err, url);
                    return Err(ClientError::RequestFailed(err));
                }
            }
        }
    }

    pub async fn fetch_list(&self, limit: u32, offset: u32) -> Result<ListPage, ClientError> {
        let locator = Locator::path(format!("pokemon?limit={limit}&offset={offset}"));
        self.fetch::<ListResponse>(&locator).await.map(Into::into)
    }

    pub async fn fetch_detail(&self, name: &str) -> Result<EntityDetail, ClientError> {
        let locator = Locator::resource("pokemon", resource_key(name));
        self.fetch::<DetailResponse>(&locator).await.map(Into::into)
    }

    pub async fn fetch_species(&self, name: &str) -> Result<SpeciesInfo, ClientError> {
        let locator = Locator::resource("pokemon-species", resource_key(name));
        self.fetch::<SpeciesResponse>(&locator).await.map(Into::into)
    }

    pub async fn fetch_species_by_id(&self, id: u32) -> Result<SpeciesInfo, ClientError> {
        let locator = Locator::resource("pokemon-species", id.to_string());
        self.fetch::<SpeciesResponse>(&locator).await.map(Into::into)
    }

    pub async fn fetch_type(&self, name: &str) -> Result<TypeInfo, ClientError> {
        let locator = Locator::resource("type", resource_key(name));
        self.fetch::<TypeResponse>(&locator).await.map(Into::into)
    }

    pub async fn fetch_move(&self, name: &str) -> Result<MoveInfo, ClientError> {
        let locator = Locator::resource("move", resource_key(name));
        self.fetch::<MoveResponse>(&locator).await.map(Into::into)
    }

    pub async fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionNode, ClientError> {
        self.fetch::<EvolutionChainResponse>(&Locator::absolute(url))
            .await
            .map(Into::into)
    }
}

/// The API keys resources by lowercase name.
fn resource_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse(DEFAULT_BASE_URL).unwrap()
    }

    #[test]
    fn relative_paths_join_onto_base() {
        let url = Locator::path("/pokemon/pikachu").resolve(&base()).unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/pikachu");
    }

    #[test]
    fn absolute_links_are_used_verbatim() {
        let url = Locator::absolute("https://pokeapi.co/api/v2/evolution-chain/1/")
            .resolve(&base())
            .unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/evolution-chain/1/");
    }

    #[test]
    fn malformed_and_non_http_locators_are_rejected() {
        for locator in [
            Locator::absolute("not a url"),
            Locator::absolute("ftp://pokeapi.co/file"),
            Locator::absolute("mailto:ash@example.com"),
        ] {
            assert!(matches!(
                locator.resolve(&base()),
                Err(ClientError::InvalidLocator(_))
            ));
        }
    }

    #[test]
    fn resource_keys_stay_in_one_segment() {
        for (key, expected) in [
            ("mr mime", "https://pokeapi.co/api/v2/pokemon/mr%20mime"),
            ("../type/grass", "https://pokeapi.co/api/v2/pokemon/..%2Ftype%2Fgrass"),
            ("bulbasaur#x", "https://pokeapi.co/api/v2/pokemon/bulbasaur%23x"),
            ("a?b=c", "https://pokeapi.co/api/v2/pokemon/a%3Fb=c"),
        ] {
            let url = Locator::resource("pokemon", key).resolve(&base()).unwrap();
            assert_eq!(url.as_str(), expected);
            assert_eq!(url.query(), None);
            assert_eq!(url.fragment(), None);
        }
    }

    #[test]
    fn relative_resource_names_are_rejected() {
        for key in ["", ".", ".."] {
            assert!(matches!(
                Locator::resource("pokemon", key).resolve(&base()),
                Err(ClientError::InvalidLocator(_))
            ));
        }
    }

    #[test]
    fn names_are_lowercased() {
        assert_eq!(resource_key(" Mr-Mime "), "mr-mime");
    }
}
