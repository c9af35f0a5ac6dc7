//! Pokedex engine: REST access, retry policy and the detail aggregation pipeline.
mod client;
mod connectivity;
mod engine;
mod pipeline;
mod sprites;
mod transport;
mod types;
mod wire;

pub use client::{ClientSettings, Locator, ResourceClient, DEFAULT_BASE_URL, DEFAULT_LIST_LIMIT};
pub use connectivity::{AlwaysOnline, Connectivity, ConnectivityFlag};
pub use engine::{EngineConfig, EngineHandle};
pub use pipeline::{
    execute_detail_effect, execute_list_effect, run_detail_pipeline, NoopObserver, StateObserver,
};
pub use sprites::{collect_strings, harvest_urls};
pub use transport::{FetchSettings, ReqwestTransport, Transport};
pub use types::{ClientError, EngineEvent, RequestId, TransportError, TransportFailureKind};
