use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use pokedex_core::ListEffect;
use pokedex_engine::{ClientError, EngineConfig, EngineEvent, EngineHandle, RequestId};
use pokedex_logging::dex_info;

/// Hands core effects to the engine and pulls back its events.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> Result<Self, ClientError> {
        dex_info!("Starting engine base_url={}", config.client.base_url);
        let engine = EngineHandle::new(config)?;
        Ok(Self { engine })
    }

    pub fn enqueue_list(&self, effects: Vec<ListEffect>) {
        for effect in effects {
            match &effect {
                ListEffect::FetchPage { limit, offset } => {
                    dex_info!("FetchPage limit={} offset={}", limit, offset);
                }
            }
            self.engine.run_list_effect(effect);
        }
    }

    pub fn open_detail(&self, name: &str) -> RequestId {
        let request_id = self.engine.open_detail(name);
        dex_info!("OpenDetail request_id={} name={}", request_id, name);
        request_id
    }

    /// `Ok(None)` when nothing arrived within `wait`; an error once the engine is gone.
    pub fn next_event(&self, wait: Duration) -> anyhow::Result<Option<EngineEvent>> {
        match self.engine.recv_timeout(wait) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                anyhow::bail!("engine stopped before the request settled")
            }
        }
    }
}
