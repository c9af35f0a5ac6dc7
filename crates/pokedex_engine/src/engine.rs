use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pokedex_core::{DetailViewModel, ListEffect, ListMsg, Phase};
use pokedex_logging::{dex_debug, dex_error};

use crate::client::{ClientSettings, ResourceClient};
use crate::connectivity::ConnectivityFlag;
use crate::pipeline::{
    execute_list_effect, run_detail_pipeline, StateObserver, DETAIL_SUBJECT, LIST_SUBJECT,
};
use crate::transport::{FetchSettings, ReqwestTransport, Transport};
use crate::{ClientError, EngineEvent, RequestId};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub client: ClientSettings,
}

enum EngineCommand {
    OpenDetail { request_id: RequestId, name: String },
    List(ListEffect),
}

/// Runs pipelines on a background tokio runtime and reports through [`EngineEvent`]s.
///
/// Each opened detail gets its own pipeline. Pipelines are never cancelled;
/// events for a request the caller no longer shows can simply be dropped.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    connectivity: ConnectivityFlag,
    next_request_id: AtomicU64,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config.fetch).map_err(ClientError::RequestFailed)?;
        Self::with_transport(Arc::new(transport), config.client)
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        settings: ClientSettings,
    ) -> Result<Self, ClientError> {
        let connectivity = ConnectivityFlag::default();
        let client = ResourceClient::new(transport, Arc::new(connectivity.clone()), settings)?;
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|err| ClientError::Unknown(format!("tokio runtime: {err}")))?;

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(supervise(client, command, event_tx));
            }
            dex_debug!("Engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            connectivity,
            next_request_id: AtomicU64::new(1),
        })
    }

    /// Starts a detail pipeline for `name` and returns the id its events carry.
    pub fn open_detail(&self, name: impl Into<String>) -> RequestId {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        self.send(EngineCommand::OpenDetail {
            request_id,
            name: name.into(),
        });
        request_id
    }

    pub fn run_list_effect(&self, effect: ListEffect) {
        self.send(EngineCommand::List(effect));
    }

    /// Flag consulted before every request; flip it from a connectivity monitor.
    pub fn connectivity(&self) -> &ConnectivityFlag {
        &self.connectivity
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// engine worker is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            dex_error!("Engine worker is gone; command dropped");
        }
    }
}

struct ChannelObserver {
    request_id: RequestId,
    tx: mpsc::Sender<EngineEvent>,
}

impl StateObserver for ChannelObserver {
    fn publish(&self, view: &DetailViewModel) {
        let _ = self.tx.send(EngineEvent::DetailChanged {
            request_id: self.request_id,
            view: view.clone(),
        });
    }
}

/// Runs one command in its own task so a panic still produces a settling event.
async fn supervise(
    client: ResourceClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let fallback = failure_event(&command);
    let worker_tx = event_tx.clone();
    let worker =
        tokio::spawn(async move { handle_command(&client, command, worker_tx).await });
    if let Err(err) = worker.await {
        dex_error!("Engine task failed: {}", err);
        let _ = event_tx.send(fallback);
    }
}

fn failure_event(command: &EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::OpenDetail { request_id, name } => EngineEvent::DetailChanged {
            request_id: *request_id,
            view: DetailViewModel {
                name: name.clone(),
                phase: Phase::Failed,
                error_message: Some(
                    ClientError::Unknown(String::new()).user_message(DETAIL_SUBJECT),
                ),
                ..DetailViewModel::default()
            },
        },
        EngineCommand::List(_) => EngineEvent::ListSettled(ListMsg::PageFailed {
            message: ClientError::Unknown(String::new()).user_message(LIST_SUBJECT),
        }),
    }
}

async fn handle_command(
    client: &ResourceClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::OpenDetail { request_id, name } => {
            let observer = ChannelObserver {
                request_id,
                tx: event_tx,
            };
            run_detail_pipeline(client, &name, &observer).await;
        }
        EngineCommand::List(effect) => {
            let msg = execute_list_effect(client, effect).await;
            let _ = event_tx.send(EngineEvent::ListSettled(msg));
        }
    }
}
