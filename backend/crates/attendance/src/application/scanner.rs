//! Scan Session
//!
//! Tokio task owning a [`ScanState`]. Inputs arrive over an mpsc channel and
//! each state is published on a watch channel. Only students may scan.
//!
//! The identity check is a spawned sleep tagged with an epoch. Reset and every
//! new check bump the epoch, so a confirmation from an abandoned check is
//! dropped. Teardown cancels every pending sleep.

use std::sync::Arc;
use std::time::Duration;

use auth::{Role, SessionIdentity};
use platform::clock::Clock;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::application::config::AttendanceConfig;
use crate::application::scan_flow::{ScanEvent, ScanState};
use crate::domain::services::ValidationEngine;
use crate::error::{AttendanceError, AttendanceResult};

enum Input {
    Event(ScanEvent),
    /// Raw capture, stamped with the session clock on arrival
    Capture(String),
}

/// Handle to a running scan task
pub struct ScanSession {
    inputs: mpsc::Sender<Input>,
    state: watch::Receiver<ScanState>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    _teardown: DropGuard,
}

impl ScanSession {
    /// Start the scanner timeline for a signed-in student
    pub fn spawn(
        identity: &SessionIdentity,
        config: &AttendanceConfig,
        clock: Arc<dyn Clock>,
    ) -> AttendanceResult<Self> {
        identity.require_role(Role::Student)?;

        let (inputs, receiver) = mpsc::channel(config.command_buffer.max(1));
        let (publisher, state) = watch::channel(ScanState::default());
        let (confirmations, confirmed) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let worker = ScanWorker {
            state: ScanState::default(),
            engine: config.validation_engine(),
            clock,
            publisher,
            identity_check_delay: config.identity_check_delay,
            epoch: 0,
            confirmations,
            cancel: cancel.child_token(),
        };
        let task = tokio::spawn(worker.run(receiver, confirmed));

        tracing::info!(student = %identity.identifier, "Scan session started");

        Ok(Self {
            inputs,
            state,
            _teardown: cancel.clone().drop_guard(),
            cancel,
            task,
        })
    }

    /// Start the simulated identity check; capture begins when it completes
    pub async fn begin_identity_check(&self) -> AttendanceResult<()> {
        self.event(ScanEvent::BeginIdentityCheck).await
    }

    pub async fn start_capture(&self) -> AttendanceResult<()> {
        self.event(ScanEvent::StartCapture).await
    }

    pub async fn stop_capture(&self) -> AttendanceResult<()> {
        self.event(ScanEvent::StopCapture).await
    }

    /// Feed raw text read by the capture device
    pub async fn capture(&self, raw: impl Into<String>) -> AttendanceResult<()> {
        self.send(Input::Capture(raw.into())).await
    }

    /// Report a capture device problem (logged, non-fatal)
    pub async fn capture_error(&self, message: impl Into<String>) -> AttendanceResult<()> {
        self.event(ScanEvent::CaptureFailed {
            message: message.into(),
        })
        .await
    }

    /// Back to the identity check, from any state
    pub async fn reset(&self) -> AttendanceResult<()> {
        self.event(ScanEvent::Reset).await
    }

    /// Latest published state
    pub fn state(&self) -> ScanState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.state.clone()
    }

    /// Wait until the published state satisfies `predicate`
    pub async fn wait_until(
        &self,
        predicate: impl FnMut(&ScanState) -> bool,
    ) -> AttendanceResult<ScanState> {
        let mut state = self.state.clone();
        let matched = state
            .wait_for(predicate)
            .await
            .map_err(|_| AttendanceError::SessionClosed)?;
        Ok(ScanState::clone(&matched))
    }

    /// Stop the task, cancelling any pending identity check
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Scan task failed");
        }
    }

    async fn event(&self, event: ScanEvent) -> AttendanceResult<()> {
        self.send(Input::Event(event)).await
    }

    async fn send(&self, input: Input) -> AttendanceResult<()> {
        self.inputs
            .send(input)
            .await
            .map_err(|_| AttendanceError::SessionClosed)
    }
}

struct ScanWorker {
    state: ScanState,
    engine: ValidationEngine,
    clock: Arc<dyn Clock>,
    publisher: watch::Sender<ScanState>,
    identity_check_delay: Duration,
    epoch: u64,
    confirmations: mpsc::UnboundedSender<u64>,
    cancel: CancellationToken,
}

impl ScanWorker {
    async fn run(
        mut self,
        mut inputs: mpsc::Receiver<Input>,
        mut confirmed: mpsc::UnboundedReceiver<u64>,
    ) {
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                Some(epoch) = confirmed.recv() => {
                    if epoch == self.epoch {
                        tracing::info!("Identity verified");
                        self.apply(ScanEvent::IdentityConfirmed);
                    } else {
                        tracing::debug!(epoch, current = self.epoch, "Stale identity confirmation");
                    }
                }
                input = inputs.recv() => {
                    let Some(input) = input else { break };
                    let event = match input {
                        Input::Event(event) => event,
                        Input::Capture(raw) => ScanEvent::Captured {
                            raw,
                            now_ms: self.clock.now_ms(),
                        },
                    };
                    self.apply(event);
                }
            }
        }

        self.cancel.cancel();
        tracing::info!("Scan session stopped");
    }

    fn apply(&mut self, event: ScanEvent) {
        let reset = matches!(event, ScanEvent::Reset);
        let was_checking = self.state == ScanState::IdentityChecking;

        let previous = std::mem::take(&mut self.state);
        self.state = previous.apply(event, &self.engine);

        if reset {
            self.epoch += 1;
        }
        if !was_checking && self.state == ScanState::IdentityChecking {
            self.epoch += 1;
            self.schedule_identity_confirmation();
        }

        self.publisher.send_replace(self.state.clone());
    }

    fn schedule_identity_confirmation(&self) {
        let epoch = self.epoch;
        let delay = self.identity_check_delay;
        let confirmations = self.confirmations.clone();
        let cancel = self.cancel.child_token();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // Receiver gone means the session ended
                    let _ = confirmations.send(epoch);
                }
            }
        });
    }
}
