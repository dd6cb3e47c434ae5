//! Issuer Session
//!
//! Tokio task owning an [`IssuanceTimer`]. Commands arrive over an mpsc
//! channel, ticks come from a periodic interval, and every state change is
//! published on a watch channel. Only faculty may issue.
//!
//! Generation and reveal restart the interval inside the task, so a tick
//! scheduled before the command can never land after it.

use std::sync::Arc;
use std::time::Duration;

use auth::{Role, SessionIdentity};
use platform::clock::Clock;
use platform::countdown::ticker;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Interval;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::application::config::AttendanceConfig;
use crate::application::issuance::{IssuanceTimer, IssuerSnapshot};
use crate::domain::entities::IssuedToken;
use crate::error::{AttendanceError, AttendanceResult};

type Reply<T> = oneshot::Sender<AttendanceResult<T>>;

enum Command {
    Generate {
        class_id: String,
        reply: Reply<IssuedToken>,
    },
    Regenerate {
        class_id: String,
        reply: Reply<IssuedToken>,
    },
    Reveal {
        reply: Reply<()>,
    },
}

/// Handle to a running issuer task
pub struct IssuerSession {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<IssuerSnapshot>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    _teardown: DropGuard,
}

impl IssuerSession {
    /// Start the issuer timeline for a signed-in faculty member
    pub fn spawn(
        identity: &SessionIdentity,
        config: &AttendanceConfig,
        clock: Arc<dyn Clock>,
    ) -> AttendanceResult<Self> {
        identity.require_role(Role::Faculty)?;

        let timer = IssuanceTimer::new(config);
        let (commands, receiver) = mpsc::channel(config.command_buffer.max(1));
        let (publisher, state) = watch::channel(timer.snapshot());
        let cancel = CancellationToken::new();

        let worker = IssuerWorker {
            timer,
            clock,
            publisher,
            tick_interval: config.tick_interval,
        };
        let task = tokio::spawn(worker.run(receiver, cancel.child_token()));

        tracing::info!(issuer = %identity.identifier, "Issuer session started");

        Ok(Self {
            commands,
            state,
            _teardown: cancel.clone().drop_guard(),
            cancel,
            task,
        })
    }

    pub async fn generate(&self, class_id: impl Into<String>) -> AttendanceResult<IssuedToken> {
        let class_id = class_id.into();
        self.request(|reply| Command::Generate { class_id, reply })
            .await
    }

    /// Start a new session for `class_id`, superseding any running countdown
    pub async fn regenerate(&self, class_id: impl Into<String>) -> AttendanceResult<IssuedToken> {
        let class_id = class_id.into();
        self.request(|reply| Command::Regenerate { class_id, reply })
            .await
    }

    pub async fn reveal(&self) -> AttendanceResult<()> {
        self.request(|reply| Command::Reveal { reply }).await
    }

    /// Latest published state
    pub fn snapshot(&self) -> IssuerSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<IssuerSnapshot> {
        self.state.clone()
    }

    /// Stop the task and wait for it to finish
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Issuer task failed");
        }
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> AttendanceResult<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| AttendanceError::SessionClosed)?;
        response.await.map_err(|_| AttendanceError::SessionClosed)?
    }
}

struct IssuerWorker {
    timer: IssuanceTimer,
    clock: Arc<dyn Clock>,
    publisher: watch::Sender<IssuerSnapshot>,
    tick_interval: Duration,
}

impl IssuerWorker {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>, cancel: CancellationToken) {
        let mut ticks = ticker(self.tick_interval);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    self.handle(command, &mut ticks);
                }
                _ = ticks.tick() => {
                    let before = self.timer.phase();
                    let after = self.timer.tick();
                    if before != after {
                        tracing::info!(phase = %after, "Issuer phase changed");
                    }
                    self.publish();
                }
            }
        }

        tracing::info!("Issuer session stopped");
    }

    /// Apply a command, publish, then reply. A successful command restarts
    /// the tick interval.
    fn handle(&mut self, command: Command, ticks: &mut Interval) {
        let now_ms = self.clock.now_ms();
        match command {
            Command::Generate { class_id, reply } => {
                let result = self.timer.generate(&class_id, now_ms).cloned();
                Self::log_issued(&result, "QR generated");
                self.settle(reply, result, ticks);
            }
            Command::Regenerate { class_id, reply } => {
                let result = self.timer.regenerate(&class_id, now_ms).cloned();
                Self::log_issued(&result, "QR regenerated");
                self.settle(reply, result, ticks);
            }
            Command::Reveal { reply } => {
                let result = self.timer.reveal();
                match &result {
                    Ok(()) => tracing::info!(remaining = self.timer.remaining(), "QR revealed"),
                    Err(e) => e.log(),
                }
                self.settle(reply, result, ticks);
            }
        }
    }

    fn log_issued(result: &AttendanceResult<IssuedToken>, message: &'static str) {
        match result {
            Ok(token) => tracing::info!(
                class_id = %token.payload.class_id,
                issued_at = token.payload.issued_at_ms,
                "{message}"
            ),
            Err(e) => e.log(),
        }
    }

    fn settle<T>(&self, reply: Reply<T>, result: AttendanceResult<T>, ticks: &mut Interval) {
        if result.is_ok() {
            ticks.reset();
        }
        self.publish();
        if reply.send(result).is_err() {
            tracing::debug!("Issuer command caller went away");
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.timer.snapshot());
    }
}
