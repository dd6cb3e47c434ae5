//! Subcommand handlers

use std::error::Error;
use std::io::Write;
use std::sync::Arc;

use attendance::{
    AppError, IssuerSession, IssuerSnapshot, IssuerView, RevealPhase, ScanSession, ScanState,
    ScanView,
};
use auth::application::{
    CheckSessionUseCase, SignInInput, SignInMode, SignInUseCase, SignOutUseCase,
};
use auth::presentation::RoleHint;
use auth::{FileSessionStore, Role, SessionIdentity};
use platform::clock::{Clock, SystemClock, format_local};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::AppConfig;
use crate::input::{IssuerInput, ScanInput};
use crate::render;

pub struct App {
    config: AppConfig,
    store: Arc<FileSessionStore>,
    clock: Arc<dyn Clock>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(FileSessionStore::new(
            config.session_dir.clone(),
            config.auth.storage_key.clone(),
        ));
        Self {
            config,
            store,
            clock: Arc::new(SystemClock),
        }
    }

    pub async fn sign_in(
        &self,
        identifier: String,
        password: Option<String>,
        mode: SignInMode,
    ) -> anyhow::Result<()> {
        if let Some(hint) = RoleHint::for_input(identifier.trim()) {
            println!("{}", hint.message());
        }
        let password = match password {
            Some(password) => password,
            None => prompt("Password: ").await?,
        };

        let use_case = SignInUseCase::new(
            self.store.clone(),
            self.clock.clone(),
            Arc::new(self.config.auth.clone()),
        );
        let output = use_case
            .execute(SignInInput {
                identifier,
                password,
                mode,
            })
            .await
            .map_err(AppError::from)?;

        println!("{} {}", output.mode.success_title(), output.greeting());
        Ok(())
    }

    pub async fn sign_out(&self) -> anyhow::Result<()> {
        let signed_in = SignOutUseCase::new(self.store.clone())
            .execute()
            .await
            .map_err(AppError::from)?;
        if signed_in {
            println!("Signed out");
        } else {
            println!("Nobody was signed in");
        }
        Ok(())
    }

    pub async fn whoami(&self) -> anyhow::Result<()> {
        match self.check().execute().await.map_err(AppError::from)? {
            Some(identity) => println!(
                "{} ({}) since {}",
                identity.identifier,
                identity.role,
                format_local(identity.signed_in_at_ms)
            ),
            None => println!("Not signed in"),
        }
        Ok(())
    }

    /// Faculty timeline: show the code, blur it, reveal on request
    pub async fn issue(&self, class_id: Option<String>) -> anyhow::Result<()> {
        let identity = self.require(Role::Faculty).await?;
        let session = IssuerSession::spawn(&identity, &self.config.attendance, self.clock.clone())
            .map_err(AppError::from)?;

        println!("Faculty Portal - {}", identity.identifier);
        println!("{}", IssuerInput::HELP);

        if let Some(class_id) = class_id {
            generate(&session, class_id).await;
        }

        let mut updates = session.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut shown = (0, RevealPhase::Idle);
        let interrupt = tokio::signal::ctrl_c();
        tokio::pin!(interrupt);

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = updates.borrow_and_update().clone();
                    draw_issuer(&snapshot, &mut shown)?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match IssuerInput::parse(&line) {
                        None => {}
                        Some(IssuerInput::Generate(class_id)) => generate(&session, class_id).await,
                        Some(IssuerInput::Regenerate(class_id)) => match session
                            .regenerate(regenerate_target(class_id, &session.snapshot()))
                            .await
                        {
                            Ok(_) => println!("QR Regenerated: New session started"),
                            Err(e) => print_error(&e.into()),
                        },
                        Some(IssuerInput::Reveal) => {
                            if let Err(e) = session.reveal().await {
                                print_error(&e.into());
                            }
                        }
                        Some(IssuerInput::Help) => println!("{}", IssuerInput::HELP),
                        Some(IssuerInput::Quit) => break,
                    }
                }
                _ = &mut interrupt => break,
            }
        }

        session.shutdown().await;
        Ok(())
    }

    /// Student timeline: identity check, capture, verdict
    pub async fn scan(&self) -> anyhow::Result<()> {
        let identity = self.require(Role::Student).await?;
        let session = ScanSession::spawn(&identity, &self.config.attendance, self.clock.clone())
            .map_err(AppError::from)?;

        println!("Student Portal - {}", identity.identifier);
        println!("{}", ScanInput::HELP);

        let mut updates = session.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut shown: Option<ScanState> = None;
        draw_scan(&session.state(), &mut shown);
        let interrupt = tokio::signal::ctrl_c();
        tokio::pin!(interrupt);

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = updates.borrow_and_update().clone();
                    draw_scan(&state, &mut shown);
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let sent = match ScanInput::parse(&line) {
                        ScanInput::Verify => session.begin_identity_check().await,
                        ScanInput::StartCapture => session.start_capture().await,
                        ScanInput::StopCapture => session.stop_capture().await,
                        ScanInput::Reset => session.reset().await,
                        ScanInput::DeviceError(message) => session.capture_error(message).await,
                        ScanInput::Capture(raw) => session.capture(raw).await,
                        ScanInput::Help => {
                            println!("{}", ScanInput::HELP);
                            Ok(())
                        }
                        ScanInput::Quit => break,
                    };
                    if let Err(e) = sent {
                        print_error(&e.into());
                        break;
                    }
                }
                _ = &mut interrupt => break,
            }
        }

        session.shutdown().await;
        Ok(())
    }

    fn check(&self) -> CheckSessionUseCase<FileSessionStore> {
        CheckSessionUseCase::new(self.store.clone())
    }

    async fn require(&self, role: Role) -> anyhow::Result<SessionIdentity> {
        Ok(self.check().require(role).await.map_err(AppError::from)?)
    }
}

async fn generate(session: &IssuerSession, class_id: String) {
    match session.generate(class_id).await {
        Ok(token) => println!(
            "QR Generated: Session started for {}",
            token.payload.class_id
        ),
        Err(e) => print_error(&e.into()),
    }
}

/// Course for `g`: the one typed, else the one on screen. Empty when there
/// is neither, which the session rejects as a missing course code.
fn regenerate_target(typed: String, snapshot: &IssuerSnapshot) -> String {
    if !typed.trim().is_empty() {
        return typed;
    }
    snapshot
        .token
        .as_ref()
        .map(|t| t.payload.class_id.to_string())
        .unwrap_or_default()
}

/// Full screen on a new code or phase, a status line otherwise
fn draw_issuer(snapshot: &IssuerSnapshot, shown: &mut (u64, RevealPhase)) -> anyhow::Result<()> {
    let view = IssuerView::from(snapshot);
    let key = (snapshot.generation, snapshot.phase);
    if key != *shown {
        print!("{}", render::issuer_screen(&view)?);
        *shown = key;
    } else if snapshot.phase.is_shown() {
        println!("{}", render::issuer_status(&view));
    }
    Ok(())
}

fn draw_scan(state: &ScanState, shown: &mut Option<ScanState>) {
    if shown.as_ref() == Some(state) {
        return;
    }
    print!("{}", render::scan_screen(&ScanView::from(state)));
    *shown = Some(state.clone());
}

pub fn print_error(err: &AppError) {
    if err.kind().is_internal() {
        match err.source() {
            Some(source) => tracing::error!(error = %err, source = %source, "Command failed"),
            None => tracing::error!(error = %err, "Command failed"),
        }
    }
    eprintln!("Error: {}", err.message());
    if let Some(action) = err.action() {
        eprintln!("  {action}");
    }
}

async fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
