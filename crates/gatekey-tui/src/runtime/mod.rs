//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! The runtime uses an "inbox" pattern for async event collection:
//! - Spawned API calls send `UiEvent`s directly to `inbox_tx`
//! - The loop drains `inbox_rx` each frame to collect results

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use gatekey_core::api::ApiClient;
use gatekey_core::config::Config;
use gatekey_core::session::SessionStore;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::effects::UiEffect;
use crate::events::{ApiUiEvent, UiEvent};
use crate::state::{AppState, Route};
use crate::{render, terminal, update};

/// Poll duration while a request is in flight or input is arriving.
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle. The countdown only needs whole-second updates.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    api: ApiClient,
    /// Inbox sender - spawned tasks send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - the loop drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Cancellation handle for a scheduled redirect, if one is pending.
    pending_nav: Option<CancellationToken>,
    last_tick: std::time::Instant,
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime, entering the alternate screen.
    pub fn new(config: Config, store: SessionStore, initial: Route) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let api = ApiClient::new(config.base_url.clone());
        let state = AppState::new(config, store, initial);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            api,
            inbox_tx,
            inbox_rx,
            pending_nav: None,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        while !self.state.should_quit {
            let events = self.collect_events()?;
            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if self.state.dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                self.state.dirty = false;
            }
        }
        Ok(())
    }

    /// Collects events from the inbox and the terminal, plus the tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while a request is in flight or the user is typing;
        // slow polling otherwise to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.request_in_flight || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - API results and due redirects arrive here.
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Poll terminal events:
        // - If we already have events to process, do a non-blocking poll
        // - Otherwise, block until the next tick is due
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Feeds a runtime-originated event back through the reducer.
    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns an async effect, sending the result event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            UiEffect::SubmitSignup(request) => {
                let api = self.api.clone();
                self.spawn_effect(move || async move {
                    UiEvent::Api(ApiUiEvent::SignupFinished(api.register(&request).await))
                });
            }
            UiEffect::SubmitSignin(request) => {
                let api = self.api.clone();
                self.spawn_effect(move || async move {
                    UiEvent::Api(ApiUiEvent::SigninFinished(api.authenticate(&request).await))
                });
            }
            UiEffect::SubmitVerify(request) => {
                let api = self.api.clone();
                self.spawn_effect(move || async move {
                    UiEvent::Api(ApiUiEvent::VerifyFinished(api.confirm_code(&request).await))
                });
            }
            UiEffect::ResendCode { email } => {
                // No resend endpoint exists yet; the cooldown restart is the
                // only user-visible outcome.
                tracing::info!(email, "resend requested");
            }

            UiEffect::PersistSession { token, user, then } => {
                if let Some(token) = token
                    && let Err(err) = self.state.store.set_token(&token)
                {
                    tracing::warn!(%err, "failed to persist session token");
                }
                if let Some(user) = user
                    && let Err(err) = self.state.store.set_user(&user)
                {
                    tracing::warn!(%err, "failed to persist user profile");
                }
                if let Some(route) = then {
                    self.dispatch_event(UiEvent::NavigateDue(route));
                }
            }
            UiEffect::ClearSession { then } => {
                if let Err(err) = self.state.store.clear() {
                    tracing::warn!(%err, "failed to clear session");
                }
                if let Some(route) = then {
                    self.dispatch_event(UiEvent::NavigateDue(route));
                }
            }

            UiEffect::ScheduleNavigate { route, delay } => {
                // A newer redirect supersedes any pending one.
                if let Some(pending) = self.pending_nav.take() {
                    pending.cancel();
                }
                let cancel = CancellationToken::new();
                self.pending_nav = Some(cancel.clone());
                let tx = self.inbox_tx.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        () = cancel.cancelled() => {}
                        () = tokio::time::sleep(delay) => {
                            let _ = tx.send(UiEvent::NavigateDue(route));
                        }
                    }
                });
            }
            UiEffect::CancelNavigate => {
                if let Some(pending) = self.pending_nav.take() {
                    pending.cancel();
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_nav.take() {
            pending.cancel();
        }
        let _ = terminal::restore_terminal();
    }
}
