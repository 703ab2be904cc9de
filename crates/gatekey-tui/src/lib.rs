//! Full-screen TUI implementation for gatekey.

pub mod common;
pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use gatekey_core::config::Config;
use gatekey_core::session::SessionStore;
pub use runtime::TuiRuntime;
pub use state::Route;

/// Runs the interactive auth UI, starting at `initial`.
///
/// Must be called within a tokio runtime: API calls and scheduled redirects
/// are spawned onto it.
pub async fn run(config: Config, store: SessionStore, initial: Route) -> Result<()> {
    // The TUI needs a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive UI requires a terminal.\n\
             Use `gatekey status` or `gatekey logout` for non-interactive use."
        );
    }

    let mut runtime = TuiRuntime::new(config, store, initial)?;
    runtime.run()
}
