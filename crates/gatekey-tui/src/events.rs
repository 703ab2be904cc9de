//! UI event types.
//!
//! Everything the reducer can react to: terminal input, the per-second-ish
//! tick, API call results arriving on the runtime inbox, and due scheduled
//! navigations.

use crossterm::event::Event;
use gatekey_core::api::ApiResponse;

use crate::state::Route;

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives the resend countdown.
    Tick,
    /// Raw terminal event (key, paste, resize).
    Terminal(Event),
    /// An API call finished.
    Api(ApiUiEvent),
    /// A scheduled navigation came due.
    NavigateDue(Route),
}

/// Results of the three API operations.
#[derive(Debug)]
pub enum ApiUiEvent {
    SignupFinished(ApiResponse),
    SigninFinished(ApiResponse),
    VerifyFinished(ApiResponse),
}
