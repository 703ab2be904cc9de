//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only (HTTP calls, session writes, scheduled
//! navigation); the reducer itself never performs I/O.

use std::time::Duration;

use gatekey_core::api::{SigninRequest, SignupRequest, VerifyRequest};
use serde_json::Value;

use crate::state::Route;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// POST the sign-up form.
    SubmitSignup(SignupRequest),

    /// POST the sign-in form.
    SubmitSignin(SigninRequest),

    /// POST the verification code.
    SubmitVerify(VerifyRequest),

    /// Request a fresh verification code for `email`.
    ///
    /// The backend exposes no resend endpoint yet; the runtime records the
    /// request and the reducer has already restarted the cooldown.
    ResendCode { email: String },

    /// Persist token and/or profile to the session store, then navigate.
    ///
    /// Navigation rides on the effect so the destination screen is built
    /// after the write: the home screen re-reads the store when entered.
    PersistSession {
        token: Option<String>,
        user: Option<Value>,
        then: Option<Route>,
    },

    /// Remove the persisted session, then navigate.
    ClearSession { then: Option<Route> },

    /// Navigate to `route` after `delay`, unless cancelled first.
    ScheduleNavigate { route: Route, delay: Duration },

    /// Cancel a pending scheduled navigation, if any.
    CancelNavigate,
}
