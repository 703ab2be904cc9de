//! Top-level application state.

use gatekey_core::config::Config;
use gatekey_core::session::SessionStore;

use crate::screens::{HomeState, SignInState, SignUpState, VerifyState};

/// Navigable destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    SignUp,
    /// Verification screen for the address the code was sent to.
    VerifyEmail { email: String },
}

/// The screen currently on display, with its state.
#[derive(Debug)]
pub enum Screen {
    Home(HomeState),
    SignIn(SignInState),
    SignUp(SignUpState),
    Verify(VerifyState),
}

impl Screen {
    /// The route this screen was built from.
    pub fn route(&self) -> Route {
        match self {
            Screen::Home(_) => Route::Home,
            Screen::SignIn(_) => Route::SignIn,
            Screen::SignUp(_) => Route::SignUp,
            Screen::Verify(verify) => Route::VerifyEmail {
                email: verify.email.clone(),
            },
        }
    }
}

/// Everything the reducer reads and mutates.
pub struct AppState {
    pub config: Config,
    pub store: SessionStore,
    pub screen: Screen,
    /// True while an API call is outstanding; inputs that would submit a
    /// second request are ignored until the result arrives.
    pub request_in_flight: bool,
    pub should_quit: bool,
    /// Set whenever state changed in a way that needs a redraw.
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: Config, store: SessionStore, initial: Route) -> Self {
        let screen = build_screen(&config, &store, initial);
        Self {
            config,
            store,
            screen,
            request_in_flight: false,
            should_quit: false,
            dirty: true,
        }
    }

    /// Replaces the current screen with a fresh one for `route`.
    ///
    /// Screens are rebuilt from scratch on entry; in particular the home
    /// screen re-reads the session store, so it reflects writes that happened
    /// while another screen was up.
    pub fn goto(&mut self, route: Route) {
        self.screen = build_screen(&self.config, &self.store, route);
        self.dirty = true;
    }
}

fn build_screen(config: &Config, store: &SessionStore, route: Route) -> Screen {
    match route {
        Route::Home => Screen::Home(HomeState::from_store(store)),
        Route::SignIn => Screen::SignIn(SignInState::default()),
        Route::SignUp => Screen::SignUp(SignUpState::default()),
        Route::VerifyEmail { email } => {
            Screen::Verify(VerifyState::new(email, config.resend_cooldown_secs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn app() -> (AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::at(dir.path());
        (AppState::new(Config::default(), store, Route::Home), dir)
    }

    #[test]
    fn test_goto_builds_matching_screen() {
        let (mut app, _dir) = app();
        assert!(matches!(app.screen, Screen::Home(_)));

        app.goto(Route::SignIn);
        assert!(matches!(app.screen, Screen::SignIn(_)));

        app.goto(Route::VerifyEmail {
            email: "ada@example.com".to_string(),
        });
        match &app.screen {
            Screen::Verify(verify) => assert_eq!(verify.email, "ada@example.com"),
            other => panic!("unexpected screen: {other:?}"),
        }
    }

    #[test]
    fn test_route_round_trips_through_screen() {
        let (mut app, _dir) = app();
        let route = Route::VerifyEmail {
            email: "ada@example.com".to_string(),
        };
        app.goto(route.clone());
        assert_eq!(app.screen.route(), route);
    }

    #[test]
    fn test_home_reflects_store_on_entry() {
        let (mut app, _dir) = app();
        app.store.set_token("tok").unwrap();
        app.goto(Route::Home);
        match &app.screen {
            Screen::Home(home) => assert!(home.authenticated),
            other => panic!("unexpected screen: {other:?}"),
        }
    }
}
