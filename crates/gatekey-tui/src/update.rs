//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. The reducer never performs I/O itself.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gatekey_core::api::NETWORK_ERROR;

use crate::effects::UiEffect;
use crate::events::{ApiUiEvent, UiEvent};
use crate::screens::{ScreenTransition, ScreenUpdate};
use crate::state::{AppState, Route, Screen};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if let Screen::Verify(verify) = &mut app.screen {
                let before = verify.countdown.remaining();
                verify.on_tick(Instant::now());
                if verify.countdown.remaining() != before {
                    app.dirty = true;
                }
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Api(api_event) => handle_api_event(app, api_event),
        UiEvent::NavigateDue(route) => {
            app.goto(route);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return vec![];
            }
            app.dirty = true;
            handle_key(app, key)
        }
        Event::Paste(text) => {
            app.dirty = true;
            match &mut app.screen {
                Screen::Home(_) => {}
                Screen::SignIn(signin) => signin.handle_paste(&text),
                Screen::SignUp(signup) => signup.handle_paste(&text),
                Screen::Verify(verify) => verify.handle_paste(&text),
            }
            vec![]
        }
        Event::Resize(_, _) => {
            app.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Global bindings, regardless of screen.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return vec![UiEffect::Quit];
    }
    if key.code == KeyCode::Esc {
        if matches!(app.screen, Screen::Home(_)) {
            app.should_quit = true;
            return vec![UiEffect::Quit];
        }
        app.goto(Route::Home);
        return vec![UiEffect::CancelNavigate];
    }

    let in_flight = app.request_in_flight;
    let screen_update = match &mut app.screen {
        Screen::Home(home) => home.handle_key(key),
        Screen::SignIn(signin) => signin.handle_key(in_flight, key),
        Screen::SignUp(signup) => signup.handle_key(in_flight, key),
        Screen::Verify(verify) => verify.handle_key(in_flight, key),
    };
    apply_screen_update(app, screen_update)
}

fn apply_screen_update(app: &mut AppState, screen_update: ScreenUpdate) -> Vec<UiEffect> {
    let ScreenUpdate {
        transition,
        mut effects,
    } = screen_update;

    for effect in &effects {
        match effect {
            UiEffect::SubmitSignup(_) | UiEffect::SubmitSignin(_) | UiEffect::SubmitVerify(_) => {
                app.request_in_flight = true;
            }
            UiEffect::Quit => app.should_quit = true,
            _ => {}
        }
    }

    if let ScreenTransition::Goto(route) = transition {
        app.goto(route);
        // User-driven navigation supersedes any pending redirect.
        effects.push(UiEffect::CancelNavigate);
    }
    effects
}

fn handle_api_event(app: &mut AppState, api_event: ApiUiEvent) -> Vec<UiEffect> {
    app.request_in_flight = false;
    app.dirty = true;
    let redirect_delay = Duration::from_secs(u64::from(app.config.redirect_delay_secs));

    match api_event {
        ApiUiEvent::SignupFinished(response) => {
            let Screen::SignUp(signup) = &mut app.screen else {
                return vec![];
            };
            if response.success {
                signup.success = true;
                vec![UiEffect::ScheduleNavigate {
                    route: Route::VerifyEmail {
                        email: signup.email.value.clone(),
                    },
                    delay: redirect_delay,
                }]
            } else {
                signup.banner = Some(failure_text(response.error));
                vec![]
            }
        }
        ApiUiEvent::SigninFinished(response) => {
            let Screen::SignIn(signin) = &mut app.screen else {
                return vec![];
            };
            if response.success {
                vec![UiEffect::PersistSession {
                    token: response.token,
                    user: response.data,
                    then: Some(Route::Home),
                }]
            } else {
                signin.banner = Some(failure_text(response.error));
                vec![]
            }
        }
        ApiUiEvent::VerifyFinished(response) => {
            let Screen::Verify(verify) = &mut app.screen else {
                return vec![];
            };
            if response.success {
                verify.on_success();
                vec![UiEffect::ScheduleNavigate {
                    route: Route::SignIn,
                    delay: redirect_delay,
                }]
            } else {
                verify.on_failure(failure_text(response.error));
                vec![]
            }
        }
    }
}

fn failure_text(error: Option<String>) -> String {
    error.unwrap_or_else(|| NETWORK_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use gatekey_core::api::ApiResponse;
    use gatekey_core::config::Config;
    use gatekey_core::session::SessionStore;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn app_at(initial: Route) -> (AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::at(dir.path());
        (AppState::new(Config::default(), store, initial), dir)
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::from(code)))
    }

    fn ok_response(token: Option<&str>) -> ApiResponse {
        ApiResponse {
            success: true,
            data: Some(json!({"name": "Ada"})),
            token: token.map(str::to_string),
            message: Some("ok".to_string()),
            error: None,
        }
    }

    fn err_response(error: &str) -> ApiResponse {
        ApiResponse {
            success: false,
            data: None,
            token: None,
            message: None,
            error: Some(error.to_string()),
        }
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            update(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_ctrl_c_quits_from_any_screen() {
        let (mut app, _dir) = app_at(Route::SignIn);
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
        assert!(app.should_quit);
    }

    #[test]
    fn test_esc_returns_home_and_cancels_pending_redirect() {
        let (mut app, _dir) = app_at(Route::VerifyEmail {
            email: "ada@example.com".to_string(),
        });
        let effects = update(&mut app, key(KeyCode::Esc));
        assert!(matches!(effects.as_slice(), [UiEffect::CancelNavigate]));
        assert!(matches!(app.screen, Screen::Home(_)));
    }

    #[test]
    fn test_esc_on_home_quits() {
        let (mut app, _dir) = app_at(Route::Home);
        let effects = update(&mut app, key(KeyCode::Esc));
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn test_signin_submit_sets_in_flight() {
        let (mut app, _dir) = app_at(Route::SignIn);
        type_text(&mut app, "ada@example.com");
        update(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "secret12");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(effects.as_slice(), [UiEffect::SubmitSignin(_)]));
        assert!(app.request_in_flight);
    }

    #[test]
    fn test_signin_success_persists_then_navigates_home() {
        let (mut app, _dir) = app_at(Route::SignIn);
        app.request_in_flight = true;

        let effects = update(
            &mut app,
            UiEvent::Api(ApiUiEvent::SigninFinished(ok_response(Some("tok-1")))),
        );
        assert!(!app.request_in_flight);
        match effects.as_slice() {
            [UiEffect::PersistSession { token, then, .. }] => {
                assert_eq!(token.as_deref(), Some("tok-1"));
                assert_eq!(*then, Some(Route::Home));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
        // The screen itself does not change until the persist completes.
        assert!(matches!(app.screen, Screen::SignIn(_)));
    }

    #[test]
    fn test_signin_failure_shows_banner() {
        let (mut app, _dir) = app_at(Route::SignIn);
        app.request_in_flight = true;

        let effects = update(
            &mut app,
            UiEvent::Api(ApiUiEvent::SigninFinished(err_response("Invalid email or password"))),
        );
        assert!(effects.is_empty());
        match &app.screen {
            Screen::SignIn(signin) => {
                assert_eq!(signin.banner.as_deref(), Some("Invalid email or password"));
            }
            other => panic!("unexpected screen: {other:?}"),
        }
    }

    #[test]
    fn test_signup_success_schedules_verify_redirect() {
        let (mut app, _dir) = app_at(Route::SignUp);
        if let Screen::SignUp(signup) = &mut app.screen {
            signup.email.value = "ada@example.com".to_string();
        }
        app.request_in_flight = true;

        let effects = update(
            &mut app,
            UiEvent::Api(ApiUiEvent::SignupFinished(ok_response(None))),
        );
        match effects.as_slice() {
            [UiEffect::ScheduleNavigate { route, delay }] => {
                assert_eq!(
                    *route,
                    Route::VerifyEmail {
                        email: "ada@example.com".to_string()
                    }
                );
                assert_eq!(*delay, Duration::from_secs(2));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
        match &app.screen {
            Screen::SignUp(signup) => assert!(signup.success),
            other => panic!("unexpected screen: {other:?}"),
        }
    }

    #[test]
    fn test_verify_success_schedules_signin_redirect() {
        let (mut app, _dir) = app_at(Route::VerifyEmail {
            email: "ada@example.com".to_string(),
        });
        app.request_in_flight = true;

        let effects = update(
            &mut app,
            UiEvent::Api(ApiUiEvent::VerifyFinished(ok_response(None))),
        );
        match effects.as_slice() {
            [UiEffect::ScheduleNavigate { route, .. }] => assert_eq!(*route, Route::SignIn),
            other => panic!("unexpected effects: {other:?}"),
        }
        match &app.screen {
            Screen::Verify(verify) => assert!(verify.success),
            other => panic!("unexpected screen: {other:?}"),
        }
    }

    #[test]
    fn test_verify_failure_clears_code_and_shows_banner() {
        let (mut app, _dir) = app_at(Route::VerifyEmail {
            email: "ada@example.com".to_string(),
        });
        type_text(&mut app, "1234");
        app.request_in_flight = true;

        let effects = update(
            &mut app,
            UiEvent::Api(ApiUiEvent::VerifyFinished(err_response("Invalid OTP"))),
        );
        assert!(effects.is_empty());
        match &app.screen {
            Screen::Verify(verify) => {
                assert_eq!(verify.banner.as_deref(), Some("Invalid OTP"));
                assert!(!verify.otp.is_complete());
                assert_eq!(verify.otp.focus(), 0);
            }
            other => panic!("unexpected screen: {other:?}"),
        }
    }

    #[test]
    fn test_api_result_ignored_after_navigating_away() {
        let (mut app, _dir) = app_at(Route::SignIn);
        app.request_in_flight = true;
        app.goto(Route::Home);

        let effects = update(
            &mut app,
            UiEvent::Api(ApiUiEvent::SigninFinished(ok_response(Some("tok")))),
        );
        assert!(effects.is_empty());
        assert!(!app.request_in_flight);
    }

    #[test]
    fn test_navigate_due_switches_screen() {
        let (mut app, _dir) = app_at(Route::SignUp);
        let effects = update(&mut app, UiEvent::NavigateDue(Route::SignIn));
        assert!(effects.is_empty());
        assert!(matches!(app.screen, Screen::SignIn(_)));
    }

    #[test]
    fn test_paste_routes_to_active_screen() {
        let (mut app, _dir) = app_at(Route::VerifyEmail {
            email: "ada@example.com".to_string(),
        });
        update(&mut app, UiEvent::Terminal(Event::Paste("1234".to_string())));
        match &app.screen {
            Screen::Verify(verify) => assert_eq!(verify.otp.code(), "1234"),
            other => panic!("unexpected screen: {other:?}"),
        }
    }

    #[test]
    fn test_release_events_ignored() {
        let (mut app, _dir) = app_at(Route::SignIn);
        let mut key = KeyEvent::from(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        update(&mut app, UiEvent::Terminal(Event::Key(key)));
        match &app.screen {
            Screen::SignIn(signin) => assert!(signin.email.value.is_empty()),
            other => panic!("unexpected screen: {other:?}"),
        }
    }
}
