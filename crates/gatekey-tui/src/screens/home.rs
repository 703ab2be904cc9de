//! Session-aware landing screen.

use crossterm::event::{KeyCode, KeyEvent};
use gatekey_core::session::SessionStore;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use serde_json::Value;

use super::{ScreenUpdate, hint_line};
use crate::effects::UiEffect;
use crate::state::Route;

/// State for the landing screen.
///
/// Built from the session store on entry and rebuilt after every session
/// mutation, so there is no ambient "logged in" flag to go stale.
#[derive(Debug, Clone)]
pub struct HomeState {
    pub authenticated: bool,
    /// Display identity from the stored profile (name, falling back to email).
    pub identity: Option<String>,
}

impl HomeState {
    /// Reads the current session from the store.
    pub fn from_store(store: &SessionStore) -> Self {
        let authenticated = store.is_authenticated();
        let identity = store.user().and_then(|user| {
            pick_str(&user, "name").or_else(|| pick_str(&user, "email"))
        });
        Self {
            authenticated,
            identity,
        }
    }

    pub fn handle_key(&self, key: KeyEvent) -> ScreenUpdate {
        match key.code {
            KeyCode::Char('q') => ScreenUpdate::stay().with_effects(vec![UiEffect::Quit]),
            KeyCode::Char('i') if !self.authenticated => ScreenUpdate::goto(Route::SignIn),
            KeyCode::Char('u') if !self.authenticated => ScreenUpdate::goto(Route::SignUp),
            KeyCode::Char('o') if self.authenticated => {
                // Sign out: clear the session, then land on sign-in.
                ScreenUpdate::stay().with_effects(vec![UiEffect::ClearSession {
                    then: Some(Route::SignIn),
                }])
            }
            _ => ScreenUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(""), Line::from("")];

        if self.authenticated {
            let who = self.identity.as_deref().unwrap_or("User");
            lines.push(Line::from(Span::styled(
                "Welcome back!",
                Style::default().fg(Color::Green),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Signed in as {who}.")));
            lines.push(Line::from(
                "You are authenticated and can access all features.",
            ));
            lines.push(Line::from(""));
            lines.push(hint_line(&[("o", "sign out"), ("q", "quit")]));
        } else {
            lines.push(Line::from("Welcome."));
            lines.push(Line::from(""));
            lines.push(Line::from(
                "Create an account or sign in to an existing one.",
            ));
            lines.push(Line::from(""));
            lines.push(hint_line(&[
                ("i", "sign in"),
                ("u", "sign up"),
                ("q", "quit"),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn pick_str(user: &Value, key: &str) -> Option<String> {
    user.get(key).and_then(Value::as_str).map(str::to_string)
}
