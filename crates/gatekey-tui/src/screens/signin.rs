//! Sign-in screen.

use crossterm::event::{KeyCode, KeyEvent};
use gatekey_core::api::SigninRequest;
use gatekey_core::validation::{Field, SigninForm, validate_signin_form};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use super::{ScreenUpdate, banner_line, field_lines, hint_line};
use crate::common::TextField;
use crate::effects::UiEffect;

const FIELD_COUNT: usize = 2;

/// State for the sign-in screen.
#[derive(Debug, Clone)]
pub struct SignInState {
    pub email: TextField,
    pub password: TextField,
    /// Focused field index: 0 = email, 1 = password.
    pub focus: usize,
    /// API error banner (not field-scoped).
    pub banner: Option<String>,
}

impl Default for SignInState {
    fn default() -> Self {
        Self {
            email: TextField::new(),
            password: TextField::masked(),
            focus: 0,
            banner: None,
        }
    }
}

impl SignInState {
    pub fn handle_key(&mut self, in_flight: bool, key: KeyEvent) -> ScreenUpdate {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELD_COUNT;
                ScreenUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
                ScreenUpdate::stay()
            }
            KeyCode::Enter => self.submit(in_flight),
            KeyCode::Backspace => {
                self.banner = None;
                self.focused_mut().backspace();
                ScreenUpdate::stay()
            }
            KeyCode::Char(c) => {
                self.banner = None;
                self.focused_mut().push(c);
                ScreenUpdate::stay()
            }
            _ => ScreenUpdate::stay(),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.banner = None;
        self.focused_mut().paste(text);
    }

    fn submit(&mut self, in_flight: bool) -> ScreenUpdate {
        if in_flight {
            return ScreenUpdate::stay();
        }

        let form = SigninForm {
            email: self.email.value.clone(),
            password: self.password.value.clone(),
        };
        let errors = validate_signin_form(&form);
        if !errors.is_empty() {
            for err in errors {
                match err.field {
                    Field::Email => self.email.error = Some(err.message),
                    Field::Password => self.password.error = Some(err.message),
                    _ => {}
                }
            }
            return ScreenUpdate::stay();
        }

        ScreenUpdate::stay().with_effects(vec![UiEffect::SubmitSignin(SigninRequest {
            email: form.email,
            password: form.password,
        })])
    }

    fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            0 => &mut self.email,
            _ => &mut self.password,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, in_flight: bool) {
        let mut lines = Vec::new();
        banner_line(&mut lines, self.banner.as_deref());
        field_lines(&mut lines, "Email Address", &self.email, self.focus == 0);
        field_lines(&mut lines, "Password", &self.password, self.focus == 1);
        lines.push(ratatui::text::Line::from(""));
        if in_flight {
            lines.push(ratatui::text::Line::from("Signing in..."));
        } else {
            lines.push(hint_line(&[
                ("Enter", "sign in"),
                ("Tab", "next field"),
                ("Esc", "back"),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}
