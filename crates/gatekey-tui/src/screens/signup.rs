//! Sign-up screen.

use crossterm::event::{KeyCode, KeyEvent};
use gatekey_core::api::SignupRequest;
use gatekey_core::validation::{Field, SignupForm, validate_signup_form};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{ScreenUpdate, banner_line, field_lines, hint_line};
use crate::common::TextField;
use crate::effects::UiEffect;

const FIELD_COUNT: usize = 4;

/// Role sent with every registration. The API requires one but the form
/// doesn't expose a choice.
const DEFAULT_ROLE: &str = "user";

/// State for the sign-up screen.
#[derive(Debug, Clone)]
pub struct SignUpState {
    pub name: TextField,
    pub email: TextField,
    pub password: TextField,
    pub confirm_password: TextField,
    /// Focused field index, top to bottom.
    pub focus: usize,
    /// API error banner (not field-scoped).
    pub banner: Option<String>,
    /// Set after a successful registration, while the redirect is pending.
    pub success: bool,
}

impl Default for SignUpState {
    fn default() -> Self {
        Self {
            name: TextField::new(),
            email: TextField::new(),
            password: TextField::masked(),
            confirm_password: TextField::masked(),
            focus: 0,
            banner: None,
            success: false,
        }
    }
}

impl SignUpState {
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
        if in_flight || self.success {
            return ScreenUpdate::stay();
        }

        let form = SignupForm {
            name: self.name.value.clone(),
            email: self.email.value.clone(),
            password: self.password.value.clone(),
            confirm_password: self.confirm_password.value.clone(),
            role: DEFAULT_ROLE.to_string(),
        };
        let errors = validate_signup_form(&form);
        if !errors.is_empty() {
            for err in errors {
                match err.field {
                    Field::Name => self.name.error = Some(err.message),
                    Field::Email => self.email.error = Some(err.message),
                    Field::Password => self.password.error = Some(err.message),
                    Field::ConfirmPassword => self.confirm_password.error = Some(err.message),
                    _ => {}
                }
            }
            return ScreenUpdate::stay();
        }

        ScreenUpdate::stay().with_effects(vec![UiEffect::SubmitSignup(SignupRequest {
            name: form.name,
            email: form.email,
            password: form.password,
            confirm_password: form.confirm_password,
            role: form.role,
        })])
    }

    fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            0 => &mut self.name,
            1 => &mut self.email,
            2 => &mut self.password,
            _ => &mut self.confirm_password,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, in_flight: bool) {
        let mut lines = Vec::new();

        if self.success {
            lines.push(Line::from(Span::styled(
                "Account created successfully! Redirecting to email verification...",
                Style::default().fg(Color::Green),
            )));
            lines.push(Line::from(""));
        }
        banner_line(&mut lines, self.banner.as_deref());

        field_lines(&mut lines, "Full Name", &self.name, self.focus == 0);
        field_lines(&mut lines, "Email Address", &self.email, self.focus == 1);
        field_lines(&mut lines, "Password", &self.password, self.focus == 2);
        field_lines(
            &mut lines,
            "Confirm Password",
            &self.confirm_password,
            self.focus == 3,
        );

        lines.push(Line::from(""));
        if in_flight {
            lines.push(Line::from("Creating account..."));
        } else {
            lines.push(hint_line(&[
                ("Enter", "sign up"),
                ("Tab", "next field"),
                ("Esc", "back"),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}
