//! Screen modules.
//!
//! Each screen is self-contained: it owns its state, key handler, and render
//! function. Key handlers return a [`ScreenUpdate`] describing whether to
//! stay, which route to go to, and which effects the runtime should run.

pub mod home;
pub mod signin;
pub mod signup;
pub mod verify;

pub use home::HomeState;
pub use signin::SignInState;
pub use signup::SignUpState;
pub use verify::VerifyState;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::effects::UiEffect;
use crate::state::Route;

/// Pushes an error banner line when a message is present.
pub(crate) fn banner_line(lines: &mut Vec<Line<'static>>, banner: Option<&str>) {
    if let Some(message) = banner {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
}

/// Pushes the label, input line, and optional error for one form field.
pub(crate) fn field_lines(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    field: &crate::common::TextField,
    focused: bool,
) {
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    lines.push(Line::from(Span::styled(label.to_string(), label_style)));

    let mut value = field.display();
    if focused {
        value.push('\u{2581}'); // cursor marker
    }
    lines.push(Line::from(format!("  {value}")));

    if let Some(error) = &field.error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
}

/// Builds a dimmed `key action` hint line for screen footers.
pub(crate) fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            format!("{key} "),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            (*action).to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Transition returned by screen key handlers.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    Goto(Route),
}

/// Update returned by screen key handlers.
#[derive(Debug)]
pub struct ScreenUpdate {
    pub transition: ScreenTransition,
    pub effects: Vec<UiEffect>,
}

impl ScreenUpdate {
    pub fn stay() -> Self {
        Self {
            transition: ScreenTransition::Stay,
            effects: Vec::new(),
        }
    }

    pub fn goto(route: Route) -> Self {
        Self {
            transition: ScreenTransition::Goto(route),
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}
