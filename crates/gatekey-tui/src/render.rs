//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! Frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Padding};

use crate::state::{AppState, Screen};

/// Maximum width of the centered card, in columns.
const CARD_WIDTH: u16 = 64;

/// Maximum height of the centered card, in rows.
const CARD_HEIGHT: u16 = 22;

/// Renders the entire TUI to the frame.
///
/// This is a pure render function - it only reads state and draws to frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let card = card_area(frame.area());

    let title = match &app.screen {
        Screen::Home(_) => " gatekey ",
        Screen::SignIn(_) => " Sign in ",
        Screen::SignUp(_) => " Create account ",
        Screen::Verify(_) => " Verify your email ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 1))
        .title(Span::styled(title, Style::default().fg(Color::Cyan)));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    match &app.screen {
        Screen::Home(home) => home.render(frame, inner),
        Screen::SignIn(signin) => signin.render(frame, inner, app.request_in_flight),
        Screen::SignUp(signup) => signup.render(frame, inner, app.request_in_flight),
        Screen::Verify(verify) => verify.render(frame, inner, app.request_in_flight),
    }
}

/// Centers the card in the terminal, shrinking to fit small windows.
fn card_area(area: Rect) -> Rect {
    let width = CARD_WIDTH.min(area.width);
    let height = CARD_HEIGHT.min(area.height);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(rows[1]);
    cols[1]
}
