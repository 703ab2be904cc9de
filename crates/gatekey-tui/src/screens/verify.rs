//! Email verification screen.
//!
//! Owns the OTP entry widget and the resend countdown. Submission is only
//! possible once all four slots are filled and no request is in flight.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use gatekey_core::api::VerifyRequest;
use gatekey_core::validation::{OTP_LEN, validate_otp};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{ScreenUpdate, hint_line};
use crate::common::{OtpInput, ResendCountdown};
use crate::effects::UiEffect;

/// State for the verification screen.
#[derive(Debug, Clone)]
pub struct VerifyState {
    /// Address the code was sent to (route parameter).
    pub email: String,
    pub otp: OtpInput,
    pub countdown: ResendCountdown,
    /// API error banner.
    pub banner: Option<String>,
    /// OTP validation error (field-scoped).
    pub otp_error: Option<String>,
    /// Informational line (code resent, verified).
    pub notice: Option<String>,
    /// Set once verification succeeded, while the redirect is pending.
    pub success: bool,
    /// Wall-clock anchor for whole-second countdown ticks.
    last_second: Instant,
}

impl VerifyState {
    pub fn new(email: String, cooldown_secs: u32) -> Self {
        Self {
            email,
            otp: OtpInput::new(),
            countdown: ResendCountdown::new(cooldown_secs),
            banner: None,
            otp_error: None,
            notice: None,
            success: false,
            last_second: Instant::now(),
        }
    }

    /// Advances the countdown by however many whole seconds have elapsed.
    pub fn on_tick(&mut self, now: Instant) {
        const SECOND: Duration = Duration::from_secs(1);
        while !self.countdown.can_resend() && now.duration_since(self.last_second) >= SECOND {
            self.countdown.tick();
            self.last_second += SECOND;
        }
    }

    pub fn handle_key(&mut self, in_flight: bool, key: KeyEvent) -> ScreenUpdate {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if !in_flight && !self.success && self.otp.enter_digit(c) {
                    self.otp_error = None;
                    self.banner = None;
                }
                ScreenUpdate::stay()
            }
            KeyCode::Backspace => {
                if !in_flight && !self.success {
                    self.otp.backspace();
                }
                ScreenUpdate::stay()
            }
            KeyCode::Char('r') => self.resend(),
            KeyCode::Enter => self.submit(in_flight),
            _ => ScreenUpdate::stay(),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.success {
            return;
        }
        self.otp.paste(text);
        self.otp_error = None;
        self.banner = None;
    }

    fn resend(&mut self) -> ScreenUpdate {
        if !self.countdown.can_resend() || self.email.is_empty() {
            return ScreenUpdate::stay();
        }
        self.countdown.reset();
        self.last_second = Instant::now();
        self.banner = None;
        self.notice = Some("Verification code has been resent to your email.".to_string());
        ScreenUpdate::stay().with_effects(vec![UiEffect::ResendCode {
            email: self.email.clone(),
        }])
    }

    fn submit(&mut self, in_flight: bool) -> ScreenUpdate {
        if in_flight || self.success || !self.otp.is_complete() {
            return ScreenUpdate::stay();
        }

        let code = self.otp.code();
        if let Some(err) = validate_otp(&code) {
            self.otp_error = Some(err.message);
            return ScreenUpdate::stay();
        }
        if self.email.is_empty() {
            self.banner = Some("Email address is required".to_string());
            return ScreenUpdate::stay();
        }

        ScreenUpdate::stay().with_effects(vec![UiEffect::SubmitVerify(VerifyRequest {
            email: self.email.clone(),
            otp: code,
        })])
    }

    /// Records an API failure: banner up, slots cleared, focus back to 0.
    pub fn on_failure(&mut self, error: String) {
        self.banner = Some(error);
        self.notice = None;
        self.otp.clear();
    }

    /// Records an API success; the reducer schedules the redirect.
    pub fn on_success(&mut self) {
        self.success = true;
        self.banner = None;
        self.notice = Some("Email verified successfully! Redirecting to sign in...".to_string());
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, in_flight: bool) {
        let mut lines = Vec::new();

        lines.push(Line::from(format!("A verification code was sent to {}.", self.email)));
        lines.push(Line::from("Enter the 4-digit code to finish verifying."));
        lines.push(Line::from(""));

        if let Some(notice) = &self.notice {
            lines.push(Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Green),
            )));
            lines.push(Line::from(""));
        }
        if let Some(banner) = &self.banner {
            lines.push(Line::from(Span::styled(
                banner.clone(),
                Style::default().fg(Color::Red),
            )));
            lines.push(Line::from(""));
        }

        lines.push(self.slot_line());
        if let Some(error) = &self.otp_error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));

        if self.countdown.can_resend() {
            lines.push(Line::from(
                "You can request a new code now (press r).",
            ));
        } else {
            lines.push(Line::from(format!(
                "You can request to resend the code in {}.",
                self.countdown.format()
            )));
        }
        lines.push(Line::from(""));

        if in_flight {
            lines.push(Line::from("Verifying..."));
        } else {
            lines.push(hint_line(&[
                ("Enter", "continue"),
                ("r", "resend"),
                ("Esc", "back"),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn slot_line(&self) -> Line<'static> {
        let error_style = self.otp_error.is_some() || self.banner.is_some();
        let mut spans = Vec::with_capacity(OTP_LEN * 2);
        for i in 0..OTP_LEN {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let digit = self.otp.slot(i).unwrap_or('_');
            let mut style = if error_style {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            if i == self.otp.focus() && !self.success {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("[{digit}]"), style));
        }
        Line::from(spans)
    }
}
