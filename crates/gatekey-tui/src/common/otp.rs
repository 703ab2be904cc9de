//! One-time-passcode entry widget state.
//!
//! Four ordered slots, each empty or exactly one decimal digit, plus a focus
//! index. Focus sequencing mirrors the usual multi-box OTP inputs: typing a
//! digit advances, backspace on an empty slot retreats, and a paste fills
//! from the first slot.

use gatekey_core::validation::OTP_LEN;

/// State of the multi-box code input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpInput {
    slots: [Option<char>; OTP_LEN],
    focus: usize,
}

impl OtpInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the focused slot.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Digit at slot `i`, if filled.
    pub fn slot(&self, i: usize) -> Option<char> {
        self.slots[i]
    }

    /// True when every slot holds a digit.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Joins the slots into a code string. Empty slots are skipped, so only
    /// call this after [`is_complete`](Self::is_complete) for submission.
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Handles a typed character at the focused slot.
    ///
    /// Non-digit input is rejected without any state change. A digit fills
    /// the focused slot and advances focus unless already on the last slot.
    /// Returns true if the digit was accepted.
    pub fn enter_digit(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        self.slots[self.focus] = Some(c);
        if self.focus < OTP_LEN - 1 {
            self.focus += 1;
        }
        true
    }

    /// Handles backspace at the focused slot.
    ///
    /// A filled slot is cleared in place. An empty slot moves focus back one
    /// without clearing the previous slot's value.
    pub fn backspace(&mut self) {
        if self.slots[self.focus].is_some() {
            self.slots[self.focus] = None;
        } else if self.focus > 0 {
            self.focus -= 1;
        }
    }

    /// Handles a bulk paste.
    ///
    /// Extracts up to four decimal digits from the text, discarding all other
    /// characters, and assigns them left-to-right from slot 0, overwriting.
    /// Focus lands on the slot after the last filled one, or the last slot
    /// when all four were filled.
    pub fn paste(&mut self, text: &str) {
        let digits: Vec<char> = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(OTP_LEN)
            .collect();
        if digits.is_empty() {
            return;
        }
        for (i, digit) in digits.iter().enumerate() {
            self.slots[i] = Some(*digit);
        }
        self.focus = digits.len().min(OTP_LEN - 1);
    }

    /// Empties every slot and returns focus to the first one.
    pub fn clear(&mut self) {
        self.slots = [None; OTP_LEN];
        self.focus = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_fills_and_advances() {
        let mut otp = OtpInput::new();
        assert!(otp.enter_digit('1'));
        assert_eq!(otp.slot(0), Some('1'));
        assert_eq!(otp.focus(), 1);
    }

    #[test]
    fn test_non_digit_rejected_without_change() {
        let mut otp = OtpInput::new();
        assert!(!otp.enter_digit('a'));
        assert_eq!(otp.slot(0), None);
        assert_eq!(otp.focus(), 0);
    }

    #[test]
    fn test_last_slot_keeps_focus() {
        let mut otp = OtpInput::new();
        for c in ['1', '2', '3', '4'] {
            otp.enter_digit(c);
        }
        assert_eq!(otp.focus(), 3);
        assert!(otp.is_complete());
        assert_eq!(otp.code(), "1234");

        // Overtyping replaces the last digit, focus stays.
        otp.enter_digit('9');
        assert_eq!(otp.code(), "1239");
        assert_eq!(otp.focus(), 3);
    }

    #[test]
    fn test_backspace_on_filled_slot_clears_in_place() {
        let mut otp = OtpInput::new();
        otp.enter_digit('1');
        otp.enter_digit('2');
        otp.enter_digit('3');
        // Focus is on slot 3 (empty); retype so slot 2 is focused and filled.
        otp.backspace(); // empty slot 3 -> focus to 2
        assert_eq!(otp.focus(), 2);
        otp.backspace(); // slot 2 filled -> cleared, focus stays
        assert_eq!(otp.focus(), 2);
        assert_eq!(otp.slot(2), None);
        // Previous slot untouched.
        assert_eq!(otp.slot(1), Some('2'));
    }

    #[test]
    fn test_backspace_on_empty_slot_moves_focus_back() {
        let mut otp = OtpInput::new();
        otp.enter_digit('1');
        otp.enter_digit('2');
        // Focus at empty slot 2.
        otp.backspace();
        assert_eq!(otp.focus(), 1);
        assert_eq!(otp.slot(1), Some('2'));
    }

    #[test]
    fn test_backspace_at_first_empty_slot_is_noop() {
        let mut otp = OtpInput::new();
        otp.backspace();
        assert_eq!(otp.focus(), 0);
    }

    #[test]
    fn test_paste_drops_non_digits_and_caps_at_four() {
        let mut otp = OtpInput::new();
        otp.paste("12ab34");
        assert_eq!(otp.code(), "1234");
        assert!(otp.is_complete());
        assert_eq!(otp.focus(), 3);
    }

    #[test]
    fn test_partial_paste_focuses_next_empty_slot() {
        let mut otp = OtpInput::new();
        otp.paste("9-8");
        assert_eq!(otp.slot(0), Some('9'));
        assert_eq!(otp.slot(1), Some('8'));
        assert_eq!(otp.slot(2), None);
        assert_eq!(otp.focus(), 2);
    }

    #[test]
    fn test_paste_overwrites_existing_values() {
        let mut otp = OtpInput::new();
        otp.paste("1111");
        otp.paste("22");
        assert_eq!(otp.slot(0), Some('2'));
        assert_eq!(otp.slot(1), Some('2'));
        // Later slots keep their earlier values.
        assert_eq!(otp.slot(2), Some('1'));
    }

    #[test]
    fn test_paste_without_digits_is_noop() {
        let mut otp = OtpInput::new();
        otp.enter_digit('7');
        otp.paste("no digits here");
        assert_eq!(otp.slot(0), Some('7'));
        assert_eq!(otp.focus(), 1);
    }

    #[test]
    fn test_clear_resets_slots_and_focus() {
        let mut otp = OtpInput::new();
        otp.paste("1234");
        otp.clear();
        assert!(!otp.is_complete());
        assert_eq!(otp.focus(), 0);
        assert_eq!(otp.code(), "");
    }
}
