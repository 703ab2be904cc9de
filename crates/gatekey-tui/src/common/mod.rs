//! Shared widget state used across screens.

pub mod countdown;
pub mod field;
pub mod otp;

pub use countdown::ResendCountdown;
pub use field::TextField;
pub use otp::OtpInput;
