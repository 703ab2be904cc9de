//! Client-side form validation.
//!
//! Pure, synchronous field checks. Each validator returns `None` on success
//! or a [`ValidationError`] naming the offending field. The aggregate form
//! validators run every field check and collect all failures rather than
//! stopping at the first one, so the UI can annotate each input at once.

use std::sync::OnceLock;

use regex::Regex;

/// Number of digits in a verification code.
pub const OTP_LEN: usize = 4;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum name length.
pub const MIN_NAME_LEN: usize = 2;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

/// Identifies a form field in a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Role,
    Otp,
}

impl Field {
    /// Returns the field identifier as used by the API and the form layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Role => "role",
            Field::Otp => "OTP",
        }
    }
}

/// A field-scoped, human-readable rejection reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Sign-up form input.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
}

/// Sign-in form input.
#[derive(Debug, Clone, Default)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
}

pub fn validate_email(email: &str) -> Option<ValidationError> {
    if email.is_empty() {
        return Some(ValidationError::new(Field::Email, "Email is required"));
    }
    if !email_regex().is_match(email) {
        return Some(ValidationError::new(
            Field::Email,
            "Please enter a valid email address",
        ));
    }
    None
}

pub fn validate_password(password: &str) -> Option<ValidationError> {
    if password.is_empty() {
        return Some(ValidationError::new(Field::Password, "Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some(ValidationError::new(
            Field::Password,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters long"),
        ));
    }
    None
}

pub fn validate_name(name: &str) -> Option<ValidationError> {
    if name.is_empty() {
        return Some(ValidationError::new(Field::Name, "Name is required"));
    }
    if name.chars().count() < MIN_NAME_LEN {
        return Some(ValidationError::new(
            Field::Name,
            format!("Name must be at least {MIN_NAME_LEN} characters long"),
        ));
    }
    None
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> Option<ValidationError> {
    if confirm.is_empty() {
        return Some(ValidationError::new(
            Field::ConfirmPassword,
            "Please confirm your password",
        ));
    }
    if password != confirm {
        return Some(ValidationError::new(
            Field::ConfirmPassword,
            "Passwords do not match",
        ));
    }
    None
}

pub fn validate_role(role: &str) -> Option<ValidationError> {
    if role.is_empty() {
        return Some(ValidationError::new(Field::Role, "Role is required"));
    }
    None
}

pub fn validate_otp(otp: &str) -> Option<ValidationError> {
    if otp.is_empty() {
        return Some(ValidationError::new(Field::Otp, "OTP is required"));
    }
    if otp.chars().count() != OTP_LEN || !otp.chars().all(|c| c.is_ascii_digit()) {
        return Some(ValidationError::new(
            Field::Otp,
            format!("OTP must be a {OTP_LEN}-digit number"),
        ));
    }
    None
}

/// Validates a complete sign-up form, collecting all failures in field order.
pub fn validate_signup_form(form: &SignupForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(err) = validate_name(&form.name) {
        errors.push(err);
    }
    if let Some(err) = validate_email(&form.email) {
        errors.push(err);
    }
    if let Some(err) = validate_password(&form.password) {
        errors.push(err);
    }
    if let Some(err) = validate_confirm_password(&form.password, &form.confirm_password) {
        errors.push(err);
    }
    if let Some(err) = validate_role(&form.role) {
        errors.push(err);
    }

    errors
}

/// Validates a complete sign-in form, collecting all failures in field order.
pub fn validate_signin_form(form: &SigninForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(err) = validate_email(&form.email) {
        errors.push(err);
    }
    if let Some(err) = validate_password(&form.password) {
        errors.push(err);
    }

    errors
}
