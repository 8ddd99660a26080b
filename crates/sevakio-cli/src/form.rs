//! Form validation run before any network call.

use thiserror::Error;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A form problem the user can fix. The display text is shown verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
  #[error("Please enter your full name.")]
  MissingFullName,
  #[error("Please enter a valid email address.")]
  InvalidEmail,
  #[error("Please enter your email address.")]
  MissingEmail,
  #[error("Please enter your phone number.")]
  MissingPhone,
  #[error("Password must be at least 6 characters long.")]
  ShortPassword,
  #[error("Passwords do not match. Please try again.")]
  PasswordMismatch,
  #[error("Please enter the verification code.")]
  MissingCode,
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn looks_like_email(s: &str) -> bool {
  if s.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = s.split_once('@') else {
    return false;
  };
  if local.is_empty() || domain.contains('@') {
    return false;
  }
  domain
    .char_indices()
    .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn check_password(password: &str, confirm: &str) -> Result<(), FormError> {
  if password.chars().count() < MIN_PASSWORD_LEN {
    return Err(FormError::ShortPassword);
  }
  if password != confirm {
    return Err(FormError::PasswordMismatch);
  }
  Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
  pub full_name:        String,
  pub email:            String,
  pub phone:            String,
  pub password:         String,
  pub confirm_password: String,
}

impl SignupForm {
  pub fn validate(&self) -> Result<(), FormError> {
    if self.full_name.trim().is_empty() {
      return Err(FormError::MissingFullName);
    }
    if !looks_like_email(&self.email) {
      return Err(FormError::InvalidEmail);
    }
    if self.phone.trim().is_empty() {
      return Err(FormError::MissingPhone);
    }
    check_password(&self.password, &self.confirm_password)
  }
}

#[derive(Debug, Clone, Default)]
pub struct ResetForm {
  pub code:             String,
  pub new_password:     String,
  pub confirm_password: String,
}

impl ResetForm {
  pub fn validate(&self) -> Result<(), FormError> {
    if self.code.trim().is_empty() {
      return Err(FormError::MissingCode);
    }
    check_password(&self.new_password, &self.confirm_password)
  }
}
