//! User-facing wording for provider failures, per screen.

use sevakio_core::ProviderError;

pub fn signup(err: ProviderError) -> &'static str {
  match err {
    ProviderError::EmailInUse => "Email already registered. Please login.",
    ProviderError::WeakPassword => {
      "Password is too weak. Please use at least 6 characters with a mix of letters and numbers."
    }
    ProviderError::InvalidEmail => "Please enter a valid email address.",
    ProviderError::InvalidCredential => "Invalid email or password format.",
    ProviderError::OperationNotAllowed => {
      "Sign up is currently disabled. Please try again later."
    }
    ProviderError::Network => "Network error. Please check your internet connection.",
    _ => "An error occurred during sign up. Please try again.",
  }
}

pub fn login(err: ProviderError) -> &'static str {
  match err {
    ProviderError::InvalidEmail => "Please enter a valid email address.",
    ProviderError::UserNotFound => {
      "No account found with this email. Please sign up first."
    }
    ProviderError::InvalidCredential => "Invalid email or password.",
    ProviderError::UserDisabled => {
      "This account has been disabled. Please contact support."
    }
    ProviderError::TooManyRequests => {
      "Too many login attempts. Please try again later."
    }
    ProviderError::Network => "Network error. Please check your internet connection.",
    _ => "An error occurred during login. Please try again.",
  }
}

pub fn reset_request(err: ProviderError) -> &'static str {
  match err {
    ProviderError::InvalidEmail => "Please enter a valid email address.",
    ProviderError::UserNotFound => "No account found with this email.",
    ProviderError::TooManyRequests => {
      "Too many reset attempts. Please try again later."
    }
    _ => "Failed to send reset email. Please try again.",
  }
}

pub fn reset_confirm(err: ProviderError) -> &'static str {
  match err {
    ProviderError::InvalidActionCode => {
      "Invalid or expired code. Please request a new password reset."
    }
    ProviderError::WeakPassword => {
      "Password is too weak. Please use at least 6 characters."
    }
    ProviderError::UserNotFound => "Unable to find user account.",
    _ => "Failed to reset password. Please try again.",
  }
}
