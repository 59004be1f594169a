//! Password checks used by the auth flow.
//!
//! Passwords are stored and compared as plaintext. There is no hashing
//! anywhere in this service; treat every stored password as exposed.

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

/// Score out of five with the suggestions for every missing criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordStrength {
    pub score: u8,
    pub strength: Strength,
    pub suggestions: Vec<String>,
    pub is_strong: bool,
}

pub trait PasswordUtils {
    /// Compares a submitted password with the stored one
    fn verify_password(password: &str, stored: &str) -> bool;

    /// Scores the password against length, character classes and symbols
    fn validate_password_strength(password: &str) -> PasswordStrength;
}

pub struct PasswordUtilsImpl;

impl PasswordUtils for PasswordUtilsImpl {
    fn verify_password(password: &str, stored: &str) -> bool {
        password == stored
    }

    fn validate_password_strength(password: &str) -> PasswordStrength {
        let checks: [(bool, &str); 5] = [
            (password.chars().count() >= 8, "Use at least 8 characters"),
            (password.chars().any(|c| c.is_ascii_lowercase()), "Include lowercase letters"),
            (password.chars().any(|c| c.is_ascii_uppercase()), "Include uppercase letters"),
            (password.chars().any(|c| c.is_ascii_digit()), "Include numbers"),
            (password.chars().any(|c| !c.is_ascii_alphanumeric()), "Include special characters"),
        ];

        let mut score = 0u8;
        let mut suggestions = Vec::new();
        for (passed, suggestion) in checks {
            if passed {
                score += 1;
            } else {
                suggestions.push(suggestion.to_string());
            }
        }

        let strength = match score {
            0..=2 => Strength::Weak,
            3 | 4 => Strength::Medium,
            _ => Strength::Strong,
        };
        debug!(score, ?strength, "Password strength evaluated");

        PasswordStrength {
            score,
            strength,
            suggestions,
            is_strong: score >= 4,
        }
    }
}
