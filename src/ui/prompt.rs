//! Interactive password prompts.

use anyhow::{Result, anyhow};
use cloudseal::MasterPassword;
use inquire::validator::Validation;
use inquire::{Password, PasswordDisplayMode};

/// Password prompt handler.
///
/// Used only when no password was given on the command line.
pub struct Prompt {
    /// Minimum length required for new encryption passwords.
    password_min_length: usize,
}

impl Prompt {
    pub fn new(password_min_length: usize) -> Self {
        Self { password_min_length }
    }

    /// Prompts for a new password, asking twice.
    ///
    /// A typo here would make everything encrypted with it unrecoverable.
    pub fn encryption_password(&self) -> Result<MasterPassword> {
        let min = self.password_min_length;

        let password = Password::new("Enter master password:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .with_custom_confirmation_message("Confirm master password:")
            .with_custom_confirmation_error_message("passwords do not match")
            .with_validator(move |input: &str| {
                if input.trim().is_empty() {
                    return Ok(Validation::Invalid("password cannot be empty or whitespace only".into()));
                }
                if input.chars().count() < min {
                    return Ok(Validation::Invalid(format!("password must be at least {min} characters long").into()));
                }
                Ok(Validation::Valid)
            })
            .prompt()
            .map_err(|e| anyhow!("password input failed: {e}"))?;

        Ok(MasterPassword::from(password))
    }

    /// Prompts once for an existing password.
    ///
    /// No length rule: the password was chosen earlier and a wrong one is
    /// caught by authentication.
    pub fn decryption_password(&self) -> Result<MasterPassword> {
        let password = Password::new("Enter master password:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .with_validator(|input: &str| Ok(if input.is_empty() { Validation::Invalid("password cannot be empty".into()) } else { Validation::Valid }))
            .prompt()
            .map_err(|e| anyhow!("password input failed: {e}"))?;

        Ok(MasterPassword::from(password))
    }
}
