#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{ContractViolation, Validate};

/// Minimum password length enforced at the signup screen.
pub const SIGNUP_PASSWORD_MIN_CHARS: usize = 6;

/// One registry entry. Credentials are stored and compared as plaintext:
/// the registry is an advertised mock, never a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub email: String,
    pub password: String,
}

impl AccountRecord {
    pub fn v1(email: String, password: String) -> Result<Self, ContractViolation> {
        let record = Self { email, password };
        record.validate()?;
        Ok(record)
    }
}

impl Validate for AccountRecord {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.email.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "account.email",
                reason: "must be non-empty",
            });
        }
        if self.password.is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "account.password",
                reason: "must be non-empty",
            });
        }
        Ok(())
    }
}

/// Signup screen fields. All fields are required, the password has a
/// minimum length, and the confirmation must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl Validate for SignupForm {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.email.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "signup_form.email",
                reason: "must be non-empty",
            });
        }
        if self.password.is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "signup_form.password",
                reason: "must be non-empty",
            });
        }
        if self.confirm.is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "signup_form.confirm",
                reason: "must be non-empty",
            });
        }
        if self.password.chars().count() < SIGNUP_PASSWORD_MIN_CHARS {
            return Err(ContractViolation::InvalidValue {
                field: "signup_form.password",
                reason: "must be at least 6 characters",
            });
        }
        if self.confirm != self.password {
            return Err(ContractViolation::InvalidValue {
                field: "signup_form.confirm",
                reason: "must match password",
            });
        }
        Ok(())
    }
}

/// Login screen fields: both required, no length rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.email.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "login_form.email",
                reason: "must be non-empty",
            });
        }
        if self.password.is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "login_form.password",
                reason: "must be non-empty",
            });
        }
        Ok(())
    }
}
