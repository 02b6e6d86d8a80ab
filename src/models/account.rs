// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account model for storage and API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Identifier (and email) given to accounts saved without an email address.
pub const PUBLIC_USER: &str = "public user";

/// Account record stored in Firestore, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Always equal to `email` (also used as document ID)
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    /// Argon2 PHC string; never the plaintext password
    pub password_hash: Option<String>,
    /// When the account was first saved
    pub created_at: String,
    /// Last time any field changed
    pub updated_at: String,
}

impl Account {
    /// Build a new account from a form whose password has already been hashed.
    ///
    /// A missing email falls back to [`PUBLIC_USER`] for both `user_id` and `email`.
    pub fn new(form: AccountForm, password_hash: Option<String>, now: &str) -> Self {
        let email = form.email.unwrap_or_else(|| PUBLIC_USER.to_string());
        Self {
            user_id: email.clone(),
            first_name: form.first_name,
            last_name: form.last_name,
            email,
            password_hash,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Apply a partial update. Absent fields leave the stored value untouched.
    ///
    /// The email is the document key, so a present email can only ever match
    /// the current one and `user_id` never changes.
    pub fn apply(&mut self, form: AccountForm, password_hash: Option<String>, now: &str) {
        if let Some(first_name) = form.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = form.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(email) = form.email {
            self.email = email;
        }
        if let Some(hash) = password_hash {
            self.password_hash = Some(hash);
        }
        self.updated_at = now.to_string();
    }
}

/// Client form for creating or editing an account.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
}

impl AccountForm {
    /// Document key this form addresses.
    pub fn user_id(&self) -> &str {
        self.email.as_deref().unwrap_or(PUBLIC_USER)
    }
}
