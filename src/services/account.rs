// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account upsert, lookup and password authentication.

use crate::db::DocumentStore;
use crate::error::AppError;
use crate::models::{Account, AccountForm};
use crate::services::password;
use crate::time_utils::now_rfc3339;
use std::sync::Arc;
use validator::Validate;

/// Account operations over the document store.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn DocumentStore>,
}

/// Run an Argon2 operation off the async worker threads.
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password task failed: {}", e)))
}

impl AccountService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create the account for `form.email`, or merge the form into the
    /// existing one. Absent fields never erase stored values.
    ///
    /// Creating is open to anyone. Changing an existing account requires
    /// `session_user_id` to name that account; otherwise `Unauthorized`.
    pub async fn upsert_account(
        &self,
        mut form: AccountForm,
        session_user_id: Option<&str>,
    ) -> Result<Account, AppError> {
        form.validate()?;

        let existing = self.store.get_account(form.user_id()).await?;
        if let Some(existing) = &existing {
            if session_user_id != Some(existing.user_id.as_str()) {
                tracing::warn!(
                    user_id = %existing.user_id,
                    has_session = session_user_id.is_some(),
                    "Rejected account update without owner session"
                );
                return Err(AppError::Unauthorized);
            }
        }

        let password_hash = match form.password.take() {
            Some(plaintext) => Some(blocking(move || password::hash_password(&plaintext)).await??),
            None => None,
        };

        let now = now_rfc3339();
        let (account, created) = match existing {
            Some(mut existing) => {
                existing.apply(form, password_hash, &now);
                (existing, false)
            }
            None => (Account::new(form, password_hash, &now), true),
        };

        self.store.put_account(&account).await?;

        tracing::info!(user_id = %account.user_id, created, "Account saved");

        Ok(account)
    }

    /// Point lookup by email. A missing account is `Ok(None)`.
    pub async fn get_account(&self, email: &str) -> Result<Option<Account>, AppError> {
        self.store.get_account(email).await
    }

    /// Return the account iff it exists and `password` matches its hash.
    ///
    /// Unknown email and wrong password both yield `Ok(None)`.
    pub async fn authenticate_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, AppError> {
        let account = self.store.get_account(email).await?;
        let stored_hash = account.as_ref().and_then(|a| a.password_hash.clone());
        let candidate = password.to_string();

        let matched = blocking(move || match stored_hash {
            Some(hash) => password::verify_password(&candidate, &hash),
            None => {
                password::verify_against_dummy(&candidate);
                false
            }
        })
        .await?;

        if matched {
            tracing::debug!(email, "Account authenticated");
            Ok(account)
        } else {
            tracing::info!(email, "Authentication failed");
            Ok(None)
        }
    }
}
