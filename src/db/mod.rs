// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Services talk to storage only through [`DocumentStore`]. Existence checks
//! for spot writes happen inside the store operation itself, so an insert
//! can't race another insert of the same ID.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Account, Spot};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// Accounts (keyed by URL-encoded email)
    pub const ACCOUNTS: &str = "accounts";
    /// Spots (keyed by spot ID)
    pub const SPOTS: &str = "spots";
}

/// Keyed document storage for accounts and spots.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load an account by its `user_id`.
    async fn get_account(&self, user_id: &str) -> Result<Option<Account>, AppError>;

    /// Create or overwrite an account.
    async fn put_account(&self, account: &Account) -> Result<(), AppError>;

    /// Load a spot by ID.
    async fn get_spot(&self, id: &str) -> Result<Option<Spot>, AppError>;

    /// Create a spot. Fails with `Conflict` if the ID is already taken.
    ///
    /// `spot.id` must be set.
    async fn insert_spot(&self, spot: &Spot) -> Result<(), AppError>;

    /// Overwrite an existing spot, keeping its stored `created_at`, and
    /// return the record as stored. Fails with `NotFound` if there is no
    /// such spot.
    async fn update_spot(&self, spot: &Spot) -> Result<Spot, AppError>;

    /// Delete a spot. Fails with `NotFound` if there is no such spot.
    async fn delete_spot(&self, id: &str) -> Result<(), AppError>;

    /// Scan spots in ascending ID order, starting strictly after `after`.
    /// `limit = None` returns everything that remains.
    async fn scan_spots(
        &self,
        after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Spot>, AppError>;
}

/// Spot ID of a record headed for storage.
pub(crate) fn require_spot_id(spot: &Spot) -> Result<&str, AppError> {
    spot.id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Spot id is required".to_string()))
}
