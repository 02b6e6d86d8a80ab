// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store for local development and tests.

use crate::db::{require_spot_id, DocumentStore};
use crate::error::AppError;
use crate::models::{Account, Spot};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::ops::Bound;
use tokio::sync::RwLock;

/// Memory-backed store. Spots are kept ordered by ID so scans match
/// Firestore's document-name ordering.
#[derive(Default)]
pub struct MemoryStore {
    accounts: DashMap<String, Account>,
    spots: RwLock<BTreeMap<String, Spot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored spots.
    pub async fn spot_count(&self) -> usize {
        self.spots.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_account(&self, user_id: &str) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn put_account(&self, account: &Account) -> Result<(), AppError> {
        self.accounts.insert(account.user_id.clone(), account.clone());
        Ok(())
    }

    async fn get_spot(&self, id: &str) -> Result<Option<Spot>, AppError> {
        Ok(self.spots.read().await.get(id).cloned())
    }

    async fn insert_spot(&self, spot: &Spot) -> Result<(), AppError> {
        let id = require_spot_id(spot)?;
        let mut spots = self.spots.write().await;
        if spots.contains_key(id) {
            return Err(AppError::Conflict(format!("Spot {} already exists", id)));
        }
        spots.insert(id.to_string(), spot.clone());
        Ok(())
    }

    async fn update_spot(&self, spot: &Spot) -> Result<Spot, AppError> {
        let id = require_spot_id(spot)?;
        let mut spots = self.spots.write().await;
        let stored = spots
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Spot {} does not exist", id)))?;

        let created_at = stored.created_at.take();
        *stored = Spot {
            created_at,
            ..spot.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_spot(&self, id: &str) -> Result<(), AppError> {
        self.spots
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Spot {} does not exist", id)))
    }

    async fn scan_spots(
        &self,
        after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Spot>, AppError> {
        let spots = self.spots.read().await;
        let lower = match after {
            Some(id) => Bound::Excluded(id.to_string()),
            None => Bound::Unbounded,
        };
        let take = limit.map_or(usize::MAX, |l| l as usize);

        Ok(spots
            .range((lower, Bound::Unbounded))
            .take(take)
            .map(|(_, spot)| spot.clone())
            .collect())
    }
}
