// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spot CRUD and cursor pagination.

use crate::db::DocumentStore;
use crate::error::AppError;
use crate::models::spot::{new_spot_id, Spot};
use crate::time_utils::now_rfc3339;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use std::sync::Arc;
use validator::Validate;

/// Largest page a client may ask for.
pub const MAX_PAGE_SIZE: u32 = 1000;

const CURSOR_PREFIX: &str = "spot:";

/// One page of a spot listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotPage {
    pub items: Vec<Spot>,
    /// Present iff more spots follow this page
    pub next_page_token: Option<String>,
}

/// Encode the resume position after `last_id` as an opaque URL-safe token.
pub fn encode_cursor(last_id: &str) -> String {
    URL_SAFE_NO_PAD.encode(format!("{}{}", CURSOR_PREFIX, last_id))
}

/// Decode a token produced by [`encode_cursor`] back into a spot ID.
pub fn decode_cursor(raw: &str) -> Result<String, AppError> {
    let invalid_cursor = || AppError::BadRequest("Invalid 'cursor' parameter".to_string());

    let decoded = URL_SAFE_NO_PAD.decode(raw).map_err(|_| invalid_cursor())?;
    let decoded = String::from_utf8(decoded).map_err(|_| invalid_cursor())?;

    match decoded.strip_prefix(CURSOR_PREFIX) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(invalid_cursor()),
    }
}

/// Firestore document IDs can't contain `/`, can't be `.` or `..`, and
/// `__.*__` is reserved.
fn check_spot_id(id: &str) -> Result<(), AppError> {
    let reserved =
        id == "." || id == ".." || (id.len() >= 4 && id.starts_with("__") && id.ends_with("__"));
    if id.is_empty() || id.contains('/') || id.len() > 256 || reserved {
        return Err(AppError::BadRequest(format!("Invalid spot id: {:?}", id)));
    }
    Ok(())
}

/// Spot operations over the document store.
#[derive(Clone)]
pub struct SpotService {
    store: Arc<dyn DocumentStore>,
}

impl SpotService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Load a single spot.
    pub async fn get_spot(&self, id: &str) -> Result<Option<Spot>, AppError> {
        self.store.get_spot(id).await
    }

    /// Store a new spot, generating its ID when the client sent none.
    ///
    /// Fails with `Conflict` if a spot with the same ID exists.
    pub async fn insert_spot(&self, mut spot: Spot) -> Result<Spot, AppError> {
        spot.validate()?;

        let id = match spot.id.take().filter(|id| !id.is_empty()) {
            Some(id) => {
                check_spot_id(&id)?;
                id
            }
            None => new_spot_id(),
        };

        let now = now_rfc3339();
        spot.id = Some(id.clone());
        spot.created_at = Some(now.clone());
        spot.updated_at = Some(now);

        self.store.insert_spot(&spot).await?;

        tracing::info!(spot_id = %id, "Spot inserted");
        Ok(spot)
    }

    /// Replace an existing spot wholesale. The stored `created_at` is kept.
    ///
    /// Fails with `NotFound` if there is no such spot.
    pub async fn update_spot(&self, mut spot: Spot) -> Result<Spot, AppError> {
        spot.validate()?;

        let id = spot
            .id
            .clone()
            .ok_or_else(|| AppError::BadRequest("Spot id is required for update".to_string()))?;
        check_spot_id(&id)?;

        spot.updated_at = Some(now_rfc3339());
        let stored = self.store.update_spot(&spot).await?;

        tracing::info!(spot_id = %id, "Spot updated");
        Ok(stored)
    }

    /// Delete a spot. Fails with `NotFound` if there is no such spot.
    pub async fn remove_spot(&self, id: &str) -> Result<(), AppError> {
        check_spot_id(id)?;
        self.store.delete_spot(id).await?;

        tracing::info!(spot_id = %id, "Spot removed");
        Ok(())
    }

    /// List spots in store order.
    ///
    /// An empty cursor is the same as none. Without a count the rest of the
    /// collection is returned and there is never a next page. With a count,
    /// one extra record is fetched to learn whether another page exists.
    pub async fn list_spots(
        &self,
        cursor: Option<&str>,
        count: Option<u32>,
    ) -> Result<SpotPage, AppError> {
        let after = cursor
            .filter(|raw| !raw.is_empty())
            .map(decode_cursor)
            .transpose()?;

        if let Some(count) = count {
            if count == 0 || count > MAX_PAGE_SIZE {
                return Err(AppError::BadRequest(format!(
                    "'count' must be between 1 and {}",
                    MAX_PAGE_SIZE
                )));
            }
        }

        let fetch_limit = count.map(|c| c.saturating_add(1));
        let mut items = self.store.scan_spots(after.as_deref(), fetch_limit).await?;

        let next_page_token = match count {
            Some(count) if items.len() > count as usize => {
                items.truncate(count as usize);
                items.last().and_then(|s| s.id.as_deref()).map(encode_cursor)
            }
            _ => None,
        };

        tracing::debug!(
            resumed = after.is_some(),
            count = ?count,
            returned = items.len(),
            has_more = next_page_token.is_some(),
            "Listed spots"
        );

        Ok(SpotPage {
            items,
            next_page_token,
        })
    }
}
