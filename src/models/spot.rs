// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spot model for storage and API.

use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A shared location record. Every client field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Spot {
    /// Server-generated on insert when absent (also used as document ID)
    pub id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(url)]
    pub image_url: Option<String>,
    /// `userId` of the account that shared the spot
    pub owner: Option<String>,
    /// Set by the server on insert (RFC3339)
    pub created_at: Option<String>,
    /// Set by the server on every write (RFC3339)
    pub updated_at: Option<String>,
}

/// Generate a fresh spot identifier.
pub fn new_spot_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
