// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Accounts (profile and password hash, keyed by email)
//! - Spots (shared locations, keyed by generated ID)

use crate::db::{collections, require_spot_id, DocumentStore};
use crate::error::AppError;
use crate::models::{Account, Spot};
use async_trait::async_trait;
use firestore::errors::FirestoreError;
use firestore::{FirestoreQueryCursor, FirestoreQueryDirection, FirestoreWritePrecondition};

/// Spot fields replaced by an update. `createdAt` is deliberately absent so
/// the stored value survives.
const SPOT_UPDATE_FIELDS: [&str; 8] = [
    "id",
    "name",
    "description",
    "latitude",
    "longitude",
    "imageUrl",
    "owner",
    "updatedAt",
];

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator rejects real credentials, so skip the auth chain entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }
}

/// Account document ID. Emails may contain characters Firestore reserves.
fn account_doc_id(user_id: &str) -> String {
    urlencoding::encode(user_id).into_owned()
}

/// Translate a failed spot write into the caller-facing error.
fn spot_write_error(err: FirestoreError, id: &str) -> AppError {
    match err {
        FirestoreError::DataConflictError(_) => {
            AppError::Conflict(format!("Spot {} already exists", id))
        }
        FirestoreError::DataNotFoundError(_) => {
            AppError::NotFound(format!("Spot {} does not exist", id))
        }
        other => AppError::Database(other.to_string()),
    }
}

#[async_trait]
impl DocumentStore for FirestoreDb {
    // ─── Account Operations ──────────────────────────────────────

    async fn get_account(&self, user_id: &str) -> Result<Option<Account>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACCOUNTS)
            .obj()
            .one(&account_doc_id(user_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn put_account(&self, account: &Account) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACCOUNTS)
            .document_id(account_doc_id(&account.user_id))
            .object(account)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Spot Operations ─────────────────────────────────────────

    async fn get_spot(&self, id: &str) -> Result<Option<Spot>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::SPOTS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Firestore `create` fails with ALREADY_EXISTS atomically.
    async fn insert_spot(&self, spot: &Spot) -> Result<(), AppError> {
        let id = require_spot_id(spot)?;
        let _: Spot = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::SPOTS)
            .document_id(id)
            .object(spot)
            .execute()
            .await
            .map_err(|e| spot_write_error(e, id))?;
        Ok(())
    }

    /// The `exists` precondition makes the write fail with NOT_FOUND
    /// instead of creating the document.
    async fn update_spot(&self, spot: &Spot) -> Result<Spot, AppError> {
        let id = require_spot_id(spot)?;
        // The write result is the whole stored document, masked fields included
        self.get_client()?
            .fluent()
            .update()
            .fields(SPOT_UPDATE_FIELDS)
            .in_col(collections::SPOTS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(id)
            .object(spot)
            .execute::<Spot>()
            .await
            .map_err(|e| spot_write_error(e, id))
    }

    async fn delete_spot(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::SPOTS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(id)
            .execute()
            .await
            .map_err(|e| spot_write_error(e, id))?;
        Ok(())
    }

    async fn scan_spots(
        &self,
        after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Spot>, AppError> {
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::SPOTS)
            .order_by([("id", FirestoreQueryDirection::Ascending)]);

        let query = match after {
            Some(id) => query.start_at(FirestoreQueryCursor::AfterValue(vec![(&id).into()])),
            None => query,
        };

        let query = match limit {
            Some(limit) => query.limit(limit),
            None => query,
        };

        query
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
