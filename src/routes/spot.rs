// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spot CRUD and listing routes.

use crate::error::{AppError, Result};
use crate::models::Spot;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/spotcheck/v1/spot",
            get(list_spot).post(insert_spot).put(update_spot),
        )
        .route("/spotcheck/v1/spot/{id}", get(get_spot).delete(remove_spot))
}

#[derive(Deserialize)]
struct ListSpotQuery {
    /// Opaque token from a previous page's `nextPageToken`
    cursor: Option<String>,
    /// Page size; omitted means "everything that remains"
    count: Option<u32>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SpotCollectionResponse {
    pub items: Vec<Spot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// List spots, one page at a time.
async fn list_spot(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<ListSpotQuery>, QueryRejection>,
) -> Result<Json<SpotCollectionResponse>> {
    let Query(params) = params?;
    let page = state
        .spot_service
        .list_spots(params.cursor.as_deref(), params.count)
        .await?;

    Ok(Json(SpotCollectionResponse {
        items: page.items,
        next_page_token: page.next_page_token,
    }))
}

async fn get_spot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Spot>> {
    let spot = state
        .spot_service
        .get_spot(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Spot {} does not exist", id)))?;
    Ok(Json(spot))
}

async fn insert_spot(
    State(state): State<Arc<AppState>>,
    spot: std::result::Result<Json<Spot>, JsonRejection>,
) -> Result<Json<Spot>> {
    let Json(spot) = spot?;
    Ok(Json(state.spot_service.insert_spot(spot).await?))
}

async fn update_spot(
    State(state): State<Arc<AppState>>,
    spot: std::result::Result<Json<Spot>, JsonRejection>,
) -> Result<Json<Spot>> {
    let Json(spot) = spot?;
    Ok(Json(state.spot_service.update_spot(spot).await?))
}

async fn remove_spot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.spot_service.remove_spot(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
