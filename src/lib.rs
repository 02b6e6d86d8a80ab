// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Spotcheck: share and discover spots
//!
//! This crate provides the backend API for account registration and
//! authentication and for storing shared location ("spot") records.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::DocumentStore;
use services::{AccountService, SpotService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub account_service: AccountService,
    pub spot_service: SpotService,
}

impl AppState {
    /// Wire both services to one store.
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            account_service: AccountService::new(store.clone()),
            spot_service: SpotService::new(store.clone()),
            config,
            store,
        }
    }
}
