// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod account;
pub mod password;
pub mod spot;

pub use account::AccountService;
pub use spot::{SpotPage, SpotService};
