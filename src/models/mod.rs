// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod account;
pub mod spot;

pub use account::{Account, AccountForm, PUBLIC_USER};
pub use spot::Spot;
