// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   sync      manifest -> Reconciler -> GitExecutor
//!   discover  PageFetcher -> GitHub / cgit -> export_listing
//! ```

pub mod discover;
pub mod sync;
