// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              sync / discover
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML + env, layered      |
//!              '--+---------------------+--'
//!                 |                     |
//!                 v                     v
//!              mirror                discover
//!        reconcile/executor        github / cgit
//!                 |                     |
//!                 v                     v
//!                git                   net
//!             git CLI             PageFetcher
//!
//!   +-----------------------------------------+
//!   |  foundation       error, logging        |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod discover;
pub mod error;
pub mod git;
pub mod logging;
pub mod mirror;
pub mod net;
