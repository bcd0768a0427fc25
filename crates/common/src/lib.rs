// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 sishc-admin Contributors

// sishc admin panel - Common Library
// Configuration model, file store, merge logic, and log utilities

pub mod ansi;
pub mod config;
pub mod error;
pub mod merge;
pub mod store;

pub use ansi::strip_ansi_codes;
pub use config::{ConfigValue, GlobalConfig, Tunnel, TunnelField};
pub use error::{Error, Result};
pub use merge::{collapse_to_defaults, resolve_defaults, TunnelForm};
pub use store::{ConfigStore, CONFIG_FILE_ENV, LOG_FILE_ENV};
