// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Compiled-in settings for the registration form.

use std::time::Duration;

/// Endpoint that receives registration JSON.
pub const DEFAULT_ENDPOINT: &str = "https://excelbacknd.onrender.com/api/key";

/// Runtime settings handed to the app at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormConfig {
    /// Registration endpoint URL.
    pub endpoint: String,
    /// Pause between a successful submission and the form reset.
    pub reset_delay: Duration,
    /// Background worker threads for file reads and network calls.
    pub workers: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            reset_delay: Duration::from_secs(2),
            workers: std::thread::available_parallelism()
                .map(|n| n.get().clamp(2, 4))
                .unwrap_or(2),
        }
    }
}
