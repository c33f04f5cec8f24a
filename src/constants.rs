// ABOUTME: Application constants for discovery limits and configuration defaults
// ABOUTME: Environment variable names and their fallback values live here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Discovery limits
pub mod discovery {
    /// Maximum number of candidates returned by one discovery call.
    ///
    /// Discovery is a throttled feed, not a listing.
    pub const RESULT_LIMIT: usize = 2;

    /// Store radius predicates are expressed in meters
    pub const METERS_PER_KILOMETER: f64 = 1000.0;

    /// Longest accepted filter key
    pub const MAX_FILTER_KEY_LEN: usize = 64;
}

/// Environment variable names
pub mod env_config {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "SPOTTER_HTTP_PORT";
    /// Database connection URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Log output format (`pretty`, `compact`, `json`)
    pub const LOG_FORMAT: &str = "SPOTTER_LOG_FORMAT";
    /// Log level / directives
    pub const LOG_LEVEL: &str = "RUST_LOG";
    /// Likes granted to newly registered athletes
    pub const DEFAULT_LIKES: &str = "SPOTTER_DEFAULT_LIKES";
}

/// Configuration defaults
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/spotter.db";
    /// Default log directives
    pub const LOG_LEVEL: &str = "info";
    /// Likes granted at registration
    pub const REMAINING_LIKES: u32 = 10;
}

/// Service identity
pub mod service {
    /// Name reported by health checks
    pub const SERVICE_NAME: &str = "spotter-server";
}
