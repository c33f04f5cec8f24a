// ABOUTME: Main library entry point for the Spotter athlete discovery server
// ABOUTME: Wires configuration, logging, persistence, discovery and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Spotter Server
//!
//! Backend for a fitness-social application that matches athletes with
//! training partners nearby.
//!
//! ## Architecture
//!
//! - **Discovery**: the [`discovery::DiscoveryEngine`] selects a small,
//!   quota-gated batch of candidate athletes for a requester
//! - **Database**: `SQLite` persistence for athletes and their interactions,
//!   exposed to discovery through [`database::repositories::CandidateStore`]
//! - **Routes**: thin `axum` handlers over discovery and athlete profiles
//! - **Config / Logging**: environment-driven configuration and `tracing`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use spotter_server::config::environment::ServerConfig;
//! use spotter_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Spotter configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Application constants
pub mod constants;

/// Environment configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// Domain models re-exported from the core crate
pub mod models;

/// Persistence for athletes and interactions
pub mod database;

/// Candidate selection for athlete discovery
pub mod discovery;

/// Health checks
pub mod health;

/// Shared server state handed to route handlers
pub mod resources;

/// `HTTP` routes
pub mod routes;
