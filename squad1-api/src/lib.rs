//! # Squad1 API Server Library
//!
//! HTTP surface of the Squad1 support demo: dataset lookups, tickets, the
//! manual tracker, the scripted assistant and the Nugget token relay.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Security headers
//! - `nugget`: Nugget auth API client
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod nugget;
pub mod routes;
