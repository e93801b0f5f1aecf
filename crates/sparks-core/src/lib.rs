//! Core types and logic for the Solo Sparks personal-growth backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod analytics;
pub mod catalog;
pub mod error;
pub mod media;
pub mod mood;
pub mod progress;
pub mod quest;
pub mod reward;
pub mod rng;
pub mod select;
pub mod store;
pub mod user;

pub use error::{Error, Result};
