// src/lib.rs

//! Blog content API client library.
//!
//! Retrying transport, TTL response cache and payload normalization over the
//! blog worker's JSON endpoints.

pub mod api;
pub mod cache;
pub mod error;
pub mod models;
pub mod services;
pub mod transport;
pub mod utils;

pub use api::BlogClient;
pub use error::{AppError, Result};
