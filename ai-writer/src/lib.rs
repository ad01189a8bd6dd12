//! HTTP surface of the AI Writer service.
//!
//! [`router`] exposes content generation, health and model introspection,
//! content-type discovery, and custom-template acknowledgment over JSON. All
//! handlers share one [`AppContext`], built once at startup.

#![warn(missing_docs, clippy::pedantic)]

mod context;
pub mod dto;
mod error;
mod routes;

pub use context::AppContext;
pub use error::ApiError;
pub use routes::{ENDPOINTS, Endpoint, router};
