//! Model adapters and the generation gateway.
//!
//! Providers implement the shared [`traits::ModelAdapter`] and
//! [`traits::ModelLoader`] interfaces; [`gateway::GenerationGateway`] owns the
//! one model instance the service generates with.

#![warn(missing_docs, clippy::pedantic)]

pub mod gateway;
pub mod ollama;
pub mod traits;

mod http_client;

pub use gateway::GenerationGateway;
