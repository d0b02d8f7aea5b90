//! REST client for the network backend

pub mod client;
pub mod dto;
pub mod envelope;

pub use client::ApiClient;
pub use envelope::{ItemEnvelope, ListEnvelope};
