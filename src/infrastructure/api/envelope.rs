//! Typed response envelopes
//!
//! The backend is not consistent about response shapes: a listing can
//! arrive as a bare array, as `{ "items": [...] }`, or as
//! `{ "data": [...] }` depending on the endpoint's vintage. Instead of
//! shape-sniffing at every call site, the tolerance lives here and the
//! rest of the client only ever sees plain collections.

use serde::Deserialize;

/// Collection response in any of the shapes the backend emits
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Items { items: Vec<T> },
    Data { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Items { items } | Self::Data { data: items } => items,
        }
    }
}

/// Single-object response, bare or wrapped in `{ "data": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemEnvelope<T> {
    Bare(T),
    Data { data: T },
}

impl<T> ItemEnvelope<T> {
    pub fn into_item(self) -> T {
        match self {
            Self::Bare(item) | Self::Data { data: item } => item,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
