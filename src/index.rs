// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The Index Store: an immutable, shareable snapshot of every document.
//!
//! Built once at publish time, serialized as a single JSON array, and loaded
//! whole by every query. Cloning is an `Arc` bump, so concurrent queries each
//! hold their own handle and never coordinate.
//!
//! Loading never fails from the query engine's point of view: a missing or
//! corrupt artifact is an empty index and the query simply has zero results.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{DocKind, SearchDoc};

#[derive(Debug, Clone, Default)]
pub struct IndexStore {
    docs: Arc<[SearchDoc]>,
}

impl IndexStore {
    pub fn new(docs: Vec<SearchDoc>) -> Self {
        Self { docs: docs.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn docs(&self) -> &[SearchDoc] {
        &self.docs
    }

    pub fn get(&self, idx: usize) -> Option<&SearchDoc> {
        self.docs.get(idx)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Number of documents of the given kind.
    pub fn count(&self, kind: DocKind) -> usize {
        self.docs.iter().filter(|d| d.kind() == kind).count()
    }

    /// Parse an artifact. The payload must be a JSON array; elements that do
    /// not decode as documents are skipped.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let raw: Vec<Value> = serde_json::from_str(json)?;
        let docs = raw
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match SearchDoc::from_value(value) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    tracing::debug!(position = i, error = %e, "skipping malformed index entry");
                    None
                }
            })
            .collect::<Vec<_>>();
        Ok(Self::new(docs))
    }

    /// Read and parse an index artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&raw).map_err(|e| Error::json(path, e))
    }

    /// Read an index artifact, degrading to an empty index on any failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(store) => {
                tracing::debug!(path = %path.display(), docs = store.len(), "index loaded");
                store
            }
            Err(e) => {
                tracing::warn!(error = %e, "search index unavailable; continuing with an empty index");
                Self::empty()
            }
        }
    }

    /// Parse an already-fetched payload, degrading to an empty index.
    pub fn parse_or_empty(json: &str) -> Self {
        Self::from_json_str(json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "search index payload invalid; continuing with an empty index");
            Self::empty()
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&*self.docs)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&*self.docs)?)
    }
}

impl From<Vec<SearchDoc>> for IndexStore {
    fn from(docs: Vec<SearchDoc>) -> Self {
        Self::new(docs)
    }
}
