// SPDX-FileCopyrightText: 2026 SwarmDirector Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded TTL cache of language-model classifications.
//!
//! Keyed by the SHA-256 of the normalized task text, so whitespace and case
//! differences share one entry.

use std::time::Duration;

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tokio::time::Instant;

use crate::escalation::ValidatedVerdict;
use crate::profile::normalize;

#[derive(Debug, Clone)]
struct Entry {
    verdict: ValidatedVerdict,
    inserted: Instant,
}

/// Concurrent classification cache with a TTL and an entry bound.
#[derive(Debug)]
pub struct ClassificationCache {
    entries: DashMap<String, Entry>,
    ttl: Duration,
    max_entries: usize,
}

impl ClassificationCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Hex SHA-256 of the normalized text.
    pub fn key_for(text: &str) -> String {
        hex::encode(Sha256::digest(normalize(text).as_bytes()))
    }

    /// Look up a live entry. An expired entry is removed and reported as a miss.
    pub fn get(&self, text: &str) -> Option<ValidatedVerdict> {
        let key = Self::key_for(text);
        let entry = self.entries.get(&key).map(|e| e.value().clone())?;
        if entry.inserted.elapsed() >= self.ttl {
            self.entries
                .remove_if(&key, |_, e| e.inserted.elapsed() >= self.ttl);
            return None;
        }
        Some(entry.verdict)
    }

    /// Store a verdict, making room first when the cache is full.
    pub fn insert(&self, text: &str, verdict: ValidatedVerdict) {
        let key = Self::key_for(text);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.purge_expired();
            if self.entries.len() >= self.max_entries {
                self.evict_oldest();
            }
        }
        self.entries.insert(
            key,
            Entry {
                verdict,
                inserted: Instant::now(),
            },
        );
    }

    /// Drop every entry whose TTL has passed.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, e| e.inserted.elapsed() < ttl);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|e| e.value().inserted)
            .map(|e| e.key().clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}
