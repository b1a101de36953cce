// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Identifiers for objects added to a canvas.
//!
//! Each `ObjectId` comes from a global atomic counter and is never reused
//! within a process, so a removed group leaves no id a later object could
//! answer to.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a canvas object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObjectId(u64);

static OBJECT_COUNTER: AtomicU64 = AtomicU64::new(1);

impl ObjectId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        Self(OBJECT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let a = ObjectId::next();
        let b = ObjectId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }
}
