//! Identifier generation for exported animation names.
//!
//! Resolvers draw one name at construction from an [`IdGenerator`]. The default
//! is a process-wide [`SequentialIds`] (see [`global`]); tests that need stable
//! names call [`SequentialIds::reset`] or inject their own generator.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Monotonic `<prefix><n>` names.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }

    /// Restart numbering at 0.
    #[inline]
    pub fn reset(&self) {
        self.next.store(0, Ordering::Relaxed);
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

/// Random `<prefix><uuid>` names, unique across processes.
#[derive(Debug, Clone)]
pub struct UuidIds {
    prefix: String,
}

impl UuidIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        format!("{}{}", self.prefix, Uuid::new_v4().simple())
    }
}

static GLOBAL_IDS: Lazy<SequentialIds> = Lazy::new(|| SequentialIds::new("frameline-"));

/// Process-wide default generator, created on first use.
pub fn global() -> &'static SequentialIds {
    &GLOBAL_IDS
}
