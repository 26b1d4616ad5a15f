//! Token identifier capability

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of unique token identifiers
///
/// Every call must return an identifier never returned before for the
/// lifetime of the signing configuration.
pub trait TokenIdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random UUID v4 identifiers (122 random bits)
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenIds;

impl TokenIdSource for RandomTokenIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic identifiers `{prefix}-0`, `{prefix}-1`, ...
#[derive(Debug)]
pub struct SequentialTokenIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialTokenIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl TokenIdSource for SequentialTokenIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_are_uuid_v4() {
        let id = RandomTokenIds.next_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(id, RandomTokenIds.next_id());
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialTokenIds::new("tid");
        assert_eq!(ids.next_id(), "tid-0");
        assert_eq!(ids.next_id(), "tid-1");
        assert_eq!(ids.next_id(), "tid-2");
    }
}
