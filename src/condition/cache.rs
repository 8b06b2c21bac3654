//! Parsed-condition cache keyed by record text

use crate::condition::collection::CollectionCondition;
use crate::condition::value::RuntimeValue;
use crate::config::CacheConfig;
use crate::error::Result;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

/// Upper bound on the up-front allocation; `max_entries` only bounds inserts
const PREALLOCATED_ENTRIES: usize = 2048;

/// Cache of decoded conditions so repeated policy loads skip validation
pub struct ConditionCache {
    entries: RwLock<AHashMap<String, Arc<CollectionCondition>>>,
    max_entries: usize,
}

impl ConditionCache {
    pub fn new() -> Self {
        ConditionCache::with_config(&CacheConfig::default())
    }

    pub fn with_config(config: &CacheConfig) -> Self {
        ConditionCache {
            entries: RwLock::new(AHashMap::with_capacity(
                config.max_entries.min(PREALLOCATED_ENTRIES),
            )),
            max_entries: config.max_entries,
        }
    }

    /// Get or decode a condition record. Rejected records are never cached.
    pub fn get_or_parse(&self, text: &str) -> Result<Arc<CollectionCondition>> {
        // Fast path: check read lock first
        {
            let entries = self.entries.read();
            if let Some(condition) = entries.get(text) {
                trace!(kind = %condition.kind(), "condition cache hit");
                return Ok(Arc::clone(condition));
            }
        }

        let condition = match CollectionCondition::from_json_str(text) {
            Ok(condition) => Arc::new(condition),
            Err(err) => {
                debug!(error = %err, "rejected condition record");
                return Err(err);
            }
        };

        {
            let mut entries = self.entries.write();
            if entries.len() < self.max_entries || entries.contains_key(text) {
                entries.insert(text.to_string(), Arc::clone(&condition));
            } else {
                debug!(max_entries = self.max_entries, "condition cache full, not caching");
            }
        }

        Ok(condition)
    }

    /// Decode (or reuse) a condition record and evaluate it
    pub fn check<'a>(&self, text: &str, what: impl Into<RuntimeValue<'a>>) -> Result<bool> {
        let condition = self.get_or_parse(text)?;
        Ok(condition.is_satisfied(what))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl Default for ConditionCache {
    fn default() -> Self {
        ConditionCache::new()
    }
}

/// Process-wide condition cache
static CONDITION_CACHE: Lazy<ConditionCache> = Lazy::new(ConditionCache::new);

/// Get or decode a condition record using the global cache
#[inline]
pub fn get_or_parse(text: &str) -> Result<Arc<CollectionCondition>> {
    CONDITION_CACHE.get_or_parse(text)
}

/// Check a condition record against a runtime value using the global cache
#[inline]
pub fn check_condition<'a>(text: &str, what: impl Into<RuntimeValue<'a>>) -> Result<bool> {
    CONDITION_CACHE.check(text, what)
}

/// Clear the global cache
pub fn clear_cache() {
    CONDITION_CACHE.clear();
}

/// Number of records held by the global cache
pub fn cache_size() -> usize {
    CONDITION_CACHE.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ROLES: &str = r#"{"condition": "AnyIn", "value": ["admin", "owner"]}"#;

    #[test]
    fn test_cache_hit() {
        let cache = ConditionCache::new();

        // First call - cache miss
        let first = cache.get_or_parse(ROLES).unwrap();
        assert_eq!(cache.len(), 1);

        // Second call - cache hit returns the same instance
        let second = cache.get_or_parse(ROLES).unwrap();
        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_check() {
        let cache = ConditionCache::new();
        assert!(cache.check(ROLES, &json!(["viewer", "owner"])).unwrap());
        assert!(!cache.check(ROLES, &json!(["viewer"])).unwrap());
        assert!(!cache.check(ROLES, None::<&serde_json::Value>).unwrap());
    }

    #[test]
    fn test_errors_not_cached() {
        let cache = ConditionCache::new();
        let bad = r#"{"condition": "IsEmpty", "value": []}"#;
        assert!(cache.get_or_parse(bad).is_err());
        assert!(cache.get_or_parse(bad).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_max_entries() {
        let cache = ConditionCache::with_config(&CacheConfig { max_entries: 1 });
        cache.get_or_parse(ROLES).unwrap();
        let other = cache.get_or_parse(r#"{"condition": "IsNotEmpty"}"#).unwrap();
        assert_eq!(other.kind(), crate::condition::ConditionKind::IsNotEmpty);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_huge_max_entries_does_not_preallocate() {
        let text = format!(r#"{{"max_entries": {}}}"#, usize::MAX);
        let config: CacheConfig = serde_json::from_str(&text).unwrap();
        let cache = ConditionCache::with_config(&config);
        assert!(cache.is_empty());

        assert!(cache.check(ROLES, &json!(["admin"])).unwrap());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_global_cache() {
        let text = r#"{"condition": "IsIn", "value": ["global-cache-test"]}"#;
        assert!(check_condition(text, &json!("global-cache-test")).unwrap());
        assert!(get_or_parse(text).is_ok());
        assert!(check_condition("not json", &json!(1)).is_err());
    }
}
