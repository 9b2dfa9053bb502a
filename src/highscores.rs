//! High score tracking
//!
//! A single number, stored as a decimal string under a fixed key. Anything
//! missing or unreadable counts as zero.

use crate::persistence::{ScalarStore, StoreError};

/// Storage key for the high score
pub const STORAGE_KEY: &str = "geometryHighScore";

/// Best score seen on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    value: u64,
}

impl HighScore {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Read the stored high score; absent or garbage values read as zero
    pub fn load(store: &impl ScalarStore) -> Self {
        let raw = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("No high score stored, starting from 0");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read high score: {e}");
                return Self::default();
            }
        };

        // Older saves may hold a JSON float
        let value = raw
            .trim()
            .parse::<u64>()
            .ok()
            .or_else(|| {
                serde_json::from_str::<f64>(&raw)
                    .ok()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .map(|v| v as u64)
            });

        match value {
            Some(value) => {
                log::info!("Loaded high score {value}");
                Self { value }
            }
            None => {
                log::warn!("Ignoring unreadable high score {raw:?}");
                Self::default()
            }
        }
    }

    /// Whether `score` would set a new record
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.value
    }

    /// Record a finished run's score.
    ///
    /// Returns `Ok(true)` when the score beat the record. The in-memory value is
    /// updated even if persisting it fails.
    pub fn record(&mut self, score: u64, store: &mut impl ScalarStore) -> Result<bool, StoreError> {
        if !self.beaten_by(score) {
            return Ok(false);
        }
        self.value = score;
        store.set(STORAGE_KEY, &score.to_string())?;
        log::info!("New high score {score} saved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    struct BrokenStore;

    impl ScalarStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("test".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("test".into()))
        }
    }

    #[test]
    fn test_missing_reads_as_zero() {
        assert_eq!(HighScore::load(&MemoryStore::new()).value(), 0);
        assert_eq!(HighScore::load(&BrokenStore).value(), 0);
    }

    #[test]
    fn test_garbage_reads_as_zero() {
        let store = MemoryStore::with(STORAGE_KEY, "lots");
        assert_eq!(HighScore::load(&store).value(), 0);
        let store = MemoryStore::with(STORAGE_KEY, "-5");
        assert_eq!(HighScore::load(&store).value(), 0);
    }

    #[test]
    fn test_loads_integer_and_float() {
        assert_eq!(HighScore::load(&MemoryStore::with(STORAGE_KEY, "1500")).value(), 1500);
        assert_eq!(HighScore::load(&MemoryStore::with(STORAGE_KEY, " 77\n")).value(), 77);
        assert_eq!(HighScore::load(&MemoryStore::with(STORAGE_KEY, "312.0")).value(), 312);
    }

    #[test]
    fn test_failed_save_still_updates_memory() {
        let mut high = HighScore::new(10);
        assert!(high.record(20, &mut BrokenStore).is_err());
        assert_eq!(high.value(), 20);
    }

    proptest! {
        #[test]
        fn record_only_persists_improvements(stored in 0u64..100_000, score in 0u64..100_000) {
            let mut store = MemoryStore::with(STORAGE_KEY, &stored.to_string());
            let mut high = HighScore::load(&store);

            let improved = high.record(score, &mut store).unwrap();
            let persisted: u64 = store.get(STORAGE_KEY).unwrap().unwrap().parse().unwrap();

            if score > stored {
                prop_assert!(improved);
                prop_assert_eq!(persisted, score);
            } else {
                prop_assert!(!improved);
                prop_assert_eq!(persisted, stored);
            }
            prop_assert_eq!(high.value(), stored.max(score));
        }
    }
}
