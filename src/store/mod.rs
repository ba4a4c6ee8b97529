//! Metric stores
//!
//! A metric store is a flat string-keyed map holding one value per
//! `"<period>_<metric>"` key, the same shape the dashboard page keeps in
//! browser local storage.
//!
//! - **memory**: volatile store
//! - **file**: JSON file store
//! - **sample**: sample data loader and maintenance operations
//!
//! Reads never fail: a missing key, an unparseable or non-finite value, or
//! a backend failure all read as zero. Backend failures are logged.

pub mod error;
pub mod file;
pub mod memory;
pub mod sample;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use sample::{GrowthStat, PeriodValues, SampleData};

use crate::analytics::{MetricKey, MetricSample};

/// Common trait for all metric stores
pub trait MetricStore: Send + Sync {
    /// Raw string stored under `key`
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store a raw string under `key`
    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// All keys currently stored
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Pick up changes made to the backing storage by someone else
    fn reload(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Read the numeric value for `key`, defaulting to zero
    fn read(&self, key: MetricKey) -> f64 {
        let name = key.to_string();
        match self.get_raw(&name) {
            Ok(Some(raw)) => key.metric.parse_value(&raw).unwrap_or_else(|| {
                tracing::debug!("Unparseable value {:?} for {}, reading as 0", raw, name);
                0.0
            }),
            Ok(None) => 0.0,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", name, e);
                0.0
            }
        }
    }

    /// Read a full sample for `key`
    fn sample(&self, key: MetricKey) -> MetricSample {
        MetricSample::new(key.metric, key.period, self.read(key))
    }

    /// Store a numeric value for `key`
    fn write(&self, key: MetricKey, value: f64) -> StoreResult<()> {
        self.set_raw(&key.to_string(), &value.to_string())
    }
}

impl<S: MetricStore + ?Sized> MetricStore for std::sync::Arc<S> {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_raw(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }

    fn reload(&self) -> StoreResult<()> {
        (**self).reload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{Metric, Period};

    /// Store whose every operation fails
    struct BrokenStore;

    impl MetricStore for BrokenStore {
        fn get_raw(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Lock("broken".to_string()))
        }

        fn set_raw(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Lock("broken".to_string()))
        }

        fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Lock("broken".to_string()))
        }

        fn keys(&self) -> StoreResult<Vec<String>> {
            Err(StoreError::Lock("broken".to_string()))
        }
    }

    #[test]
    fn test_read_defaults_to_zero() {
        let store = MemoryStore::with_entries([
            ("thismonth_earnings", "185000.50"),
            ("thismonth_bookings", "eighty-nine"),
            ("thismonth_leads", "NaN"),
        ]);

        let key = |metric| MetricKey::new(Period::ThisMonth, metric);
        assert_eq!(store.read(key(Metric::Earnings)), 185_000.5);
        assert_eq!(store.read(key(Metric::Bookings)), 0.0);
        assert_eq!(store.read(key(Metric::Customers)), 0.0);
        assert_eq!(store.read(key(Metric::Leads)), 0.0);
    }

    #[test]
    fn test_read_takes_leading_number() {
        let store = MemoryStore::with_entries([
            ("thismonth_bookings", "89 bookings"),
            ("thismonth_earnings", "185000abc"),
            ("thismonth_leads", "1e3"),
            ("thismonth_customers", "  42.7"),
        ]);

        let key = |metric| MetricKey::new(Period::ThisMonth, metric);
        assert_eq!(store.read(key(Metric::Bookings)), 89.0);
        assert_eq!(store.read(key(Metric::Earnings)), 185_000.0);
        assert_eq!(store.read(key(Metric::Leads)), 1.0);
        assert_eq!(store.read(key(Metric::Customers)), 42.0);
    }

    #[test]
    fn test_read_from_failing_backend() {
        let key = MetricKey::new(Period::AllTime, Metric::Leads);
        assert_eq!(BrokenStore.read(key), 0.0);
        assert!(BrokenStore.write(key, 1.0).is_err());
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        let key = MetricKey::new(Period::LastMonth, Metric::Customers);
        store.write(key, 38.0).unwrap();

        assert_eq!(store.get_raw("lastmonth_customers").unwrap().as_deref(), Some("38"));
        assert_eq!(store.sample(key), MetricSample::new(Metric::Customers, Period::LastMonth, 38.0));
    }

    #[test]
    fn test_shared_store() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let key = MetricKey::new(Period::Current, Metric::Bookings);
        store.write(key, 7.0).unwrap();
        assert_eq!(std::sync::Arc::clone(&store).read(key), 7.0);
    }
}
