//! Typed access to the persisted planning blobs.

use serde::Serialize;
use serde::de::DeserializeOwned;
use vulcplan_planning::{ProductionLedger, Vulcanizer};

use crate::store::{BlobStore, StoreError};

pub const VULCANIZER_DATA_KEY: &str = "vulcanizerData";
pub const PRODUCTION_DATA_KEY: &str = "productionData";
pub const MIN_CYCLES_REQUIRED_KEY: &str = "minCyclesRequired";

#[derive(Debug, Clone)]
pub struct PlanRepository<S> {
    store: S,
}

impl<S> PlanRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: BlobStore> PlanRepository<S> {
    pub fn load_vulcanizers(&self) -> Result<Option<Vec<Vulcanizer>>, StoreError> {
        self.load(VULCANIZER_DATA_KEY)
    }

    pub fn save_vulcanizers(&self, vulcanizers: &[Vulcanizer]) -> Result<(), StoreError> {
        self.save(VULCANIZER_DATA_KEY, vulcanizers)
    }

    pub fn load_production(&self) -> Result<Option<ProductionLedger>, StoreError> {
        self.load(PRODUCTION_DATA_KEY)
    }

    pub fn save_production(&self, ledger: &ProductionLedger) -> Result<(), StoreError> {
        self.save(PRODUCTION_DATA_KEY, ledger)
    }

    /// A stored 0 reads as absent.
    pub fn load_min_cycles(&self) -> Result<Option<u32>, StoreError> {
        Ok(self
            .load::<u32>(MIN_CYCLES_REQUIRED_KEY)?
            .filter(|cycles| *cycles > 0))
    }

    pub fn save_min_cycles(&self, cycles: u32) -> Result<(), StoreError> {
        self.save(MIN_CYCLES_REQUIRED_KEY, &cycles)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(value) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StoreError::Serde {
                key: key.to_string(),
                source,
            })
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, value)
    }
}
