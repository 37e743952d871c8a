//! Infrastructure layer: storage, configuration, seed data, and command dispatch.

pub mod config;
pub mod planner;
pub mod repository;
pub mod seed;
pub mod store;

pub use config::{ConfigError, PlannerConfig};
pub use planner::{DispatchError, Planner, PlannerMessage};
pub use repository::PlanRepository;
pub use store::{BlobStore, InMemoryBlobStore, JsonFileStore, StoreError};
