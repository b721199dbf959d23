//! Plan loading: the snapshot port and its JSON adapter

pub mod snapshot;

pub use snapshot::{load_catalog, JsonSnapshotSource, PlanSource};
