pub mod assets;
pub mod core;
pub mod errors;
pub mod ingest;
pub mod output;
pub mod schema;
pub mod store;

pub use crate::assets::{asset_valuation, borefield_for, directory_name, AssetRecord};
pub use crate::core::aggregate::SystemMetrics;
pub use crate::core::efficiency::BuildingEfficiency;
pub use crate::core::transform::{
    BuildingSnapshot, HourSnapshot, MissingFieldPolicy, SystemPerformance,
};
pub use crate::core::units::TemperaturePair;
pub use crate::errors::DataLoadError;
pub use crate::schema::{BuildingId, BuildingSchema};
pub use crate::store::{
    BuildingKind, BuildingNetworkEntry, HourlyDataset, LoadOptions, Session, TimeSeriesPoint,
};
