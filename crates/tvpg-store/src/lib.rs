//! In-memory stores for gallery settings and per-product video metadata.

pub mod error;
pub mod products;
pub mod settings;

pub use error::{StoreError, StoreResult};
pub use products::{ProductVideo, ProductVideoStore, VariationVideo};
pub use settings::{SettingsPatch, SettingsSnapshot, SettingsStore};
