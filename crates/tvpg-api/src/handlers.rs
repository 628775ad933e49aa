//! API handlers.

pub mod gallery;
pub mod health;
pub mod products;
pub mod settings;

pub use health::health;
