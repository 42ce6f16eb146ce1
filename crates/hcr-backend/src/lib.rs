pub mod client;
pub mod error;
pub mod geocode;
pub mod storage;

pub use client::{BackendClient, ServiceType};
pub use error::BackendError;
pub use geocode::GeocodeClient;
