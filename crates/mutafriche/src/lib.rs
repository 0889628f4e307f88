//! Mutability evaluation core for derelict urban parcels.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod telemetry;

pub use error::AppError;
