pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use error::{LiftlogError, Result};
pub use session::{SetField, SetResult, WorkoutSession};
