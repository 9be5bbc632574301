pub mod config;
pub mod db;
pub mod directory;
pub mod entities;
pub mod error;
pub mod logging;
pub mod monitoring;
pub mod recurrence;
pub mod schedule;
pub mod seed;

pub use error::{Error, Result, ValidationError};
