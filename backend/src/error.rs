//! Error taxonomy for the persistence layer.
//!
//! Storage failures are classified into the handful of cases callers act on:
//! a missing row, a constraint breach reported by the engine, or input that
//! was rejected before it reached the database. Everything else is passed
//! through as the original [`DbErr`].

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

use crate::recurrence::RecurrenceError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("integrity violation: {0}")]
    IntegrityViolation(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Error::IntegrityViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Error::IntegrityViolation(msg),
            _ if is_constraint_message(&err.to_string()) => {
                Error::IntegrityViolation(err.to_string())
            }
            _ => Error::Database(err),
        }
    }
}

// SQLite reports some constraint failures without an extended result code.
fn is_constraint_message(msg: &str) -> bool {
    msg.contains("UNIQUE constraint failed")
        || msg.contains("FOREIGN KEY constraint failed")
        || msg.contains("violates unique constraint")
        || msg.contains("violates foreign key constraint")
}

/// Input rejected before touching storage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} is not a number")]
    NotANumber { field: &'static str },

    #[error("window {start} - {end} is empty")]
    EmptyWindow { start: String, end: String },

    #[error("invalid recurrence rule: {0}")]
    Recurrence(#[from] RecurrenceError),
}

impl ValidationError {
    pub(crate) fn empty_window<T: ToString>(start: T, end: T) -> Self {
        ValidationError::EmptyWindow {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
