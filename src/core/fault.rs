//! Fault isolation for composite queries.
//!
//! A summary is assembled from several independent reads. Each read is run
//! through [`attempt`], so one failing tool shows up as an `{"error": ...}`
//! entry in its slot instead of failing the whole response.

use std::fmt::Display;

use log::warn;
use serde::Serialize;

/// Either the value of a sub-query or the reason it failed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Ok(T),
    Failed { error: String },
}

impl<T> Outcome<T> {
    pub fn failed<S: Into<String>>(error: S) -> Self {
        Outcome::Failed {
            error: error.into(),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Failed { error } => Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Run `f`, turning an error into `Failed { error: "<context>: <err>" }`.
pub fn attempt<T, E, F>(context: &str, f: F) -> Outcome<T>
where
    E: Display,
    F: FnOnce() -> std::result::Result<T, E>,
{
    match f() {
        Ok(value) => Outcome::Ok(value),
        Err(e) => {
            warn!("{}: {}", context, e);
            Outcome::failed(format!("{}: {}", context, e))
        }
    }
}
