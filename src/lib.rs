//! fittrack - a workout log with daily, category and recency statistics
//!
//! This crate provides a workout store over swappable key-value storage,
//! an aggregation engine over workout records, and the `fittrack` CLI.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod session;
pub mod stats;
pub mod storage;
pub mod workouts;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FitError;
pub use session::{Session, UserProfile};
pub use stats::Calendar;
pub use workouts::{NewWorkout, WorkoutPatch, WorkoutRecord, WorkoutStore};
