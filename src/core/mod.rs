pub mod config;
pub mod debt;
pub mod error;
pub mod rate;
pub mod schedule;
