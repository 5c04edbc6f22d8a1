//! Shared test harness: mock provider backends and config builders

pub mod config;
pub mod mock;
