//! Data models for freight orders and pipeline configuration.

pub mod config;
pub mod order;
