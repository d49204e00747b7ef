//! # Core Engine Module
//!
//! Shared configuration types used by the engine context and its scenes.

pub mod config;

pub use config::{Config, ConfigError, ConfigResult, CullingConfig, ProjectionConfig};
