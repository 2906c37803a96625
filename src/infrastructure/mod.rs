//! Infrastructure layer - Adapters and persistence

pub mod adapters;
pub mod config;
pub mod watermark;
