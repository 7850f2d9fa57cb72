//! Device population sources

pub mod json;
pub mod synthetic;
