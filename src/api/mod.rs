//! HTTP API surface

pub mod cves;
pub mod error;
pub mod health;
pub mod openapi;
