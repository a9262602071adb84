pub mod config;
pub mod nvd;

pub use config::Config;
pub use nvd::{CveRecord, NvdResponse};
