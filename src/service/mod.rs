pub mod nvd;

pub use nvd::NvdClient;
