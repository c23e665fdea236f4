pub mod errors;
pub mod serde_utils;
