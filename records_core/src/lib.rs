//! Records Core
//!
//! File-backed stores for the academic records service:
//! - Entity stores for students, careers and categories (one JSON file each)
//! - Integrity checks that block deleting referenced careers and categories
//! - A registry owning the stores for one data directory

pub mod atomic;
pub mod error;
pub mod integrity;
pub mod registry;
pub mod store;
pub mod types;

pub use error::{RecordsError, RecordsResult, StoreError};
pub use registry::Registry;
pub use store::EntityStore;
pub use types::*;

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert_eq!(get_version(), "0.1.0");
    }
}
