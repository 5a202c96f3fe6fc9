//! Data module - CSV order loading

mod loader;

pub use loader::{DataLoader, LoaderError};
