//! Settings storage layer

mod json_file;
mod memory;

use std::future::Future;

use crate::error::Result;
use crate::models::Settings;

pub use json_file::JsonFileSettingsStore;
pub use memory::MemorySettingsStore;

/// Whole-document settings storage.
///
/// `save` fully replaces what `load` returns; merging is the caller's job.
pub trait SettingsStore: Send + Sync {
    /// Load the current document. A store with nothing saved yet returns the
    /// empty document.
    fn load(&self) -> impl Future<Output = Result<Settings>> + Send;

    /// Replace the stored document.
    fn save(&self, settings: &Settings) -> impl Future<Output = Result<()>> + Send;
}
