// Adapters layer: concrete implementations of the domain ports.

pub mod local_store;
pub mod reference_files;

pub use local_store::LocalSnapshotStore;
pub use reference_files::{BundledReference, FileReference};
