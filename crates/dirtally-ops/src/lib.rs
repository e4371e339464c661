//! Deletion backends and batch removal for dirtally.
//!
//! The core tree delegates every physical removal to a
//! [`Deleter`](dirtally_core::Deleter). This crate provides the backends used
//! in practice and a helper that removes several entries while collecting a
//! summary instead of stopping at the first failure.

mod batch;
mod deleter;

pub use batch::{remove_many, DeletionSummary, OperationError};
pub use deleter::{deleter_for, DeleteMethod, DryRunDeleter, FsDeleter, TrashDeleter};
