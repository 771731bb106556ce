//! Configuration files read by `tplc`

pub mod context;

pub use context::ContextDescriptor;
