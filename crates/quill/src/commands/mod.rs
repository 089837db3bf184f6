//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod summary;

pub(crate) use build::BuildArgs;
pub(crate) use summary::SummaryArgs;
