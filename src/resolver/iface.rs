use std::path::PathBuf;

use crate::utils::errors::Result;

/// Outcome of a single resolution attempt. `NotFound` is a legitimate miss
/// that lets the next resolver in the chain run; a hard error aborts the
/// whole chain. The two are never conflated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(PathBuf),
    NotFound,
}

/// A strategy for locating a usable phantomjs binary.
pub trait PhantomJsResolver {
    fn resolve(&self) -> Result<Resolution>;
}
