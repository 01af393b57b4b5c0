use std::path::PathBuf;

use crate::resolver::iface::{PhantomJsResolver, Resolution};
use crate::utils::errors::{PhantomJsError, Result};

/// Runs resolvers in order and returns the first hit. A miss falls through
/// to the next resolver; a hard failure stops the chain immediately. Only
/// when every resolver misses does the resolution as a whole fail.
pub struct CompositeResolver {
    version: String,
    resolvers: Vec<Box<dyn PhantomJsResolver>>,
}

impl CompositeResolver {
    pub fn new(version: String, resolvers: Vec<Box<dyn PhantomJsResolver>>) -> Self {
        Self { version, resolvers }
    }

    pub fn resolve(&self) -> Result<PathBuf> {
        for resolver in &self.resolvers {
            match resolver.resolve()? {
                Resolution::Found(path) => return Ok(path),
                Resolution::NotFound => continue,
            }
        }
        Err(PhantomJsError::NotFound {
            version: self.version.clone(),
        })
    }
}
