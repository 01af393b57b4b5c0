use std::path::PathBuf;
use std::str::FromStr as _;

use tracing::info;

use crate::archive::descriptor::PhantomJsArchive;
use crate::archive::endpoint;
use crate::archive::platform::Platform;
use crate::install::cache::ArchiveCache;
use crate::install::download::WebDownloader;
use crate::install::extract::ArchiveExtractor;
use crate::models::config::Config;
use crate::resolver::composite::CompositeResolver;
use crate::resolver::iface::PhantomJsResolver;
use crate::resolver::system_path::SystemPathResolver;
use crate::resolver::web::WebResolver;
use crate::utils::command::SystemProcessRunner;
use crate::utils::errors::{PhantomJsError, Result};

/// Wires the configured resolvers into a chain and runs it: system-path
/// probe first when enabled, then the archive install strategy.
pub struct Run {
    config: Config,
}

impl Run {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PathBuf> {
        let resolver = self.build_resolver()?;
        let binary = resolver.resolve()?;
        info!(
            "Resolved phantomjs {} to {}",
            self.config.version,
            binary.display()
        );
        Ok(binary)
    }

    fn build_resolver(&self) -> Result<CompositeResolver> {
        let platform = match &self.config.platform {
            Some(name) => Platform::from_str(name)?,
            None => Platform::detect().ok_or_else(|| {
                PhantomJsError::UnsupportedPlatform(std::env::consts::OS.to_string())
            })?,
        };
        let archive = PhantomJsArchive::build(&self.config.version, platform)?;

        let mut resolvers: Vec<Box<dyn PhantomJsResolver>> = Vec::new();
        if self.config.check_system_path {
            resolvers.push(Box::new(SystemPathResolver::new(
                self.config.version.clone(),
                self.config.enforce_version,
                Box::new(SystemProcessRunner),
            )));
        }

        let base_url = endpoint::base_url(archive.version(), self.config.base_url.as_deref());
        resolvers.push(Box::new(WebResolver::new(
            archive,
            self.config.output_dir.clone(),
            ArchiveCache::new(self.config.cache_dir.clone()),
            Box::new(WebDownloader::new(base_url)),
            Box::new(ArchiveExtractor),
        )));

        Ok(CompositeResolver::new(
            self.config.version.clone(),
            resolvers,
        ))
    }
}
