use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::archive::descriptor::PhantomJsArchive;
use crate::install::download::Downloader;
use crate::utils::errors::{PhantomJsError, Result};

/// Local archive cache keyed by archive filename. Filenames embed version
/// and classifier, so a cached entry never goes stale for its key and there
/// is no eviction.
pub struct ArchiveCache {
    cache_dir: PathBuf,
}

impl ArchiveCache {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn path_for(&self, archive: &PhantomJsArchive) -> PathBuf {
        self.cache_dir.join(archive.archive_name())
    }

    /// Returns a local file for the archive, downloading only on a cache
    /// miss. A second call for an equal descriptor never touches the network.
    pub fn get_or_fetch(
        &self,
        archive: &PhantomJsArchive,
        downloader: &dyn Downloader,
    ) -> Result<PathBuf> {
        let path = self.path_for(archive);
        if path.exists() {
            debug!("Using cached archive at {}", path.display());
            return Ok(path);
        }

        fs::create_dir_all(&self.cache_dir).map_err(|source| PhantomJsError::CreateDirectory {
            path: self.cache_dir.clone(),
            source,
        })?;
        downloader.download(archive, &path)?;
        Ok(path)
    }
}
