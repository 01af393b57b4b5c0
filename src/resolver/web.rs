use std::path::PathBuf;

use tracing::debug;

use crate::archive::descriptor::PhantomJsArchive;
use crate::install::cache::ArchiveCache;
use crate::install::download::Downloader;
use crate::install::extract::Extractor;
use crate::resolver::iface::{PhantomJsResolver, Resolution};
use crate::utils::errors::Result;

/// Installs phantomjs from a release archive: cache lookup, download on a
/// miss, then extraction of the executable into the output directory. A
/// binary that is already installed makes the whole resolve a no-op.
pub struct WebResolver {
    archive: PhantomJsArchive,
    output_dir: PathBuf,
    cache: ArchiveCache,
    downloader: Box<dyn Downloader>,
    extractor: Box<dyn Extractor>,
}

impl WebResolver {
    pub fn new(
        archive: PhantomJsArchive,
        output_dir: PathBuf,
        cache: ArchiveCache,
        downloader: Box<dyn Downloader>,
        extractor: Box<dyn Extractor>,
    ) -> Self {
        Self {
            archive,
            output_dir,
            cache,
            downloader,
            extractor,
        }
    }
}

impl PhantomJsResolver for WebResolver {
    fn resolve(&self) -> Result<Resolution> {
        let extract_to = self.output_dir.join(self.archive.extract_to_path());

        if extract_to.exists() {
            debug!("phantomjs already installed at {}", extract_to.display());
            return Ok(Resolution::Found(extract_to));
        }

        let archive_file = self
            .cache
            .get_or_fetch(&self.archive, self.downloader.as_ref())?;
        self.extractor
            .extract(&archive_file, &self.archive, &extract_to)?;
        Ok(Resolution::Found(extract_to))
    }
}
