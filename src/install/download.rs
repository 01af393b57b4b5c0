use std::io;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use tempfile::NamedTempFile;
use tracing::info;

use crate::archive::descriptor::PhantomJsArchive;
use crate::utils::errors::{PhantomJsError, Result};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Fetches a phantomjs release archive into a local file.
pub trait Downloader {
    fn download(&self, archive: &PhantomJsArchive, target: &Path) -> Result<()>;
}

/// Blocking HTTP downloader against a resolved base URL.
pub struct WebDownloader {
    client: Client,
    base_url: String,
}

impl WebDownloader {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self { client, base_url }
    }

    fn display_loader(msg: String) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠸", "⠴", "⠦", "⠇", "✔"]),
        );
        spinner.set_message(msg);
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}

impl Downloader for WebDownloader {
    fn download(&self, archive: &PhantomJsArchive, target: &Path) -> Result<()> {
        let url = format!("{}{}", self.base_url, archive.archive_name());
        info!("Downloading phantomjs binaries from {url}");

        let spinner = Self::display_loader(format!("Downloading {}", archive.archive_name()));

        let mut response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| PhantomJsError::download(&url, &e))?;

        if !response.status().is_success() {
            spinner.finish_and_clear();
            return Err(PhantomJsError::download(
                &url,
                format!("server returned {}", response.status()),
            ));
        }

        // Stream into a temp file next to the target and move it into place
        // once complete, so a failed transfer never leaves a partial archive.
        let parent = target.parent().unwrap_or_else(|| Path::new("."));
        let mut file = NamedTempFile::new_in(parent).map_err(|e| PhantomJsError::download(&url, &e))?;

        let bytes = io::copy(&mut response, file.as_file_mut())
            .map_err(|e| PhantomJsError::download(&url, &e))?;
        spinner.finish_and_clear();

        if bytes == 0 {
            return Err(PhantomJsError::download(&url, "empty response"));
        }

        file.persist(target)
            .map_err(|e| PhantomJsError::download(&url, &e.error))?;
        Ok(())
    }
}
