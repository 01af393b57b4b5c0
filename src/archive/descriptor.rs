use std::path::PathBuf;

use semver::Version;

use crate::archive::platform::Platform;
use crate::utils::errors::{PhantomJsError, Result};

/// Archive format a phantomjs release shipped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveExtension {
    Zip,
    TarGz,
    TarBz2,
}

impl ArchiveExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
            Self::TarBz2 => "tar.bz2",
        }
    }
}

/// Describes which archive corresponds to a version+platform pair and where
/// the executable lives inside it. Pure value; building one performs no I/O
/// and the same inputs always yield the same descriptor.
///
/// Release layouts changed over time: linux builds moved from gzip
/// "-dynamic" tarballs to bzip2 tarballs in 1.6, and the windows zip gained
/// a bin/ directory in 2.0. Those switch points live here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhantomJsArchive {
    version: Version,
    platform: Platform,
    extension: ArchiveExtension,
    classifier: String,
}

fn linux_bzip2_since() -> Version {
    Version::new(1, 6, 0)
}

fn windows_bin_dir_since() -> Version {
    Version::new(2, 0, 0)
}

impl PhantomJsArchive {
    pub fn build(version: &str, platform: Platform) -> Result<Self> {
        let parsed =
            Version::parse(version).map_err(|source| PhantomJsError::InvalidVersion {
                version: version.to_string(),
                source,
            })?;

        let (extension, classifier) = match platform {
            Platform::Windows => (ArchiveExtension::Zip, "windows".to_string()),
            Platform::MacOsX => (ArchiveExtension::Zip, "macosx".to_string()),
            Platform::LinuxX86_64 | Platform::LinuxI686 => {
                let arch = match platform {
                    Platform::LinuxI686 => "i686",
                    _ => "x86_64",
                };
                if parsed >= linux_bzip2_since() {
                    (ArchiveExtension::TarBz2, format!("linux-{arch}"))
                } else {
                    (ArchiveExtension::TarGz, format!("linux-{arch}-dynamic"))
                }
            }
        };

        Ok(Self {
            version: parsed,
            platform,
            extension,
            classifier,
        })
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn extension(&self) -> ArchiveExtension {
        self.extension
    }

    /// `phantomjs-{version}-{classifier}`, the stem every release artifact
    /// name is derived from.
    fn stem(&self) -> String {
        format!("phantomjs-{}-{}", self.version, self.classifier)
    }

    /// Filename of the release archive, e.g.
    /// `phantomjs-1.9.2-linux-x86_64.tar.bz2`.
    pub fn archive_name(&self) -> String {
        format!("{}.{}", self.stem(), self.extension.as_str())
    }

    /// Relative path of the executable entry inside the archive.
    pub fn path_in_archive(&self) -> String {
        match self.platform {
            Platform::Windows if self.version < windows_bin_dir_since() => {
                format!("{}/phantomjs.exe", self.stem())
            }
            Platform::Windows => format!("{}/bin/phantomjs.exe", self.stem()),
            _ => format!("{}/bin/phantomjs", self.stem()),
        }
    }

    /// Where the installed binary lands under the output root. Keyed by
    /// version and classifier so installs never collide.
    pub fn extract_to_path(&self) -> PathBuf {
        PathBuf::from(self.stem())
            .join("bin")
            .join(self.platform.executable())
    }
}
