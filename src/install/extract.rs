use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::archive::descriptor::{ArchiveExtension, PhantomJsArchive};
use crate::utils::errors::{PhantomJsError, Result};

/// Copies the single phantomjs executable out of a release archive.
pub trait Extractor {
    fn extract(
        &self,
        archive_file: &Path,
        archive: &PhantomJsArchive,
        target: &Path,
    ) -> Result<()>;
}

pub struct ArchiveExtractor;

impl Extractor for ArchiveExtractor {
    fn extract(
        &self,
        archive_file: &Path,
        archive: &PhantomJsArchive,
        target: &Path,
    ) -> Result<()> {
        if target.exists() {
            debug!("phantomjs already extracted to {}", target.display());
            return Ok(());
        }

        let parent = target.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|source| PhantomJsError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;

        info!(
            "Extracting {} to {}",
            archive_file.display(),
            target.display()
        );

        // The executable is written to a temp file and only moved into place
        // after the copy succeeds, so a failed copy never leaves a partial
        // file marked executable.
        let mut staged =
            NamedTempFile::new_in(parent).map_err(|e| PhantomJsError::extraction(archive_file, &e))?;

        let entry = archive.path_in_archive();
        match archive.extension() {
            ArchiveExtension::Zip => {
                copy_zip_entry(archive_file, &entry, staged.as_file_mut())?
            }
            ArchiveExtension::TarGz => {
                let reader = GzDecoder::new(open(archive_file)?);
                copy_tar_entry(archive_file, reader, &entry, staged.as_file_mut())?
            }
            ArchiveExtension::TarBz2 => {
                let reader = BzDecoder::new(open(archive_file)?);
                copy_tar_entry(archive_file, reader, &entry, staged.as_file_mut())?
            }
        }

        set_executable(staged.path()).map_err(|e| PhantomJsError::extraction(archive_file, &e))?;
        staged
            .persist(target)
            .map_err(|e| PhantomJsError::extraction(archive_file, &e.error))?;
        Ok(())
    }
}

fn open(archive_file: &Path) -> Result<File> {
    File::open(archive_file).map_err(|e| PhantomJsError::extraction(archive_file, &e))
}

fn copy_zip_entry(archive_file: &Path, entry: &str, out: &mut File) -> Result<()> {
    let mut zip =
        zip::ZipArchive::new(open(archive_file)?).map_err(|e| PhantomJsError::extraction(archive_file, &e))?;
    let mut file = zip
        .by_name(entry)
        .map_err(|e| PhantomJsError::extraction(archive_file, format!("entry {entry}: {e}")))?;
    io::copy(&mut file, out).map_err(|e| PhantomJsError::extraction(archive_file, &e))?;
    Ok(())
}

fn copy_tar_entry<R: Read>(
    archive_file: &Path,
    reader: R,
    entry: &str,
    out: &mut File,
) -> Result<()> {
    let mut tar = tar::Archive::new(reader);
    let entries = tar
        .entries()
        .map_err(|e| PhantomJsError::extraction(archive_file, &e))?;

    for item in entries {
        let mut item = item.map_err(|e| PhantomJsError::extraction(archive_file, &e))?;
        let path = item
            .path()
            .map_err(|e| PhantomJsError::extraction(archive_file, &e))?;
        if path == Path::new(entry) {
            io::copy(&mut item, out).map_err(|e| PhantomJsError::extraction(archive_file, &e))?;
            return Ok(());
        }
    }

    Err(PhantomJsError::extraction(
        archive_file,
        format!("no entry named {entry}"),
    ))
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt as _;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::platform::Platform;
    use std::io::{Cursor, Write as _};
    use std::path::PathBuf;

    const PAYLOAD: &[u8] = b"#!/bin/sh\necho 1.9.2\n";

    fn write_zip(path: &Path, entry: &str) {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(entry, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(PAYLOAD).unwrap();
        let buf = writer.finish().unwrap().into_inner();
        fs::write(path, buf).unwrap();
    }

    fn write_tar<W: io::Write>(encoder: W, entry: &str) -> W {
        let mut builder = tar::Builder::new(encoder);
        let mut header = tar::Header::new_gnu();
        header.set_size(PAYLOAD.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, entry, PAYLOAD).unwrap();
        builder.into_inner().unwrap()
    }

    fn write_tar_gz(path: &Path, entry: &str) {
        let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        let buf = write_tar(encoder, entry).finish().unwrap();
        fs::write(path, buf).unwrap();
    }

    fn write_tar_bz2(path: &Path, entry: &str) {
        let encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        let buf = write_tar(encoder, entry).finish().unwrap();
        fs::write(path, buf).unwrap();
    }

    fn assert_extracted(target: &Path) {
        assert_eq!(fs::read(target).unwrap(), PAYLOAD);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            let mode = fs::metadata(target).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111, "executable bit not set");
        }
    }

    #[test]
    fn extracts_executable_from_zip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PhantomJsArchive::build("2.1.1", Platform::Windows).unwrap();
        let archive_file = dir.path().join(archive.archive_name());
        write_zip(&archive_file, &archive.path_in_archive());

        let target = dir.path().join("out").join("phantomjs.exe");
        ArchiveExtractor
            .extract(&archive_file, &archive, &target)
            .unwrap();
        assert_extracted(&target);
    }

    #[test]
    fn extracts_executable_from_tar_gz() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PhantomJsArchive::build("1.5.0", Platform::LinuxX86_64).unwrap();
        let archive_file = dir.path().join(archive.archive_name());
        write_tar_gz(&archive_file, &archive.path_in_archive());

        let target = dir.path().join("out").join("phantomjs");
        ArchiveExtractor
            .extract(&archive_file, &archive, &target)
            .unwrap();
        assert_extracted(&target);
    }

    #[test]
    fn extracts_executable_from_tar_bz2() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PhantomJsArchive::build("1.9.2", Platform::LinuxX86_64).unwrap();
        let archive_file = dir.path().join(archive.archive_name());
        write_tar_bz2(&archive_file, &archive.path_in_archive());

        let target = dir.path().join("out").join("phantomjs");
        ArchiveExtractor
            .extract(&archive_file, &archive, &target)
            .unwrap();
        assert_extracted(&target);
    }

    #[test]
    fn existing_target_skips_archive_access_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PhantomJsArchive::build("1.9.2", Platform::LinuxX86_64).unwrap();
        let target = dir.path().join("phantomjs");
        fs::write(&target, b"already installed").unwrap();

        // The archive path does not exist; opening it would fail.
        let missing = PathBuf::from("/no/such/archive.tar.bz2");
        ArchiveExtractor.extract(&missing, &archive, &target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"already installed");
    }

    #[test]
    fn missing_entry_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PhantomJsArchive::build("1.9.2", Platform::LinuxX86_64).unwrap();
        let archive_file = dir.path().join(archive.archive_name());
        write_tar_bz2(&archive_file, "some/other/file");

        let target = dir.path().join("out").join("phantomjs");
        let err = ArchiveExtractor
            .extract(&archive_file, &archive, &target)
            .unwrap_err();
        assert!(matches!(err, PhantomJsError::Extraction { .. }));
        assert!(!target.exists(), "failed extraction must not leave output");
    }

    #[test]
    fn unreadable_archive_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PhantomJsArchive::build("2.1.1", Platform::MacOsX).unwrap();
        let archive_file = dir.path().join(archive.archive_name());
        fs::write(&archive_file, b"this is not a zip").unwrap();

        let target = dir.path().join("out").join("phantomjs");
        let err = ArchiveExtractor
            .extract(&archive_file, &archive, &target)
            .unwrap_err();
        assert!(matches!(err, PhantomJsError::Extraction { .. }));
    }
}
