use std::env;
use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, info};
use which::which_in_global;

use crate::resolver::iface::{PhantomJsResolver, Resolution};
use crate::utils::command::ProcessRunner;
use crate::utils::errors::{PhantomJsError, Result};

const PHANTOMJS: &str = "phantomjs";
const VERSION_FLAG: &str = "-v";

/// Looks for an existing phantomjs install on the system search path.
///
/// Candidates are probed in path order with `phantomjs -v`; a candidate is
/// accepted when version enforcement is off or its reported version equals
/// the expected one exactly (literal string equality, no semantic compare).
/// A probe subprocess that fails to run or exits non-zero is a hard error,
/// not a miss.
pub struct SystemPathResolver {
    version: String,
    enforce_version: bool,
    search_path: Option<OsString>,
    runner: Box<dyn ProcessRunner>,
}

impl SystemPathResolver {
    pub fn new(version: String, enforce_version: bool, runner: Box<dyn ProcessRunner>) -> Self {
        Self {
            version,
            enforce_version,
            search_path: env::var_os("PATH"),
            runner,
        }
    }

    #[cfg(test)]
    fn with_search_path(mut self, path: OsString) -> Self {
        self.search_path = Some(path);
        self
    }

    fn probed_version(&self, binary: &Path) -> Result<String> {
        let output = self
            .runner
            .run(binary, &[VERSION_FLAG])
            .map_err(|e| PhantomJsError::probe(binary, &e))?;
        if output.status != 0 {
            return Err(PhantomJsError::probe(
                binary,
                format!("exited with status {}", output.status),
            ));
        }
        Ok(output.stdout.lines().next().unwrap_or("").trim().to_string())
    }
}

impl PhantomJsResolver for SystemPathResolver {
    fn resolve(&self) -> Result<Resolution> {
        let Some(search_path) = self.search_path.clone() else {
            return Ok(Resolution::NotFound);
        };
        let Ok(candidates) = which_in_global(PHANTOMJS, Some(search_path)) else {
            return Ok(Resolution::NotFound);
        };

        for binary in candidates {
            let reported = self.probed_version(&binary)?;
            if !self.enforce_version || self.version == reported {
                info!("Found phantomjs {} at {}", reported, binary.display());
                return Ok(Resolution::Found(binary));
            }
            debug!(
                "Skipping phantomjs {} at {}: expected {}",
                reported,
                binary.display(),
                self.version
            );
        }
        Ok(Resolution::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command::CommandOutput;
    use std::cell::Cell;
    use std::fs;
    use std::io;
    use std::rc::Rc;

    struct FakeRunner {
        stdout: String,
        status: i32,
        calls: Rc<Cell<usize>>,
    }

    impl ProcessRunner for FakeRunner {
        fn run(&self, _binary: &Path, _args: &[&str]) -> io::Result<CommandOutput> {
            self.calls.set(self.calls.get() + 1);
            Ok(CommandOutput {
                stdout: self.stdout.clone(),
                status: self.status,
            })
        }
    }

    #[cfg(unix)]
    fn dir_with_phantomjs() -> tempfile::TempDir {
        use std::os::unix::fs::PermissionsExt as _;
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("phantomjs");
        fs::write(&binary, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();
        dir
    }

    fn resolver(version: &str, enforce: bool, runner: FakeRunner) -> SystemPathResolver {
        SystemPathResolver {
            version: version.to_string(),
            enforce_version: enforce,
            search_path: None,
            runner: Box::new(runner),
        }
    }

    #[cfg(unix)]
    #[test]
    fn finds_binary_with_matching_version() {
        let dir = dir_with_phantomjs();
        let calls = Rc::new(Cell::new(0));
        let r = resolver(
            "1.9.2",
            true,
            FakeRunner {
                stdout: "1.9.2\n".to_string(),
                status: 0,
                calls: Rc::clone(&calls),
            },
        )
        .with_search_path(dir.path().as_os_str().to_os_string());

        let resolution = r.resolve().unwrap();
        assert_eq!(resolution, Resolution::Found(dir.path().join("phantomjs")));
        assert_eq!(calls.get(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn version_mismatch_with_enforcement_is_a_miss() {
        let dir = dir_with_phantomjs();
        let r = resolver(
            "1.9.2",
            true,
            FakeRunner {
                stdout: "2.1.1\n".to_string(),
                status: 0,
                calls: Rc::new(Cell::new(0)),
            },
        )
        .with_search_path(dir.path().as_os_str().to_os_string());

        assert_eq!(r.resolve().unwrap(), Resolution::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn version_mismatch_without_enforcement_is_accepted() {
        let dir = dir_with_phantomjs();
        let r = resolver(
            "1.9.2",
            false,
            FakeRunner {
                stdout: "2.1.1\n".to_string(),
                status: 0,
                calls: Rc::new(Cell::new(0)),
            },
        )
        .with_search_path(dir.path().as_os_str().to_os_string());

        assert_eq!(
            r.resolve().unwrap(),
            Resolution::Found(dir.path().join("phantomjs"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn enforcement_compares_literally_not_semantically() {
        let dir = dir_with_phantomjs();
        // "1.9.2" and "1.09.2" would be equal under numeric comparison
        let r = resolver(
            "1.9.2",
            true,
            FakeRunner {
                stdout: "1.09.2\n".to_string(),
                status: 0,
                calls: Rc::new(Cell::new(0)),
            },
        )
        .with_search_path(dir.path().as_os_str().to_os_string());

        assert_eq!(r.resolve().unwrap(), Resolution::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_during_probe_is_a_hard_error() {
        let dir = dir_with_phantomjs();
        let r = resolver(
            "1.9.2",
            true,
            FakeRunner {
                stdout: String::new(),
                status: 1,
                calls: Rc::new(Cell::new(0)),
            },
        )
        .with_search_path(dir.path().as_os_str().to_os_string());

        let err = r.resolve().unwrap_err();
        assert!(matches!(err, PhantomJsError::Probe { .. }));
    }

    #[test]
    fn path_without_phantomjs_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let r = resolver(
            "1.9.2",
            true,
            FakeRunner {
                stdout: String::new(),
                status: 0,
                calls: Rc::new(Cell::new(0)),
            },
        )
        .with_search_path(dir.path().as_os_str().to_os_string());

        assert_eq!(r.resolve().unwrap(), Resolution::NotFound);
    }
}
