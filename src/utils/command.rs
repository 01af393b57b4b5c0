use std::io::{self, Read as _};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Captured output of a probe subprocess.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub status: i32,
}

/// Runs an external binary and captures its output. Behind a trait so tests
/// can substitute a fake runner without spawning real processes.
pub trait ProcessRunner {
    fn run(&self, binary: &Path, args: &[&str]) -> io::Result<CommandOutput>;
}

const PROBE_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, binary: &Path, args: &[&str]) -> io::Result<CommandOutput> {
        let mut child = Command::new(binary)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        // Bounded wait so a wedged binary cannot hang the build.
        let deadline = Instant::now() + PROBE_TIMEOUT;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                child.kill()?;
                child.wait()?;
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("{} did not exit within {:?}", binary.display(), PROBE_TIMEOUT),
                ));
            }
            thread::sleep(POLL_INTERVAL);
        };

        let mut stdout = String::new();
        if let Some(mut pipe) = child.stdout.take() {
            pipe.read_to_string(&mut stdout)?;
        }

        Ok(CommandOutput {
            stdout,
            status: status.code().unwrap_or(-1),
        })
    }
}
