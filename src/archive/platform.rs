use std::fmt;
use std::str::FromStr;

use crate::utils::errors::PhantomJsError;

/// OS/architecture pairs phantomjs published archives for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOsX,
    LinuxX86_64,
    LinuxI686,
}

impl Platform {
    /// Detects the platform of the running process, or `None` when no
    /// archive layout is known for it.
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Self::Windows)
        } else if cfg!(target_os = "macos") {
            Some(Self::MacOsX)
        } else if cfg!(target_os = "linux") {
            if cfg!(target_pointer_width = "64") {
                Some(Self::LinuxX86_64)
            } else {
                Some(Self::LinuxI686)
            }
        } else {
            None
        }
    }

    /// Name of the phantomjs executable on this platform.
    pub fn executable(&self) -> &'static str {
        match self {
            Self::Windows => "phantomjs.exe",
            _ => "phantomjs",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOsX => "macosx",
            Self::LinuxX86_64 => "linux-x86_64",
            Self::LinuxI686 => "linux-i686",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PhantomJsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win" => Ok(Self::Windows),
            "macosx" | "macos" | "mac" => Ok(Self::MacOsX),
            "linux-x86_64" | "linux" => Ok(Self::LinuxX86_64),
            "linux-i686" => Ok(Self::LinuxI686),
            other => Err(PhantomJsError::UnsupportedPlatform(other.to_string())),
        }
    }
}
