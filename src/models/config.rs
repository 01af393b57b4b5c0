use std::path::{self, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use tracing::debug;

use crate::models::args::AppArgs;
use crate::utils::errors::{PhantomJsError, Result};

const CONFIG_FILE: &str = "phantomjs.yaml";
const DEFAULT_OUTPUT_DIR: &str = "target/phantomjs";

/// Resolved settings for one install run. Command-line arguments override
/// values from an optional phantomjs.yaml in the current directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub version: String,
    pub base_url: Option<String>,
    pub output_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub platform: Option<String>,
    pub check_system_path: bool,
    pub enforce_version: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
struct ConfigFile {
    version: Option<String>,
    base_url: Option<String>,
    output_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    platform: Option<String>,
    check_system_path: Option<bool>,
    enforce_version: Option<bool>,
}

impl Config {
    pub fn load(args: &AppArgs) -> Result<Self> {
        let file = Self::read_config_file()?;
        Self::merge(args, file)
    }

    fn read_config_file() -> Result<ConfigFile> {
        let config_path = env::current_dir()
            .map_err(|e| PhantomJsError::Config(format!("could not read current directory: {e}")))?
            .join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ConfigFile::default());
        }
        debug!("Loading config from {:?}", config_path);

        let content = fs::read_to_string(&config_path)
            .map_err(|e| PhantomJsError::Config(format!("could not read config file: {e}")))?;
        serde_yaml::from_str(&content)
            .map_err(|e| PhantomJsError::Config(format!("invalid config format: {e}")))
    }

    fn merge(args: &AppArgs, file: ConfigFile) -> Result<Self> {
        let version = args.version.clone().or(file.version).ok_or_else(|| {
            PhantomJsError::Config(
                "no phantomjs version given on the command line or in phantomjs.yaml".to_string(),
            )
        })?;

        let output_dir = args
            .output_dir
            .clone()
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        // Resolve to an absolute path up front; the resolved binary path is
        // handed to callers that may run from a different directory.
        let output_dir = path::absolute(&output_dir).map_err(|e| {
            PhantomJsError::Config(format!(
                "could not resolve output directory {}: {e}",
                output_dir.display()
            ))
        })?;

        let cache_dir = args
            .cache_dir
            .clone()
            .or(file.cache_dir)
            .unwrap_or_else(default_cache_dir);

        Ok(Self {
            version,
            base_url: args.base_url.clone().or(file.base_url),
            output_dir,
            cache_dir,
            platform: args.platform.clone().or(file.platform),
            check_system_path: args.check_system_path || file.check_system_path.unwrap_or(false),
            enforce_version: !args.no_enforce_version && file.enforce_version.unwrap_or(true),
        })
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("phantomjs")
}
