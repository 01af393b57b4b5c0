use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "phantomjs-install",
    about = "Locate or install a phantomjs binary for build pipelines.",
    long_about = r#"
Resolves a filesystem path to a phantomjs binary of the requested version
and prints it to stdout.

The system search path can optionally be checked first; when that misses,
the matching release archive is taken from the local cache (or downloaded)
and the executable is extracted into the output directory. Re-running for
an already installed version performs no downloads and no extraction.

Values may also come from a phantomjs.yaml file in the current directory;
command-line flags take precedence.
"#
)]
pub struct AppArgs {
    /// The version of phantomjs to install, e.g. 2.1.1
    pub version: Option<String>,

    /// The base url the phantomjs binary can be downloaded from
    #[arg(long)]
    pub base_url: Option<String>,

    /// The directory the phantomjs binary should be installed into
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Directory downloaded archives are kept in between runs
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Override platform detection (windows, macosx, linux-x86_64, linux-i686)
    #[arg(long)]
    pub platform: Option<String>,

    /// Check the system path for an existing phantomjs installation first
    #[arg(long)]
    pub check_system_path: bool,

    /// Accept a system phantomjs even if its version does not match
    #[arg(long)]
    pub no_enforce_version: bool,
}
