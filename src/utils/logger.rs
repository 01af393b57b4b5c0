use tracing_subscriber::{EnvFilter, fmt};

pub struct LoggerUtils {}

impl LoggerUtils {
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::from_default_env() // Enables RUST_LOG=debug or crate=trace
                    .add_directive("info".parse().unwrap()), // Default level if not set
            )
            // stdout carries only the resolved binary path; logs go to stderr
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .compact() // Compact single-line format for CLI tools
            .init();
    }
}
