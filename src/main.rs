use clap::Parser as _;
use tracing::error;

use crate::models::{args::AppArgs, config::Config};
use crate::run::Run;
use crate::utils::logger::LoggerUtils;

mod archive;
mod install;
mod models;
mod resolver;
mod run;
mod utils;

fn main() {
    let args = AppArgs::parse();

    LoggerUtils::init();

    match Config::load(&args).and_then(|config| Run::new(config).execute()) {
        Ok(binary) => println!("{}", binary.display()),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
