use crate::CLAP_STYLING;
use clap::{ArgAction, arg};

pub const DEFAULT_CONF_DIR: &str = "../conf";
pub const DEFAULT_LOG_DIR: &str = "../log";

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("minispider")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("minispider")
        .about("Crawl seed pages breadth-first and save the ones matching a target pattern")
        .styles(CLAP_STYLING)
        .disable_version_flag(true)
        .arg(
            arg!(-c --"conf" <DIR>)
                .required(false)
                .help("Directory holding spider.conf")
                .default_value(DEFAULT_CONF_DIR),
        )
        .arg(
            arg!(-l --"log" <DIR>)
                .required(false)
                .help("Directory for minispider.log")
                .default_value(DEFAULT_LOG_DIR),
        )
        .arg(
            arg!(-s --"stdout")
                .required(false)
                .help("Also write log lines to stdout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-d --"debug")
                .required(false)
                .help("Log at debug level")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-v --"version")
                .required(false)
                .help("Print version")
                .action(ArgAction::Version),
        )
}
