//! `sysctl`, read and write kernel parameters.
//!
//! ```text
//! sysctl [-n] variable ...
//! sysctl [-n] -w variable=value ...
//! sysctl [-n] -a
//! sysctl [-n] -p <file>
//! ```
use linsysctl::{
    cli::{parse_args, program_name},
    util::LOG_ENV,
    Config,
};
use std::{env, io, process};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Values go to stdout, so logs go to stderr
    fmt()
        .with_env_filter(EnvFilter::from_env(LOG_ENV))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let args: Vec<String> = env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let program = program_name(args.first().map_or("sysctl", String::as_str));
    let invocation = parse_args(args.get(1..).unwrap_or_default());

    let status = invocation.run(
        program,
        Config::from_env(),
        io::stdout().lock(),
        io::stderr().lock(),
    );
    process::exit(status);
}
