//! Command line handling for the `sysctl` binary.
//!
//! Switches are only recognised before the first variable, and `-w` ends
//! them too, so `sysctl -w -n=1` sets a parameter named `-n`.
//!
//! `-a`, `-p` and `-h` act immediately, ignoring anything after them.
use crate::{
    config::{Config, Display},
    error::SysctlError,
    param::Sysctl,
    util::PRELOAD_PATH,
};
use std::{
    io::prelude::*,
    path::{Path, PathBuf},
};
use tracing::debug;

/// What to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print usage and fail, complaining about the unrecognised switch if
    /// there is one.
    Usage(Option<String>),

    /// Print each variable
    Read(Vec<String>),

    /// Apply each `variable=value`
    Write(Vec<String>),

    /// Apply the settings in a file
    Preload(PathBuf),

    /// Print everything, `-a`, `-A` or `-X`.
    DisplayAll,
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub display: Display,
    pub action: Action,
}

impl Invocation {
    fn new(display: Display, action: Action) -> Self {
        Self { display, action }
    }

    /// Run, printing to `out` and `err`, and return the exit status.
    ///
    /// `program` is used in the usage text.
    ///
    /// The status is `0` on success, and otherwise the bitwise OR of the
    /// exit codes of every failure that counts, see [`SysctlError::code`].
    /// Failing to read a variable doesn't count, and neither does anything
    /// in a preload file.
    pub fn run<O: Write, E: Write>(self, program: &str, config: Config, out: O, err: E) -> i32 {
        let mut sysctl = Sysctl::new(config.with_display(self.display), out, err);
        debug!(action = ?self.action, display = ?self.display, "running");
        let mut rc = match self.action {
            Action::Usage(bad) => {
                if let Some(bad) = bad {
                    sysctl.report(&SysctlError::UnknownParameter(bad));
                }
                // Usage itself failing to print changes nothing
                let _ = sysctl.out().write_all(usage(program).as_bytes());
                -1
            }
            Action::Read(keys) => {
                for key in &keys {
                    let res = sysctl.read(key);
                    sysctl.status(res);
                }
                0
            }
            Action::Write(settings) => settings.iter().fold(0, |rc, setting| {
                let res = sysctl.write(setting);
                rc | sysctl.status(res)
            }),
            Action::Preload(path) => {
                sysctl.preload(path);
                0
            }
            Action::DisplayAll => sysctl.display_all(),
        };
        if let Err(e) = sysctl.flush() {
            rc |= sysctl.report(&e);
        }
        rc
    }
}

/// Parse the arguments, not including the program name.
///
/// Processing stops at the first empty argument.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Invocation {
    let mut display = Display::default();
    if args.is_empty() {
        return Invocation::new(display, Action::Usage(None));
    }
    let mut switches = true;
    let mut write = false;
    let mut vars = Vec::new();

    let mut args = args.iter().map(AsRef::<str>::as_ref);
    while let Some(arg) = args.next() {
        if arg.is_empty() {
            break;
        }
        if !(switches && arg.starts_with('-')) {
            switches = false;
            vars.push(arg.to_owned());
            continue;
        }
        // Only the first letter counts, `-nw` is `-n`
        let action = match arg[1..].chars().next() {
            // "binary" output, no names and no newlines
            Some('b') => {
                display.remove(Display::NAME | Display::NEWLINE);
                continue;
            }
            Some('n') => {
                display.remove(Display::NAME);
                continue;
            }
            Some('w') => {
                switches = false;
                write = true;
                continue;
            }
            Some('p') => {
                let file = args.next().filter(|f| !f.is_empty()).unwrap_or(PRELOAD_PATH);
                Action::Preload(file.into())
            }
            Some('a' | 'A' | 'X') => Action::DisplayAll,
            Some('h' | '?') => Action::Usage(None),
            _ => Action::Usage(Some(arg.to_owned())),
        };
        return Invocation::new(display, action);
    }

    let action = if write {
        Action::Write(vars)
    } else {
        Action::Read(vars)
    };
    Invocation::new(display, action)
}

/// Name to show in usage, the last component of `argv[0]`.
pub fn program_name(argv0: &str) -> &str {
    Path::new(argv0)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("sysctl")
}

/// Usage text
pub fn usage(program: &str) -> String {
    format!(
        "usage:  {0} [-n] variable ... \n\
         \x20       {0} [-n] -w variable=value ... \n\
         \x20       {0} [-n] -a \n\
         \x20       {0} [-n] -p <file>   (default {1}) \n\
         \x20       {0} [-n] -A\n",
        program, PRELOAD_PATH
    )
}
