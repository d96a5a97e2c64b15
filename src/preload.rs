//! Apply settings from a `sysctl.conf` style file.
//!
//! The format is one `name = value` per line. Blank lines, and lines
//! starting with `#` or `;`, are ignored.
//!
//! ```text
//! # Enable forwarding
//! net.ipv4.ip_forward = 1
//! ; also a comment
//! vm.swappiness=10
//! ```
use crate::{
    error::SysctlError,
    param::Sysctl,
    util::{strip, strip_leading},
};
use std::{
    fs::File,
    io::{prelude::*, BufReader},
    path::Path,
};
use tracing::{debug, trace};

// Public
impl<O: Write, E: Write> Sysctl<O, E> {
    /// Apply every setting in the file at `path`.
    ///
    /// Failing settings and invalid lines are reported, and don't stop the
    /// rest of the file from being applied.
    ///
    /// Returns the bitwise OR of the exit codes of every setting, ORed with
    /// `-1` if the file couldn't be opened or read.
    pub fn preload<P: AsRef<Path>>(&mut self, path: P) -> i32 {
        let path = path.as_ref();
        match File::open(path) {
            Ok(f) => self.preload_from(&path.display().to_string(), BufReader::new(f)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "couldn't open preload file");
                self.report(&SysctlError::PreloadFile(path.display().to_string()))
            }
        }
    }

    /// Apply every setting read from `source`.
    ///
    /// `name` identifies `source` in warnings.
    ///
    /// See [`Sysctl::preload`]
    pub fn preload_from<R: BufRead>(&mut self, name: &str, mut source: R) -> i32 {
        let mut rc = 0;
        let mut buf = Vec::new();
        let mut n = 0;
        loop {
            buf.clear();
            match source.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => n += 1,
                Err(e) => {
                    let err = SysctlError::PreloadRead {
                        file: name.into(),
                        source: e,
                    };
                    rc |= self.report(&err);
                    break;
                }
            }
            let line = String::from_utf8_lossy(&buf);
            match parse_line(&line) {
                Line::Skip => continue,
                Line::Invalid => {
                    let warning = SysctlError::BadPreloadLine {
                        file: name.into(),
                        line: n,
                    };
                    self.report(&warning);
                }
                Line::Setting(key, value) => {
                    trace!(file = name, line = n, key, value, "preloading");
                    let res = self.write(&format!("{}={}", key, value));
                    rc |= self.status(res);
                }
            }
        }
        rc
    }
}

/// A single line of a preload file
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// Blank, too short, or a comment
    Skip,

    /// Not `name = value`
    Invalid,

    Setting(&'a str, &'a str),
}

fn parse_line(line: &str) -> Line<'_> {
    let line = strip(line);
    if line.len() < 2 || line.starts_with(['#', ';']) {
        return Line::Skip;
    }
    let (name, value) = match line.split_once('=') {
        Some(nv) => nv,
        None => return Line::Invalid,
    };
    let (name, value) = (strip(name), strip_leading(value));
    if name.is_empty() || value.is_empty() {
        return Line::Invalid;
    }
    Line::Setting(name, value)
}
