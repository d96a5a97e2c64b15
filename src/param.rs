//! Reading and writing single kernel parameters.
//!
//! # Examples
//!
//! Read `kernel.ostype`
//!
//! ```rust,no_run
//! # use linsysctl::{Config, Sysctl};
//! # use std::io;
//! let mut sysctl = Sysctl::new(Config::default(), io::stdout(), io::stderr());
//! sysctl.read("kernel.ostype").unwrap();
//! ```
//!
//! # Implementation
//!
//! Every parameter is a file under [`Config::root`], and every access is a
//! single open, read or write, and close. The kernel either applies a write
//! or rejects it, there is nothing to recover here.
use crate::{
    config::{Config, Display},
    error::{Operation, Result, SysctlError},
    key::{key_to_path, path_to_key},
};
use std::{
    fs::{File, OpenOptions},
    io::prelude::*,
};
use tracing::{debug, trace};

/// Accessor for kernel parameters.
///
/// Values are printed to `O`, errors and warnings to `E`.
#[derive(Debug)]
pub struct Sysctl<O, E> {
    config: Config,
    out: O,
    err: E,
}

// Public
impl<O: Write, E: Write> Sysctl<O, E> {
    pub fn new(config: Config, out: O, err: E) -> Self {
        Self { config, out, err }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Print the value of `key`.
    ///
    /// `key` may be dotted or a path relative to the root. Each line of the
    /// value is printed as a separate record, see [`Display`].
    ///
    /// # Errors
    ///
    /// - [`SysctlError::InvalidKey`] if there is no such parameter.
    /// - [`SysctlError::PermissionDenied`] if it can't be read.
    /// - [`SysctlError::UnknownIo`] for anything else the OS complains about.
    /// - [`SysctlError::Output`] if printing fails.
    pub fn read(&mut self, key: &str) -> Result<()> {
        let name = path_to_key(key);
        if key.is_empty() {
            return Err(SysctlError::InvalidKey(name.into()));
        }
        let path = self.config.resolve(&key_to_path(key));
        debug!(key = %name, path = %path.display(), "reading parameter");

        let mut value = Vec::new();
        File::open(&path)
            .and_then(|mut f| f.read_to_end(&mut value))
            .map_err(|e| SysctlError::access(&name, Operation::Read, &e))?;
        trace!(key = %name, len = value.len(), "read parameter");

        let display = self.config.display();
        let mut lines = value.split_inclusive(|&b| b == b'\n').peekable();
        while let Some(line) = lines.next() {
            if display.contains(Display::NAME) {
                write!(self.out, "{} = ", name)?;
                self.out.write_all(line)?;
            } else if !display.contains(Display::NEWLINE) && lines.peek().is_none() {
                self.out.write_all(line.strip_suffix(b"\n").unwrap_or(line))?;
            } else {
                self.out.write_all(line)?;
            }
        }
        Ok(())
    }

    /// Apply a `key=value` setting, and print the new value.
    ///
    /// The parameter file is truncated and `value` is written followed by a
    /// newline. Parameters are never created.
    ///
    /// # Errors
    ///
    /// - [`SysctlError::NoEquals`] if `setting` has no `=`.
    /// - [`SysctlError::MalformedSetting`] if the key or value are empty.
    /// - See [`Sysctl::read`]
    pub fn write(&mut self, setting: &str) -> Result<()> {
        let (key, value) = setting
            .split_once('=')
            .ok_or_else(|| SysctlError::NoEquals(setting.into()))?;
        if key.is_empty() || value.is_empty() {
            return Err(SysctlError::MalformedSetting(setting.into()));
        }
        let name = path_to_key(key);
        let path = self.config.resolve(&key_to_path(key));
        debug!(key = %name, path = %path.display(), value, "writing parameter");

        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .and_then(|mut f| f.write_all(format!("{}\n", value).as_bytes()))
            .map_err(|e| SysctlError::access(&name, Operation::Write, &e))?;

        let display = self.config.display();
        if display.contains(Display::NAME) {
            writeln!(self.out, "{} = {}", name, value)?;
        } else if display.contains(Display::NEWLINE) {
            writeln!(self.out, "{}", value)?;
        } else {
            write!(self.out, "{}", value)?;
        }
        Ok(())
    }

    /// Print `e` on the error stream, and return its exit code.
    pub fn report(&mut self, e: &SysctlError) -> i32 {
        // Nowhere left to complain to
        let _ = writeln!(self.err, "{}", e);
        e.code()
    }

    /// Flush both streams
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    /// Get back the output and error streams
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

// Private
impl<O: Write, E: Write> Sysctl<O, E> {
    /// Exit code for `res`, reporting it if it failed.
    pub(crate) fn status(&mut self, res: Result<()>) -> i32 {
        match res {
            Ok(()) => 0,
            Err(e) => self.report(&e),
        }
    }

    pub(crate) fn out(&mut self) -> &mut O {
        &mut self.out
    }
}

#[cfg(test)]
impl Sysctl<Vec<u8>, Vec<u8>> {
    /// Accessor printing into memory
    pub(crate) fn buffered(config: Config) -> Self {
        Self::new(config, Vec::new(), Vec::new())
    }

    /// Take everything printed so far, as `(stdout, stderr)`.
    pub(crate) fn take_output(&mut self) -> (String, String) {
        let out = String::from_utf8_lossy(&std::mem::take(&mut self.out)).into_owned();
        let err = String::from_utf8_lossy(&std::mem::take(&mut self.err)).into_owned();
        (out, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use nix::errno::Errno;
    use std::{fs, path::Path};

    fn root() -> Result<tempfile::TempDir> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("net/ipv4"))?;
        fs::write(dir.path().join("net/ipv4/ip_forward"), "1\n")?;
        fs::write(dir.path().join("net/ipv4/tcp_rmem"), "4096\t131072\t6291456\n")?;
        fs::create_dir_all(dir.path().join("dev/cdrom"))?;
        fs::write(dir.path().join("dev/cdrom/info"), "CD-ROM information\n\ndrive name:\n")?;
        Ok(dir)
    }

    fn sysctl(root: &Path, display: Display) -> Sysctl<Vec<u8>, Vec<u8>> {
        Sysctl::buffered(Config::new(root).with_display(display))
    }

    #[test]
    fn read_named() -> Result<()> {
        let dir = root()?;
        let mut s = sysctl(dir.path(), Display::all());
        s.read("net.ipv4.ip_forward")?;
        s.read("net/ipv4/tcp_rmem")?;
        let (out, err) = s.take_output();
        assert_eq!(
            out,
            "net.ipv4.ip_forward = 1\nnet.ipv4.tcp_rmem = 4096\t131072\t6291456\n"
        );
        assert_eq!(err, "");
        Ok(())
    }

    #[test]
    fn read_multi_line() -> Result<()> {
        let dir = root()?;
        let mut s = sysctl(dir.path(), Display::all());
        s.read("dev.cdrom.info")?;
        let (out, _) = s.take_output();
        assert_eq!(
            out,
            "dev.cdrom.info = CD-ROM information\ndev.cdrom.info = \ndev.cdrom.info = drive name:\n"
        );
        Ok(())
    }

    #[test]
    fn read_bare() -> Result<()> {
        let dir = root()?;
        let mut s = sysctl(dir.path(), Display::NEWLINE);
        s.read("net.ipv4.ip_forward")?;
        assert_eq!(s.take_output().0, "1\n");

        let mut s = sysctl(dir.path(), Display::empty());
        s.read("net.ipv4.ip_forward")?;
        assert_eq!(s.take_output().0, "1");

        // Only the last newline goes
        s.read("dev.cdrom.info")?;
        assert_eq!(s.take_output().0, "CD-ROM information\n\ndrive name:");
        Ok(())
    }

    #[test]
    fn read_missing() -> Result<()> {
        let dir = root()?;
        let mut s = sysctl(dir.path(), Display::all());
        let e = s.read("net.ipv4.nope").unwrap_err();
        assert!(matches!(&e, SysctlError::InvalidKey(k) if k == "net.ipv4.nope"));
        assert_eq!(s.report(&e), -1);
        let (out, err) = s.take_output();
        assert_eq!(out, "");
        assert_eq!(err, "error: 'net.ipv4.nope' is an unknown key\n");

        let e = s.read("").unwrap_err();
        assert!(matches!(e, SysctlError::InvalidKey(_)));
        Ok(())
    }

    #[test]
    fn read_directory() -> Result<()> {
        let dir = root()?;
        let mut s = sysctl(dir.path(), Display::all());
        let e = s.read("net.ipv4").unwrap_err();
        match e {
            SysctlError::UnknownIo { code, op, key } => {
                assert_eq!(code, Errno::EISDIR as i32);
                assert_eq!(op, Operation::Read);
                assert_eq!(key, "net.ipv4");
            }
            e => panic!("unexpected error {:?}", e),
        }
        Ok(())
    }

    #[test]
    fn write_named() -> Result<()> {
        let dir = root()?;
        let mut s = sysctl(dir.path(), Display::all());
        s.write("net.ipv4.ip_forward=0")?;
        assert_eq!(fs::read_to_string(dir.path().join("net/ipv4/ip_forward"))?, "0\n");
        assert_eq!(s.take_output().0, "net.ipv4.ip_forward = 0\n");

        // Value may contain `=`
        s.write("net/ipv4/tcp_rmem=a=b")?;
        assert_eq!(fs::read_to_string(dir.path().join("net/ipv4/tcp_rmem"))?, "a=b\n");
        assert_eq!(s.take_output().0, "net.ipv4.tcp_rmem = a=b\n");
        Ok(())
    }

    #[test]
    fn write_bare() -> Result<()> {
        let dir = root()?;
        let mut s = sysctl(dir.path(), Display::NEWLINE);
        s.write("net.ipv4.ip_forward=1")?;
        assert_eq!(s.take_output().0, "1\n");

        let mut s = sysctl(dir.path(), Display::empty());
        s.write("net.ipv4.ip_forward=1")?;
        let (out, err) = s.into_inner();
        assert_eq!(out, b"1");
        assert!(err.is_empty());
        Ok(())
    }

    #[test]
    fn write_missing_key() -> Result<()> {
        let dir = root()?;
        let mut s = sysctl(dir.path(), Display::all());
        let e = s.write("a.b=1").unwrap_err();
        assert!(matches!(&e, SysctlError::InvalidKey(k) if k == "a.b"));
        assert_ne!(s.report(&e), 0);
        let (out, err) = s.take_output();
        assert_eq!(out, "");
        assert_eq!(err, "error: 'a.b' is an unknown key\n");

        // Parameters are never created
        let e = s.write("net.ipv4.new=1").unwrap_err();
        assert!(matches!(e, SysctlError::InvalidKey(_)));
        assert!(!dir.path().join("net/ipv4/new").exists());
        Ok(())
    }

    #[test]
    fn write_malformed() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut s = sysctl(dir.path(), Display::all());
        let e = s.write("noequals").unwrap_err();
        assert!(matches!(e, SysctlError::NoEquals(_)));
        assert_eq!(
            e.to_string(),
            "error: 'noequals' must be of the form name=value"
        );
        assert!(matches!(
            s.write("=1").unwrap_err(),
            SysctlError::MalformedSetting(_)
        ));
        let e = s.write("a.b=").unwrap_err();
        assert!(matches!(e, SysctlError::MalformedSetting(_)));
        assert_eq!(e.code(), -2);
        assert_eq!(s.take_output(), (String::new(), String::new()));
        // Nothing touched
        assert_eq!(fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }
}
