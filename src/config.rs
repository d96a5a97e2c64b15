//! Runtime configuration
use crate::util::{PROC_SYS_PATH, ROOT_ENV};
use bitflags::bitflags;
use std::{
    env,
    path::{Path, PathBuf},
};

bitflags! {
    /// How values are printed
    pub struct Display: u8 {
        /// Prefix each value with `key = `
        const NAME = 1 << 0;

        /// Keep the trailing newline
        const NEWLINE = 1 << 1;
    }
}

impl Default for Display {
    fn default() -> Self {
        Display::all()
    }
}

/// Where parameters live, and how they're printed.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    display: Display,
}

impl Config {
    /// Use `root` as the parameter root, with the default [`Display`]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            display: Display::default(),
        }
    }

    /// Default configuration, with the root taken from [`ROOT_ENV`] if set.
    pub fn from_env() -> Self {
        match env::var_os(ROOT_ENV) {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::default(),
        }
    }

    /// Replace the display flags
    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    /// Parameter root, `/proc/sys/` by default.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn display(&self) -> Display {
        self.display
    }

    /// Absolute path of the parameter at `rel`, relative to [`Config::root`].
    ///
    /// A leading `/` doesn't make `rel` absolute, it stays under the root.
    pub fn resolve(&self, rel: &str) -> PathBuf {
        self.root.join(rel.trim_start_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(PROC_SYS_PATH)
    }
}
