//! Utility functions

/// Linux exposes kernel parameters under `/proc/sys`.
///
/// Like sysfs, procfs could be mounted somewhere else, so this is only the
/// default. See [`ROOT_ENV`].
pub const PROC_SYS_PATH: &str = "/proc/sys/";

/// Default file for `-p`. Same reasons as [`PROC_SYS_PATH`].
pub const PRELOAD_PATH: &str = "/etc/sysctl.conf";

/// Environment variable overriding [`PROC_SYS_PATH`]
pub const ROOT_ENV: &str = "SYSCTL_ROOT";

/// Environment variable holding the `tracing` filter
pub const LOG_ENV: &str = "SYSCTL_LOG";

/// Strip spaces, tabs, carriage returns and newlines from the end, and spaces
/// and tabs from the start.
pub fn strip(s: &str) -> &str {
    strip_leading(s.trim_end_matches([' ', '\t', '\r', '\n']))
}

/// Strip spaces and tabs from the start
pub fn strip_leading(s: &str) -> &str {
    s.trim_start_matches([' ', '\t'])
}
