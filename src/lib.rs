//! Read and write Linux kernel parameters
//!
//! # Implementation details
//!
//! The kernel exposes its tunable parameters as files under `/proc/sys`,
//! the `sysctl` key `net.ipv4.ip_forward` being the file
//! `/proc/sys/net/ipv4/ip_forward`, so this library requires it to exist.
//!
//! What a parameter means, and what values it accepts, is entirely up to the
//! kernel. This crate doesn't validate anything, it only moves text in and
//! out of those files.
//!
//! See the [kernel docs][1] for what the parameters do.
//!
//! [1]: https://www.kernel.org/doc/html/latest/admin-guide/sysctl/index.html
#![doc(html_root_url = "https://docs.rs/linsysctl/0.1.0")]

pub mod cli;
pub mod config;
pub mod error;
pub mod key;
pub mod param;
pub mod util;

mod preload;
mod walk;

pub use self::{
    config::{Config, Display},
    error::{SysctlError, Result},
    param::Sysctl,
};
