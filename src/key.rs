//! Conversion between dotted keys and paths under the parameter root.
//!
//! `net.ipv4.ip_forward` is the file `net/ipv4/ip_forward`.
//!
//! The conversion swaps `.` and `/`, so a component containing a literal `.`
//! survives, `net/ipv4/conf/eth0.100/rp_filter` is the key
//! `net.ipv4.conf.eth0/100.rp_filter`.
//!
//! Which way to swap is decided by the first delimiter in the string.
//! If it's already the one being converted to, the string is assumed to be
//! in that form already and is left alone, so a path can be used wherever a
//! key is expected.
//!
//! # Note
//!
//! A key using both delimiters, or a path whose first component contains a
//! `.`, is ambiguous and won't round trip.
use std::borrow::Cow;

const DELIMITERS: [char; 2] = ['.', '/'];

fn swap(s: &str, to: char) -> Cow<'_, str> {
    match s.find(DELIMITERS) {
        Some(i) if !s[i..].starts_with(to) => s
            .chars()
            .map(|c| match c {
                '.' => '/',
                '/' => '.',
                c => c,
            })
            .collect(),
        _ => Cow::Borrowed(s),
    }
}

/// Convert a key to a path relative to the parameter root
///
/// # Example
///
/// ```rust
/// # use linsysctl::key::key_to_path;
/// assert_eq!(key_to_path("net.ipv4.ip_forward"), "net/ipv4/ip_forward");
/// ```
pub fn key_to_path(key: &str) -> Cow<'_, str> {
    swap(key, '/')
}

/// Convert a path relative to the parameter root to a key, for display.
pub fn path_to_key(path: &str) -> Cow<'_, str> {
    swap(path, '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_path() {
        assert_eq!(key_to_path("net.ipv4.ip_forward"), "net/ipv4/ip_forward");
        assert_eq!(key_to_path("kernel.ostype"), "kernel/ostype");
        // Already a path
        assert_eq!(key_to_path("net/ipv4/ip_forward"), "net/ipv4/ip_forward");
    }

    #[test]
    fn no_delimiters() {
        assert!(matches!(key_to_path("fs"), Cow::Borrowed("fs")));
        assert!(matches!(path_to_key("fs"), Cow::Borrowed("fs")));
        assert_eq!(key_to_path(""), "");
    }

    #[test]
    fn literal_dot_in_component() {
        let path = "net/ipv4/conf/eth0.100/rp_filter";
        let key = path_to_key(path);
        assert_eq!(key, "net.ipv4.conf.eth0/100.rp_filter");
        assert_eq!(key_to_path(&key), path);
    }

    #[test]
    fn round_trip() {
        for key in ["net.ipv4.ip_forward", "vm.swappiness", "kernel", "a.b.c.d.e"] {
            assert_eq!(path_to_key(&key_to_path(key)), key);
        }
    }
}
