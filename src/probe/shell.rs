//! Shell quoting for values interpolated into remote command strings.

use std::borrow::Cow;

/// Quotes `value` so it is safe to interpolate into a `sh` command line.
///
/// Paths and content lines with spaces, quotes, globs or other shell
/// metacharacters come out single-quoted; plain identifiers pass through
/// untouched.
#[must_use]
pub fn quote(value: &str) -> String {
    shell_escape::escape(Cow::Borrowed(value)).into_owned()
}
