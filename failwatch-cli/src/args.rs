//! Command-line argument handling
//!
//! Earlier scripts call the tool with single-dash long flags
//! (`-project web -recentfilter=2h`). Those are rewritten to their
//! double-dash form before clap sees them.

use std::ffi::OsString;

/// Long flags also accepted with a single leading dash
const LEGACY_FLAGS: &[&str] = &["project", "group", "recentfilter", "config", "dry-run"];

/// Rewrite `-flag` / `-flag=value` into `--flag` / `--flag=value`
///
/// The first item is the program name and is left alone, as is everything
/// after a literal `--`.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }

            let Some(text) = arg.to_str() else {
                return arg;
            };

            if text == "--" {
                passthrough = true;
                return arg;
            }

            let legacy = text
                .strip_prefix('-')
                .is_some_and(|rest| !rest.starts_with('-') && is_legacy_flag(rest));

            if legacy {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

fn is_legacy_flag(flag: &str) -> bool {
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    LEGACY_FLAGS.contains(&name)
}
