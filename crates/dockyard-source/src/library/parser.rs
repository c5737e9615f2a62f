//! Library file format
//!
//! A library file lists, one tag per line, where the Dockerfile for that
//! tag lives:
//!
//! ```text
//! 3.18: https://github.com/alpinelinux/docker-alpine@abc123 x86_64
//! ```
//!
//! Lines that do not have this shape (comments, blank lines, anything
//! else) are skipped without error. URLs are not validated here.

use dockyard_core::{ImageNameBuilder, Result, ScmEntry};
use regex::Regex;
use std::sync::LazyLock;

static LIBRARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^ #]*): ([^ @]*)@([^ ]*) ([^ ]*)$").expect("library line regex is valid")
});

/// Parse library file content into entries, in line order
///
/// `image` must carry the namespace and name; each entry gets a copy with
/// the tag of its line. When `tag` is set and not blank, only lines with
/// exactly that tag are kept.
///
/// # Errors
/// Returns `MissingField` if `image` has no name
pub fn parse_library(
    content: &str,
    tag: Option<&str>,
    image: &ImageNameBuilder,
) -> Result<Vec<ScmEntry>> {
    // Fail on a nameless builder even when no line matches.
    image.build()?;

    let tag = tag.filter(|t| !t.trim().is_empty());
    let mut builder = image.clone();
    let mut entries = Vec::new();

    for line in content.lines() {
        let Some(caps) = LIBRARY_LINE.captures(line) else {
            continue;
        };

        let current_tag = &caps[1];
        if tag.is_some_and(|wanted| wanted != current_tag) {
            continue;
        }

        let image = builder.set_tag(current_tag).build()?;
        entries.push(ScmEntry::new(image, &caps[2], &caps[3], &caps[4]));
    }

    Ok(entries)
}
