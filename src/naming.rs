//! Filename parsing for the `<index>-<name>.<ext>` convention.
//!
//! Every catalog image is named after the product it belongs to: a numeric
//! index, a dash, the product name, and an image extension. Anything after a
//! second dash is free-form and ignored, so several photos of one product can
//! share the index:
//!
//! - `1-Cat.jpg` → index=1, name="Cat"
//! - `2-Dog.jpg` → index=2, name="Dog"
//! - `2-Dog-side.jpg` → index=2, name="Dog"
//! - `007-Robot.jpg` → index=7, name="Robot"
//!
//! The parser is strict. A file with an image extension that does not follow
//! the grammar is rejected with a [`NameError`] so the caller can report it,
//! instead of guessing an index.

use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("not a catalog image")]
    NotAnImage,
    #[error("missing '-' between index and name")]
    MissingSeparator,
    #[error("index '{0}' is not a non-negative integer")]
    InvalidIndex(String),
    #[error("empty product name")]
    EmptyName,
}

/// Result of parsing a catalog image filename like `2-Dog-side.jpg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    /// Integer value of the prefix (`7` for `007-Robot.jpg`).
    pub index: u32,
    /// Segment between the first and second dash, extension stripped.
    pub name: String,
}

/// Check whether `filename` ends in one of `extensions` (case-insensitive,
/// without the leading dot).
pub fn has_image_extension(filename: &str, extensions: &[String]) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
        }
        _ => false,
    }
}

/// Parse a catalog image filename.
///
/// ```
/// # use catalog_pages::naming::parse_image_filename;
/// let exts = vec!["jpg".to_string()];
/// let parsed = parse_image_filename("2-Dog-side.jpg", &exts).unwrap();
/// assert_eq!(parsed.index, 2);
/// assert_eq!(parsed.name, "Dog");
/// ```
pub fn parse_image_filename(filename: &str, extensions: &[String]) -> Result<ImageName, NameError> {
    if !has_image_extension(filename, extensions) {
        return Err(NameError::NotAnImage);
    }
    let (prefix, rest) = filename
        .split_once('-')
        .ok_or(NameError::MissingSeparator)?;

    // `u32::from_str` accepts a leading '+', the grammar does not
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NameError::InvalidIndex(prefix.to_string()));
    }
    let index = prefix
        .parse::<u32>()
        .map_err(|_| NameError::InvalidIndex(prefix.to_string()))?;

    let segment = rest.split('-').next().unwrap_or_default();
    let name = segment.split('.').next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(NameError::EmptyName);
    }

    Ok(ImageName {
        index,
        name: name.to_string(),
    })
}

/// Compare two strings treating runs of ASCII digits as numbers.
///
/// `2-a.jpg` sorts before `10-a.jpg`. Digit runs of equal value but different
/// width (`01` vs `1`) and otherwise equal strings fall back to byte order, so
/// the result is a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut ai, mut bi) = (a.as_bytes(), b.as_bytes());
    loop {
        match (ai.first(), bi.first()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (an, arest) = split_digits(ai);
                let (bn, brest) = split_digits(bi);
                let ord = cmp_digit_runs(an, bn);
                if ord != Ordering::Equal {
                    return ord;
                }
                ai = arest;
                bi = brest;
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(y);
                }
                ai = &ai[1..];
                bi = &bi[1..];
            }
        }
    }
}

fn split_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let end = s.iter().position(|b| !b.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Compare digit runs by value without parsing (runs may exceed `u64`).
fn cmp_digit_runs(a: &[u8], b: &[u8]) -> Ordering {
    let trim = |s: &[u8]| -> usize { s.iter().position(|&d| d != b'0').unwrap_or(s.len()) };
    let (a, b) = (&a[trim(a)..], &b[trim(b)..]);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
