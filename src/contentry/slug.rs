//! # Slugs
//!
//! Every entry carries a permalink that is unique among the entries of its
//! content type, per locale.
//!
//! ## Resolution
//!
//! [`resolve`] runs right after an entry is built and again before its
//! submission view is produced:
//!
//! 1. The current slug is normalized with [`permalink`].
//! 2. If that leaves nothing, the label's permalink is used instead.
//! 3. If a *different* sibling already owns the result, [`next_unique_slug`] is used.
//!
//! When neither the slug nor the label yields any text, the slug is cleared.
//!
//! ## Suffixes
//!
//! Collisions get a numeric suffix one above the highest suffix in use for the
//! same base, not the first free one:
//!
//! ```text
//! paris, paris-1, paris-3  + "Paris"  ->  paris-4
//! ```
//!
//! Suffixes are compared as decimal strings, so they never overflow.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::locale::Session;
use crate::model::ContentEntry;

static NUMERIC_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-[0-9]+$").expect("numeric suffix pattern is valid"));

const SEPARATOR: char = '-';

/// Normalizes text into permalink form.
///
/// Lowercases, turns every run of non-alphanumeric characters into a single
/// `-`, and trims separators at both ends. Letters and digits of any script
/// are kept.
///
/// ```
/// use contentry::slug::permalink;
///
/// assert_eq!(permalink("Hello, World!"), "hello-world");
/// assert_eq!(permalink("  --Top 10 -- Lists--"), "top-10-lists");
/// assert_eq!(permalink("Café Crème"), "café-crème");
/// assert_eq!(permalink("!!!"), "");
/// ```
pub fn permalink(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(SEPARATOR);
            }
            pending_separator = false;
            out.push(ch);
        } else {
            pending_separator = true;
        }
    }

    out
}

/// Computes the slug `entry` must carry for the session locale.
///
/// Returns `None` when neither the current slug nor the label normalizes to
/// any text; the caller then clears the slug.
pub fn resolve(entry: &ContentEntry, session: &Session, siblings: &[ContentEntry]) -> Option<String> {
    let normalized = entry
        .slug(session)
        .map(permalink)
        .filter(|slug| !slug.is_empty());

    let slug = match normalized {
        Some(slug) => slug,
        None => {
            let label = entry.label_text(session)?;
            debug!(label = %label, locale = %session.locale(), "seeding slug from label");
            let seeded = permalink(&label);
            if seeded.is_empty() {
                return None;
            }
            seeded
        }
    };

    if is_taken(entry, &slug, session, siblings) {
        let next = next_unique_slug(&slug, session, siblings);
        debug!(taken = %slug, next = %next, "slug already in use");
        return Some(next);
    }

    Some(slug)
}

/// Whether an entry other than `entry` owns `slug` in the session locale.
pub fn is_taken(entry: &ContentEntry, slug: &str, session: &Session, siblings: &[ContentEntry]) -> bool {
    siblings
        .iter()
        .any(|other| other.id() != entry.id() && other.slug(session) == Some(slug))
}

/// Next free slug for the base of `slug`.
///
/// Any trailing `-<digits>` is stripped to get the base. Siblings whose slug
/// matches `^base-?(\d*)$` (case-insensitive) are scanned for the highest
/// suffix (a bare `base` counts as 0), and `base-{highest + 1}` is returned.
pub fn next_unique_slug(slug: &str, session: &Session, siblings: &[ContentEntry]) -> String {
    let base = NUMERIC_SUFFIX.replace(slug, "").into_owned();

    let variants = match RegexBuilder::new(&format!("^{}-?([0-9]*)$", regex::escape(&base)))
        .case_insensitive(true)
        .build()
    {
        Ok(variants) => variants,
        Err(e) => {
            warn!(base = %base, error = %e, "cannot build slug suffix pattern");
            return format!("{}{}1", base, SEPARATOR);
        }
    };

    let highest = siblings
        .iter()
        .filter_map(|entry| entry.slug(session))
        .filter_map(|other| suffix_of(other, &variants))
        .max_by(|a, b| compare_digits(a, b))
        .unwrap_or("0");

    format!("{}{}{}", base, SEPARATOR, increment_digits(highest))
}

/// The numeric suffix of `candidate` if it is a variant of the base matched by
/// `variants`. Leading zeros are dropped; a bare base yields `"0"`.
fn suffix_of<'a>(candidate: &'a str, variants: &Regex) -> Option<&'a str> {
    let digits = variants.captures(candidate)?.get(1)?.as_str();
    let digits = digits.trim_start_matches('0');
    Some(if digits.is_empty() { "0" } else { digits })
}

/// Orders decimal strings without leading zeros by value.
fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn increment_digits(digits: &str) -> String {
    let mut reversed = String::with_capacity(digits.len() + 1);
    let mut carry = true;
    for digit in digits.chars().rev() {
        match (carry, digit) {
            (true, '9') => reversed.push('0'),
            (true, d) => {
                reversed.push(char::from(d as u8 + 1));
                carry = false;
            }
            (false, d) => reversed.push(d),
        }
    }
    if carry {
        reversed.push('1');
    }
    reversed.chars().rev().collect()
}
