//! Bounded pattern compilation and matching.
//!
//! Runs synchronously; callers put it on a blocking thread. The budget is
//! checked after compiling and between matches. Each single match in the
//! `regex` crate runs in time linear in the input, so a cancelled run stops
//! within one match of the flag being raised.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use regex::{Regex, RegexBuilder};

use super::captures::NamedCaptures;
use super::ExtractionError;
use crate::config::REGEX_SIZE_LIMIT;

/// Deadline plus an external cancellation flag.
#[derive(Debug, Clone)]
pub(crate) struct Budget {
    deadline: Instant,
    cancelled: Arc<AtomicBool>,
}

impl Budget {
    pub(crate) fn new(deadline: Instant) -> Self {
        Self {
            deadline,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Asks a running evaluation to stop at its next check.
    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    fn check(&self) -> Result<(), ExtractionError> {
        if self.cancelled.load(Ordering::Relaxed) || Instant::now() >= self.deadline {
            Err(ExtractionError::TimedOut)
        } else {
            Ok(())
        }
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, ExtractionError> {
    RegexBuilder::new(&normalize_group_syntax(pattern))
        .size_limit(REGEX_SIZE_LIMIT)
        .dfa_size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(ExtractionError::InvalidPattern)
}

/// Rewrites quote-delimited named groups, `(?'name'...)`, to the
/// `(?<name>...)` form the `regex` crate accepts.
///
/// Escaped parentheses and anything inside a character class are left alone.
/// A group whose name is not closed by a quote or is not a valid group name is
/// also left alone, so the compiler reports it.
fn normalize_group_syntax(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains("(?'") {
        return Cow::Borrowed(pattern);
    }

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut class_depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                out.push(c);
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                }
                i += 2;
                continue;
            }
            '[' => {
                out.push(c);
                class_depth += 1;
                i += 1;
                // A `]` right after `[` or `[^` is a literal
                if chars.get(i) == Some(&'^') {
                    out.push('^');
                    i += 1;
                }
                if chars.get(i) == Some(&']') {
                    out.push(']');
                    i += 1;
                }
                continue;
            }
            ']' if class_depth > 0 => class_depth -= 1,
            '(' if class_depth == 0
                && chars.get(i + 1) == Some(&'?')
                && chars.get(i + 2) == Some(&'\'') =>
            {
                if let Some(len) = quoted_group_name_len(&chars[i + 3..]) {
                    out.push_str("(?<");
                    out.extend(&chars[i + 3..i + 3 + len]);
                    out.push('>');
                    i += 3 + len + 1;
                    continue;
                }
            }
            _ => {}
        }
        out.push(c);
        i += 1;
    }

    Cow::Owned(out)
}

/// Length of a group name terminated by `'`, if the name is well formed.
fn quoted_group_name_len(rest: &[char]) -> Option<usize> {
    let len = rest.iter().position(|&c| c == '\'')?;
    let name = &rest[..len];
    let well_formed = name
        .first()
        .is_some_and(|c| c.is_alphabetic() || *c == '_')
        && name
            .iter()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    well_formed.then_some(len)
}

/// Compiles `pattern` and collects the named captures of every match in
/// `text`, in order of occurrence.
///
/// Fails with `TooManyMatches` as soon as match `max_matches + 1` is found;
/// no partial result is returned.
pub(crate) fn extract_bounded(
    pattern: &str,
    text: &str,
    max_matches: usize,
    budget: &Budget,
) -> Result<Vec<NamedCaptures>, ExtractionError> {
    let regex = compile(pattern)?;
    budget.check()?;

    let names: Vec<(usize, &str)> = regex
        .capture_names()
        .enumerate()
        .filter_map(|(index, name)| name.map(|name| (index, name)))
        .collect();

    let mut results = Vec::new();
    for caps in regex.captures_iter(text) {
        budget.check()?;
        if results.len() == max_matches {
            return Err(ExtractionError::TooManyMatches { max: max_matches });
        }
        results.push(NamedCaptures::from_captures(&caps, &names));
    }

    Ok(results)
}
