//! `Accept-Language` parsing.
//!
//! Entries are split on `,`, the quality is read from a `q` parameter
//! (default 1.0) and the tag is reduced to its primary subtag. Entries with a
//! quality that is not a number in [0, 1] are dropped rather than guessed at.

use crate::locale::LocaleCode;

/// One entry of a client's language preference list.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Primary subtag, lowercased (`en` for `en-US`).
    pub language: String,
    /// Relative weight in [0, 1].
    pub quality: f32,
}

/// Parse a raw header value into preferences ordered by descending quality.
///
/// The sort is stable, so entries with equal weight keep header order.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header.split(',').filter_map(parse_entry).collect();
    preferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    preferences
}

/// First preference that names a supported locale.
pub fn first_supported(preferences: &[LanguagePreference]) -> Option<LocaleCode> {
    preferences
        .iter()
        .find_map(|pref| LocaleCode::from_language(&pref.language))
}

fn parse_entry(raw: &str) -> Option<LanguagePreference> {
    let mut parts = raw.split(';');
    let tag = parts.next()?.trim();

    let primary = tag.split('-').next()?.trim();
    if primary.is_empty() {
        return None;
    }

    let mut quality = 1.0;
    for param in parts {
        if let Some((name, value)) = param.split_once('=') {
            if name.trim().eq_ignore_ascii_case("q") {
                quality = parse_quality(value)?;
            }
        }
    }

    Some(LanguagePreference {
        language: primary.to_ascii_lowercase(),
        quality,
    })
}

fn parse_quality(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|q| q.is_finite() && (0.0..=1.0).contains(q))
}
