// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalan lookup tables: weekday names, hour number words and
//! minute-offset phrases.

/// Canonical weekday names, indexed Sunday = 0 through Saturday = 6.
pub const WEEKDAYS: [&str; 7] = [
    "Diumenge",
    "Dilluns",
    "Dimarts",
    "Dimecres",
    "Dijous",
    "Divendres",
    "Dissabte",
];

/// Number words accepted as an hour of the day.
///
/// This is the only table: every hour 0-23 has at least one entry, and a
/// word missing from it is a parse failure rather than midnight.
const HOUR_WORDS: &[(&str, u32)] = &[
    ("zero", 0),
    ("mitjanit", 0),
    ("u", 1),
    ("un", 1),
    ("una", 1),
    ("dos", 2),
    ("dues", 2),
    ("tres", 3),
    ("quatre", 4),
    ("cinc", 5),
    ("sis", 6),
    ("set", 7),
    ("vuit", 8),
    ("nou", 9),
    ("deu", 10),
    ("onze", 11),
    ("dotze", 12),
    ("migdia", 12),
    ("tretze", 13),
    ("catorze", 14),
    ("quinze", 15),
    ("setze", 16),
    ("disset", 17),
    ("divuit", 18),
    ("dinou", 19),
    ("vint", 20),
    ("vint-i-u", 21),
    ("vint-i-un", 21),
    ("vint-i-una", 21),
    ("vint-i-dos", 22),
    ("vint-i-dues", 22),
    ("vint-i-tres", 23),
];

/// Leading articles dropped before an hour word ("a les nou" -> "nou").
const HOUR_PREFIXES: &[&str] = &["a les ", "a la ", "les ", "la "];

/// Minute-offset phrases, checked in order.
///
/// Three-quarters comes first because "tres quarts" contains "quart".
/// Both the "i ..." form and the bare form are accepted.
const MINUTE_OFFSETS: &[(u32, &[&str])] = &[
    (
        45,
        &[
            "i 45",
            "45",
            "i quaranta-cinc",
            "quaranta-cinc",
            "quaranta cinc",
            "tres quarts",
        ],
    ),
    (30, &["i 30", "30", "i trenta", "trenta", "i mitja", "mitja"]),
    (
        15,
        &["i 15", "15", "i quinze", "quinze", "i quart", "quart"],
    ),
];

/// Look up an hour number word (case-insensitive).
pub fn hour_from_word(raw: &str) -> Option<u32> {
    let lowered = raw.trim().to_lowercase();
    let word = HOUR_PREFIXES
        .iter()
        .find_map(|prefix| lowered.strip_prefix(prefix))
        .unwrap_or(lowered.as_str())
        .trim();

    // "vint i un" is spoken the same as "vint-i-un"
    let word = word.split_whitespace().collect::<Vec<_>>().join("-");

    HOUR_WORDS
        .iter()
        .find(|(candidate, _)| *candidate == word)
        .map(|&(_, hour)| hour)
}

/// Resolve a free-text minute-offset phrase. Unmatched text means on the hour.
pub fn minute_offset(raw: &str) -> u32 {
    let phrase = raw.trim().to_lowercase();
    if phrase.is_empty() {
        return 0;
    }

    MINUTE_OFFSETS
        .iter()
        .find(|(_, variants)| variants.iter().any(|v| phrase.contains(v)))
        .map(|&(minutes, _)| minutes)
        .unwrap_or(0)
}
