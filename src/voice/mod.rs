//! Table-driven voice-command matcher.
//!
//! Translates a speech transcript into a structured UI action. Transcription
//! itself happens upstream; this module only pattern-matches the text. Rules
//! are tried in order and the first one that matches (and can consume the
//! digits it needs) wins, with a natural-language filter as the fallback.

use serde::Serialize;

/// A recognized hands-free action, addressed by on-screen item index where
/// applicable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum VoiceAction {
    ScrollDown,
    ScrollUp,
    IncreaseItem { index: u32 },
    DecreaseItem { index: u32 },
    RemoveItem { index: u32 },
    SetItemQuantity { index: u32, quantity: u32 },
    OpenItem { index: u32 },
    AddItem { index: u32 },
    ApplyFilter(FilterCommand),
}

/// Catalog filter extracted from a natural-language phrase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

/// One command rule: a set of phrase alternatives (every word group in an
/// alternative must appear in the transcript) plus an action builder fed the
/// digits found in the transcript, in order.
struct CommandRule {
    alternatives: &'static [&'static [&'static str]],
    build: fn(&[u32]) -> Option<VoiceAction>,
}

const RULES: &[CommandRule] = &[
    CommandRule {
        alternatives: &[
            &["scroll down"],
            &["next page"],
            &["next product"],
            &["scroll next"],
        ],
        build: |_| Some(VoiceAction::ScrollDown),
    },
    CommandRule {
        alternatives: &[
            &["scroll up"],
            &["previous page"],
            &["prev page"],
            &["previous product"],
            &["scroll previous"],
        ],
        build: |_| Some(VoiceAction::ScrollUp),
    },
    CommandRule {
        alternatives: &[&["increase item"], &["item", "plus"]],
        build: |nums| {
            nums.first()
                .map(|&index| VoiceAction::IncreaseItem { index })
        },
    },
    CommandRule {
        alternatives: &[&["decrease item"], &["item", "minus"]],
        build: |nums| {
            nums.first()
                .map(|&index| VoiceAction::DecreaseItem { index })
        },
    },
    CommandRule {
        alternatives: &[&["remove item"], &["delete item"], &["remove this item"]],
        build: |nums| nums.first().map(|&index| VoiceAction::RemoveItem { index }),
    },
    CommandRule {
        alternatives: &[&["set item"], &["change item"], &["make item"]],
        build: |nums| match nums {
            [index, quantity, ..] => Some(VoiceAction::SetItemQuantity {
                index: *index,
                quantity: *quantity,
            }),
            _ => None,
        },
    },
    CommandRule {
        alternatives: &[&["open"], &["view"], &["details"]],
        build: |nums| nums.first().map(|&index| VoiceAction::OpenItem { index }),
    },
    CommandRule {
        alternatives: &[&["add"]],
        build: |nums| nums.first().map(|&index| VoiceAction::AddItem { index }),
    },
];

/// Color words the filter fallback understands.
const FILTER_COLORS: &[&str] = &[
    "red", "blue", "black", "white", "green", "pink", "yellow", "beige", "brown", "purple",
];

/// Spoken category aliases mapped to catalog categories.
const FILTER_CATEGORIES: &[(&str, &str)] = &[
    ("dresses", "dresses"),
    ("dress", "dresses"),
    ("tops", "tops"),
    ("top", "tops"),
    ("saree", "sarees"),
    ("kurta", "kurtas"),
    ("gown", "gowns"),
];

/// Phrases introducing a price ceiling.
const PRICE_CUES: &[&str] = &["under", "below", "less than"];

/// Match a transcript against the command table.
pub fn parse_transcript(raw: &str) -> Option<VoiceAction> {
    let transcript = raw.trim().to_lowercase();
    if transcript.is_empty() {
        return None;
    }

    let numbers = extract_numbers(&transcript);

    for rule in RULES {
        let matched = rule
            .alternatives
            .iter()
            .any(|groups| groups.iter().all(|phrase| transcript.contains(phrase)));
        if matched {
            if let Some(action) = (rule.build)(&numbers) {
                return Some(action);
            }
        }
    }

    parse_filter(&transcript).map(VoiceAction::ApplyFilter)
}

/// Extract the natural-language filter, if the phrase mentions a known color,
/// category, or price ceiling.
fn parse_filter(transcript: &str) -> Option<FilterCommand> {
    let color = FILTER_COLORS
        .iter()
        .find(|c| transcript.contains(*c))
        .map(|c| c.to_string());

    let category = FILTER_CATEGORIES
        .iter()
        .find(|(spoken, _)| transcript.contains(spoken))
        .map(|(_, category)| category.to_string());

    let max_price = PRICE_CUES.iter().find_map(|cue| {
        let idx = transcript.find(cue)?;
        let after = transcript.get(idx + cue.len()..)?;
        parse_leading_number(after)
    });

    if color.is_none() && category.is_none() && max_price.is_none() {
        return None;
    }

    Some(FilterCommand {
        color,
        category,
        max_price,
    })
}

/// All digit runs in the transcript, in order of appearance.
fn extract_numbers(transcript: &str) -> Vec<u32> {
    let mut numbers = Vec::new();
    let mut current = String::new();

    for c in transcript.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            if let Ok(n) = current.parse() {
                numbers.push(n);
            }
            current.clear();
        }
    }
    if !current.is_empty() {
        if let Ok(n) = current.parse() {
            numbers.push(n);
        }
    }

    numbers
}

/// Parse the first number (integer or decimal) in the string, skipping
/// leading non-numeric characters.
fn parse_leading_number(s: &str) -> Option<f64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}
