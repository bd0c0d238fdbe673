// src/generators/facts.rs
use std::collections::BTreeSet;

use crate::models::{FactRecord, FieldKind, FIELDS};

pub type TokenSet = BTreeSet<String>;

/// Digit and name fragments reused by the combination and mutation stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    pub birth_year2: Option<String>,
    pub birth_year4: Option<String>,
    pub phone_last4: Option<String>,
    pub team: Option<String>,
}

impl Fragments {
    pub fn from_record(record: &FactRecord) -> Self {
        let birth = record.get("birth").map(digits).unwrap_or_default();
        let phone = record.get("phone").map(digits).unwrap_or_default();

        let (birth_year2, birth_year4) = if birth.len() >= 2 {
            let year2 = tail(&birth, 2).to_string();
            let year4 = if birth.len() >= 4 {
                tail(&birth, 4).to_string()
            } else {
                year2.clone()
            };
            (Some(year2), Some(year4))
        } else {
            (None, None)
        };

        Fragments {
            birth_year2,
            birth_year4,
            phone_last4: (phone.len() >= 4).then(|| tail(&phone, 4).to_string()),
            team: record.get("team").map(str::to_string),
        }
    }
}

/// Turn a fact record into base tokens. Pure and deterministic.
pub fn extract(record: &FactRecord) -> TokenSet {
    let mut tokens = TokenSet::new();

    for spec in FIELDS {
        let Some(value) = record.get(spec.name) else {
            continue;
        };
        match spec.kind {
            FieldKind::Scalar => add_word(&mut tokens, value),
            FieldKind::CommaList => {
                for item in value.split(',') {
                    add_word(&mut tokens, item.trim());
                }
            }
            FieldKind::Date => add_date(&mut tokens, &digits(value)),
            FieldKind::Phone => add_phone(&mut tokens, &digits(value)),
            FieldKind::Handle => add(&mut tokens, value.to_lowercase()),
        }
    }

    log::debug!("extracted {} tokens from {} facts", tokens.len(), FIELDS.len());
    tokens
}

fn add(tokens: &mut TokenSet, token: String) {
    if !token.is_empty() {
        tokens.insert(token);
    }
}

fn add_word(tokens: &mut TokenSet, word: &str) {
    add(tokens, word.to_lowercase());
    add(tokens, capitalize(word));
}

fn add_date(tokens: &mut TokenSet, digits: &str) {
    if digits.is_empty() {
        return;
    }
    add(tokens, digits.to_string());
    if digits.len() >= 4 {
        add(tokens, tail(digits, 4).to_string());
    }
    if digits.len() >= 2 {
        add(tokens, tail(digits, 2).to_string());
    }
    // DDMMYYYY
    if digits.len() == 8 {
        add(tokens, digits[..4].to_string());
        add(tokens, digits[4..].to_string());
    }
}

fn add_phone(tokens: &mut TokenSet, digits: &str) {
    if digits.is_empty() {
        return;
    }
    add(tokens, tail(digits, 4).to_string());
    if digits.len() >= 6 {
        add(tokens, tail(digits, 6).to_string());
    }
    if digits.len() >= 10 {
        add(tokens, tail(digits, 10).to_string());
    }
}

pub fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

// `s` is ASCII digits only, byte slicing is safe
fn tail(s: &str, n: usize) -> &str {
    &s[s.len().saturating_sub(n)..]
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
