// src/generators/combine.rs
use super::candidates::CandidateSet;
use super::facts::Fragments;
use super::SYMBOLS;

pub const COMMON_NUMBERS: &[&str] = &[
    "123", "1234", "12345", "123456", "111", "222", "333", "444", "555", "666", "777", "888",
    "999", "000", "1111", "2222", "3333", "2020", "2021", "2022", "2023", "2024", "2025",
];

pub const JERSEY_NUMBERS: &[&str] = &["1", "7", "8", "9", "10", "11", "17", "23", "24", "99"];

pub const SEPARATORS: &[&str] = &["", "_", "-", ".", "@"];

const TOP_NUMBERS: usize = 10;
const TOP_SYMBOLS: usize = 5;
const MAX_PAIRED_WORDS: usize = 20;

/// Build the base candidate set from the expanded word list.
pub fn combine(words: &[String], fragments: &Fragments) -> CandidateSet {
    let mut out = CandidateSet::new();

    let mut fact_affixes: Vec<&str> = Vec::new();
    if let (Some(year2), Some(year4)) = (&fragments.birth_year2, &fragments.birth_year4) {
        fact_affixes.push(year2);
        fact_affixes.push(year4);
    }
    if let Some(last4) = &fragments.phone_last4 {
        fact_affixes.push(last4);
    }

    for word in words {
        let affixes = COMMON_NUMBERS[..TOP_NUMBERS]
            .iter()
            .chain(&SYMBOLS[..TOP_SYMBOLS])
            .chain(&fact_affixes);
        for affix in affixes {
            out.insert(format!("{word}{affix}"));
            out.insert(format!("{affix}{word}"));
        }
    }

    // word x word, bounded to keep the quadratic blow-up in check
    let paired = &words[..words.len().min(MAX_PAIRED_WORDS)];
    for (i, first) in paired.iter().enumerate() {
        for (j, second) in paired.iter().enumerate() {
            if i == j {
                continue;
            }
            for sep in SEPARATORS {
                out.insert(format!("{first}{sep}{second}"));
            }
        }
    }

    if let Some(team) = &fragments.team {
        let lower = team.to_lowercase();
        for num in JERSEY_NUMBERS {
            for name in [lower.as_str(), team.as_str()] {
                out.insert(format!("{name}{num}"));
                out.insert(format!("{name}{num}!"));
            }
        }
    }

    log::debug!("combined {} words into {} base candidates", words.len(), out.len());
    out
}
