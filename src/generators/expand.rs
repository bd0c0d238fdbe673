// src/generators/expand.rs
use std::fmt;

use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;
use rand::Rng;

use super::candidates::CandidateSet;
use super::facts::Fragments;
use super::leet::{random_leet, LEET_PROBABILITY};
use super::SYMBOLS;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const LOWER_DIGITS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const WRAP_SYMBOLS: usize = 3;

/// Limits that keep every stage of the expander bounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionBudget {
    /// Leet stage stops once the set holds `leet_headroom * target`.
    pub leet_headroom: usize,
    /// Symbol stage stops once the set holds `symbol_headroom * target`.
    pub symbol_headroom: usize,
    /// Growth stage gives up after `attempt_factor * target` attempts.
    pub attempt_factor: usize,
    pub fresh_probability: f64,
    /// Below this size the growth stage only mints fresh candidates.
    pub warmup_floor: usize,
}

impl Default for ExpansionBudget {
    fn default() -> Self {
        Self {
            leet_headroom: 2,
            symbol_headroom: 3,
            attempt_factor: 10,
            fresh_probability: 0.3,
            warmup_floor: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Base,
    PassThrough,
    Leet,
    SymbolWrap,
    Growth,
    Fallback,
    Truncate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Base => "base",
            Stage::PassThrough => "pass-through",
            Stage::Leet => "leet",
            Stage::SymbolWrap => "symbol-wrap",
            Stage::Growth => "growth",
            Stage::Fallback => "fallback",
            Stage::Truncate => "truncate",
        };
        f.write_str(name)
    }
}

/// Collection size after each stage that ran.
#[derive(Debug, Clone, Default)]
pub struct ExpansionReport {
    pub stages: Vec<(Stage, usize)>,
    pub growth_attempts: usize,
    pub fallback_minted: usize,
}

impl ExpansionReport {
    fn record(&mut self, stage: Stage, size: usize) {
        log::info!("stage {stage}: {size} candidates");
        self.stages.push((stage, size));
    }
}

#[cfg(test)]
impl ExpansionReport {
    pub fn size_after(&self, stage: Stage) -> Option<usize> {
        self.stages.iter().find(|(s, _)| *s == stage).map(|(_, n)| *n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    AppendNumber,
    AppendSymbol,
    UppercaseLeading,
    Reverse,
    Duplicate,
    AppendBirthYear,
    AppendPhone,
    AppendLetters,
}

const MUTATIONS: [Mutation; 8] = [
    Mutation::AppendNumber,
    Mutation::AppendSymbol,
    Mutation::UppercaseLeading,
    Mutation::Reverse,
    Mutation::Duplicate,
    Mutation::AppendBirthYear,
    Mutation::AppendPhone,
    Mutation::AppendLetters,
];

/// Grows a base candidate set to an exact size.
pub struct Expander<'a> {
    fragments: &'a Fragments,
    budget: ExpansionBudget,
}

impl<'a> Expander<'a> {
    pub fn new(fragments: &'a Fragments) -> Self {
        Self { fragments, budget: ExpansionBudget::default() }
    }

    pub fn with_budget(mut self, budget: ExpansionBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Returns exactly `target` unique candidates. Never fails.
    pub fn expand<R: Rng + ?Sized>(
        &self,
        mut set: CandidateSet,
        target: usize,
        rng: &mut R,
    ) -> (CandidateSet, ExpansionReport) {
        let mut report = ExpansionReport::default();
        report.record(Stage::Base, set.len());

        if set.len() >= target {
            set.truncate(target);
            report.record(Stage::PassThrough, set.len());
            return (set, report);
        }

        self.leet_stage(&mut set, target, rng);
        report.record(Stage::Leet, set.len());

        if set.len() < target.saturating_mul(self.budget.leet_headroom) {
            self.symbol_stage(&mut set, target);
            report.record(Stage::SymbolWrap, set.len());
        }

        if set.len() < target {
            report.growth_attempts = self.growth_stage(&mut set, target, rng);
            report.record(Stage::Growth, set.len());
        }

        if set.len() < target {
            log::warn!("growth budget exhausted, minting {} fallback candidates", target - set.len());
            report.fallback_minted = fallback_stage(&mut set, target, rng);
            report.record(Stage::Fallback, set.len());
        }

        set.truncate(target);
        report.record(Stage::Truncate, set.len());
        (set, report)
    }

    fn leet_stage<R: Rng + ?Sized>(&self, set: &mut CandidateSet, target: usize, rng: &mut R) {
        let limit = target.saturating_mul(self.budget.leet_headroom);
        let snapshot = set.len();
        for i in 0..snapshot {
            if set.len() >= limit {
                break;
            }
            let Some(original) = set.get(i) else { break };
            let leet = random_leet(original, LEET_PROBABILITY, rng);
            if leet != original {
                set.insert(leet);
            }
        }
    }

    fn symbol_stage(&self, set: &mut CandidateSet, target: usize) {
        let limit = target.saturating_mul(self.budget.symbol_headroom);
        let snapshot = set.len();
        for i in 0..snapshot {
            if set.len() >= limit {
                break;
            }
            let Some(original) = set.get(i).map(str::to_string) else { break };
            for symbol in &SYMBOLS[..WRAP_SYMBOLS] {
                set.insert(format!("{symbol}{original}"));
                set.insert(format!("{original}{symbol}"));
                set.insert(format!("{symbol}{original}{symbol}"));
            }
        }
    }

    /// Returns the number of attempts spent.
    fn growth_stage<R: Rng + ?Sized>(&self, set: &mut CandidateSet, target: usize, rng: &mut R) -> usize {
        let max_attempts = target.saturating_mul(self.budget.attempt_factor);
        let mut attempts = 0;

        while set.len() < target && attempts < max_attempts {
            attempts += 1;

            let fresh = set.len() < self.budget.warmup_floor || rng.gen_bool(self.budget.fresh_probability);
            let candidate = if fresh {
                fresh_candidate(rng)
            } else {
                match set.pick(rng) {
                    Some(base) => self.mutate(base, rng),
                    None => fresh_candidate(rng),
                }
            };
            set.insert(candidate);

            if attempts % 100_000 == 0 {
                log::debug!("growth: {} / {} after {attempts} attempts", set.len(), target);
            }
        }
        attempts
    }

    fn mutate<R: Rng + ?Sized>(&self, base: &str, rng: &mut R) -> String {
        let mutation = MUTATIONS.choose(rng).copied().unwrap_or(Mutation::AppendNumber);
        match mutation {
            Mutation::AppendNumber => format!("{base}{}", rng.gen_range(0..=9999)),
            Mutation::AppendSymbol => format!("{base}{}", random_symbol(rng)),
            Mutation::UppercaseLeading => {
                let count = rng.gen_range(1..=3);
                base.chars()
                    .enumerate()
                    .flat_map(|(i, c)| {
                        let upper = i < count && c.is_alphabetic();
                        c.to_uppercase().filter(move |_| upper).chain((!upper).then_some(c))
                    })
                    .collect()
            }
            Mutation::Reverse => base.chars().rev().collect(),
            Mutation::Duplicate => base.repeat(2),
            Mutation::AppendBirthYear => match &self.fragments.birth_year2 {
                Some(year) => format!("{base}{year}"),
                None => format!("{base}{}", rng.gen_range(10..=99)),
            },
            Mutation::AppendPhone => match &self.fragments.phone_last4 {
                Some(last4) => format!("{base}{last4}"),
                None => format!("{base}{}", rng.gen_range(1000..=9999)),
            },
            Mutation::AppendLetters => {
                let len = rng.gen_range(2..=4);
                format!("{base}{}", random_from(LOWERCASE, len, rng))
            }
        }
    }
}

/// Mint structured candidates until `target` is reached. A collision gets a
/// strictly increasing serial appended, so every iteration adds a member.
fn fallback_stage<R: Rng + ?Sized>(set: &mut CandidateSet, target: usize, rng: &mut R) -> usize {
    let mut minted = 0;
    let mut serial: u64 = 0;
    while set.len() < target {
        let mut candidate = structured_candidate(rng);
        while set.contains(&candidate) {
            serial += 1;
            candidate = format!("{candidate}{serial}");
        }
        set.insert(candidate);
        minted += 1;
    }
    minted
}

fn fresh_candidate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(6..=12);
    let mut candidate = random_from(LOWER_DIGITS, len, rng);
    if rng.gen_bool(0.5) {
        candidate.push_str(random_symbol(rng));
    }
    candidate
}

fn structured_candidate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let letters = rng.gen_range(3..=6);
    let mut candidate = random_from(LOWERCASE, letters, rng);
    candidate.push_str(&rng.gen_range(100..=9999).to_string());
    if rng.gen_bool(0.5) {
        candidate.push_str(random_symbol(rng));
    }
    candidate
}

fn random_symbol<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SYMBOLS.choose(rng).copied().unwrap_or("!")
}

fn random_from<R: Rng + ?Sized>(alphabet: &[u8], len: usize, rng: &mut R) -> String {
    let dist = Uniform::from(0..alphabet.len());
    (0..len).map(|_| alphabet[dist.sample(rng)] as char).collect()
}
