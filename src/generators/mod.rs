// src/generators/mod.rs
use std::time::Instant;

use rand::Rng;
use thiserror::Error;

use crate::models::{FactRecord, GenerationSummary};

pub mod candidates;
pub mod combine;
pub mod expand;
pub mod facts;
pub mod leet;

pub use candidates::CandidateSet;
pub use expand::{ExpansionBudget, Expander};
pub use facts::{extract, Fragments, TokenSet};

pub const SYMBOLS: &[&str] = &["!", "@", "#", "$", "%", "^", "&", "*", "-", "_", "+", "="];

pub const MAX_TARGET: usize = 1_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Target count cannot be negative: {0}")]
    InvalidTarget(i64),

    #[error("Target count {requested} exceeds the maximum of {max}")]
    TargetTooLarge { requested: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Check a requested wordlist size against the configured ceiling.
pub fn validate_target(requested: i64, max: usize) -> Result<usize> {
    let target = usize::try_from(requested).map_err(|_| GeneratorError::InvalidTarget(requested))?;
    if target > max {
        return Err(GeneratorError::TargetTooLarge { requested: target, max });
    }
    Ok(target)
}

/// Output of one generation run.
pub struct Wordlist {
    pub candidates: Vec<String>,
    pub summary: GenerationSummary,
}

/// Full pipeline: facts, variations, combinations, expansion.
pub struct WordlistGenerator {
    facts: FactRecord,
    fragments: Fragments,
    budget: ExpansionBudget,
}

impl WordlistGenerator {
    pub fn new(facts: FactRecord) -> Self {
        let fragments = Fragments::from_record(&facts);
        Self { facts, fragments, budget: ExpansionBudget::default() }
    }

    pub fn with_budget(mut self, budget: ExpansionBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Variation-expanded words followed by their combinations.
    pub fn base_candidates<R: Rng + ?Sized>(&self, rng: &mut R) -> (TokenSet, Vec<String>, CandidateSet) {
        let tokens = extract(&self.facts);
        log::info!("Extracted {} base words", tokens.len());

        let words = leet::expand_tokens(&tokens, rng);
        log::info!("After leet variations: {} unique words", words.len());

        let base = combine::combine(&words, &self.fragments);
        log::info!("Generated {} base combinations", base.len());

        (tokens, words, base)
    }

    /// Generate exactly `target` unique candidates.
    pub fn generate<R: Rng + ?Sized>(&self, target: usize, rng: &mut R) -> Wordlist {
        let started = Instant::now();
        log::info!("Target: {} candidates for '{}'", target, self.facts.subject_name());

        let (tokens, words, base) = self.base_candidates(rng);
        let base_count = base.len();

        let (set, report) = Expander::new(&self.fragments)
            .with_budget(self.budget)
            .expand(base, target, rng);

        let candidates = set.into_vec();
        let summary = GenerationSummary {
            subject: self.facts.subject_name(),
            target,
            generated: candidates.len(),
            token_count: tokens.len(),
            variation_count: words.len(),
            base_count,
            stages: report.stages.iter().map(|(s, n)| (s.to_string(), *n)).collect(),
            elapsed_secs: started.elapsed().as_secs_f64(),
            output: None,
        };
        log::info!(
            "Generated {} candidates in {:.2}s ({} fallback)",
            summary.generated,
            summary.elapsed_secs,
            report.fallback_minted
        );

        Wordlist { candidates, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn scenario() -> FactRecord {
        FactRecord::new()
            .with("name", "John")
            .with("birth", "1990")
            .with("team", "lakers")
            .with("phone", "1234567890")
    }

    fn assert_exact_unique(candidates: &[String], target: usize) {
        assert_eq!(candidates.len(), target);
        let unique: HashSet<&String> = candidates.iter().collect();
        assert_eq!(unique.len(), target);
    }

    #[test]
    fn negative_target_is_rejected() {
        assert_eq!(validate_target(-1, MAX_TARGET), Err(GeneratorError::InvalidTarget(-1)));
        assert_eq!(
            validate_target(2_000_000, MAX_TARGET),
            Err(GeneratorError::TargetTooLarge { requested: 2_000_000, max: MAX_TARGET })
        );
        assert_eq!(validate_target(0, MAX_TARGET), Ok(0));
        assert_eq!(validate_target(1_000_000, MAX_TARGET), Ok(1_000_000));
    }

    #[test]
    fn scenario_yields_exactly_one_thousand() {
        let mut rng = StdRng::seed_from_u64(42);
        let list = WordlistGenerator::new(scenario()).generate(1000, &mut rng);
        assert_exact_unique(&list.candidates, 1000);
        assert_eq!(list.summary.generated, 1000);
        assert_eq!(list.summary.subject, "john");
    }

    #[test]
    fn jersey_combination_survives_when_target_covers_base() {
        let generator = WordlistGenerator::new(scenario());
        let mut rng = StdRng::seed_from_u64(7);
        let base_len = generator.base_candidates(&mut rng).2.len();

        let mut rng = StdRng::seed_from_u64(7);
        let target = base_len + 500;
        let list = generator.generate(target, &mut rng);
        assert_exact_unique(&list.candidates, target);
        assert!(list.candidates.iter().any(|c| c == "lakers7"));
        assert!(list.candidates.iter().any(|c| c == "lakers7!"));
    }

    #[test]
    fn empty_record_still_reaches_every_target() {
        let mut rng = StdRng::seed_from_u64(1);
        let generator = WordlistGenerator::new(FactRecord::new());
        for target in [0, 1, 1000] {
            let list = generator.generate(target, &mut rng);
            assert_exact_unique(&list.candidates, target);
            assert_eq!(list.summary.base_count, 0);
        }
    }

    #[test]
    fn stage_sizes_never_shrink_before_truncation() {
        let mut rng = StdRng::seed_from_u64(3);
        let list = WordlistGenerator::new(FactRecord::new().with("pet", "rex")).generate(5_000, &mut rng);
        let sizes: Vec<usize> = list
            .summary
            .stages
            .iter()
            .filter(|(name, _)| name != "truncate" && name != "pass-through")
            .map(|(_, n)| *n)
            .collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]), "{:?}", list.summary.stages);
        assert_eq!(list.summary.stages.last().map(|(_, n)| *n), Some(5_000));
    }

    #[test]
    fn one_million_from_scenario() {
        let mut rng = StdRng::seed_from_u64(1_000_000);
        let list = WordlistGenerator::new(scenario()).generate(1_000_000, &mut rng);
        assert_exact_unique(&list.candidates, 1_000_000);
    }
}
