// src/generators/leet.rs
use rand::seq::SliceRandom;
use rand::Rng;

use super::facts::capitalize;

// Substitutions used when building token variations
const LEET_MAP: &[(char, &[char])] = &[
    ('a', &['@', '4']),
    ('e', &['3', '€']),
    ('i', &['1', '!']),
    ('o', &['0']),
    ('s', &['5', '$']),
    ('t', &['7']),
    ('l', &['1']),
    ('g', &['9']),
    ('b', &['8']),
    ('z', &['2']),
];

// Single substitution per letter, used on whole candidates
const SIMPLE_LEET: &[(char, char)] = &[
    ('a', '@'),
    ('e', '3'),
    ('i', '1'),
    ('o', '0'),
    ('s', '$'),
    ('t', '7'),
];

const MAX_LEET_VARIANTS: usize = 3;
pub const LEET_PROBABILITY: f64 = 0.3;

fn leet_choices(c: char) -> Option<&'static [char]> {
    LEET_MAP.iter().find(|(k, _)| *k == c).map(|(_, v)| *v)
}

fn simple_leet(c: char) -> Option<char> {
    let lower = c.to_ascii_lowercase();
    SIMPLE_LEET.iter().find(|(k, _)| *k == lower).map(|(_, v)| *v)
}

/// Superficial variations of a token: as given, lower, upper, capitalized and
/// up to three leet spellings.
pub fn variations<R: Rng + ?Sized>(token: &str, rng: &mut R) -> Vec<String> {
    if token.is_empty() {
        return Vec::new();
    }

    let mut out = vec![
        token.to_string(),
        token.to_lowercase(),
        token.to_uppercase(),
        capitalize(token),
    ];

    let lower: Vec<char> = token.to_lowercase().chars().collect();
    let variants = MAX_LEET_VARIANTS.min(lower.len());
    for _ in 0..variants {
        let mut chars = lower.clone();
        for _ in 0..rng.gen_range(1..=3) {
            let idx = rng.gen_range(0..chars.len());
            if let Some(choice) = leet_choices(chars[idx]).and_then(|c| c.choose(rng)) {
                chars[idx] = *choice;
            }
        }
        out.push(chars.into_iter().collect());
    }

    out
}

/// Expand every token into its variation family, keeping first-seen order.
pub fn expand_tokens<'a, I, R>(tokens: I, rng: &mut R) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
    R: Rng + ?Sized,
{
    let mut seen = std::collections::HashSet::new();
    let mut words = Vec::new();
    for token in tokens {
        for word in variations(token, rng) {
            if seen.insert(word.clone()) {
                words.push(word);
            }
        }
    }
    words
}

/// Independently substitute each eligible character with probability `p`.
pub fn random_leet<R: Rng + ?Sized>(candidate: &str, p: f64, rng: &mut R) -> String {
    candidate
        .chars()
        .map(|c| match simple_leet(c) {
            Some(sub) if rng.gen_bool(p) => sub,
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_variation_of(variant: &str, token: &str) -> bool {
        if variant == token
            || variant == token.to_lowercase()
            || variant == token.to_uppercase()
            || variant == capitalize(token)
        {
            return true;
        }
        let lower: Vec<char> = token.to_lowercase().chars().collect();
        let candidate: Vec<char> = variant.chars().collect();
        if lower.len() != candidate.len() {
            return false;
        }
        let mut changed = 0;
        for (orig, got) in lower.iter().zip(&candidate) {
            if orig == got {
                continue;
            }
            match leet_choices(*orig) {
                Some(choices) if choices.contains(got) => changed += 1,
                _ => return false,
            }
        }
        changed <= 3
    }

    #[test]
    fn variations_belong_to_the_family() {
        let mut rng = StdRng::seed_from_u64(11);
        for token in ["Lakers", "password", "x", "1990"] {
            let family = variations(token, &mut rng);
            assert_eq!(family.len(), 4 + MAX_LEET_VARIANTS.min(token.chars().count()));
            assert_eq!(family[0], token);
            for variant in &family {
                assert!(is_variation_of(variant, token), "{variant} from {token}");
            }
        }
    }

    #[test]
    fn digits_have_no_leet_spelling() {
        let mut rng = StdRng::seed_from_u64(3);
        let family = variations("1990", &mut rng);
        assert!(family.iter().all(|v| v == "1990"));
    }

    #[test]
    fn expanded_tokens_are_unique() {
        let mut rng = StdRng::seed_from_u64(5);
        let tokens: Vec<String> = vec!["john".into(), "John".into(), "1990".into()];
        let words = expand_tokens(&tokens, &mut rng);
        let unique: std::collections::HashSet<_> = words.iter().collect();
        assert_eq!(unique.len(), words.len());
        assert_eq!(words[0], "john");
        assert!(words.contains(&"JOHN".to_string()));
    }

    #[test]
    fn random_leet_respects_probability_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_leet("Toast", 0.0, &mut rng), "Toast");
        assert_eq!(random_leet("Toast", 1.0, &mut rng), "70@$7");
        assert_eq!(random_leet("xyz", 1.0, &mut rng), "xyz");
    }

    #[test]
    fn constant_randomness_still_yields_valid_family() {
        let mut rng = StepRng::new(0, 0);
        let family = variations("bag", &mut rng);
        assert!(family.iter().all(|v| is_variation_of(v, "bag")));
    }
}
