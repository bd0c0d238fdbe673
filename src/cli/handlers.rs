// src/cli/handlers.rs
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::core::config::Config;
use crate::generators::{validate_target, WordlistGenerator};
use crate::models::{target_for_choice, FactRecord, GenerationSummary, WordlistFile, FIELDS};
use crate::utils::{format_count, format_modified, truncate_string};
use crate::wordlists::{ViewMode, WordlistStore, WordlistView};

pub const PREVIEW_LINES: usize = 10;

// Seeded runs are reproducible, unseeded ones draw from the OS
pub fn make_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

pub fn load_facts(path: &Path) -> Result<FactRecord, Box<dyn Error>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read facts file {}: {}", path.display(), e))?;
    let record: FactRecord = serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid facts file {}: {}", path.display(), e))?;
    for unknown in record.unknown_fields() {
        log::warn!("Ignoring unknown field '{}' in {}", unknown, path.display());
    }
    Ok(record)
}

/// Fill blank fields with the prompt defaults.
pub fn apply_defaults(mut record: FactRecord) -> FactRecord {
    for spec in FIELDS {
        if let (None, Some(default)) = (record.get(spec.name), spec.default) {
            record.set(spec.name, default);
        }
    }
    record
}

/// Pick the target from an exact count, a size menu option, or the config default.
pub fn resolve_target(config: &Config, size: Option<&str>, count: Option<i64>) -> Result<usize, Box<dyn Error>> {
    let requested = match (count, size) {
        (Some(count), _) => count,
        (None, Some(choice)) => target_for_choice(choice) as i64,
        (None, None) => config.default_target as i64,
    };
    Ok(validate_target(requested, config.max_target)?)
}

pub fn handle_generate(
    config: &Config,
    store: &WordlistStore,
    facts: FactRecord,
    target: usize,
    seed: Option<u64>,
) -> Result<(GenerationSummary, Vec<String>), Box<dyn Error>> {
    if facts.is_empty() {
        log::warn!("No facts supplied, candidates will be synthetic");
    }
    let mut rng = make_rng(seed);
    let generator = WordlistGenerator::new(facts).with_budget(config.expansion_budget());
    let wordlist = generator.generate(target, &mut rng);

    let mut summary = wordlist.summary;
    let path = store.save(&summary.subject, target, &wordlist.candidates)?;
    summary.output = Some(path);

    Ok((summary, wordlist.candidates))
}

pub fn handle_view(
    store: &WordlistStore,
    file: &str,
    mode: ViewMode,
    seed: Option<u64>,
) -> Result<(PathBuf, WordlistView), Box<dyn Error>> {
    let path = store.resolve(file)?;
    let mut rng = make_rng(seed);
    let view = store.view(&path, mode, &mut rng)?;
    Ok((path, view))
}

pub fn handle_delete(store: &WordlistStore, file: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = store.resolve(file)?;
    store.delete(&path)?;
    Ok(path)
}

pub fn print_summary(summary: &GenerationSummary, candidates: &[String]) {
    println!(
        "\n{} Generated EXACTLY {} personal passwords",
        style("✅").green(),
        format_count(summary.generated)
    );
    if let Some(path) = &summary.output {
        println!("{} File: {}", style("✅").green(), path.display());
    }
    println!(
        "{} Time: {:.2} seconds ({:.2} minutes)",
        style("✅").green(),
        summary.elapsed_secs,
        summary.elapsed_secs / 60.0
    );
    println!("{} Speed: {:.0} passwords/second", style("✅").green(), summary.rate());
    println!(
        "   Words: {} | Variations: {} | Base combinations: {}",
        format_count(summary.token_count),
        format_count(summary.variation_count),
        format_count(summary.base_count)
    );

    println!("\n📋 Sample passwords (first {}):", PREVIEW_LINES);
    println!("{}", "-".repeat(30));
    for (i, candidate) in candidates.iter().take(PREVIEW_LINES).enumerate() {
        println!("   {:2}. {}", i + 1, candidate);
    }
    if candidates.len() > PREVIEW_LINES {
        println!("   ... and {} more!", format_count(candidates.len() - PREVIEW_LINES));
    }
}

pub fn describe_file(index: usize, file: &WordlistFile) -> String {
    let lines = file
        .line_count
        .map(format_count)
        .unwrap_or_else(|| "Unknown".to_string());
    format!(
        "{:2}. {} | {} bytes | {} lines | {}",
        index + 1,
        truncate_string(&file.file_name, 48),
        format_count(file.size_bytes as usize),
        lines,
        format_modified(&file.modified)
    )
}

pub fn print_files(store: &WordlistStore, files: &[WordlistFile]) {
    if files.is_empty() {
        println!("{} No wordlist files found in '{}'.", style("[!]").yellow(), store.output_dir().display());
        println!("{} Generate some wordlists first!", style("[!]").yellow());
        return;
    }
    println!("Found {} wordlist(s):\n", files.len());
    for (i, file) in files.iter().enumerate() {
        println!("  {}", describe_file(i, file));
    }
}

pub fn print_view(path: &Path, mode: ViewMode, view: &WordlistView) {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    match mode {
        ViewMode::Head(n) => println!("\nFirst {} lines of {}:\n", n, name),
        ViewMode::All => println!("\nALL lines of {}:\n", name),
        ViewMode::Sample(n) if view.total > n => println!("\nRandom {} lines from {}:\n", n, name),
        ViewMode::Sample(_) => println!("\nAll {} lines from {}:\n", view.lines.len(), name),
    }
    for (i, line) in view.lines.iter().enumerate() {
        println!("{:6}. {}", i + 1, line);
    }
    if matches!(mode, ViewMode::Head(_)) && view.remaining() > 0 {
        println!("\n... and {} more lines!", format_count(view.remaining()));
    }
}
