// src/cli/menu.rs
use inquire::error::InquireResult;
use inquire::{Confirm, InquireError, Select, Text};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use std::thread;

use console::{style, Term};

use crate::cli::handlers::{self, describe_file};
use crate::core::config::Config;
use crate::models::{target_for_choice, FactRecord, FIELDS, TARGET_SIZES};
use crate::utils::format_count;
use crate::wordlists::{ViewMode, WordlistStore};

const GENERATE: &str = "1️⃣  Generate Personal Wordlist";
const VIEW: &str = "2️⃣  View/Manage Existing Wordlists";
const EXIT: &str = "3️⃣  Exit Program";
const BACK: &str = "⬅️  Back";

pub const INTERRUPTED: &str = "\n\n[!] Process interrupted by user";

const SIZE_LABELS: [&str; 8] = [
    "Quick test", "Small", "Medium", "Large  ← RECOMMENDED", "Huge", "Massive", "Insane", "Extreme",
];

fn banner() {
    let _ = Term::stdout().clear_screen();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              🔥 W O R D F O R G E 🔥                     ║");
    println!("║        Exact Count Wordlist Generator + Viewer           ║");
    println!("╚══════════════════════════════════════════════════════════╝");
}

fn pause() -> InquireResult<()> {
    or_back(Text::new("Press enter to continue...").prompt()).map(|_| ())
}

/// How the menu reacts to a failed prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptExit {
    /// Ctrl+C inside a prompt: leave the program.
    Interrupted,
    /// Esc: go back one level.
    Back,
    Failed,
}

fn classify(err: &(dyn Error + 'static)) -> PromptExit {
    match err.downcast_ref::<InquireError>() {
        Some(InquireError::OperationInterrupted) => PromptExit::Interrupted,
        Some(InquireError::OperationCanceled) => PromptExit::Back,
        _ => PromptExit::Failed,
    }
}

/// Esc becomes `None`, every other prompt failure is passed up.
fn or_back<T>(result: InquireResult<T>) -> InquireResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn run_cli_menu(config: &Config, store: &WordlistStore) -> Result<(), Box<dyn Error>> {
    match main_menu(config, store) {
        Err(e) if classify(&*e) == PromptExit::Interrupted => {
            log::info!("Ctrl+C inside a prompt, leaving the menu");
            println!("{}", INTERRUPTED);
            Ok(())
        }
        other => other,
    }
}

fn main_menu(config: &Config, store: &WordlistStore) -> Result<(), Box<dyn Error>> {
    loop {
        banner();
        println!("📋 MAIN MENU\n");

        let Some(choice) = or_back(Select::new("Select option:", vec![GENERATE, VIEW, EXIT]).prompt())? else {
            continue;
        };
        match choice {
            GENERATE => {
                if let Err(e) = generate_wordlist(config, store) {
                    match classify(&*e) {
                        PromptExit::Interrupted => return Err(e),
                        PromptExit::Back => {}
                        PromptExit::Failed => {
                            println!("{} Error: {}", style("[!]").red(), e);
                            log::error!("Generation failed: {}", e);
                            pause()?;
                        }
                    }
                }
            }
            VIEW => view_wordlists(config, store)?,
            EXIT => {
                banner();
                println!("\n👋 Thank you for using WordForge!");
                println!("   Stay secure! 🔒\n");
                return Ok(());
            }
            _ => {
                println!("{} Invalid choice.", style("[!]").yellow());
                thread::sleep(Duration::from_secs(1));
            }
        }
    }
}

fn collect_facts() -> Result<FactRecord, Box<dyn Error>> {
    println!(">>> PERSONAL INFORMATION COLLECTION\n");
    println!("📝 Enter target's personal details (leave blank if unknown)");
    println!("{}", "-".repeat(50));

    let mut record = FactRecord::new();
    let mut section = None;
    for spec in FIELDS {
        if section != Some(spec.category) {
            section = Some(spec.category);
            println!("\n{}", style(spec.category.title()).bold());
        }
        let mut prompt = Text::new(spec.label);
        if let Some(default) = spec.default {
            prompt = prompt.with_default(default);
        }
        let value = prompt.prompt()?;
        record.set(spec.name, value.trim());
    }
    Ok(record)
}

fn choose_target(config: &Config) -> Result<usize, Box<dyn Error>> {
    println!("\n{}", "=".repeat(50));
    println!("📊 WORDLIST SIZE OPTIONS");
    println!("{}\n", "=".repeat(50));
    for (i, (size, label)) in TARGET_SIZES.iter().zip(SIZE_LABELS).enumerate() {
        println!("   {}) {:<10} ({})", i + 1, format_count(*size), label);
    }
    println!("{}", "-".repeat(43));

    let choice = Text::new("Select option (1-8):").with_default("4").prompt()?;
    let valid = choice.trim().parse::<usize>().map_or(false, |n| (1..=TARGET_SIZES.len()).contains(&n));
    if !valid {
        println!("{} Invalid choice. Defaulting to 50,000", style("[!]").yellow());
    }

    let target = target_for_choice(&choice);
    if target > config.max_target {
        println!(
            "{} {} exceeds the configured maximum, using {}",
            style("[!]").yellow(),
            format_count(target),
            format_count(config.max_target)
        );
        return Ok(config.max_target);
    }
    Ok(target)
}

fn generate_wordlist(config: &Config, store: &WordlistStore) -> Result<(), Box<dyn Error>> {
    banner();
    let facts = collect_facts()?;
    let target = choose_target(config)?;

    println!("\n[+] Generating EXACTLY {} personal passwords...", format_count(target));
    println!("[+] Based on target's personal information...");

    let (summary, candidates) = handlers::handle_generate(config, store, facts, target, None)?;
    handlers::print_summary(&summary, &candidates);

    println!("\n🔥 WORDFORGE - Personal Wordlist Complete!");
    pause()?;
    Ok(())
}

fn view_wordlists(config: &Config, store: &WordlistStore) -> Result<(), Box<dyn Error>> {
    loop {
        banner();
        println!("📁 WORDLIST VIEWER\n");

        let files = store.list()?;
        handlers::print_files(store, &files);
        if files.is_empty() {
            pause()?;
            return Ok(());
        }

        let mut options: Vec<String> = files.iter().enumerate().map(|(i, f)| describe_file(i, f)).collect();
        options.push(BACK.to_string());

        let Some(selection) = or_back(
            Select::new("Select a wordlist to view:", options.clone())
                .with_page_size(20)
                .prompt(),
        )?
        else {
            return Ok(());
        };
        let Some(idx) = options.iter().position(|o| o == &selection).filter(|i| *i < files.len()) else {
            return Ok(());
        };

        match view_file(config, store, files[idx].path.clone())? {
            FileAction::BackToList => continue,
            FileAction::MainMenu => return Ok(()),
        }
    }
}

enum FileAction {
    BackToList,
    MainMenu,
}

const VIEW_OPTIONS: [(&str, Option<ViewMode>); 7] = [
    ("First 10 lines", Some(ViewMode::Head(10))),
    ("First 50 lines", Some(ViewMode::Head(50))),
    ("First 100 lines", Some(ViewMode::Head(100))),
    ("First 500 lines", Some(ViewMode::Head(500))),
    ("View all lines (may be slow for large files)", Some(ViewMode::All)),
    ("Random sample", None),
    ("Go back", None),
];

const VIEW_MORE: &str = "View more lines";
const DELETE: &str = "Delete this file";
const BACK_TO_LIST: &str = "Back to file list";
const MAIN_MENU: &str = "Main menu";

fn view_file(config: &Config, store: &WordlistStore, path: PathBuf) -> Result<FileAction, Box<dyn Error>> {
    loop {
        banner();
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        println!("📄 VIEWING: {}\n", name);
        println!("File: {}", path.display());

        let labels: Vec<&str> = VIEW_OPTIONS.iter().map(|(label, _)| *label).collect();
        let Some(choice) = or_back(Select::new("How many lines would you like to see?", labels).prompt())? else {
            return Ok(FileAction::BackToList);
        };
        let mode = match VIEW_OPTIONS.iter().find(|(label, _)| *label == choice) {
            Some((_, Some(mode))) => *mode,
            Some(("Random sample", None)) => ViewMode::Sample(config.sample_size),
            _ => return Ok(FileAction::BackToList),
        };

        match handlers::handle_view(store, &path.to_string_lossy(), mode, None) {
            Ok((path, view)) => handlers::print_view(&path, mode, &view),
            Err(e) => println!("{} Error reading file: {}", style("[!]").red(), e),
        }
        println!("\n{}", "=".repeat(50));

        let op = or_back(Select::new("📋 FILE OPERATIONS:", vec![VIEW_MORE, DELETE, BACK_TO_LIST, MAIN_MENU]).prompt())?
            .unwrap_or(BACK_TO_LIST);
        match op {
            VIEW_MORE => continue,
            DELETE => {
                let confirm = or_back(
                    Confirm::new(&format!("⚠️  DELETE '{}'? This cannot be undone!", name))
                        .with_default(false)
                        .prompt(),
                )?;
                if confirm != Some(true) {
                    continue;
                }
                match handlers::handle_delete(store, &path.to_string_lossy()) {
                    Ok(_) => println!("{} File '{}' deleted successfully!", style("[✓]").green(), name),
                    Err(e) => println!("{} Error deleting file: {}", style("[!]").red(), e),
                }
                pause()?;
                return Ok(FileAction::BackToList);
            }
            MAIN_MENU => return Ok(FileAction::MainMenu),
            _ => return Ok(FileAction::BackToList),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::StoreError;

    #[test]
    fn prompt_errors_map_to_menu_exits() {
        let interrupted: Box<dyn Error> = InquireError::OperationInterrupted.into();
        let canceled: Box<dyn Error> = InquireError::OperationCanceled.into();
        let missing: Box<dyn Error> = StoreError::NotFound("gone.txt".into()).into();
        let plain: Box<dyn Error> = "boom".into();

        assert_eq!(classify(&*interrupted), PromptExit::Interrupted);
        assert_eq!(classify(&*canceled), PromptExit::Back);
        assert_eq!(classify(&*missing), PromptExit::Failed);
        assert_eq!(classify(&*plain), PromptExit::Failed);
    }

    #[test]
    fn esc_goes_back_and_ctrl_c_is_passed_up() {
        assert_eq!(or_back(Ok(3)).unwrap(), Some(3));
        assert_eq!(or_back::<u8>(Err(InquireError::OperationCanceled)).unwrap(), None);
        assert!(matches!(
            or_back::<u8>(Err(InquireError::OperationInterrupted)),
            Err(InquireError::OperationInterrupted)
        ));
    }
}
