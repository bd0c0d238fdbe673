// src/wordlists/mod.rs
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::models::WordlistFile;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Could not move wordlist into place: {0}")]
    PersistError(#[from] tempfile::PersistError),

    #[error("Wordlist not found: {0}")]
    NotFound(String),

    #[error("Not a wordlist file: {0}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

const EXTENSION: &str = "txt";

/// How much of a wordlist to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Head(usize),
    All,
    Sample(usize),
}

/// Lines picked for display plus the file's total.
#[derive(Debug, Clone)]
pub struct WordlistView {
    pub lines: Vec<String>,
    pub total: usize,
}

impl WordlistView {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.lines.len())
    }
}

/// `{subject}_{target}_{YYYYMMDD_HHMMSS}.txt`
pub fn wordlist_file_name(subject: &str, target: usize, at: DateTime<Local>) -> String {
    let subject = if subject.trim().is_empty() { "target" } else { subject.trim() };
    let subject: String = subject
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{}_{}_{}.{}", subject, target, at.format("%Y%m%d_%H%M%S"), EXTENSION)
}

/// `name.txt` becomes `name_{serial}.txt`.
fn with_serial(name: &str, serial: usize) -> String {
    let stem = name.strip_suffix(&format!(".{EXTENSION}")).unwrap_or(name);
    format!("{stem}_{serial}.{EXTENSION}")
}

pub struct WordlistStore {
    output_dir: PathBuf,
}

impl WordlistStore {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn ensure_dir(&self) -> io::Result<()> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir)?;
            log::info!("Created output directory {}", self.output_dir.display());
        }
        Ok(())
    }

    /// Write candidates one per line. The file appears under its final name
    /// only once fully written, and never replaces an existing wordlist: a
    /// name taken within the same second gets a `_1`, `_2`, ... suffix.
    pub fn save(&self, subject: &str, target: usize, candidates: &[String]) -> Result<PathBuf> {
        self.ensure_dir()?;
        let name = wordlist_file_name(subject, target, Local::now());

        let mut tmp = tempfile::Builder::new()
            .prefix(".wordforge-")
            .suffix(".partial")
            .tempfile_in(&self.output_dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            for candidate in candidates {
                writer.write_all(candidate.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        let mut serial = 0;
        let path = loop {
            let path = match serial {
                0 => self.output_dir.join(&name),
                n => self.output_dir.join(with_serial(&name, n)),
            };
            match tmp.persist_noclobber(&path) {
                Ok(_) => break path,
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("{} already exists, trying the next suffix", path.display());
                    tmp = e.file;
                    serial += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };

        log::info!("Saved {} candidates to {}", candidates.len(), path.display());
        Ok(path)
    }

    /// Wordlists in the output directory, newest first.
    pub fn list(&self) -> Result<Vec<WordlistFile>> {
        if !self.output_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.output_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !is_wordlist(&path) {
                continue;
            }
            let metadata = entry.metadata()?;
            let modified: DateTime<Local> = metadata.modified()?.into();
            files.push(WordlistFile {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                size_bytes: metadata.len(),
                line_count: count_lines(&path).ok(),
                modified,
                path,
            });
        }

        files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.file_name.cmp(&b.file_name)));
        Ok(files)
    }

    /// Accepts a bare file name (looked up in the output directory) or a path.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let direct = PathBuf::from(name);
        let path = if direct.components().count() == 1 {
            self.output_dir.join(&direct)
        } else {
            direct
        };
        if !is_wordlist(&path) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        if !path.is_file() {
            return Err(StoreError::NotFound(path.display().to_string()));
        }
        Ok(path)
    }

    pub fn view<R: Rng + ?Sized>(&self, path: &Path, mode: ViewMode, rng: &mut R) -> Result<WordlistView> {
        let reader = BufReader::new(open(path)?);
        match mode {
            ViewMode::Head(n) => {
                let mut lines = Vec::with_capacity(n);
                let mut total = 0;
                for line in reader.lines() {
                    let line = line?;
                    if total < n {
                        lines.push(line.trim().to_string());
                    }
                    total += 1;
                }
                Ok(WordlistView { lines, total })
            }
            ViewMode::All => {
                let lines = reader
                    .lines()
                    .map(|l| l.map(|l| l.trim().to_string()))
                    .collect::<io::Result<Vec<_>>>()?;
                let total = lines.len();
                Ok(WordlistView { lines, total })
            }
            ViewMode::Sample(n) => {
                let all = reader
                    .lines()
                    .map(|l| l.map(|l| l.trim().to_string()))
                    .collect::<io::Result<Vec<_>>>()?;
                let total = all.len();
                let lines = if total > n {
                    all.choose_multiple(rng, n).cloned().collect()
                } else {
                    all
                };
                Ok(WordlistView { lines, total })
            }
        }
    }

    pub fn delete(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(StoreError::NotFound(path.display().to_string()));
        }
        fs::remove_file(path)?;
        log::info!("Deleted wordlist {}", path.display());
        Ok(())
    }
}

fn is_wordlist(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == EXTENSION)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(path.display().to_string()),
        _ => StoreError::IoError(e),
    })
}

pub fn count_lines(path: &Path) -> Result<usize> {
    let reader = BufReader::new(open(path)?);
    let mut count = 0;
    for line in reader.lines() {
        line?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    #[test]
    fn file_name_embeds_subject_target_and_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(wordlist_file_name("john", 1000, at), "john_1000_20240309_070501.txt");
        assert_eq!(wordlist_file_name("", 50, at), "target_50_20240309_070501.txt");
        assert_eq!(wordlist_file_name("Mary Ann/x", 5, at), "mary_ann_x_5_20240309_070501.txt");
    }

    #[test]
    fn save_writes_newline_terminated_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordlistStore::new(dir.path().join("out"));
        let path = store.save("john", 3, &words(3)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "word0\nword1\nword2\n");
        let leftovers: Vec<_> = fs::read_dir(store.output_dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn back_to_back_saves_keep_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordlistStore::new(dir.path().to_path_buf());
        let first = store.save("john", 2, &["first1".to_string(), "first2".to_string()]).unwrap();
        let second = store.save("john", 2, &["second1".to_string(), "second2".to_string()]).unwrap();

        assert_ne!(first, second);
        assert_eq!(store.list().unwrap().len(), 2);
        assert_eq!(fs::read_to_string(&first).unwrap(), "first1\nfirst2\n");
        assert_eq!(fs::read_to_string(&second).unwrap(), "second1\nsecond2\n");
    }

    #[test]
    fn serial_goes_before_the_extension() {
        assert_eq!(with_serial("john_2_20240309_070501.txt", 1), "john_2_20240309_070501_1.txt");
        assert_eq!(with_serial("odd", 3), "odd_3.txt");
    }

    #[test]
    fn list_reports_only_wordlists() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordlistStore::new(dir.path().to_path_buf());
        assert!(store.list().unwrap().is_empty());

        store.save("ann", 4, &words(4)).unwrap();
        fs::write(dir.path().join("notes.md"), "ignore me").unwrap();

        let files = store.list().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].file_name.starts_with("ann_4_"));
        assert_eq!(files[0].line_count, Some(4));
        assert_eq!(files[0].size_bytes, 24);
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordlistStore::new(dir.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn view_modes() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordlistStore::new(dir.path().to_path_buf());
        let path = store.save("bob", 50, &words(50)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let head = store.view(&path, ViewMode::Head(10), &mut rng).unwrap();
        assert_eq!(head.lines, words(10));
        assert_eq!(head.total, 50);
        assert_eq!(head.remaining(), 40);

        let all = store.view(&path, ViewMode::All, &mut rng).unwrap();
        assert_eq!(all.lines.len(), 50);

        let sample = store.view(&path, ViewMode::Sample(20), &mut rng).unwrap();
        assert_eq!(sample.lines.len(), 20);
        assert!(sample.lines.iter().all(|l| words(50).contains(l)));

        let small = store.save("tiny", 5, &words(5)).unwrap();
        let sample = store.view(&small, ViewMode::Sample(20), &mut rng).unwrap();
        assert_eq!(sample.lines, words(5));
    }

    #[test]
    fn resolve_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordlistStore::new(dir.path().to_path_buf());
        let path = store.save("eve", 2, &words(2)).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        assert_eq!(store.resolve(&name).unwrap(), path);
        assert!(matches!(store.resolve("nope.txt"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.resolve("notes.md"), Err(StoreError::InvalidName(_))));

        store.delete(&path).unwrap();
        assert!(!path.exists());
        assert!(matches!(store.delete(&path), Err(StoreError::NotFound(_))));
    }
}
