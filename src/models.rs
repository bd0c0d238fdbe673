// src/models.rs
use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// How a field's value is turned into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single value, lowercase and capitalized forms.
    Scalar,
    /// Comma separated values, each item gets lowercase and capitalized forms.
    CommaList,
    /// Digit groups: full run, year, short year, DDMM/YYYY split.
    Date,
    /// Trailing digit groups of a phone number.
    Phone,
    /// Lowercase only (usernames, email local parts).
    Handle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Identity,
    Relations,
    Dates,
    Location,
    Affiliations,
    Interests,
    Occupation,
    Vehicles,
    Contact,
    Favorites,
}

impl FieldCategory {
    pub fn title(&self) -> &'static str {
        match self {
            FieldCategory::Identity => "Basic personal info",
            FieldCategory::Relations => "Family & important people",
            FieldCategory::Dates => "Dates",
            FieldCategory::Location => "Location",
            FieldCategory::Affiliations => "Sports & Teams",
            FieldCategory::Interests => "Hobbies & Interests",
            FieldCategory::Occupation => "Work & Education",
            FieldCategory::Vehicles => "Vehicles",
            FieldCategory::Contact => "Contact info",
            FieldCategory::Favorites => "Favorites",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub category: FieldCategory,
    pub kind: FieldKind,
    pub default: Option<&'static str>,
}

const fn field(
    name: &'static str,
    label: &'static str,
    category: FieldCategory,
    kind: FieldKind,
    default: Option<&'static str>,
) -> FieldSpec {
    FieldSpec { name, label, category, kind, default }
}

// Every recognized fact, in prompt order
pub const FIELDS: &[FieldSpec] = &[
    field("name", "First Name", FieldCategory::Identity, FieldKind::Scalar, Some("John")),
    field("surname", "Last Name", FieldCategory::Identity, FieldKind::Scalar, Some("Doe")),
    field("nick", "Nicknames (comma)", FieldCategory::Identity, FieldKind::CommaList, Some("johnny,jd")),
    field("spouse", "Spouse/Partner", FieldCategory::Relations, FieldKind::Scalar, None),
    field("child", "Children names", FieldCategory::Relations, FieldKind::Scalar, None),
    field("pet", "Pet names", FieldCategory::Relations, FieldKind::Scalar, None),
    field("mother", "Mother's name", FieldCategory::Relations, FieldKind::Scalar, None),
    field("father", "Father's name", FieldCategory::Relations, FieldKind::Scalar, None),
    field("birth", "Birth date (YYYY)", FieldCategory::Dates, FieldKind::Date, Some("1990")),
    field("anniversary", "Anniversary date", FieldCategory::Dates, FieldKind::Date, None),
    field("city", "City", FieldCategory::Location, FieldKind::Scalar, Some("London")),
    field("country", "Country", FieldCategory::Location, FieldKind::Scalar, Some("UK")),
    field("team", "Favorite Team", FieldCategory::Affiliations, FieldKind::CommaList, Some("lakers")),
    field("player", "Favorite Player", FieldCategory::Affiliations, FieldKind::CommaList, None),
    field("sport", "Favorite Sport", FieldCategory::Affiliations, FieldKind::CommaList, Some("football")),
    field("hobby", "Hobbies (comma)", FieldCategory::Interests, FieldKind::CommaList, Some("gaming,reading")),
    field("job", "Job/Profession", FieldCategory::Occupation, FieldKind::Scalar, None),
    field("company", "Company name", FieldCategory::Occupation, FieldKind::Scalar, None),
    field("school", "High School", FieldCategory::Occupation, FieldKind::Scalar, None),
    field("university", "University", FieldCategory::Occupation, FieldKind::Scalar, None),
    field("car", "Car model", FieldCategory::Vehicles, FieldKind::Scalar, None),
    field("bike", "Bike/Motorcycle", FieldCategory::Vehicles, FieldKind::Scalar, None),
    field("phone", "Phone Number", FieldCategory::Contact, FieldKind::Phone, Some("1234567890")),
    field("email_local", "Email (before @)", FieldCategory::Contact, FieldKind::Handle, None),
    field("favorite", "Other favorites (comma)", FieldCategory::Favorites, FieldKind::CommaList, Some("password,secret")),
];

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Biographical facts about the subject. Nothing is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactRecord {
    fields: BTreeMap<String, String>,
}

impl FactRecord {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }

    /// Names present in the record that no field spec recognizes.
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.fields
            .keys()
            .filter(|k| field_spec(k).is_none())
            .map(|k| k.as_str())
            .collect()
    }

    /// Lowercased first name used in output file names.
    pub fn subject_name(&self) -> String {
        self.get("name")
            .map(|n| n.to_lowercase())
            .unwrap_or_else(|| "target".to_string())
    }
}

/// Wordlist sizes offered by the size menu.
pub const TARGET_SIZES: [usize; 8] = [
    1_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000,
];

pub const DEFAULT_TARGET_SIZE: usize = 50_000;

/// Map a 1-based menu choice to a size; anything else falls back to 50,000.
pub fn target_for_choice(choice: &str) -> usize {
    choice
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| TARGET_SIZES.get(idx).copied())
        .unwrap_or(DEFAULT_TARGET_SIZE)
}

/// A wordlist found in the output directory.
#[derive(Debug, Clone, Serialize)]
pub struct WordlistFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub line_count: Option<usize>,
    pub modified: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub subject: String,
    pub target: usize,
    pub generated: usize,
    pub token_count: usize,
    pub variation_count: usize,
    pub base_count: usize,
    pub stages: Vec<(String, usize)>,
    pub elapsed_secs: f64,
    pub output: Option<PathBuf>,
}

impl GenerationSummary {
    pub fn rate(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.generated as f64 / self.elapsed_secs
        } else {
            self.generated as f64
        }
    }
}
