use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::board::LayoutConfig;

pub const DEFAULT_PORTRAIT_SIZE: f32 = 100.0;

const DEMO_NAMES: [&str; 9] = [
    "Alma", "Bruno", "Clara", "Dmitri", "Elif", "Farid", "Greta", "Hiro", "Ines",
];

#[derive(Clone, Debug, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub portrait_size: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRosterEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        portrait_size: Option<f32>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub portrait_size: f32,
    pub layout: LayoutConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            portrait_size: DEFAULT_PORTRAIT_SIZE,
            layout: LayoutConfig::default(),
        }
    }
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("invalid settings JSON in {}", path.display()))?;

    ensure!(
        settings.portrait_size.is_finite() && settings.portrait_size > 0.0,
        "portrait_size must be positive, got {}",
        settings.portrait_size
    );
    let layout = &settings.layout;
    ensure!(
        layout.time_step.is_finite() && layout.time_step > 0.0,
        "layout.time_step must be positive"
    );
    ensure!(
        layout.resistance.is_finite() && (0.0..=1.0).contains(&layout.resistance),
        "layout.resistance must lie in [0, 1]"
    );
    Ok(settings)
}

pub fn load_roster(path: &Path, default_size: f32) -> Result<Vec<RosterEntry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file {}", path.display()))?;
    parse_roster(&raw, default_size)
        .with_context(|| format!("failed to parse roster file {}", path.display()))
}

pub fn parse_roster(raw: &str, default_size: f32) -> Result<Vec<RosterEntry>> {
    let entries: Vec<RawRosterEntry> =
        serde_json::from_str(raw).context("roster must be a JSON array")?;

    let roster = entries
        .into_iter()
        .map(|entry| match entry {
            RawRosterEntry::Name(name) => (name, None),
            RawRosterEntry::Detailed {
                name,
                portrait_size,
            } => (name, portrait_size),
        })
        .map(|(name, size)| build_entry(name, size.unwrap_or(default_size)))
        .collect::<Result<Vec<_>>>()?;

    validate(roster)
}

pub fn roster_from_names(names: &str, portrait_size: f32) -> Result<Vec<RosterEntry>> {
    let roster = names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| build_entry(name.to_owned(), portrait_size))
        .collect::<Result<Vec<_>>>()?;

    validate(roster)
}

pub fn demo_roster(portrait_size: f32) -> Vec<RosterEntry> {
    DEMO_NAMES
        .iter()
        .map(|name| RosterEntry {
            name: (*name).to_owned(),
            portrait_size,
        })
        .collect()
}

fn build_entry(name: String, portrait_size: f32) -> Result<RosterEntry> {
    let name = name.trim().to_owned();
    if name.is_empty() {
        bail!("roster contains an empty name");
    }
    if !portrait_size.is_finite() || portrait_size <= 0.0 {
        return Err(anyhow!(
            "portrait size for {name} must be positive, got {portrait_size}"
        ));
    }
    Ok(RosterEntry {
        name,
        portrait_size,
    })
}

fn validate(roster: Vec<RosterEntry>) -> Result<Vec<RosterEntry>> {
    ensure!(!roster.is_empty(), "roster is empty");

    let mut names = roster.iter().map(|entry| &entry.name).collect::<Vec<_>>();
    names.sort();
    if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
        bail!("duplicate character name {}", pair[0]);
    }
    Ok(roster)
}
