//! Per-day free-text notes.
//!
//! A single local notebook keyed by calendar date, stored as TOML in the
//! platform data dir. The file is read once when the notebook is opened and
//! written back on every change; there is no conflict handling because the
//! notebook is local to one user on one machine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{CalGridError, CalGridResult};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

pub struct NoteBook {
    path: PathBuf,
    notes: BTreeMap<NaiveDate, String>,
}

impl NoteBook {
    /// Open the notebook at the default location, creating an empty one if
    /// no file exists yet.
    pub fn open_default() -> CalGridResult<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine data directory".into()))?
            .join("calgrid");

        Self::open(data_dir.join("notes.toml"))
    }

    pub fn open(path: PathBuf) -> CalGridResult<Self> {
        let notes = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let stored: BTreeMap<String, String> =
                toml::from_str(&raw).map_err(|e| CalGridError::Serialization(e.to_string()))?;

            stored
                .into_iter()
                .filter_map(|(key, text)| {
                    match NaiveDate::parse_from_str(&key, DATE_KEY_FORMAT) {
                        Ok(date) => Some((date, text)),
                        Err(_) => {
                            tracing::warn!(key, "skipping note with unparsable date key");
                            None
                        }
                    }
                })
                .collect()
        } else {
            BTreeMap::new()
        };

        Ok(NoteBook { path, notes })
    }

    pub fn get(&self, date: NaiveDate) -> Option<&str> {
        self.notes.get(&date).map(String::as_str)
    }

    pub fn has_note(&self, date: NaiveDate) -> bool {
        self.notes.contains_key(&date)
    }

    /// Set the note for a day and write the notebook back. An empty (or
    /// whitespace-only) text removes the note.
    pub fn set(&mut self, date: NaiveDate, text: &str) -> CalGridResult<()> {
        if text.trim().is_empty() {
            self.notes.remove(&date);
        } else {
            self.notes.insert(date, text.to_string());
        }
        self.save()
    }

    fn save(&self) -> CalGridResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let stored: BTreeMap<String, &String> = self
            .notes
            .iter()
            .map(|(date, text)| (date.format(DATE_KEY_FORMAT).to_string(), text))
            .collect();

        let raw = toml::to_string_pretty(&stored)
            .map_err(|e| CalGridError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Path of the backing file (for display).
    pub fn path(&self) -> &Path {
        &self.path
    }
}
