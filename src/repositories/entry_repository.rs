// src/repositories/entry_repository.rs
//
// In-memory catalog
//
// RULES:
// - The collection is only mutated through these methods
// - Readers always get copies
// - Identity (title, creator, year; case-insensitive) is unique
// - A load replaces everything or nothing

use std::path::Path;

use crate::domain::{sort_entries, Entry, SortKey};
use crate::error::{AppError, AppResult};
use crate::serializers::{CsvSerializer, EntrySerializer, FileFormat, JsonSerializer};

pub trait EntryRepository: Send {
    /// False when an entry with the same identity is already stored
    fn add(&mut self, entry: Entry) -> bool;

    /// Replace `old` with `new` at the same position.
    ///
    /// Errors with `IdentityConflict` when `new` collides with a stored entry
    /// other than `old`, and with `NoChange` when only the identity fields
    /// were "edited". Returns false when `old` is not stored.
    fn edit(&mut self, old: &Entry, new: Entry) -> AppResult<bool>;

    fn remove(&mut self, entry: &Entry) -> bool;
    fn list(&self) -> Vec<Entry>;

    /// Case-insensitive substring match; no query or a blank one matches all
    fn find_by_title(&self, query: Option<&str>) -> Vec<Entry>;
    fn find_by_creator(&self, query: Option<&str>) -> Vec<Entry>;

    fn sort(&self, entries: &[Entry], key: Option<SortKey>) -> Vec<Entry>;

    fn unique_categories(&self) -> Vec<String>;
    fn unique_creators(&self) -> Vec<String>;
    fn unique_years(&self) -> Vec<String>;

    fn clear(&mut self);

    fn save_as(&self, path: &Path, format: FileFormat) -> AppResult<()>;

    /// Swap in the file's entries; on any error the catalog is left as it was
    fn load_from(&mut self, path: &Path, format: FileFormat) -> AppResult<usize>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct InMemoryEntryRepository {
    entries: Vec<Entry>,
    csv: Box<dyn EntrySerializer>,
    json: Box<dyn EntrySerializer>,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::with_serializers(Box::new(CsvSerializer::new()), Box::new(JsonSerializer::new()))
    }

    pub fn with_serializers(csv: Box<dyn EntrySerializer>, json: Box<dyn EntrySerializer>) -> Self {
        Self {
            entries: Vec::new(),
            csv,
            json,
        }
    }

    fn serializer(&self, format: FileFormat) -> &dyn EntrySerializer {
        match format {
            FileFormat::Csv => self.csv.as_ref(),
            FileFormat::Json => self.json.as_ref(),
        }
    }

    fn position(&self, entry: &Entry) -> Option<usize> {
        self.entries.iter().position(|stored| stored == entry)
    }

    fn find_by<F>(&self, query: Option<&str>, field: F) -> Vec<Entry>
    where
        F: Fn(&Entry) -> &str,
    {
        let needle = match query.map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return self.list(),
        };

        self.entries
            .iter()
            .filter(|&entry| field(entry).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    fn unique_by<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Entry) -> &str,
    {
        let mut values: Vec<String> = self.entries.iter().map(|e| field(e).to_string()).collect();
        values.sort();
        values.dedup();
        values
    }
}

impl Default for InMemoryEntryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryRepository for InMemoryEntryRepository {
    fn add(&mut self, entry: Entry) -> bool {
        if self.position(&entry).is_some() {
            log::debug!("Add rejected, already stored: {}", entry.identity());
            return false;
        }
        log::debug!("Added {}", entry.identity());
        self.entries.push(entry);
        true
    }

    fn edit(&mut self, old: &Entry, new: Entry) -> AppResult<bool> {
        // conflict is checked before old's existence
        if let Some(stored) = self.entries.iter().find(|stored| **stored == new) {
            if stored != old {
                log::warn!("Edit of {} would overwrite {}", old.identity(), stored.identity());
                return Err(AppError::IdentityConflict {
                    title: new.title().to_string(),
                });
            }
            if new.same_details(old) {
                return Err(AppError::NoChange {
                    title: old.title().to_string(),
                });
            }
        }

        match self.position(old) {
            Some(index) => {
                log::debug!("Edited {} -> {}", old.identity(), new.identity());
                self.entries[index] = new;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&mut self, entry: &Entry) -> bool {
        match self.position(entry) {
            Some(index) => {
                self.entries.remove(index);
                log::debug!("Removed {}", entry.identity());
                true
            }
            None => false,
        }
    }

    fn list(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    fn find_by_title(&self, query: Option<&str>) -> Vec<Entry> {
        self.find_by(query, Entry::title)
    }

    fn find_by_creator(&self, query: Option<&str>) -> Vec<Entry> {
        self.find_by(query, Entry::creator)
    }

    fn sort(&self, entries: &[Entry], key: Option<SortKey>) -> Vec<Entry> {
        sort_entries(entries, key)
    }

    fn unique_categories(&self) -> Vec<String> {
        self.unique_by(Entry::category)
    }

    fn unique_creators(&self) -> Vec<String> {
        self.unique_by(Entry::creator)
    }

    fn unique_years(&self) -> Vec<String> {
        self.unique_by(Entry::release_year)
    }

    fn clear(&mut self) {
        log::debug!("Cleared {} entries", self.entries.len());
        self.entries.clear();
    }

    fn save_as(&self, path: &Path, format: FileFormat) -> AppResult<()> {
        self.serializer(format).save(&self.entries, path)
    }

    fn load_from(&mut self, path: &Path, format: FileFormat) -> AppResult<usize> {
        let loaded = self.serializer(format).load(path).map_err(|e| {
            log::warn!("Load from {} failed, catalog unchanged", path.display());
            e
        })?;
        self.entries = loaded;
        Ok(self.entries.len())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
