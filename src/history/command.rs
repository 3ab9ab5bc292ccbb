// src/history/command.rs
//
// Reversible catalog mutations
//
// Each variant carries what it needs to run forward and backward. The only
// state that changes after construction is the entry produced by `execute`,
// which the inverse step then uses verbatim.

use crate::domain::{Entry, EntryFields};
use crate::error::AppResult;
use crate::repositories::EntryRepository;

#[derive(Debug, Clone)]
pub enum CatalogCommand {
    Add {
        fields: EntryFields,
        added: Option<Entry>,
    },
    Edit {
        original: Entry,
        fields: EntryFields,
        replacement: Option<Entry>,
    },
    Remove {
        entry: Entry,
    },
}

impl CatalogCommand {
    pub fn add(fields: EntryFields) -> Self {
        CatalogCommand::Add {
            fields,
            added: None,
        }
    }

    pub fn edit(original: Entry, fields: EntryFields) -> Self {
        CatalogCommand::Edit {
            original,
            fields,
            replacement: None,
        }
    }

    pub fn remove(entry: Entry) -> Self {
        CatalogCommand::Remove { entry }
    }

    /// Run forward. Validation, conflict and no-change errors surface as-is;
    /// `Ok(false)` means the repository declined (duplicate, not found).
    pub fn execute(&mut self, repo: &mut dyn EntryRepository) -> AppResult<bool> {
        match self {
            CatalogCommand::Add { fields, added } => {
                let entry = Entry::from_fields(fields.clone())?;
                *added = Some(entry.clone());
                Ok(repo.add(entry))
            }
            CatalogCommand::Edit {
                original,
                fields,
                replacement,
            } => {
                let entry = Entry::from_fields(fields.clone())?;
                *replacement = Some(entry.clone());
                repo.edit(original, entry)
            }
            CatalogCommand::Remove { entry } => Ok(repo.remove(entry)),
        }
    }

    /// Run the inverse. A command that never executed has nothing to undo.
    pub fn undo(&self, repo: &mut dyn EntryRepository) -> AppResult<bool> {
        match self {
            CatalogCommand::Add { added, .. } => Ok(added.as_ref().is_some_and(|e| repo.remove(e))),
            CatalogCommand::Edit {
                original,
                replacement,
                ..
            } => match replacement {
                Some(current) => repo.edit(current, original.clone()),
                None => Ok(false),
            },
            CatalogCommand::Remove { entry } => Ok(repo.add(entry.clone())),
        }
    }

    /// Menu label, e.g. "Edit entry: Heat -> Heat (1995)"
    pub fn description(&self) -> String {
        match self {
            CatalogCommand::Add { fields, .. } => {
                format!("Add entry: {} ({})", fields.title, fields.creator)
            }
            CatalogCommand::Edit {
                original, fields, ..
            } => format!("Edit entry: {} -> {}", original.title(), fields.title),
            CatalogCommand::Remove { entry } => {
                format!("Remove entry: {} ({})", entry.title(), entry.creator())
            }
        }
    }

    /// The entry the catalog holds after a successful `execute`
    pub fn produced(&self) -> Option<&Entry> {
        match self {
            CatalogCommand::Add { added, .. } => added.as_ref(),
            CatalogCommand::Edit { replacement, .. } => replacement.as_ref(),
            CatalogCommand::Remove { entry } => Some(entry),
        }
    }
}
