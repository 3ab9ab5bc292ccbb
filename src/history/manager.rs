// src/history/manager.rs
//
// Undo/redo stacks
//
// RULES:
// - Only commands that applied are recorded
// - A new command invalidates everything that could be redone
// - Undo and redo always move the command to the opposite stack

use crate::error::AppResult;
use crate::repositories::EntryRepository;

use super::CatalogCommand;

#[derive(Debug, Default)]
pub struct HistoryManager {
    undo_stack: Vec<CatalogCommand>,
    redo_stack: Vec<CatalogCommand>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute and record. Errors and `Ok(false)` leave history unchanged.
    pub fn run(
        &mut self,
        mut command: CatalogCommand,
        repo: &mut dyn EntryRepository,
    ) -> AppResult<bool> {
        if !command.execute(repo)? {
            log::debug!("Not recorded, did not apply: {}", command.description());
            return Ok(false);
        }

        log::debug!("Recorded: {}", command.description());
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(true)
    }

    /// False only when there is nothing to undo. An error from the inverse
    /// step is returned after the command has moved to the redo stack.
    pub fn undo(&mut self, repo: &mut dyn EntryRepository) -> AppResult<bool> {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(false);
        };

        let outcome = command.undo(repo);
        match &outcome {
            Ok(true) => log::debug!("Undone: {}", command.description()),
            Ok(false) => log::warn!("Undo had no effect: {}", command.description()),
            Err(e) => log::warn!("Undo failed: {}: {e}", command.description()),
        }
        self.redo_stack.push(command);
        outcome.map(|_| true)
    }

    /// False only when there is nothing to redo. An error from the forward
    /// step is returned after the command has moved to the undo stack.
    pub fn redo(&mut self, repo: &mut dyn EntryRepository) -> AppResult<bool> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(false);
        };

        let outcome = command.execute(repo);
        match &outcome {
            Ok(true) => log::debug!("Redone: {}", command.description()),
            Ok(false) => log::warn!("Redo had no effect: {}", command.description()),
            Err(e) => log::warn!("Redo failed: {}: {e}", command.description()),
        }
        self.undo_stack.push(command);
        outcome.map(|_| true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn describe_undo(&self) -> Option<String> {
        self.undo_stack.last().map(CatalogCommand::description)
    }

    pub fn describe_redo(&self) -> Option<String> {
        self.redo_stack.last().map(CatalogCommand::description)
    }

    /// Most recent command that is still undoable
    pub fn last_applied(&self) -> Option<&CatalogCommand> {
        self.undo_stack.last()
    }

    /// Forget everything; used when the whole catalog is replaced
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
