// src/application/commands/catalog_commands.rs
//
// Catalog Command Handlers
//
// RULES:
// - Accept DTOs
// - Call the catalog service
// - Return DTOs
// - Never contain business logic

use std::path::Path;

use crate::application::{dto::*, error_handling::ToErrorResponse, state::AppState};
use crate::domain::{Entry, SortKey, Status, ViewStatus};

/// Entries matching the query, in display order
pub fn list_entries(state: &AppState, query: QueryDto) -> Result<Vec<EntryDto>, String> {
    let catalog = state.catalog().to_error_response()?;
    let entries = catalog.query(
        query.text.as_deref(),
        query.field,
        &query.criteria,
        query.sort_key(),
    );
    Ok(entries.iter().map(EntryDto::from).collect())
}

/// Drop-down contents for the current catalog
pub fn filter_options(state: &AppState) -> Result<FilterOptionsDto, String> {
    let catalog = state.catalog().to_error_response()?;
    Ok(FilterOptionsDto {
        categories: catalog.unique_categories(),
        creators: catalog.unique_creators(),
        years: catalog.unique_years(),
        view_statuses: ViewStatus::ALL.iter().map(|s| s.label().to_string()).collect(),
        sort_options: SortKey::ALL.into_iter().map(SortOptionDto::from).collect(),
    })
}

pub fn add_entry(state: &AppState, dto: EntryFormDto) -> Result<bool, String> {
    dto.into_create_request()
        .and_then(|request| state.catalog()?.add_entry(request))
        .to_error_response()
}

pub fn edit_entry(state: &AppState, selected: EntryDto, dto: EntryFormDto) -> Result<bool, String> {
    let selected = Entry::try_from(&selected).to_error_response()?;
    dto.into_update_request()
        .and_then(|request| state.catalog()?.edit_entry(&selected, request))
        .to_error_response()
}

pub fn remove_entry(state: &AppState, selected: EntryDto) -> Result<bool, String> {
    let selected = Entry::try_from(&selected).to_error_response()?;
    let mut catalog = state.catalog().to_error_response()?;
    Ok(catalog.remove_entry(&selected))
}

pub fn undo(state: &AppState) -> Result<bool, String> {
    state
        .catalog()
        .and_then(|mut catalog| catalog.undo())
        .to_error_response()
}

pub fn redo(state: &AppState) -> Result<bool, String> {
    state
        .catalog()
        .and_then(|mut catalog| catalog.redo())
        .to_error_response()
}

pub fn history_state(state: &AppState) -> Result<HistoryStateDto, String> {
    let catalog = state.catalog().to_error_response()?;
    Ok(catalog.history_state().into())
}

/// Irreversible
pub fn clear_catalog(state: &AppState) -> Result<(), String> {
    state.catalog().to_error_response()?.clear();
    Ok(())
}

/// `format` is "csv" or "json", any case
pub fn save_catalog(state: &AppState, path: String, format: String) -> Result<Status, String> {
    let catalog = state.catalog().to_error_response()?;
    Ok(catalog.save_named(Path::new(&path), &format))
}

pub fn load_catalog(state: &AppState, path: String, format: String) -> Result<Status, String> {
    let mut catalog = state.catalog().to_error_response()?;
    Ok(catalog.load_named(Path::new(&path), &format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::serializers::FileFormat;
    use tempfile::tempdir;

    fn form(title: &str, status: &str) -> EntryFormDto {
        EntryFormDto {
            title: title.to_string(),
            creator: "M. Mann".to_string(),
            release_year: "1995".to_string(),
            category: "Crime".to_string(),
            rating: 4,
            view_status: Some(status.to_string()),
        }
    }

    fn state() -> AppState {
        AppState::new(CatalogConfig::new(std::env::temp_dir(), FileFormat::Json))
    }

    #[test]
    fn test_add_list_and_edit() {
        let state = state();
        assert!(add_entry(&state, form("Heat", "Watched")).unwrap());
        assert!(add_entry(&state, form("Thief", "TO_WATCH")).unwrap());

        let listed = list_entries(
            &state,
            QueryDto {
                sort: Some("title-desc".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(listed[0].title, "Thief");
        assert_eq!(listed[1].view_status_label, "Watched");

        let selected = listed[1].clone();
        assert!(edit_entry(&state, selected, form("Heat", "Watching")).unwrap());

        let history = history_state(&state).unwrap();
        assert!(history.can_undo);
        assert_eq!(history.undo_description.as_deref(), Some("Edit entry: Heat -> Heat"));
    }

    #[test]
    fn test_errors_come_back_as_json() {
        let state = state();
        let err = add_entry(&state, form("", "Watched")).unwrap_err();
        assert!(err.contains("\"error_type\":\"validation\""));

        add_entry(&state, form("Heat", "Watched")).unwrap();
        let selected = list_entries(&state, QueryDto::default()).unwrap()[0].clone();
        let err = edit_entry(&state, selected, form("heat", "watched")).unwrap_err();
        assert!(err.contains("\"error_type\":\"conflict\""));
    }

    #[test]
    fn test_remove_undo_redo() {
        let state = state();
        add_entry(&state, form("Heat", "Watched")).unwrap();
        let selected = list_entries(&state, QueryDto::default()).unwrap()[0].clone();

        assert!(remove_entry(&state, selected).unwrap());
        assert!(undo(&state).unwrap());
        assert_eq!(list_entries(&state, QueryDto::default()).unwrap().len(), 1);
        assert!(redo(&state).unwrap());
        assert!(list_entries(&state, QueryDto::default()).unwrap().is_empty());
    }

    #[test]
    fn test_save_load_and_options() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("films.json").to_string_lossy().to_string();

        let state = state();
        add_entry(&state, form("Heat", "Watched")).unwrap();
        assert!(save_catalog(&state, path.clone(), "JSON".to_string()).unwrap().success);

        clear_catalog(&state).unwrap();
        assert!(filter_options(&state).unwrap().creators.is_empty());

        let status = load_catalog(&state, path, "json".to_string()).unwrap();
        assert!(status.success, "{}", status.message);

        let options = filter_options(&state).unwrap();
        assert_eq!(options.creators, vec!["M. Mann"]);
        assert_eq!(options.sort_options.len(), 8);
        assert_eq!(options.view_statuses, vec!["To watch", "Watching", "Watched"]);
    }
}
