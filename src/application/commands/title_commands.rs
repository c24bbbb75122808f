// src/application/commands/title_commands.rs

use crate::application::{dto::*, state::AppState};
use crate::error::{AppError, AppResult};
use crate::integrations::{RemoteCatalog, Selector};
use crate::services::Discovery;

/// Every stored title, in the order it was added
pub fn list_titles(state: &AppState) -> AppResult<Vec<TitleDto>> {
    state
        .title_service
        .list_titles()?
        .into_iter()
        .map(|title| {
            let progress = state.watch_service.progress(&title.id)?;
            Ok(TitleDto::new(title, progress))
        })
        .collect()
}

/// Look a title up by exact name; fall back to the catalog when unknown
pub fn discover_title(
    state: &AppState,
    name: &str,
    catalog: &dyn RemoteCatalog,
    selector: &dyn Selector,
) -> AppResult<DiscoveryDto> {
    match state.library_service.discover(name, catalog, selector)? {
        Discovery::Local { titles } => {
            let titles = titles
                .into_iter()
                .map(|title| {
                    let progress = state.watch_service.progress(&title.id)?;
                    Ok(TitleDto::new(title, progress))
                })
                .collect::<AppResult<Vec<_>>>()?;
            Ok(DiscoveryDto::Library { titles })
        }
        Discovery::Remote { adoption } => {
            let progress = state.watch_service.progress(&adoption.title().id)?;
            Ok(DiscoveryDto::from_adoption(adoption, progress))
        }
        Discovery::Cancelled => Ok(DiscoveryDto::Cancelled),
    }
}

pub fn rate_title(state: &AppState, title_id: &str, stars: i64) -> AppResult<TitleDto> {
    state.title_service.rate_title(title_id, stars)?;

    let title = state
        .title_service
        .get_title(title_id)?
        .ok_or(AppError::NotFound)?;
    let progress = state.watch_service.progress(title_id)?;

    Ok(TitleDto::new(title, progress))
}

/// Delete a title and everything imported for it
pub fn remove_title(state: &AppState, title_id: &str) -> AppResult<RemovalDto> {
    let episodes_removed = state.title_service.remove_title(title_id)?;

    Ok(RemovalDto {
        title_id: title_id.to_string(),
        episodes_removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::test_support::setup_state;
    use crate::domain::DomainError;
    use crate::integrations::{CatalogSnapshot, IndexSelector};

    const SNAPSHOT: &str = r#"{
        "titles": [{
            "id": "naruto-tv",
            "title": "Naruto",
            "episodes": [3, 2, 1],
            "links": {
                "1": [{ "server": "alpha", "url": "https://alpha/n/1" }],
                "3": [{ "server": "alpha", "url": "https://alpha/n/3" }]
            }
        }]
    }"#;

    #[test]
    fn test_discover_imports_then_hits_library() {
        let (state, _temp) = setup_state();
        let catalog = CatalogSnapshot::from_json(SNAPSHOT).unwrap();

        let first = discover_title(&state, "Naruto", &catalog, &IndexSelector::new(0)).unwrap();
        match first {
            DiscoveryDto::Imported { title, import } => {
                assert_eq!(title.id, "naruto-tv");
                assert_eq!(title.watched_percent, Some(0.0));
                assert_eq!(import.imported, 2);
                assert_eq!(import.without_link, 1);
            }
            other => panic!("expected import, got {:?}", other),
        }

        let second = discover_title(&state, "Naruto", &catalog, &IndexSelector::new(0)).unwrap();
        match second {
            DiscoveryDto::Library { titles } => assert_eq!(titles.len(), 1),
            other => panic!("expected library hit, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_unknown_name_is_remote_empty() {
        let (state, _temp) = setup_state();
        let catalog = CatalogSnapshot::from_json(SNAPSHOT).unwrap();

        let result = discover_title(&state, "Bleach", &catalog, &IndexSelector::new(0));
        assert!(matches!(result, Err(AppError::RemoteEmpty(_))));
    }

    #[test]
    fn test_rate_and_list() {
        let (state, _temp) = setup_state();
        state.title_service.register_title("a1", "Monster").unwrap();

        let rated = rate_title(&state, "a1", 3).unwrap();
        assert_eq!(rated.rating, 3);

        let listed = list_titles(&state).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].rating, 3);
        assert_eq!(listed[0].watched_percent, None);

        let result = rate_title(&state, "a1", 6);
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::RatingOutOfRange(6)))
        ));
    }

    #[test]
    fn test_remove_title_reports_episode_count() {
        let (state, _temp) = setup_state();
        let catalog = CatalogSnapshot::from_json(SNAPSHOT).unwrap();
        discover_title(&state, "Naruto", &catalog, &IndexSelector::new(0)).unwrap();

        let removal = remove_title(&state, "naruto-tv").unwrap();
        assert_eq!(removal.episodes_removed, 2);
        assert!(list_titles(&state).unwrap().is_empty());
    }
}
