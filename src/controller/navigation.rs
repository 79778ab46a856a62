//! Library refresh and playlist selection

use crate::error::{CurationError, Result};
use crate::model::{LoadTicket, PlaylistTree, Status, TrackCollection, ROOT_ID};

use super::AppController;

impl AppController {
    /// First library load at startup
    pub async fn initialize(&self) -> Result<Status> {
        self.load_library(Status::default()).await
    }

    /// Re-fetch the playlist forest and start over from `Idle`
    pub async fn refresh(&self) -> Result<Status> {
        tracing::debug!("Refreshing playlists");
        self.load_library(Status::info("Refreshed playlists")).await
    }

    async fn load_library(&self, status: Status) -> Result<Status> {
        let forest = self.provider.get_playlists();
        let mut tree = PlaylistTree::build(forest);

        if tree.is_empty() && self.config.library.placeholder_on_empty {
            tracing::warn!("No playlists found from provider, using placeholder library");
            tree = PlaylistTree::placeholder();
        }

        tracing::info!(
            roots = tree.root_count(),
            nodes = tree.len(),
            synthetic = tree.is_synthetic(),
            "Playlist library loaded"
        );

        self.model.replace_library(tree, status.clone()).await;
        Ok(status)
    }

    /// Handle a tree selection. Folders only report themselves; leaves are
    /// loaded through the provider.
    pub async fn select_playlist(&self, id: &str) -> Result<Status> {
        if id == ROOT_ID {
            return Ok(self.model.get_status().await);
        }

        let library = self.model.get_library().await;
        let node = match library.node_by_id(id) {
            Ok(node) => node,
            Err(e) => return self.fail(e).await,
        };

        if node.is_container() {
            let status = Status::info(format!("Folder selected: {}", node.name()));
            self.model.set_status(status.clone()).await;
            return Ok(status);
        }

        let (id, name) = (node.id().to_string(), node.name().to_string());
        drop(library);

        self.model
            .commit_with(|state| Some(state.choose_playlist(&id, &name)))
            .await;

        let ticket = match self.model.try_commit(|state| state.begin_load()).await {
            Ok(ticket) => ticket,
            Err(e) => return self.fail(e).await,
        };
        tracing::debug!(playlist = %ticket.playlist_name, "Loading playlist");

        let result = self.provider.load_playlist(&ticket.playlist_name);
        self.complete_load(&ticket, result).await
    }

    /// Apply a load result if `ticket` still matches the live selection
    pub(crate) async fn complete_load(
        &self,
        ticket: &LoadTicket,
        result: Option<TrackCollection>,
    ) -> Result<Status> {
        let succeeded = result.is_some();
        let count = result.as_ref().map(TrackCollection::len);

        let applied = self
            .model
            .commit_with(|state| state.finish_load(ticket, result))
            .await;

        if !applied {
            tracing::debug!(playlist = %ticket.playlist_name, "Discarding load result for stale selection");
            return Ok(self.model.get_status().await);
        }

        if succeeded {
            tracing::info!(
                playlist = %ticket.playlist_name,
                tracks = count.unwrap_or_default(),
                "Successfully loaded playlist"
            );
            Ok(self.model.get_status().await)
        } else {
            let error =
                CurationError::provider_empty(format!("Failed to load playlist: {}", ticket.playlist_name));
            tracing::error!(playlist = %ticket.playlist_name, "Provider returned no tracks");
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::test_support::{scenario_provider, ScriptedProvider};
    use super::*;
    use crate::config::Config;
    use crate::model::{AppModel, Phase};

    fn controller(provider: ScriptedProvider, config: Config) -> AppController {
        AppController::new(AppModel::new(), Arc::new(provider), config)
    }

    #[tokio::test]
    async fn test_empty_forest_uses_tagged_placeholder() {
        let controller = controller(ScriptedProvider::default(), Config::default());
        controller.initialize().await.unwrap();

        let library = controller.model().get_library().await;
        assert!(library.is_synthetic());
        assert_eq!(library.children_of(ROOT_ID), vec!["test1", "test2"]);
    }

    #[tokio::test]
    async fn test_placeholder_can_be_disabled() {
        let mut config = Config::default();
        config.library.placeholder_on_empty = false;
        let controller = controller(ScriptedProvider::default(), config);
        controller.initialize().await.unwrap();

        let library = controller.model().get_library().await;
        assert!(library.is_empty());
        assert!(!library.is_synthetic());
    }

    #[tokio::test]
    async fn test_folder_selection_keeps_phase() {
        let provider = Arc::new(scenario_provider());
        let controller = AppController::new(AppModel::new(), provider.clone(), Config::default());
        controller.initialize().await.unwrap();

        let status = controller.select_playlist("r").await.unwrap();
        assert_eq!(status.message, "Folder selected: Root");
        assert_eq!(controller.model().get_phase().await, Phase::Idle);
        assert!(provider.load_calls.lock().unwrap().is_empty());

        controller.select_playlist("l1").await.unwrap();
        controller.select_playlist("r").await.unwrap();
        assert_eq!(controller.model().get_phase().await, Phase::Loaded);
        assert_eq!(*provider.load_calls.lock().unwrap(), vec!["l1".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_id_reports_not_found() {
        let controller = controller(scenario_provider(), Config::default());
        controller.initialize().await.unwrap();

        let err = controller.select_playlist("ghost").await.unwrap_err();
        assert!(matches!(err, CurationError::NotFound(_)));
        let status = controller.model().get_status().await;
        assert!(status.is_failure());
        assert_eq!(status.message, "Invalid playlist selection");
        assert_eq!(controller.model().get_phase().await, Phase::Idle);
    }

    #[tokio::test]
    async fn test_leaf_selection_loads_tracks() {
        let controller = controller(scenario_provider(), Config::default());
        controller.initialize().await.unwrap();

        let status = controller.select_playlist("l1").await.unwrap();
        assert_eq!(status.message, "Loaded 3 tracks from l1");

        let state = controller.model().get_workflow_state().await;
        assert_eq!(state.phase, Phase::Loaded);
        assert_eq!(state.loaded.unwrap().tracks.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_load_is_recoverable() {
        let mut provider = scenario_provider();
        provider.playlists.remove("l2");
        let controller = controller(provider, Config::default());
        controller.initialize().await.unwrap();

        let err = controller.select_playlist("l2").await.unwrap_err();
        assert!(matches!(err, CurationError::ProviderEmpty(_)));
        let state = controller.model().get_workflow_state().await;
        assert_eq!(state.phase, Phase::LoadFailed);
        assert!(state.loaded.is_none());
        assert_eq!(state.status.to_string(), "Error: Failed to load playlist: l2");

        controller.select_playlist("l1").await.unwrap();
        assert_eq!(controller.model().get_phase().await, Phase::Loaded);
    }

    #[tokio::test]
    async fn test_late_load_for_previous_selection_is_discarded() {
        let controller = controller(scenario_provider(), Config::default());
        controller.initialize().await.unwrap();

        let model = controller.model();
        model.commit_with(|s| Some(s.choose_playlist("l1", "l1"))).await;
        let stale_ticket = model.try_commit(|s| s.begin_load()).await.unwrap();

        // User picks another leaf before the first load returns
        controller.select_playlist("l2").await.unwrap();
        let before = model.get_workflow_state().await;

        controller
            .complete_load(&stale_ticket, Some(super::super::test_support::tracks("late", 9)))
            .await
            .unwrap();
        assert_eq!(model.get_workflow_state().await, before);
        assert_eq!(before.loaded.unwrap().playlist_id, "l2");
    }

    #[tokio::test]
    async fn test_refresh_resets_everything() {
        let mut provider = scenario_provider();
        provider.generated = Some(super::super::test_support::tracks("gen", 2));
        let controller = controller(provider, Config::default());
        controller.initialize().await.unwrap();
        controller.select_playlist("l1").await.unwrap();
        controller.request_generate().await.unwrap();

        let status = controller.refresh().await.unwrap();
        assert_eq!(status.message, "Refreshed playlists");

        let state = controller.model().get_workflow_state().await;
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.selected_playlist.is_none());
        assert!(state.loaded.is_none());
        assert!(state.suggested.is_empty());
        assert!(state.generated.is_empty());
    }
}
