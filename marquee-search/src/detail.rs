//! Detail page loading.

use std::sync::Arc;

use marquee_core::{FetchState, LatestRequest};
use tracing::{instrument, warn};

use crate::errors::{CatalogError, DETAIL_ERROR_MESSAGE};
use crate::providers::MovieCatalog;
use crate::types::{MovieDetailView, select_trailer};

/// Loads a movie record together with its trailer.
///
/// The record and the clip list are requested concurrently; the view is only
/// produced once both have answered. There is no retry.
#[derive(Debug, Clone)]
pub struct DetailLoader {
    catalog: Arc<dyn MovieCatalog>,
    request: Arc<LatestRequest<MovieDetailView>>,
}

impl DetailLoader {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self {
            catalog,
            request: Arc::new(LatestRequest::new()),
        }
    }

    /// Fetches the detail view for `id`.
    ///
    /// # Errors
    ///
    /// Fails if either request fails; `CatalogError::NotFound` when the movie
    /// does not exist.
    #[instrument(skip(self))]
    pub async fn fetch(&self, id: u64) -> Result<MovieDetailView, CatalogError> {
        let (details, videos) = tokio::join!(
            self.catalog.movie_details(id),
            self.catalog.movie_videos(id)
        );

        let movie = details?;
        let videos = videos?;
        let trailer = select_trailer(&videos).cloned();

        Ok(MovieDetailView { movie, trailer })
    }

    /// Loads `id` into the view state and returns the resulting state.
    ///
    /// A load for a different movie started in the meantime wins; the state
    /// returned is then whatever that load has produced so far.
    pub async fn load(&self, id: u64) -> FetchState<MovieDetailView> {
        let token = self.request.begin();

        let outcome = self.fetch(id).await.map_err(|e| {
            warn!(movie_id = id, error = %e, "Failed to load movie");
            DETAIL_ERROR_MESSAGE.to_string()
        });
        self.request.complete(token, outcome);

        self.request.snapshot()
    }

    pub fn state(&self) -> FetchState<MovieDetailView> {
        self.request.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockCatalog;
    use crate::providers::demo::demo_catalog;
    use crate::types::VideoClip;

    fn clip(key: &str, kind: &str, site: &str) -> VideoClip {
        VideoClip {
            id: key.to_string(),
            key: key.to_string(),
            name: format!("{kind} {key}"),
            site: site.to_string(),
            kind: kind.to_string(),
            official: true,
        }
    }

    fn loader_with(videos: Vec<VideoClip>) -> (DetailLoader, u64) {
        let entry = demo_catalog().remove(0);
        let id = entry.details.id;
        let catalog = MockCatalog::new().with_movie(entry.details, videos);
        (DetailLoader::new(Arc::new(catalog)), id)
    }

    #[tokio::test]
    async fn test_trailer_preferred_over_other_clips() {
        let (loader, id) = loader_with(vec![
            clip("teaser", "Teaser", "YouTube"),
            clip("vimeo-trailer", "Trailer", "Vimeo"),
            clip("main", "Trailer", "YouTube"),
        ]);

        let view = loader.fetch(id).await.unwrap();
        assert_eq!(view.trailer.unwrap().key, "main");
    }

    #[tokio::test]
    async fn test_first_clip_used_without_trailer() {
        let (loader, id) = loader_with(vec![
            clip("bts", "Behind the Scenes", "YouTube"),
            clip("feat", "Featurette", "YouTube"),
        ]);
        let view = loader.fetch(id).await.unwrap();
        assert_eq!(view.trailer.unwrap().key, "bts");

        let (loader, id) = loader_with(Vec::new());
        assert!(loader.fetch(id).await.unwrap().trailer.is_none());
    }

    #[tokio::test]
    async fn test_load_transitions_to_success() {
        let (loader, id) = loader_with(Vec::new());
        assert_eq!(loader.state(), FetchState::Idle);

        let state = loader.load(id).await;
        assert_eq!(state.value().unwrap().movie.id, id);
        assert_eq!(loader.state(), state);
    }

    #[tokio::test]
    async fn test_either_request_failing_is_an_error() {
        let entry = demo_catalog().remove(1);
        let id = entry.details.id;
        let catalog = MockCatalog::new()
            .with_movie(entry.details, entry.videos)
            .with_failing_videos(id);
        let loader = DetailLoader::new(Arc::new(catalog));

        let state = loader.load(id).await;
        assert_eq!(state.error(), Some(DETAIL_ERROR_MESSAGE));

        assert!(matches!(
            loader.fetch(42).await,
            Err(CatalogError::NotFound { id: 42 })
        ));
        assert_eq!(loader.load(42).await.error(), Some(DETAIL_ERROR_MESSAGE));
    }
}
