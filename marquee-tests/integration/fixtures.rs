//! Shared setup for integration tests.

use marquee_core::{MarqueeConfig, RuntimeMode};
use marquee_search::MovieSearchService;
use marquee_search::testing::{FakeAppwrite, FakeTmdb, sample_movies};

/// Production wiring against both fakes.
pub struct Stack {
    pub tmdb: FakeTmdb,
    pub appwrite: FakeAppwrite,
    pub config: MarqueeConfig,
    pub service: MovieSearchService,
}

pub fn production_config(tmdb: &FakeTmdb, appwrite: &FakeAppwrite) -> MarqueeConfig {
    let mut config = MarqueeConfig::for_testing();
    config.api.base_url = tmdb.base_url();
    config.api.poster_base_url = "https://image.tmdb.org/t/p/w500".to_string();
    config.store.endpoint = appwrite.endpoint();
    config.store.project_id = Some("marquee".to_string());
    config.store.database_id = Some("movies".to_string());
    config.store.collection_id = Some("metrics".to_string());
    config.store.api_key = Some("secret".to_string());
    config
}

pub async fn production_stack() -> Stack {
    let tmdb = FakeTmdb::spawn(sample_movies()).await;
    let appwrite = FakeAppwrite::spawn().await;
    let config = production_config(&tmdb, &appwrite);
    config
        .validate(true)
        .expect("production config should validate");

    let service = MovieSearchService::from_config(&config, RuntimeMode::Production)
        .expect("service should build");

    Stack {
        tmdb,
        appwrite,
        config,
        service,
    }
}
