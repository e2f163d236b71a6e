//! Demo provider implementation for offline development.

use async_trait::async_trait;

use super::{MovieCatalog, MovieQuery};
use crate::errors::CatalogError;
use crate::types::{Genre, MovieDetails, MovieSummary, ProductionCompany, VideoClip};

/// One movie of a built-in catalog: its detail record and clips.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub details: MovieDetails,
    pub videos: Vec<VideoClip>,
}

impl CatalogEntry {
    /// The list-view projection of this entry.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.details.id,
            title: self.details.title.clone(),
            poster_path: self.details.poster_path.clone(),
            release_date: self.details.release_date.clone(),
            original_language: self.details.original_language.clone(),
            vote_average: Some(self.details.vote_average),
        }
    }

    /// Case-insensitive title match used by the offline search.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.details.title.to_lowercase().contains(&term)
            || self
                .details
                .original_title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&term))
    }
}

/// Demo provider for development.
///
/// Serves a small fixed catalog so the complete search and detail UI can be
/// exercised without a TMDB token. Entries are listed in popularity order.
#[derive(Debug, Clone)]
pub struct DemoProvider {
    entries: Vec<CatalogEntry>,
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoProvider {
    pub fn new() -> Self {
        Self::with_entries(demo_catalog())
    }

    pub fn with_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    fn find(&self, id: u64) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.details.id == id)
    }
}

#[async_trait]
impl MovieCatalog for DemoProvider {
    async fn list_movies(&self, query: &MovieQuery) -> Result<Vec<MovieSummary>, CatalogError> {
        let movies = match query {
            MovieQuery::Popular => self.entries.iter().map(CatalogEntry::summary).collect(),
            MovieQuery::Search(term) => self
                .entries
                .iter()
                .filter(|entry| entry.matches(term))
                .map(CatalogEntry::summary)
                .collect(),
        };
        Ok(movies)
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails, CatalogError> {
        self.find(id)
            .map(|entry| entry.details.clone())
            .ok_or(CatalogError::NotFound { id })
    }

    async fn movie_videos(&self, id: u64) -> Result<Vec<VideoClip>, CatalogError> {
        Ok(self
            .find(id)
            .map(|entry| entry.videos.clone())
            .unwrap_or_default())
    }
}

struct DemoMovie {
    id: u64,
    title: &'static str,
    original_title: Option<&'static str>,
    tagline: &'static str,
    overview: &'static str,
    release_date: &'static str,
    language: &'static str,
    vote_average: f32,
    vote_count: u32,
    runtime: u32,
    genres: &'static [(u64, &'static str)],
    companies: &'static [(u64, &'static str)],
    budget: u64,
    revenue: u64,
    imdb_id: &'static str,
    trailer_key: Option<&'static str>,
}

const DEMO_MOVIES: &[DemoMovie] = &[
    DemoMovie {
        id: 634649,
        title: "Spider-Man: No Way Home",
        original_title: None,
        tagline: "The Multiverse unleashed.",
        overview: "Peter Parker's secret identity is revealed to the world and he asks Doctor Strange for help, with consequences that reach across the multiverse.",
        release_date: "2021-12-15",
        language: "en",
        vote_average: 7.9,
        vote_count: 20112,
        runtime: 148,
        genres: &[(28, "Action"), (12, "Adventure"), (878, "Science Fiction")],
        companies: &[(420, "Marvel Studios"), (5, "Columbia Pictures")],
        budget: 200_000_000,
        revenue: 1_921_847_111,
        imdb_id: "tt10872600",
        trailer_key: None,
    },
    DemoMovie {
        id: 155,
        title: "The Dark Knight",
        original_title: None,
        tagline: "Why So Serious?",
        overview: "Batman raises the stakes in his war on crime, and a criminal mastermind known as the Joker plunges Gotham into anarchy.",
        release_date: "2008-07-16",
        language: "en",
        vote_average: 8.5,
        vote_count: 33000,
        runtime: 152,
        genres: &[(18, "Drama"), (28, "Action"), (80, "Crime"), (53, "Thriller")],
        companies: &[(174, "Warner Bros. Pictures"), (923, "Legendary Pictures")],
        budget: 185_000_000,
        revenue: 1_004_558_444,
        imdb_id: "tt0468569",
        trailer_key: Some("EXeTwQWrcwY"),
    },
    DemoMovie {
        id: 27205,
        title: "Inception",
        original_title: None,
        tagline: "Your mind is the scene of the crime.",
        overview: "A thief who steals secrets through dream-sharing technology is given the inverse task of planting an idea in a target's mind.",
        release_date: "2010-07-15",
        language: "en",
        vote_average: 8.4,
        vote_count: 36000,
        runtime: 148,
        genres: &[(28, "Action"), (878, "Science Fiction"), (12, "Adventure")],
        companies: &[(923, "Legendary Pictures"), (9996, "Syncopy")],
        budget: 160_000_000,
        revenue: 825_532_764,
        imdb_id: "tt1375666",
        trailer_key: Some("YoHD9XEInc0"),
    },
    DemoMovie {
        id: 438631,
        title: "Dune",
        original_title: None,
        tagline: "Beyond fear, destiny awaits.",
        overview: "Paul Atreides travels to the most dangerous planet in the universe to secure his family's future.",
        release_date: "2021-09-15",
        language: "en",
        vote_average: 7.8,
        vote_count: 12000,
        runtime: 155,
        genres: &[(878, "Science Fiction"), (12, "Adventure")],
        companies: &[(923, "Legendary Pictures")],
        budget: 165_000_000,
        revenue: 402_027_830,
        imdb_id: "tt1160419",
        trailer_key: Some("8g18jFHCLXk"),
    },
    DemoMovie {
        id: 603,
        title: "The Matrix",
        original_title: None,
        tagline: "Welcome to the Real World.",
        overview: "A computer hacker learns about the true nature of his reality and his role in the war against its controllers.",
        release_date: "1999-03-31",
        language: "en",
        vote_average: 8.2,
        vote_count: 25000,
        runtime: 136,
        genres: &[(28, "Action"), (878, "Science Fiction")],
        companies: &[(79, "Village Roadshow Pictures"), (174, "Warner Bros. Pictures")],
        budget: 63_000_000,
        revenue: 463_517_383,
        imdb_id: "tt0133093",
        trailer_key: Some("vKQi3bBA1y8"),
    },
    DemoMovie {
        id: 268,
        title: "Batman",
        original_title: None,
        tagline: "Have you ever danced with the devil in the pale moonlight?",
        overview: "Gotham's Dark Knight faces the Joker, a gangster transformed by a vat of chemicals into a grinning agent of chaos.",
        release_date: "1989-06-21",
        language: "en",
        vote_average: 7.2,
        vote_count: 7800,
        runtime: 126,
        genres: &[(14, "Fantasy"), (28, "Action"), (80, "Crime")],
        companies: &[(174, "Warner Bros. Pictures")],
        budget: 35_000_000,
        revenue: 411_348_924,
        imdb_id: "tt0096895",
        trailer_key: None,
    },
    DemoMovie {
        id: 129,
        title: "Spirited Away",
        original_title: Some("千と千尋の神隠し"),
        tagline: "The tunnel led Chihiro to a mysterious town...",
        overview: "A young girl wanders into a world ruled by gods, witches and spirits, where humans are changed into beasts.",
        release_date: "2001-07-20",
        language: "ja",
        vote_average: 8.5,
        vote_count: 16000,
        runtime: 125,
        genres: &[(16, "Animation"), (10751, "Family"), (14, "Fantasy")],
        companies: &[(10342, "Studio Ghibli")],
        budget: 19_000_000,
        revenue: 274_925_095,
        imdb_id: "tt0245429",
        trailer_key: None,
    },
    DemoMovie {
        id: 496243,
        title: "Parasite",
        original_title: Some("기생충"),
        tagline: "Act like you own the place.",
        overview: "All unemployed, the Kim family take a peculiar interest in the wealthy Park family until they are entangled in an unexpected incident.",
        release_date: "2019-05-30",
        language: "ko",
        vote_average: 8.5,
        vote_count: 18000,
        runtime: 133,
        genres: &[(35, "Comedy"), (53, "Thriller"), (18, "Drama")],
        companies: &[(4399, "Barunson E&A")],
        budget: 11_400_000,
        revenue: 257_591_776,
        imdb_id: "tt6751668",
        trailer_key: None,
    },
];

/// The catalog served in development mode.
pub fn demo_catalog() -> Vec<CatalogEntry> {
    DEMO_MOVIES.iter().map(DemoMovie::to_entry).collect()
}

impl DemoMovie {
    fn to_entry(&self) -> CatalogEntry {
        let details = MovieDetails {
            id: self.id,
            title: self.title.to_string(),
            tagline: Some(self.tagline.to_string()),
            overview: Some(self.overview.to_string()),
            poster_path: None,
            backdrop_path: None,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            release_date: Some(self.release_date.to_string()),
            runtime: Some(self.runtime),
            status: Some("Released".to_string()),
            original_language: Some(self.language.to_string()),
            original_title: Some(self.original_title.unwrap_or(self.title).to_string()),
            genres: self
                .genres
                .iter()
                .map(|(id, name)| Genre {
                    id: *id,
                    name: name.to_string(),
                })
                .collect(),
            spoken_languages: Vec::new(),
            production_companies: self
                .companies
                .iter()
                .map(|(id, name)| ProductionCompany {
                    id: *id,
                    name: name.to_string(),
                    logo_path: None,
                })
                .collect(),
            budget: self.budget,
            revenue: self.revenue,
            homepage: None,
            imdb_id: Some(self.imdb_id.to_string()),
        };

        let videos = self
            .trailer_key
            .map(|key| VideoClip {
                id: format!("demo-{}", self.id),
                key: key.to_string(),
                name: "Official Trailer".to_string(),
                site: "YouTube".to_string(),
                kind: "Trailer".to_string(),
                official: true,
            })
            .into_iter()
            .collect();

        CatalogEntry { details, videos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_search_is_case_insensitive() {
        let provider = DemoProvider::new();

        let results = provider
            .list_movies(&MovieQuery::from_term("BATMAN"))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 268);

        let results = provider
            .list_movies(&MovieQuery::from_term("千と千尋"))
            .await
            .unwrap();
        assert_eq!(results[0].title, "Spirited Away");
    }

    #[tokio::test]
    async fn test_demo_popular_lists_whole_catalog() {
        let provider = DemoProvider::new();
        let results = provider.list_movies(&MovieQuery::Popular).await.unwrap();
        assert_eq!(results.len(), DEMO_MOVIES.len());
        assert_eq!(results[0].id, 634649);
    }

    #[tokio::test]
    async fn test_demo_details_and_missing_movie() {
        let provider = DemoProvider::new();

        let details = provider.movie_details(27205).await.unwrap();
        assert_eq!(details.title, "Inception");
        assert_eq!(details.runtime_label().as_deref(), Some("2h 28m"));

        let videos = provider.movie_videos(27205).await.unwrap();
        assert_eq!(videos.len(), 1);

        assert!(matches!(
            provider.movie_details(1).await,
            Err(CatalogError::NotFound { id: 1 })
        ));
        assert!(provider.movie_videos(1).await.unwrap().is_empty());
    }
}
