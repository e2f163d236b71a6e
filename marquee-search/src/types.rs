//! Data types for movie search and detail pages.
//!
//! Field names follow the metadata API so records deserialize directly from
//! its JSON responses.

use serde::{Deserialize, Serialize};

/// One entry of a movie list (search results or popular movies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
}

impl MovieSummary {
    /// Release year, if the API supplied a usable date.
    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    /// Rating with one decimal, or `N/A` for unrated movies.
    pub fn rating_label(&self) -> String {
        rating_label(self.vote_average.unwrap_or(0.0))
    }

    /// Full poster URL below `base_url`.
    pub fn poster_url(&self, base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{base_url}{path}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    #[serde(default)]
    pub english_name: Option<String>,
    #[serde(default)]
    pub iso_639_1: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Full movie record for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
}

impl MovieDetails {
    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    pub fn rating_label(&self) -> String {
        rating_label(self.vote_average)
    }

    /// Runtime as `2h 28m`, when known.
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime.filter(|m| *m > 0).map(format_runtime)
    }

    pub fn imdb_url(&self) -> Option<String> {
        self.imdb_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.imdb.com/title/{id}"))
    }

    /// Genre names joined for display.
    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

/// A media clip attached to a movie (trailer, teaser, featurette).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoClip {
    #[serde(default)]
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

impl VideoClip {
    /// Embeddable player URL; only YouTube clips can be embedded.
    pub fn embed_url(&self) -> Option<String> {
        (self.site == "YouTube" && !self.key.is_empty())
            .then(|| format!("https://www.youtube.com/embed/{}", self.key))
    }
}

/// Picks the clip shown on the detail page.
///
/// Prefers an embeddable trailer and falls back to the first clip.
pub fn select_trailer(clips: &[VideoClip]) -> Option<&VideoClip> {
    clips
        .iter()
        .find(|clip| clip.kind == "Trailer" && clip.embed_url().is_some())
        .or_else(|| clips.first())
}

/// Everything the detail page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetailView {
    pub movie: MovieDetails,
    pub trailer: Option<VideoClip>,
}

/// Formats a runtime in minutes as `Xh Ym`.
pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Formats a whole-dollar amount as `$1,234,567`.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${grouped}")
}

fn release_year(date: Option<&str>) -> Option<&str> {
    date.and_then(|d| d.split('-').next())
        .filter(|year| year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()))
}

fn rating_label(vote_average: f32) -> String {
    if vote_average > 0.0 {
        format!("{vote_average:.1}")
    } else {
        "N/A".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(release_date: Option<&str>, vote_average: Option<f32>) -> MovieSummary {
        MovieSummary {
            id: 1,
            title: "Test".to_string(),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: release_date.map(str::to_string),
            original_language: Some("en".to_string()),
            vote_average,
        }
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(148), "2h 28m");
        assert_eq!(format_runtime(45), "0h 45m");
        assert_eq!(format_runtime(120), "2h 0m");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1_000), "$1,000");
        assert_eq!(format_currency(160_000_000), "$160,000,000");
        assert_eq!(format_currency(1_921_847_111), "$1,921,847,111");
    }

    #[test]
    fn test_summary_labels() {
        let movie = summary(Some("2008-07-16"), Some(8.512));
        assert_eq!(movie.release_year(), Some("2008"));
        assert_eq!(movie.rating_label(), "8.5");
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/w500").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );

        let unreleased = summary(Some(""), Some(0.0));
        assert_eq!(unreleased.release_year(), None);
        assert_eq!(unreleased.rating_label(), "N/A");
    }

    #[test]
    fn test_summary_deserializes_sparse_records() {
        let movie: MovieSummary =
            serde_json::from_str(r#"{"id": 42, "title": "Sparse", "poster_path": null}"#).unwrap();
        assert_eq!(movie.id, 42);
        assert!(movie.poster_url("https://img").is_none());
        assert!(movie.vote_average.is_none());
    }

    #[test]
    fn test_select_trailer_prefers_embeddable_trailer() {
        let clip = |kind: &str, site: &str, key: &str| VideoClip {
            id: key.to_string(),
            key: key.to_string(),
            name: format!("{kind} {key}"),
            site: site.to_string(),
            kind: kind.to_string(),
            official: true,
        };

        let clips = vec![
            clip("Featurette", "YouTube", "feat"),
            clip("Trailer", "Vimeo", "vimeo"),
            clip("Trailer", "YouTube", "yt"),
        ];
        let trailer = select_trailer(&clips).unwrap();
        assert_eq!(trailer.key, "yt");
        assert_eq!(
            trailer.embed_url().as_deref(),
            Some("https://www.youtube.com/embed/yt")
        );

        let only_teaser = vec![clip("Teaser", "YouTube", "teaser")];
        assert_eq!(select_trailer(&only_teaser).unwrap().key, "teaser");

        assert!(select_trailer(&[]).is_none());
    }

    #[test]
    fn test_details_deserialize_with_defaults() {
        let details: MovieDetails = serde_json::from_str(
            r#"{
                "id": 27205,
                "title": "Inception",
                "runtime": 148,
                "budget": 160000000,
                "imdb_id": "tt1375666",
                "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]
            }"#,
        )
        .unwrap();

        assert_eq!(details.runtime_label().as_deref(), Some("2h 28m"));
        assert_eq!(
            details.imdb_url().as_deref(),
            Some("https://www.imdb.com/title/tt1375666")
        );
        assert_eq!(details.genre_names(), vec!["Action", "Science Fiction"]);
        assert_eq!(details.revenue, 0);
        assert!(details.production_companies.is_empty());
    }
}
