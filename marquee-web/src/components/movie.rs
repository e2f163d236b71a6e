//! Movie list components - cards, grids, search results

use marquee_core::FetchState;
use marquee_search::MovieSummary;

use super::layout::{error_message, escape_html};

/// Placeholder image for movies without a poster.
pub const NO_POSTER: &str = "/static/no-movie.svg";

/// Renders one movie card linking to its detail page.
pub fn movie_card(movie: &MovieSummary, poster_base: &str) -> String {
    let poster = movie
        .poster_url(poster_base)
        .unwrap_or_else(|| NO_POSTER.to_string());
    let language = movie.original_language.as_deref().unwrap_or("N/A");
    let year = movie.release_year().unwrap_or("N/A");

    format!(
        r#"<li class="fadeIn">
            <a href="/movies/{id}" class="block bg-gray-800 bg-opacity-60 rounded-2xl p-4 hover:bg-gray-700 transition-colors">
                <img src="{poster}" alt="{title}" class="rounded-lg w-full h-auto" loading="lazy">
                <div class="mt-4">
                    <h3 class="text-white font-bold text-base truncate">{title}</h3>
                    <div class="mt-2 flex items-center gap-2 text-sm text-gray-400">
                        <span class="flex items-center gap-1">
                            <span class="text-yellow-400">&#9733;</span>
                            <span class="text-white font-semibold">{rating}</span>
                        </span>
                        <span>&bull;</span>
                        <span class="capitalize">{language}</span>
                        <span>&bull;</span>
                        <span>{year}</span>
                    </div>
                </div>
            </a>
        </li>"#,
        id = movie.id,
        poster = escape_html(&poster),
        title = escape_html(&movie.title),
        rating = movie.rating_label(),
        language = escape_html(language),
        year = escape_html(year),
    )
}

/// Renders a responsive grid of movie cards.
pub fn movie_grid(movies: &[MovieSummary], poster_base: &str) -> String {
    let cards: String = movies
        .iter()
        .map(|movie| movie_card(movie, poster_base))
        .collect();

    format!(
        r#"<ul class="grid grid-cols-1 gap-5 xs:grid-cols-2 md:grid-cols-3 lg:grid-cols-4">{cards}</ul>"#
    )
}

/// Renders the body of the results section for a search state.
///
/// This is the fragment the search box swaps in after every settled term.
pub fn results_section(state: &FetchState<Vec<MovieSummary>>, poster_base: &str) -> String {
    match state {
        FetchState::Idle => String::new(),
        FetchState::Loading => {
            r#"<p class="text-gray-400 text-center py-6">Loading...</p>"#.to_string()
        }
        FetchState::Error(message) => error_message(message),
        FetchState::Success(movies) if movies.is_empty() => {
            r#"<p class="text-gray-400 text-center py-6">No movies found.</p>"#.to_string()
        }
        FetchState::Success(movies) => movie_grid(movies, poster_base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn movie() -> MovieSummary {
        MovieSummary {
            id: 27205,
            title: "Inception".to_string(),
            poster_path: Some("/inception.jpg".to_string()),
            release_date: Some("2010-07-15".to_string()),
            original_language: Some("en".to_string()),
            vote_average: Some(8.369),
        }
    }

    #[test]
    fn test_movie_card_fields() {
        let html = movie_card(&movie(), POSTER_BASE);
        assert!(html.contains(r#"href="/movies/27205""#));
        assert!(html.contains("https://image.tmdb.org/t/p/w500/inception.jpg"));
        assert!(html.contains(">8.4<"));
        assert!(html.contains(">en<"));
        assert!(html.contains(">2010<"));
    }

    #[test]
    fn test_movie_card_placeholders() {
        let mut movie = movie();
        movie.poster_path = None;
        movie.vote_average = None;
        movie.release_date = None;

        let html = movie_card(&movie, POSTER_BASE);
        assert!(html.contains(NO_POSTER));
        assert!(html.contains(">N/A<"));
    }

    #[test]
    fn test_results_section_states() {
        let error = FetchState::Error("Error fetching movies. Please try again later.".to_string());
        assert!(results_section(&error, POSTER_BASE).contains("Error fetching movies"));

        let empty = FetchState::Success(Vec::new());
        assert!(results_section(&empty, POSTER_BASE).contains("No movies found"));

        let one = FetchState::Success(vec![movie()]);
        assert_eq!(results_section(&one, POSTER_BASE).matches("<li").count(), 1);
    }
}
