//! Home page - hero, live search box, trending searches and results

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::components::{escape_html, hero_header, layout, results_section, section_header};
use crate::server::AppState;
use crate::templates::render_page;

/// Query string shared by the home page and the search partials.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchParams {
    pub fn term(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Renders the search input.
///
/// The browser waits for the configured quiet period after the last
/// keystroke before asking for results, and a newer request replaces one
/// still in flight.
fn search_box(term: &str, debounce_ms: u128) -> String {
    format!(
        r##"<div class="w-full max-w-3xl mx-auto">
            <div class="relative bg-gray-800 bg-opacity-60 rounded-xl px-4 py-3 flex items-center gap-3">
                <span class="text-gray-400">&#128269;</span>
                <input type="search" name="q" value="{value}"
                       placeholder="Search through thousands of movies"
                       autocomplete="off"
                       class="w-full bg-transparent text-gray-200 placeholder-gray-500 outline-none"
                       hx-get="/htmx/movies"
                       hx-trigger="keyup changed delay:{debounce_ms}ms, search"
                       hx-sync="this:replace"
                       hx-target="#all-movies"
                       hx-swap="innerHTML"
                       hx-indicator="#search-spinner" />
            </div>
        </div>"##,
        value = escape_html(term),
    )
}

fn results_heading(term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        section_header("All Movies", Some("Popular right now"))
    } else {
        section_header("All Movies", Some(&format!("Results for \"{term}\"")))
    }
}

/// Renders the home page.
///
/// The result list for `q` (popular movies when empty) is rendered on the
/// server; later searches swap the `#all-movies` section through HTMX.
pub async fn home_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let term = params.term();
    let outcome = state.search.search(term).await;
    let debounce_ms = state.config.search.debounce_interval.as_millis();

    let content = format!(
        r##"{hero}
        {search_box}

        <div id="trending"
             hx-get="/htmx/trending"
             hx-trigger="load"
             hx-swap="innerHTML"></div>

        <section class="mt-10 space-y-6">
            {heading}
            {spinner}
            <div id="all-movies">{results}</div>
        </section>"##,
        hero = hero_header("Find", "Movies", "You'll Enjoy Without the Hassle"),
        search_box = search_box(term, debounce_ms),
        heading = results_heading(term),
        spinner = layout::spinner("search-spinner"),
        results = results_section(&outcome.state, state.poster_base()),
    );

    render_page("Home", &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_box_targets_results_section() {
        let html = search_box("dune <3", 500);

        assert!(html.contains(r##"hx-target="#all-movies""##));
        assert!(html.contains(r##"hx-indicator="#search-spinner""##));
        assert!(html.contains(r#"hx-trigger="keyup changed delay:500ms, search""#));
        assert!(html.contains(r#"value="dune &lt;3""#));
        assert!(html.trim_end().ends_with("</div>"));
    }

    #[test]
    fn test_results_heading_names_the_search() {
        assert!(results_heading("").contains("Popular right now"));

        let html = results_heading(" dune ");
        assert!(html.contains("All Movies"));
        assert!(html.contains("Results for &quot;dune&quot;"));
    }
}
