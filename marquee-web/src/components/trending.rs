//! Trending searches list

use marquee_search::SuggestionRecord;

use super::layout::escape_html;
use super::movie::NO_POSTER;

/// Renders the ranked list of trending search terms.
///
/// Each entry links back to the home page with the term filled in. Renders
/// nothing when there are no records.
pub fn trending_list(records: &[SuggestionRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let items: String = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let poster = record.poster_url.as_deref().unwrap_or(NO_POSTER);
            format!(
                r#"<li class="min-w-[200px] flex items-center">
                    <span class="text-8xl font-bold text-gray-700 -mr-3">{rank}</span>
                    <a href="/?q={href_term}" title="{term}">
                        <img src="{poster}" alt="{term}" class="w-[127px] h-[163px] rounded-lg object-cover">
                    </a>
                </li>"#,
                rank = index + 1,
                href_term = urlencoding::encode(&record.search_term),
                term = escape_html(&record.search_term),
                poster = escape_html(poster),
            )
        })
        .collect();

    format!(
        r#"<section class="mt-10">
            <h2 class="text-2xl font-bold text-white mb-4">Trending Movies</h2>
            <ul class="flex flex-row overflow-x-auto gap-5 w-full">{items}</ul>
        </section>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(term: &str, count: u64, poster: Option<&str>) -> SuggestionRecord {
        SuggestionRecord {
            id: format!("doc-{term}"),
            search_term: term.to_string(),
            count,
            poster_url: poster.map(str::to_string),
        }
    }

    #[test]
    fn test_trending_list_ranks_in_order() {
        let html = trending_list(&[
            record("dark knight", 7, Some("https://img/dk.jpg")),
            record("dune", 3, None),
        ]);

        let first = html.find(">1<").unwrap();
        let second = html.find(">2<").unwrap();
        assert!(first < second);
        assert!(html.contains("/?q=dark%20knight"));
        assert!(html.contains("https://img/dk.jpg"));
        assert!(html.contains(NO_POSTER));
    }

    #[test]
    fn test_empty_trending_renders_nothing() {
        assert!(trending_list(&[]).is_empty());
    }
}
