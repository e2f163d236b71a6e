//! Not-found page for unknown routes and movies

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::components::{button_link, card};
use crate::templates::render_page;

/// Movie the "Browse Movies" link points at.
pub const FEATURED_MOVIE_ID: u64 = 634649;

/// Body of the not-found page.
pub fn not_found_content() -> String {
    let actions = [
        button_link("Go Home", "/", "primary"),
        button_link("Browse Movies", &format!("/movies/{FEATURED_MOVIE_ID}"), "secondary"),
    ]
    .concat();

    card(
        None,
        &format!(
            r#"<div class="text-center py-12">
                <p class="text-8xl font-bold text-gradient">404</p>
                <h1 class="text-3xl font-bold mt-4">Page Not Found</h1>
                <p class="text-gray-400 mt-2">The page you're looking for doesn't exist or has been moved.</p>
                <div class="mt-8 flex justify-center gap-4">{actions}</div>
            </div>"#
        ),
    )
}

/// Fallback handler: the not-found page with status 404.
pub async fn not_found_page() -> Response {
    not_found_response()
}

pub fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        render_page("Page Not Found", &not_found_content()),
    )
        .into_response()
}
