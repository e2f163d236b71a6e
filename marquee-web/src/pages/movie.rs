//! Movie detail page

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marquee_search::{CatalogError, DETAIL_ERROR_MESSAGE};
use tracing::warn;

use crate::components::layout::error_message;
use crate::components::{ImageBases, button_link, card, movie_detail};
use crate::pages::not_found::not_found_response;
use crate::server::AppState;
use crate::templates::render_page;

/// Renders the detail page for `/movies/{id}`.
///
/// Identifiers that are not numbers or unknown to the catalog get the
/// not-found page; any other failure gets a generic error page.
pub async fn movie_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<u64>() else {
        return not_found_response();
    };

    match state.details.fetch(id).await {
        Ok(view) => {
            let images = ImageBases {
                poster: &state.config.api.poster_base_url,
                backdrop: &state.config.api.backdrop_base_url,
            };
            render_page(&view.movie.title, &movie_detail(&view, images)).into_response()
        }
        Err(CatalogError::NotFound { .. }) => not_found_response(),
        Err(e) => {
            warn!(movie_id = id, error = %e, "Failed to load movie page");
            let body = card(
                None,
                &format!(
                    r#"{}<div class="text-center">{}</div>"#,
                    error_message(DETAIL_ERROR_MESSAGE),
                    button_link("Back to Home", "/", "secondary")
                ),
            );
            (StatusCode::BAD_GATEWAY, render_page("Error", &body)).into_response()
        }
    }
}
