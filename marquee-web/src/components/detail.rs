//! Movie detail components

use marquee_search::types::format_currency;
use marquee_search::{MovieDetailView, MovieDetails, VideoClip};

use super::layout::{button_link, escape_html};
use super::movie::NO_POSTER;

/// Image base URLs for detail rendering.
#[derive(Debug, Clone, Copy)]
pub struct ImageBases<'a> {
    pub poster: &'a str,
    pub backdrop: &'a str,
}

fn fact(label: &str, value: &str) -> String {
    format!(
        r#"<div>
            <dt class="text-gray-400 text-sm">{}</dt>
            <dd class="text-white font-medium">{}</dd>
        </div>"#,
        escape_html(label),
        escape_html(value)
    )
}

fn pill(text: &str) -> String {
    format!(
        r#"<span class="px-3 py-1 rounded-full bg-gray-800 text-sm text-gray-200">{}</span>"#,
        escape_html(text)
    )
}

fn backdrop(movie: &MovieDetails, base: &str) -> String {
    movie
        .backdrop_path
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(|path| {
            format!(
                r#"<div class="absolute inset-x-0 top-0 h-[420px] -z-10 opacity-30 bg-cover bg-center" style="background-image: url('{}{}')"></div>"#,
                escape_html(base),
                escape_html(path)
            )
        })
        .unwrap_or_default()
}

/// Renders the embedded trailer player, or nothing for clips that cannot be
/// embedded.
pub fn trailer_embed(clip: &VideoClip) -> String {
    let Some(url) = clip.embed_url() else {
        return String::new();
    };

    format!(
        r#"<section class="mt-10">
            <h2 class="text-2xl font-bold mb-4">Trailer</h2>
            <div class="aspect-video w-full rounded-2xl overflow-hidden">
                <iframe class="w-full h-full" src="{url}" title="{title}" allowfullscreen
                        allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"></iframe>
            </div>
        </section>"#,
        url = escape_html(&url),
        title = escape_html(&clip.name),
    )
}

fn production_companies(movie: &MovieDetails, logo_base: &str) -> String {
    if movie.production_companies.is_empty() {
        return String::new();
    }

    let companies: String = movie
        .production_companies
        .iter()
        .map(|company| match company.logo_path.as_deref() {
            Some(logo) if !logo.is_empty() => format!(
                r#"<li class="bg-white rounded-lg p-3"><img src="{}{}" alt="{name}" title="{name}" class="h-8 object-contain"></li>"#,
                escape_html(logo_base),
                escape_html(logo),
                name = escape_html(&company.name)
            ),
            _ => format!(
                r#"<li class="bg-gray-800 rounded-lg px-3 py-2 text-sm">{}</li>"#,
                escape_html(&company.name)
            ),
        })
        .collect();

    format!(
        r#"<section class="mt-10">
            <h2 class="text-2xl font-bold mb-4">Production Companies</h2>
            <ul class="flex flex-wrap gap-4 items-center">{companies}</ul>
        </section>"#
    )
}

/// Renders the full detail page body.
pub fn movie_detail(view: &MovieDetailView, images: ImageBases<'_>) -> String {
    let movie = &view.movie;

    let poster = movie
        .poster_path
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(|path| format!("{}{path}", images.poster))
        .unwrap_or_else(|| NO_POSTER.to_string());

    let tagline = movie
        .tagline
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| format!(r#"<p class="text-xl italic text-gray-300 mt-2">{}</p>"#, escape_html(t)))
        .unwrap_or_default();

    let genres: String = movie.genre_names().into_iter().map(pill).collect();

    let mut facts = vec![
        fact("Release date", movie.release_date.as_deref().unwrap_or("N/A")),
        fact(
            "Runtime",
            movie.runtime_label().as_deref().unwrap_or("N/A"),
        ),
        fact("Status", movie.status.as_deref().unwrap_or("N/A")),
        fact(
            "Original language",
            movie.original_language.as_deref().unwrap_or("N/A"),
        ),
    ];
    if let Some(ref original_title) = movie.original_title {
        facts.push(fact("Original title", original_title));
    }
    if movie.budget > 0 {
        facts.push(fact("Budget", &format_currency(movie.budget)));
    }
    if movie.revenue > 0 {
        facts.push(fact("Revenue", &format_currency(movie.revenue)));
    }
    let facts = facts.concat();

    let overview = movie
        .overview
        .as_deref()
        .filter(|o| !o.is_empty())
        .map(|o| {
            format!(
                r#"<section class="mt-6">
                    <h2 class="text-2xl font-bold mb-2">Overview</h2>
                    <p class="text-gray-300 leading-relaxed">{}</p>
                </section>"#,
                escape_html(o)
            )
        })
        .unwrap_or_default();

    let trailer = view.trailer.as_ref().map(trailer_embed).unwrap_or_default();

    let mut links = vec![button_link("Back to Home", "/", "secondary")];
    if let Some(imdb) = movie.imdb_url() {
        links.push(button_link("View on IMDb", &imdb, "primary"));
    }
    if let Some(homepage) = movie.homepage.as_deref().filter(|h| !h.is_empty()) {
        links.push(button_link("Official Website", homepage, "ghost"));
    }
    let links = links.concat();

    format!(
        r#"<article class="relative">
            {backdrop}
            <a href="/" class="text-gray-300 hover:text-white">&larr; Back</a>
            <div class="mt-6 flex flex-col md:flex-row gap-8">
                <img src="{poster}" alt="{title}" class="w-64 rounded-2xl shadow-lg self-start">
                <div class="flex-1">
                    <h1 class="text-4xl font-bold">{title}</h1>
                    {tagline}
                    <p class="mt-4 text-lg">
                        <span class="text-yellow-400">&#9733;</span>
                        <span class="font-semibold">{rating}/10</span>
                        <span class="text-gray-400">({votes} votes)</span>
                    </p>
                    <div class="mt-4 flex flex-wrap gap-2">{genres}</div>
                    <dl class="mt-6 grid grid-cols-2 gap-4">{facts}</dl>
                    {overview}
                </div>
            </div>
            {trailer}
            {companies}
            <div class="mt-10 flex flex-wrap gap-4">{links}</div>
        </article>"#,
        backdrop = backdrop(movie, images.backdrop),
        poster = escape_html(&poster),
        title = escape_html(&movie.title),
        rating = movie.rating_label(),
        votes = movie.vote_count,
        companies = production_companies(movie, images.poster),
    )
}
