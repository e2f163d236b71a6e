//! Layout components - headers, cards, navigation, buttons

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders the hero header shown above the search box.
pub fn hero_header(tagline_start: &str, highlight: &str, tagline_end: &str) -> String {
    format!(
        r#"<header class="text-center mt-6 mb-10">
            <h1 class="text-4xl sm:text-6xl font-bold leading-tight max-w-4xl mx-auto">
                {} <span class="text-gradient">{}</span> {}
            </h1>
        </header>"#,
        escape_html(tagline_start),
        escape_html(highlight),
        escape_html(tagline_end)
    )
}

/// Renders a section heading with an optional subtitle.
pub fn section_header(title: &str, subtitle: Option<&str>) -> String {
    let subtitle_html = subtitle
        .map(|s| format!(r#"<p class="text-gray-400 mt-1">{}</p>"#, escape_html(s)))
        .unwrap_or_default();

    format!(
        r#"<div class="mb-6">
            <h2 class="text-2xl font-bold text-white">{}</h2>
            {subtitle_html}
        </div>"#,
        escape_html(title)
    )
}

/// Renders a card container with an optional title.
pub fn card(title: Option<&str>, content: &str) -> String {
    let header_html = title
        .map(|t| {
            format!(
                r#"<h3 class="text-lg font-semibold text-white mb-4">{}</h3>"#,
                escape_html(t)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="bg-gray-800 bg-opacity-60 border border-gray-700 rounded-2xl p-6 mb-6">
            {header_html}
            {content}
        </div>"#
    )
}

/// Renders the top navigation bar.
pub fn nav_bar() -> String {
    r#"<nav class="bg-gray-900 bg-opacity-80 border-b border-gray-800 sticky top-0 z-50">
            <div class="max-w-7xl mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <a href="/" class="text-2xl font-bold text-marquee-400">Marquee</a>
                    <a href="/" class="px-3 py-2 rounded-md text-sm font-medium text-gray-300 hover:text-marquee-400 hover:bg-gray-800 transition-colors">Browse</a>
                </div>
            </div>
        </nav>"#
        .to_string()
}

/// Renders a link styled as a button.
///
/// Variants: `primary`, `secondary`, `ghost`.
pub fn button_link(text: &str, href: &str, variant: &str) -> String {
    let base_classes = "inline-block px-5 py-2 rounded-lg font-medium transition-colors";

    let variant_classes = match variant {
        "primary" => "bg-marquee-500 hover:bg-marquee-600 text-white",
        "secondary" => "bg-gray-700 hover:bg-gray-600 text-white",
        "ghost" => "text-gray-300 hover:text-white hover:bg-gray-800",
        _ => "bg-gray-600 hover:bg-gray-700 text-white",
    };

    format!(
        r#"<a href="{}" class="{base_classes} {variant_classes}">{}</a>"#,
        escape_html(href),
        escape_html(text)
    )
}

/// Renders a spinner, shown while an HTMX request is in flight.
pub fn spinner(id: &str) -> String {
    format!(
        r#"<div id="{id}" class="htmx-indicator flex justify-center py-4" role="status">
            <div class="w-8 h-8 border-4 border-gray-600 border-t-marquee-400 rounded-full animate-spin"></div>
        </div>"#
    )
}

/// Renders an error banner.
pub fn error_message(message: &str) -> String {
    format!(
        r#"<p class="text-red-500 text-center py-6" role="alert">{}</p>"#,
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("千と千尋"), "千と千尋");
    }

    #[test]
    fn test_button_link_variants() {
        let html = button_link("Go Home", "/", "primary");
        assert!(html.contains(r#"href="/""#));
        assert!(html.contains("bg-marquee-500"));
        assert!(html.contains(">Go Home</a>"));
    }
}
