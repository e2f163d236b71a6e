//! Base HTML document shared by every page

use axum::response::Html;

use crate::components::layout;

/// Wraps page content in the full document with Tailwind, HTMX and the
/// site navigation.
pub fn render_page(title: &str, content: &str) -> Html<String> {
    let title = layout::escape_html(title);

    let html = format!(
        r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title>{title} - Marquee</title>
            <meta charset="utf-8">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <script src="https://cdn.tailwindcss.com"></script>
            <script src="https://unpkg.com/htmx.org@1.9.10"></script>
            <script>
                tailwind.config = {{
                    darkMode: 'class',
                    theme: {{
                        extend: {{
                            colors: {{
                                'marquee': {{
                                    50: '#f5f3ff',
                                    400: '#ab8bff',
                                    500: '#8b5cf6',
                                    600: '#7c3aed',
                                    900: '#030014'
                                }}
                            }}
                        }}
                    }}
                }}
            </script>
            <style>
                .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
                .htmx-request .htmx-indicator {{ opacity: 1; }}
                .htmx-request.htmx-indicator {{ opacity: 1; }}

                .text-gradient {{
                    background: linear-gradient(90deg, #d6c7ff 0%, #ab8bff 100%);
                    -webkit-background-clip: text;
                    background-clip: text;
                    color: transparent;
                }}

                .fadeIn {{ animation: fadeIn 0.3s ease-out; }}
                @keyframes fadeIn {{
                    from {{ opacity: 0; transform: translateY(6px); }}
                    to {{ opacity: 1; transform: translateY(0); }}
                }}
            </style>
        </head>
        <body class="bg-marquee-900 text-white min-h-screen font-sans">
            {nav}

            <main class="max-w-7xl mx-auto px-4 py-8">
                {content}
            </main>
        </body>
        </html>"#,
        nav = layout::nav_bar(),
    );

    Html(html)
}
