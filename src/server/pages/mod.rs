//! Server-rendered HTML pages.
//!
//! Every page is a plain `String` built with `format!`; anything that came
//! from a user goes through `escape_html` first.

mod artists;
mod errors;
mod forms;
mod home;
mod shows;
mod venues;

pub use artists::{artist_detail_page, artists_page};
pub use errors::{not_found_page, server_error_page};
pub use forms::{artist_form_page, show_form_page, venue_form_page, FormMode};
pub use home::{home_page, HomeView};
pub use shows::shows_page;
pub use venues::{search_results_page, venue_detail_page, venues_page, SearchKind};

use super::flash::{Flash, FlashLevel};

/// Served at `/static/style.css` unless a static directory is configured.
pub const STYLESHEET: &str = include_str!("style.css");

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        None => String::new(),
        Some(flash) => {
            let class = match flash.level {
                FlashLevel::Success => "flash flash-success",
                FlashLevel::Error => "flash flash-error",
            };
            format!(
                r#"<div class="{}" role="alert">{}</div>"#,
                class,
                escape_html(&flash.message)
            )
        }
    }
}

pub(crate) fn layout(title: &str, flash: Option<&Flash>, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Gigboard</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header>
    <a class="brand" href="/">Gigboard</a>
    <nav>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
    </nav>
    <form class="search-form" method="post" action="/venues/search">
        <input type="search" name="search_term" placeholder="Find a venue">
        <button type="submit">Search</button>
    </form>
    <form class="search-form" method="post" action="/artists/search">
        <input type="search" name="search_term" placeholder="Find an artist">
        <button type="submit">Search</button>
    </form>
</header>
<main>
{flash}
{content}
</main>
<footer>Gigboard</footer>
</body>
</html>
"#,
        title = escape_html(title),
        flash = flash_banner(flash),
        content = content,
    )
}

fn genre_badges(genres: &[String]) -> String {
    let badges: String = genres
        .iter()
        .map(|g| format!("<span>{}</span>", escape_html(g)))
        .collect();
    format!(r#"<div class="genres">{}</div>"#, badges)
}

/// A labelled line for the optional contact fields; empty values render nothing.
fn detail_line(label: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!(
        "<p><strong>{}:</strong> {}</p>\n",
        label,
        escape_html(value)
    )
}

fn detail_link(label: &str, href: &str) -> String {
    if href.is_empty() {
        return String::new();
    }
    let href = escape_html(href);
    format!(
        r#"<p><strong>{}:</strong> <a href="{}" rel="noopener">{}</a></p>
"#,
        label, href, href
    )
}

fn image(src: &str, alt: &str, class: &str) -> String {
    if src.is_empty() {
        return String::new();
    }
    format!(
        r#"<img class="{}" src="{}" alt="{}">"#,
        class,
        escape_html(src),
        escape_html(alt)
    )
}
