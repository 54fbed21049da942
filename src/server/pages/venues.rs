use super::{detail_line, detail_link, escape_html, genre_badges, image, layout};
use crate::listings::{ArtistAppearance, CityArea, SearchResults, VenueDetail};
use crate::server::flash::Flash;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKind {
    Venues,
    Artists,
}

impl SearchKind {
    fn base_path(&self) -> &'static str {
        match self {
            SearchKind::Venues => "/venues",
            SearchKind::Artists => "/artists",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            SearchKind::Venues => "Venues",
            SearchKind::Artists => "Artists",
        }
    }
}

pub fn venues_page(directory: &[CityArea], flash: Option<&Flash>) -> String {
    let mut content = String::from(
        r#"<h1>Venues</h1>
<p><a href="/venues/create">List a new venue</a></p>
"#,
    );
    if directory.is_empty() {
        content.push_str(r#"<p class="muted">No venues listed yet.</p>"#);
    }
    for area in directory {
        content.push_str(&format!(
            "<h3>{}, {}</h3>\n<ul class=\"items\">\n",
            escape_html(&area.city),
            escape_html(&area.state)
        ));
        for venue in &area.venues {
            content.push_str(&format!(
                r#"    <li><a href="/venues/{}">{}</a> <span class="muted">{} upcoming</span></li>
"#,
                venue.id,
                escape_html(&venue.name),
                venue.num_upcoming_shows
            ));
        }
        content.push_str("</ul>\n");
    }
    layout("Venues", flash, &content)
}

pub fn search_results_page(kind: SearchKind, term: &str, results: &SearchResults) -> String {
    let base = kind.base_path();
    let mut content = format!(
        "<h2>Number of search results for \"{}\": {}</h2>\n<ul class=\"items\">\n",
        escape_html(term),
        results.count
    );
    for entity in &results.data {
        content.push_str(&format!(
            r#"    <li><a href="{}/{}">{}</a> <span class="muted">{} upcoming</span></li>
"#,
            base,
            entity.id,
            escape_html(&entity.name),
            entity.num_upcoming_shows
        ));
    }
    content.push_str("</ul>\n");
    layout(kind.title(), None, &content)
}

fn appearances(heading: &str, count: usize, shows: &[ArtistAppearance]) -> String {
    let mut out = format!("<h3>{} {}</h3>\n<div>\n", count, heading);
    for show in shows {
        out.push_str(&format!(
            r#"    <div class="show-card">
        {}
        <p><a href="/artists/{}">{}</a></p>
        <p class="muted">{}</p>
    </div>
"#,
            image(&show.artist_image_link, &show.artist_name, ""),
            show.artist_id,
            escape_html(&show.artist_name),
            escape_html(&show.start_time)
        ));
    }
    out.push_str("</div>\n");
    out
}

pub fn venue_detail_page(detail: &VenueDetail, flash: Option<&Flash>) -> String {
    let venue = &detail.venue;
    let seeking = if venue.seeking_talent {
        format!(
            r#"<div class="seeking"><strong>Seeking talent</strong><p>{}</p></div>"#,
            escape_html(&venue.seeking_description)
        )
    } else {
        r#"<p class="muted">Not currently seeking talent</p>"#.to_string()
    };

    let content = format!(
        r#"<h1>{name}</h1>
<p class="muted">ID: {id}</p>
{genres}
<p>{address}</p>
<p>{city}, {state}</p>
{phone}{website}{facebook}{seeking}
{image}
<p>
    <a href="/venues/{id}/edit">Edit venue</a>
</p>
<form method="post" action="/venues/{id}/delete">
    <button class="danger" type="submit">Delete venue</button>
</form>
{past}{upcoming}"#,
        name = escape_html(&venue.name),
        id = venue.id,
        genres = genre_badges(&venue.genres),
        address = escape_html(&venue.address),
        city = escape_html(&venue.city),
        state = escape_html(&venue.state),
        phone = detail_line("Phone", &venue.phone),
        website = detail_link("Website", &venue.website),
        facebook = detail_link("Facebook", &venue.facebook_link),
        seeking = seeking,
        image = image(&venue.image_link, &venue.name, "detail-image"),
        past = appearances("Past Shows", detail.past_shows_count, &detail.past_shows),
        upcoming = appearances(
            "Upcoming Shows",
            detail.upcoming_shows_count,
            &detail.upcoming_shows
        ),
    );
    layout(&venue.name, flash, &content)
}
