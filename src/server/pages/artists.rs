use super::{detail_line, detail_link, escape_html, genre_badges, image, layout};
use crate::listings::{ArtistDetail, ArtistSummary, VenueAppearance};
use crate::server::flash::Flash;

pub fn artists_page(roster: &[ArtistSummary], flash: Option<&Flash>) -> String {
    let mut content = String::from(
        r#"<h1>Artists</h1>
<p><a href="/artists/create">List a new artist</a></p>
<ul class="items">
"#,
    );
    for artist in roster {
        content.push_str(&format!(
            "    <li><a href=\"/artists/{}\">{}</a></li>\n",
            artist.id,
            escape_html(&artist.name)
        ));
    }
    content.push_str("</ul>\n");
    if roster.is_empty() {
        content.push_str(r#"<p class="muted">No artists listed yet.</p>"#);
    }
    layout("Artists", flash, &content)
}

fn appearances(heading: &str, count: usize, shows: &[VenueAppearance]) -> String {
    let mut out = format!("<h3>{} {}</h3>\n<div>\n", count, heading);
    for show in shows {
        out.push_str(&format!(
            r#"    <div class="show-card">
        {}
        <p><a href="/venues/{}">{}</a></p>
        <p class="muted">{}</p>
    </div>
"#,
            image(&show.venue_image_link, &show.venue_name, ""),
            show.venue_id,
            escape_html(&show.venue_name),
            escape_html(&show.start_time)
        ));
    }
    out.push_str("</div>\n");
    out
}

pub fn artist_detail_page(detail: &ArtistDetail, flash: Option<&Flash>) -> String {
    let artist = &detail.artist;
    let seeking = if artist.seeking_venue {
        format!(
            r#"<div class="seeking"><strong>Seeking performance venues</strong><p>{}</p></div>"#,
            escape_html(&artist.seeking_description)
        )
    } else {
        r#"<p class="muted">Not currently seeking performance venues</p>"#.to_string()
    };

    let content = format!(
        r#"<h1>{name}</h1>
<p class="muted">ID: {id}</p>
{genres}
<p>{city}, {state}</p>
{phone}{website}{facebook}{seeking}
{image}
<p><a href="/artists/{id}/edit">Edit artist</a></p>
<form method="post" action="/artists/{id}/delete">
    <button class="danger" type="submit">Delete artist</button>
</form>
{past}{upcoming}"#,
        name = escape_html(&artist.name),
        id = artist.id,
        genres = genre_badges(&artist.genres),
        city = escape_html(&artist.city),
        state = escape_html(&artist.state),
        phone = detail_line("Phone", &artist.phone),
        website = detail_link("Website", &artist.website),
        facebook = detail_link("Facebook", &artist.facebook_link),
        seeking = seeking,
        image = image(&artist.image_link, &artist.name, "detail-image"),
        past = appearances("Past Shows", detail.past_shows_count, &detail.past_shows),
        upcoming = appearances(
            "Upcoming Shows",
            detail.upcoming_shows_count,
            &detail.upcoming_shows
        ),
    );
    layout(&artist.name, flash, &content)
}
