use super::{escape_html, image, layout};
use crate::listings::{format_medium, ShowCard};
use crate::server::flash::Flash;

pub fn shows_page(shows: &[ShowCard], flash: Option<&Flash>) -> String {
    let mut content = String::from(
        r#"<h1>Upcoming Shows</h1>
<p><a href="/shows/create">List a new show</a></p>
<div>
"#,
    );
    for show in shows {
        content.push_str(&format!(
            r#"    <div class="show-card">
        {image}
        <p class="muted">{when}</p>
        <p><a href="/artists/{artist_id}">{artist}</a></p>
        <p>playing at <a href="/venues/{venue_id}">{venue}</a></p>
    </div>
"#,
            image = image(&show.artist_image_link, &show.artist_name, ""),
            when = format_medium(&show.start_time),
            artist_id = show.artist_id,
            artist = escape_html(&show.artist_name),
            venue_id = show.venue_id,
            venue = escape_html(&show.venue_name),
        ));
    }
    content.push_str("</div>\n");
    if shows.is_empty() {
        content.push_str(r#"<p class="muted">No upcoming shows.</p>"#);
    }
    layout("Shows", flash, &content)
}
