use super::{escape_html, layout};
use crate::listing_store::{ArtistFields, VenueFields};
use crate::listings::{ArtistSummary, VenueChoice};
use crate::server::flash::Flash;
use crate::server::forms::{GENRES, US_STATES};

/// Whether a form creates a new record or edits the one with this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

fn text_input(name: &str, label: &str, input_type: &str, value: &str, required: bool) -> String {
    format!(
        r#"<label for="{name}">{label}</label>
<input type="{input_type}" id="{name}" name="{name}" value="{value}"{required}>
"#,
        name = name,
        label = label,
        input_type = input_type,
        value = escape_html(value),
        required = if required { " required" } else { "" },
    )
}

fn state_select(selected: &str) -> String {
    let options: String = US_STATES
        .iter()
        .map(|s| {
            let mark = if *s == selected { " selected" } else { "" };
            format!(r#"<option value="{s}"{mark}>{s}</option>"#)
        })
        .collect();
    format!(
        r#"<label for="state">State</label>
<select id="state" name="state">{}</select>
"#,
        options
    )
}

fn genre_select(selected: &[String]) -> String {
    let options: String = GENRES
        .iter()
        .map(|g| {
            let mark = if selected.iter().any(|s| s == g) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{v}"{mark}>{v}</option>"#,
                v = escape_html(g)
            )
        })
        .collect();
    format!(
        r#"<label for="genres">Genres</label>
<select id="genres" name="genres" multiple>{}</select>
"#,
        options
    )
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<div class="checkbox"><input type="checkbox" id="{name}" name="{name}" value="y"{checked}> <label for="{name}">{label}</label></div>
"#,
        name = name,
        label = label,
        checked = if checked { " checked" } else { "" },
    )
}

fn textarea(name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<label for="{name}">{label}</label>
<textarea id="{name}" name="{name}" rows="3">{value}</textarea>
"#,
        name = name,
        label = label,
        value = escape_html(value),
    )
}

pub fn venue_form_page(mode: FormMode, fields: &VenueFields) -> String {
    let (title, action) = match mode {
        FormMode::Create => ("List a new venue".to_string(), "/venues/create".to_string()),
        FormMode::Edit(id) => (
            format!("Edit venue {}", fields.name),
            format!("/venues/{}/edit", id),
        ),
    };
    let content = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
{name}{city}{state}{address}{phone}{genres}{image}{facebook}{website}{seeking}{description}<input type="submit" value="Save venue">
</form>"#,
        title = escape_html(&title),
        action = action,
        name = text_input("name", "Name", "text", &fields.name, true),
        city = text_input("city", "City", "text", &fields.city, false),
        state = state_select(&fields.state),
        address = text_input("address", "Address", "text", &fields.address, false),
        phone = text_input("phone", "Phone", "tel", &fields.phone, false),
        genres = genre_select(&fields.genres),
        image = text_input("image_link", "Image link", "url", &fields.image_link, false),
        facebook = text_input(
            "facebook_link",
            "Facebook link",
            "url",
            &fields.facebook_link,
            false
        ),
        website = text_input("website", "Website", "url", &fields.website, false),
        seeking = checkbox("seeking_talent", "Looking for talent", fields.seeking_talent),
        description = textarea(
            "seeking_description",
            "Seeking description",
            &fields.seeking_description
        ),
    );
    layout(&title, None, &content)
}

pub fn artist_form_page(mode: FormMode, fields: &ArtistFields) -> String {
    let (title, action) = match mode {
        FormMode::Create => (
            "List a new artist".to_string(),
            "/artists/create".to_string(),
        ),
        FormMode::Edit(id) => (
            format!("Edit artist {}", fields.name),
            format!("/artists/{}/edit", id),
        ),
    };
    let content = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
{name}{city}{state}{phone}{genres}{image}{facebook}{website}{seeking}{description}<input type="submit" value="Save artist">
</form>"#,
        title = escape_html(&title),
        action = action,
        name = text_input("name", "Name", "text", &fields.name, true),
        city = text_input("city", "City", "text", &fields.city, false),
        state = state_select(&fields.state),
        phone = text_input("phone", "Phone", "tel", &fields.phone, false),
        genres = genre_select(&fields.genres),
        image = text_input("image_link", "Image link", "url", &fields.image_link, false),
        facebook = text_input(
            "facebook_link",
            "Facebook link",
            "url",
            &fields.facebook_link,
            false
        ),
        website = text_input("website", "Website", "url", &fields.website, false),
        seeking = checkbox("seeking_venue", "Looking for venues", fields.seeking_venue),
        description = textarea(
            "seeking_description",
            "Seeking description",
            &fields.seeking_description
        ),
    );
    layout(&title, None, &content)
}

pub fn show_form_page(
    venues: &[VenueChoice],
    artists: &[ArtistSummary],
    flash: Option<&Flash>,
) -> String {
    let artist_options: String = artists
        .iter()
        .map(|a| {
            format!(
                r#"<option value="{}">{}</option>"#,
                a.id,
                escape_html(&a.name)
            )
        })
        .collect();
    let venue_options: String = venues
        .iter()
        .map(|v| {
            format!(
                r#"<option value="{}">{} ({}, {})</option>"#,
                v.id,
                escape_html(&v.name),
                escape_html(&v.city),
                escape_html(&v.state)
            )
        })
        .collect();
    let content = format!(
        r#"<h1>List a new show</h1>
<form method="post" action="/shows/create">
<label for="artist_id">Artist</label>
<select id="artist_id" name="artist_id" required>{artist_options}</select>
<label for="venue_id">Venue</label>
<select id="venue_id" name="venue_id" required>{venue_options}</select>
<label for="start_time">Start time</label>
<input type="datetime-local" id="start_time" name="start_time" required>
<input type="submit" value="Create show">
</form>"#,
    );
    layout("List a new show", flash, &content)
}
