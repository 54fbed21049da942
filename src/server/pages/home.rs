use super::layout;
use crate::listing_store::ListingCounts;
use crate::server::flash::Flash;

pub struct HomeView {
    pub counts: ListingCounts,
    pub hash: String,
    pub uptime: String,
}

pub fn home_page(view: &HomeView, flash: Option<&Flash>) -> String {
    let content = format!(
        r#"<h1>Gigboard</h1>
<p>Find venues, discover artists and see who is playing where.</p>
<ul class="items">
    <li><a href="/venues">{venues} venues</a> &middot; <a href="/venues/create">list a new venue</a></li>
    <li><a href="/artists">{artists} artists</a> &middot; <a href="/artists/create">list a new artist</a></li>
    <li><a href="/shows">{shows} shows</a> &middot; <a href="/shows/create">list a new show</a></li>
</ul>
<p class="muted">build {hash}, up {uptime}</p>"#,
        venues = view.counts.venues,
        artists = view.counts.artists,
        shows = view.counts.shows,
        hash = super::escape_html(&view.hash),
        uptime = view.uptime,
    );
    layout("Home", flash, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_counts() {
        let view = HomeView {
            counts: ListingCounts {
                venues: 3,
                artists: 4,
                shows: 12,
            },
            hash: "abc123".to_string(),
            uptime: "0d 00:00:05".to_string(),
        };
        let page = home_page(&view, Some(&Flash::success("Show was successfully listed!")));
        assert!(page.contains("3 venues"));
        assert!(page.contains("4 artists"));
        assert!(page.contains("12 shows"));
        assert!(page.contains("Show was successfully listed!"));
    }
}
