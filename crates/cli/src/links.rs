//! External links shown next to each recommendation.

use serde::Serialize;
use url::form_urlencoded;

const IMDB_TITLE: &str = "https://www.imdb.com/title";
const TMDB_MOVIE: &str = "https://www.themoviedb.org/movie";
const GOOGLE_SEARCH: &str = "https://www.google.com/search";
const OMDB_POSTER: &str = "https://img.omdbapi.com/";

/// IMDb ids are written as `tt` plus at least seven digits
pub fn imdb_url(imdb_id: u32) -> String {
    format!("{}/tt{:07}/", IMDB_TITLE, imdb_id)
}

pub fn tmdb_url(tmdb_id: u32) -> String {
    format!("{}/{}", TMDB_MOVIE, tmdb_id)
}

/// Web search for "<title> movie"
pub fn search_url(title: &str) -> String {
    let query: String =
        form_urlencoded::byte_serialize(format!("{} movie", title).as_bytes()).collect();
    format!("{}?q={}", GOOGLE_SEARCH, query)
}

pub fn poster_url(imdb_id: u32, api_key: &str) -> String {
    let key: String = form_urlencoded::byte_serialize(api_key.as_bytes()).collect();
    format!("{}?i=tt{:07}&h=400&apikey={}", OMDB_POSTER, imdb_id, key)
}

/// All links for one movie. Links that need a missing id are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieLinks {
    pub imdb: Option<String>,
    pub tmdb: Option<String>,
    pub search: String,
    /// Only built when an OMDb API key is configured
    pub poster: Option<String>,
}

impl MovieLinks {
    pub fn new(
        title: &str,
        imdb_id: Option<u32>,
        tmdb_id: Option<u32>,
        omdb_api_key: Option<&str>,
    ) -> Self {
        Self {
            imdb: imdb_id.map(imdb_url),
            tmdb: tmdb_id.map(tmdb_url),
            search: search_url(title),
            poster: imdb_id.zip(omdb_api_key).map(|(id, key)| poster_url(id, key)),
        }
    }
}

/// Render an optional link for terminal output
pub fn or_na(link: &Option<String>) -> &str {
    link.as_deref().unwrap_or("N/A")
}
