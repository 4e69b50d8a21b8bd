//! Movie metadata types (TMDB v3 shapes) and display helpers

use serde::{Deserialize, Serialize};

/// Poster image base
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Backdrop image base
pub const BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// Top-rated paging stops here (roughly the top 250 at 20 per page)
pub const MAX_TOP_RATED_PAGES: u32 = 13;

/// Cast members shown on a detail page
pub const CAST_LIMIT: usize = 6;

/// One movie in a listing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// TMDB id
    pub id: u64,
    /// Title
    pub title: String,
    /// Poster path, relative to [`POSTER_BASE_URL`]
    #[serde(default)]
    pub poster_path: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: Option<String>,
    /// Average rating out of 10
    #[serde(default)]
    pub vote_average: f64,
}

impl Movie {
    /// Release year, if the date has one
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    /// Full poster URL
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        poster_url(self.poster_path.as_deref())
    }
}

/// One page of a listing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    /// 1-based page number
    #[serde(default = "first_page")]
    pub page: u32,
    /// Movies on this page
    pub results: Vec<Movie>,
    /// Total pages the server reports
    #[serde(default = "first_page")]
    pub total_pages: u32,
    /// Total movies the server reports
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl MoviePage {
    /// Pages a reader may navigate, capped at [`MAX_TOP_RATED_PAGES`]
    #[must_use]
    pub fn navigable_pages(&self) -> u32 {
        self.total_pages.clamp(1, MAX_TOP_RATED_PAGES)
    }

    /// Movies whose title contains `query`, ignoring case
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Movie> {
        let needle = query.trim().to_lowercase();
        self.results
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Genre tag
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// TMDB genre id
    pub id: u64,
    /// Display name
    pub name: String,
}

/// Cast credit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    /// TMDB person id
    pub id: u64,
    /// Actor name
    pub name: String,
    /// Role
    #[serde(default)]
    pub character: Option<String>,
}

/// `credits` block of a detail response
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    /// Cast in billing order
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// Attached video
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Video key on its site
    pub key: String,
    /// Hosting site, e.g. "YouTube"
    pub site: String,
    /// Kind, e.g. "Trailer"
    #[serde(rename = "type")]
    pub kind: String,
}

/// `videos` block of a detail response
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Videos {
    /// Attached videos
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Full movie record (`append_to_response=videos,credits`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// TMDB id
    pub id: u64,
    /// Title
    pub title: String,
    /// Synopsis
    #[serde(default)]
    pub overview: String,
    /// Poster path
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop path
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// `YYYY-MM-DD`, or `UNKNOWN` for the placeholder
    #[serde(default)]
    pub release_date: Option<String>,
    /// Average rating out of 10
    #[serde(default)]
    pub vote_average: f64,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Genres
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Cast and crew
    #[serde(default)]
    pub credits: Credits,
    /// Attached videos
    #[serde(default)]
    pub videos: Videos,
}

impl MovieDetails {
    /// Key of the first YouTube trailer
    #[must_use]
    pub fn trailer_key(&self) -> Option<&str> {
        self.videos
            .results
            .iter()
            .find(|v| v.site == "YouTube" && v.kind == "Trailer")
            .map(|v| v.key.as_str())
    }

    /// First [`CAST_LIMIT`] cast members
    #[must_use]
    pub fn top_cast(&self) -> &[CastMember] {
        let end = self.credits.cast.len().min(CAST_LIMIT);
        &self.credits.cast[..end]
    }

    /// Runtime as `"{h}H {m}M"`; `None` when unknown or zero
    #[must_use]
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime.filter(|m| *m > 0).map(format_runtime)
    }

    /// Release year, if the date has one
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    /// Full poster URL
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        poster_url(self.poster_path.as_deref())
    }

    /// Full backdrop URL
    #[must_use]
    pub fn backdrop_url(&self) -> Option<String> {
        backdrop_url(self.backdrop_path.as_deref())
    }

    /// Genre names joined with " / "
    #[must_use]
    pub fn genre_line(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// `142` -> `"2H 22M"`
#[must_use]
pub fn format_runtime(minutes: u32) -> String {
    format!("{}H {}M", minutes / 60, minutes % 60)
}

/// Rating as shown in listings, e.g. `"8.7/10"`
#[must_use]
pub fn format_rating(vote_average: f64) -> String {
    format!("{vote_average:.1}/10")
}

/// Poster URL for a relative path
#[must_use]
pub fn poster_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{POSTER_BASE_URL}{p}"))
}

/// Backdrop URL for a relative path
#[must_use]
pub fn backdrop_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{BACKDROP_BASE_URL}{p}"))
}

fn release_year(date: Option<&str>) -> Option<&str> {
    let date = date?;
    let year = date.get(..4)?;
    year.chars().all(|c| c.is_ascii_digit()).then_some(year)
}
