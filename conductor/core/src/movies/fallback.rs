//! Local movie database used when TMDB cannot be reached

use super::types::{CastMember, Credits, Genre, Movie, MovieDetails, MoviePage, Video, Videos};

/// Title of the record returned for ids the local database lacks
pub const UNAVAILABLE_TITLE: &str = "MOVIE DETAILS UNAVAILABLE";

fn movie(id: u64, title: &str, poster: &str, date: &str, rating: f64) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: Some(poster.to_string()),
        release_date: Some(date.to_string()),
        vote_average: rating,
    }
}

/// The five-movie local top list
#[must_use]
pub fn top_movies() -> MoviePage {
    let results = vec![
        movie(
            1,
            "THE SHAWSHANK REDEMPTION",
            "/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg",
            "1994-09-23",
            8.7,
        ),
        movie(
            2,
            "THE GODFATHER",
            "/3bhkrj58Vtu7enYsRolD1fZdja1.jpg",
            "1972-03-14",
            8.7,
        ),
        movie(
            3,
            "THE DARK KNIGHT",
            "/1hRoyzDtpgMU7Dz4JF22RANzQO7.jpg",
            "2008-07-16",
            8.5,
        ),
        movie(
            4,
            "THE GODFATHER PART II",
            "/hek3koDUyRQk7FIhPXsa6mT2Zc3.jpg",
            "1974-12-18",
            8.6,
        ),
        movie(
            5,
            "12 ANGRY MEN",
            "/ppd84D2i9W8jXmsyInGyihiSyqz.jpg",
            "1957-04-10",
            8.5,
        ),
    ];
    MoviePage {
        page: 1,
        total_pages: 1,
        total_results: results.len() as u32,
        results,
    }
}

/// The detailed record for `id`, if the local database has one
#[must_use]
pub fn movie_details(id: u64) -> Option<MovieDetails> {
    match id {
        1 => Some(shawshank()),
        _ => None,
    }
}

/// Placeholder record for ids nothing knows about
#[must_use]
pub fn unavailable(id: u64) -> MovieDetails {
    MovieDetails {
        id,
        title: UNAVAILABLE_TITLE.to_string(),
        overview: "UNABLE TO RETRIEVE MOVIE DATA FROM DATABASE.".to_string(),
        poster_path: None,
        backdrop_path: None,
        release_date: Some("UNKNOWN".to_string()),
        vote_average: 0.0,
        runtime: Some(0),
        genres: Vec::new(),
        credits: Credits::default(),
        videos: Videos::default(),
    }
}

fn shawshank() -> MovieDetails {
    MovieDetails {
        id: 1,
        title: "THE SHAWSHANK REDEMPTION".to_string(),
        overview: "FRAMED IN THE 1940S FOR THE DOUBLE MURDER OF HIS WIFE AND HER LOVER, \
                   UPSTANDING BANKER ANDY DUFRESNE BEGINS A NEW LIFE AT THE SHAWSHANK PRISON, \
                   WHERE HE PUTS HIS ACCOUNTING SKILLS TO WORK FOR AN AMORAL WARDEN. DURING HIS \
                   LONG STRETCH IN PRISON, DUFRESNE COMES TO BE ADMIRED BY THE OTHER INMATES -- \
                   INCLUDING AN OLDER PRISONER NAMED RED -- FOR HIS INTEGRITY AND UNQUENCHABLE \
                   SENSE OF HOPE."
            .to_string(),
        poster_path: Some("/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg".to_string()),
        backdrop_path: Some("/kXfqcdQKsToO0OUXHcrrNCHDBzO.jpg".to_string()),
        release_date: Some("1994-09-23".to_string()),
        vote_average: 8.7,
        runtime: Some(142),
        genres: vec![
            Genre {
                id: 18,
                name: "DRAMA".to_string(),
            },
            Genre {
                id: 80,
                name: "CRIME".to_string(),
            },
        ],
        credits: Credits {
            cast: vec![
                CastMember {
                    id: 504,
                    name: "TIM ROBBINS".to_string(),
                    character: Some("ANDY DUFRESNE".to_string()),
                },
                CastMember {
                    id: 192,
                    name: "MORGAN FREEMAN".to_string(),
                    character: Some("ELLIS BOYD \"RED\" REDDING".to_string()),
                },
            ],
        },
        videos: Videos {
            results: vec![Video {
                key: "NmzuHjWmXOc".to_string(),
                site: "YouTube".to_string(),
                kind: "Trailer".to_string(),
            }],
        },
    }
}
