use super::*;

const BATMAN_PAGE: &str = r#"{
    "Search": [
        {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://m.media-amazon.com/images/M/batman-begins.jpg"},
        {"Title": "Batman: The Animated Series", "Year": "1992–1995", "imdbID": "tt0103359", "Type": "series", "Poster": "N/A"}
    ],
    "totalResults": "57",
    "Response": "True"
}"#;

#[test]
fn test_parse_search_found() {
    let response = parse_search_response(BATMAN_PAGE).unwrap();
    match response {
        SearchResponse::Found { results, total_results } => {
            assert_eq!(total_results, 57);
            assert_eq!(results.len(), 2);
            assert_eq!(results[0].imdb_id, "tt0372784");
            assert_eq!(results[0].kind, MediaKind::Movie);
            assert!(results[0].poster.is_some());
            assert_eq!(results[1].kind, MediaKind::Series);
            assert_eq!(results[1].poster, None, "N/A poster must be treated as missing");
        }
        other => panic!("expected Found, got {:?}", other),
    }
}

#[test]
fn test_parse_search_not_found() {
    let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
    let response = parse_search_response(body).unwrap();
    assert_eq!(
        response,
        SearchResponse::NotFound {
            message: "Movie not found!".to_string()
        }
    );
}

#[test]
fn test_parse_search_bad_total_falls_back_to_page_size() {
    let body = r#"{"Search":[{"Title":"Heat","Year":"1995","imdbID":"tt0113277","Type":"movie","Poster":"N/A"}],"totalResults":"lots","Response":"True"}"#;
    match parse_search_response(body).unwrap() {
        SearchResponse::Found { total_results, .. } => assert_eq!(total_results, 1),
        other => panic!("expected Found, got {:?}", other),
    }
}

#[test]
fn test_parse_search_invalid_json_is_decode_error() {
    let err = parse_search_response("<html>gateway timeout</html>").unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
    assert!(err.is_network());
}

#[test]
fn test_parse_details() {
    let body = r#"{
        "Title": "Batman Begins", "Year": "2005", "Rated": "PG-13", "Released": "15 Jun 2005",
        "Runtime": "140 min", "Genre": "Action, Crime, Drama", "Director": "Christopher Nolan",
        "Writer": "Bob Kane, David S. Goyer, Christopher Nolan",
        "Actors": "Christian Bale, Michael Caine, Ken Watanabe",
        "Plot": "After witnessing his parents' death, Bruce learns the art of fighting.",
        "Language": "English, Mandarin", "Country": "United States, United Kingdom",
        "Awards": "Nominated for 1 Oscar. 14 wins & 79 nominations total",
        "Poster": "https://m.media-amazon.com/images/M/batman-begins.jpg",
        "imdbRating": "8.2", "imdbVotes": "1,611,327", "imdbID": "tt0372784",
        "Type": "movie", "Response": "True"
    }"#;

    let details = parse_details_response(body).unwrap();
    assert_eq!(details.imdb_id, "tt0372784");
    assert_eq!(details.director.as_deref(), Some("Christopher Nolan"));
    assert_eq!(details.rating_value(), Some(8.2));
    assert_eq!(details.runtime.as_deref(), Some("140 min"));
}

#[test]
fn test_parse_details_sentinels_are_missing() {
    let body = r#"{"Title":"Obscure Short","Year":"1911","Runtime":"N/A","Plot":"N/A","Awards":"N/A",
        "imdbRating":"N/A","Poster":"N/A","imdbID":"tt0000001","Type":"movie","Response":"True"}"#;
    let details = parse_details_response(body).unwrap();
    assert_eq!(details.runtime, None);
    assert_eq!(details.plot, None);
    assert_eq!(details.poster, None);
    assert_eq!(details.rating_value(), None);
}

#[test]
fn test_parse_details_unknown_id() {
    let body = r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#;
    let err = parse_details_response(body).unwrap_err();
    assert!(matches!(err, SourceError::NotFound(ref m) if m == "Incorrect IMDb ID."));
    assert!(!err.is_network());
}
