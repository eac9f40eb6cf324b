use movie_search_models::{available, MediaKind, MovieDetails, SearchResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::error::SourceError;
use crate::traits::{PlotLength, SearchQuery, SearchResponse};

#[derive(Debug, Serialize, Deserialize)]
struct OmdbListing {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "Type", default)]
    item_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbListing>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OmdbDetails {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Rated", default)]
    rated: Option<String>,
    #[serde(rename = "Released", default)]
    released: Option<String>,
    #[serde(rename = "Runtime", default)]
    runtime: Option<String>,
    #[serde(rename = "Genre", default)]
    genre: Option<String>,
    #[serde(rename = "Director", default)]
    director: Option<String>,
    #[serde(rename = "Writer", default)]
    writer: Option<String>,
    #[serde(rename = "Actors", default)]
    actors: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: Option<String>,
    #[serde(rename = "Language", default)]
    language: Option<String>,
    #[serde(rename = "Country", default)]
    country: Option<String>,
    #[serde(rename = "Awards", default)]
    awards: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default)]
    imdb_votes: Option<String>,
    #[serde(rename = "Type", default)]
    item_type: Option<String>,
}

fn is_true(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

fn convert_listing(listing: OmdbListing) -> SearchResult {
    SearchResult {
        imdb_id: listing.imdb_id,
        title: listing.title,
        year: available(listing.year).unwrap_or_default(),
        poster: available(listing.poster),
        kind: listing
            .item_type
            .as_deref()
            .map(MediaKind::from_api)
            .unwrap_or(MediaKind::Unknown),
    }
}

/// Decode a listing response body
pub fn parse_search_response(body: &str) -> Result<SearchResponse, SourceError> {
    let parsed: OmdbSearchResponse = serde_json::from_str(body)?;

    if !is_true(&parsed.response) {
        let message = parsed.error.unwrap_or_else(|| "Movie not found!".to_string());
        return Ok(SearchResponse::NotFound { message });
    }

    let results: Vec<SearchResult> = parsed.search.into_iter().map(convert_listing).collect();
    let total_results = match parsed.total_results.as_deref().map(|t| t.trim().parse::<u32>()) {
        Some(Ok(total)) => total,
        other => {
            warn!("Unparsable totalResults {:?}, falling back to page size", other);
            results.len() as u32
        }
    };

    Ok(SearchResponse::Found {
        results,
        total_results,
    })
}

/// Decode a details response body
pub fn parse_details_response(body: &str) -> Result<MovieDetails, SourceError> {
    let parsed: OmdbDetails = serde_json::from_str(body)?;

    if !is_true(&parsed.response) {
        let message = parsed.error.unwrap_or_else(|| "Incorrect IMDb ID.".to_string());
        return Err(SourceError::NotFound(message));
    }

    let imdb_id = parsed
        .imdb_id
        .ok_or_else(|| SourceError::Decode("details response is missing imdbID".to_string()))?;

    Ok(MovieDetails {
        imdb_id,
        title: available(parsed.title).unwrap_or_else(|| "Untitled".to_string()),
        year: available(parsed.year).unwrap_or_default(),
        poster: available(parsed.poster),
        kind: parsed
            .item_type
            .as_deref()
            .map(MediaKind::from_api)
            .unwrap_or(MediaKind::Unknown),
        rated: available(parsed.rated),
        released: available(parsed.released),
        runtime: available(parsed.runtime),
        genre: available(parsed.genre),
        director: available(parsed.director),
        writer: available(parsed.writer),
        actors: available(parsed.actors),
        plot: available(parsed.plot),
        language: available(parsed.language),
        country: available(parsed.country),
        awards: available(parsed.awards),
        imdb_rating: available(parsed.imdb_rating),
        imdb_votes: available(parsed.imdb_votes),
    })
}

async fn read_body(response: reqwest::Response) -> Result<String, SourceError> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["Error"].as_str().map(|s| s.to_string()))
            .unwrap_or(body);
        return Err(SourceError::Unauthorized(message));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.text().await?)
}

/// Run a listing query
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &SearchQuery,
) -> Result<SearchResponse, SourceError> {
    let page = query.page.to_string();
    let mut params: Vec<(&str, &str)> = vec![
        ("apikey", api_key),
        ("s", query.term.as_str()),
        ("page", page.as_str()),
    ];
    if let Some(kind) = query.type_filter.as_query() {
        params.push(("type", kind));
    }

    debug!("GET search s={:?} page={} type={}", query.term, query.page, query.type_filter);
    let response = client.get(base_url).query(&params).send().await?;
    let body = read_body(response).await?;
    parse_search_response(&body)
}

/// Fetch one record by identifier
pub async fn details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
    plot: PlotLength,
) -> Result<MovieDetails, SourceError> {
    debug!("GET details i={} plot={}", imdb_id, plot.as_str());
    let response = client
        .get(base_url)
        .query(&[("apikey", api_key), ("i", imdb_id), ("plot", plot.as_str())])
        .send()
        .await?;
    let body = read_body(response).await?;
    parse_details_response(&body)
}

#[cfg(test)]
mod tests;
