use movie_search_models::MovieDetails;
use movie_search_sources::{FetchedImage, ImageFetcher};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const NO_PLOT: &str = "No plot available.";
const FALLBACK_NAME: &str = "Movie";

pub const PLACEHOLDER_POSTER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="450" viewBox="0 0 300 450"><rect width="300" height="450" fill="#333"/><text x="50%" y="50%" font-size="20" fill="#666" text-anchor="middle" dominant-baseline="middle">No Poster</text></svg>"##;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Poster that ends up in the export
#[derive(Debug, Clone, PartialEq)]
pub enum PosterImage {
    Fetched(FetchedImage),
    Placeholder,
}

impl PosterImage {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, PosterImage::Placeholder)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            PosterImage::Placeholder => "svg",
            PosterImage::Fetched(image) => match image.content_type.as_deref() {
                Some(ct) if ct.starts_with("image/png") => "png",
                Some(ct) if ct.starts_with("image/webp") => "webp",
                Some(ct) if ct.starts_with("image/gif") => "gif",
                Some(ct) if ct.starts_with("image/svg") => "svg",
                _ => "jpg",
            },
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            PosterImage::Fetched(image) => &image.bytes,
            PosterImage::Placeholder => PLACEHOLDER_POSTER_SVG.as_bytes(),
        }
    }
}

/// Try the poster URL, then the same URL through the proxy, then give up on a placeholder
pub async fn fetch_poster(
    fetcher: &dyn ImageFetcher,
    poster_url: Option<&str>,
    proxy_prefix: Option<&str>,
) -> PosterImage {
    let Some(url) = poster_url else {
        debug!("No poster URL, using placeholder");
        return PosterImage::Placeholder;
    };

    match fetcher.fetch_image(url).await {
        Ok(image) => return PosterImage::Fetched(image),
        Err(e) => debug!("Direct poster fetch failed: {}", e),
    }

    if let Some(prefix) = proxy_prefix.filter(|p| !p.is_empty()) {
        let proxied = format!("{}{}", prefix, urlencoding::encode(url));
        match fetcher.fetch_image(&proxied).await {
            Ok(image) => return PosterImage::Fetched(image),
            Err(e) => debug!("Proxied poster fetch failed: {}", e),
        }
    }

    warn!("Could not retrieve poster {}, using placeholder", url);
    PosterImage::Placeholder
}

/// Title with every character outside `[A-Za-z0-9]` replaced by `_`
pub fn safe_file_name(title: &str) -> String {
    if title.trim().is_empty() {
        return FALLBACK_NAME.to_string();
    }
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Printable content of one details record
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsSheet {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
    pub plot: String,
}

impl DetailsSheet {
    pub fn from_details(details: &MovieDetails) -> Self {
        let na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
        let title = if details.title.trim().is_empty() {
            FALLBACK_NAME.to_string()
        } else {
            details.title.clone()
        };
        let year = if details.year.trim().is_empty() {
            "N/A".to_string()
        } else {
            details.year.clone()
        };

        Self {
            title,
            fields: vec![
                ("Year", year),
                ("Rating", na(&details.imdb_rating)),
                ("Runtime", na(&details.runtime)),
                ("Genre", na(&details.genre)),
                ("Director", na(&details.director)),
                ("Cast", na(&details.actors)),
            ],
            plot: details.plot.clone().unwrap_or_else(|| NO_PLOT.to_string()),
        }
    }
}

/// Output format for an exported sheet
pub trait DocumentRenderer: Send + Sync {
    fn extension(&self) -> &'static str;

    /// `poster_file` is the poster's file name relative to the document
    fn render(&self, sheet: &DetailsSheet, poster_file: &str) -> String;
}

pub struct MarkdownRenderer;

impl DocumentRenderer for MarkdownRenderer {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, sheet: &DetailsSheet, poster_file: &str) -> String {
        let mut out = format!("# {}\n\n![{}]({})\n\n", sheet.title, sheet.title, poster_file);
        for (label, value) in &sheet.fields {
            out.push_str(&format!("- **{}:** {}\n", label, value));
        }
        out.push_str("\n## Plot\n\n");
        out.push_str(&sheet.plot);
        out.push('\n');
        out
    }
}

/// Files written by an export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFiles {
    pub document: PathBuf,
    pub poster: PathBuf,
    pub placeholder_poster: bool,
}

/// Write the document and its poster into `output_dir`
pub async fn export_details(
    details: &MovieDetails,
    fetcher: &dyn ImageFetcher,
    renderer: &dyn DocumentRenderer,
    output_dir: &Path,
    proxy_prefix: Option<&str>,
) -> Result<ExportedFiles, ExportError> {
    let base_name = safe_file_name(&details.title);
    let poster = fetch_poster(fetcher, details.poster.as_deref(), proxy_prefix).await;
    let poster_name = format!("{}_poster.{}", base_name, poster.extension());
    let sheet = DetailsSheet::from_details(details);
    let document = renderer.render(&sheet, &poster_name);

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| ExportError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let poster_path = output_dir.join(&poster_name);
    write_file(&poster_path, poster.bytes()).await?;

    let document_path = output_dir.join(format!("{}.{}", base_name, renderer.extension()));
    write_file(&document_path, document.as_bytes()).await?;

    info!("Exported {} to {}", details.imdb_id, document_path.display());
    Ok(ExportedFiles {
        document: document_path,
        poster: poster_path,
        placeholder_poster: poster.is_placeholder(),
    })
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use movie_search_models::{MediaKind, SearchResult};
    use movie_search_sources::SourceError;
    use std::sync::Mutex;

    /// Serves images only for URLs it was told about and records every request
    struct ScriptedFetcher {
        ok_urls: Vec<String>,
        requested: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn new(ok_urls: &[&str]) -> Self {
            Self {
                ok_urls: ok_urls.iter().map(|u| u.to_string()).collect(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageFetcher for ScriptedFetcher {
        async fn fetch_image(&self, url: &str) -> Result<FetchedImage, SourceError> {
            self.requested.lock().unwrap().push(url.to_string());
            if self.ok_urls.iter().any(|u| u == url) {
                Ok(FetchedImage {
                    bytes: vec![0xFF, 0xD8, 0xFF],
                    content_type: Some("image/jpeg".to_string()),
                })
            } else {
                Err(SourceError::Transport("blocked".to_string()))
            }
        }
    }

    fn details(title: &str, poster: Option<&str>) -> MovieDetails {
        MovieDetails::from_summary(&SearchResult {
            imdb_id: "tt0372784".to_string(),
            title: title.to_string(),
            year: "2005".to_string(),
            poster: poster.map(str::to_string),
            kind: MediaKind::Movie,
        })
    }

    const POSTER: &str = "https://img.example/p.jpg";
    const PROXY: &str = "https://proxy.example/?url=";

    #[test]
    fn test_safe_file_name() {
        assert_eq!(safe_file_name("Batman Begins"), "Batman_Begins");
        assert_eq!(safe_file_name("Amélie: Part 2"), "Am_lie__Part_2");
        assert_eq!(safe_file_name("  "), "Movie");
    }

    #[tokio::test]
    async fn test_poster_direct_fetch() {
        let fetcher = ScriptedFetcher::new(&[POSTER]);
        let poster = fetch_poster(&fetcher, Some(POSTER), Some(PROXY)).await;
        assert!(!poster.is_placeholder());
        assert_eq!(poster.extension(), "jpg");
        assert_eq!(fetcher.requested(), vec![POSTER.to_string()]);
    }

    #[tokio::test]
    async fn test_poster_falls_back_to_proxy() {
        let proxied = format!("{}{}", PROXY, urlencoding::encode(POSTER));
        let fetcher = ScriptedFetcher::new(&[proxied.as_str()]);
        let poster = fetch_poster(&fetcher, Some(POSTER), Some(PROXY)).await;
        assert!(!poster.is_placeholder());
        assert_eq!(fetcher.requested(), vec![POSTER.to_string(), proxied]);
    }

    #[tokio::test]
    async fn test_poster_placeholder_when_all_fail() {
        let fetcher = ScriptedFetcher::new(&[]);
        let poster = fetch_poster(&fetcher, Some(POSTER), Some(PROXY)).await;
        assert_eq!(poster, PosterImage::Placeholder);
        assert_eq!(poster.extension(), "svg");
        assert_eq!(fetcher.requested().len(), 2);

        let poster = fetch_poster(&fetcher, None, Some(PROXY)).await;
        assert!(poster.is_placeholder());
        assert_eq!(fetcher.requested().len(), 2);
    }

    #[test]
    fn test_markdown_sheet() {
        let mut movie = details("Batman Begins", None);
        movie.imdb_rating = Some("8.2".to_string());
        let sheet = DetailsSheet::from_details(&movie);
        let doc = MarkdownRenderer.render(&sheet, "Batman_Begins_poster.svg");

        assert!(doc.starts_with("# Batman Begins\n"));
        assert!(doc.contains("![Batman Begins](Batman_Begins_poster.svg)"));
        assert!(doc.contains("- **Rating:** 8.2"));
        assert!(doc.contains("- **Runtime:** N/A"));
        assert!(doc.contains("No plot available."));
    }

    #[tokio::test]
    async fn test_export_writes_document_and_poster() {
        let dir = tempfile::TempDir::new().unwrap();
        let fetcher = ScriptedFetcher::new(&[]);
        let movie = details("Batman Begins", Some(POSTER));

        let files = export_details(&movie, &fetcher, &MarkdownRenderer, dir.path(), None)
            .await
            .unwrap();

        assert_eq!(files.document, dir.path().join("Batman_Begins.md"));
        assert_eq!(files.poster, dir.path().join("Batman_Begins_poster.svg"));
        assert!(files.placeholder_poster);

        let poster = std::fs::read_to_string(&files.poster).unwrap();
        assert!(poster.contains("No Poster"));
        let doc = std::fs::read_to_string(&files.document).unwrap();
        assert!(doc.contains("Batman_Begins_poster.svg"));
    }
}
