//! Catalog sources: local JSON files and HTTP endpoints.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use mathtutor_core::catalog::parse_catalog_str;
use mathtutor_core::error::CatalogError;
use mathtutor_core::model::Catalog;
use mathtutor_core::traits::CatalogSource;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Reads the catalog from a file on disk.
pub struct FileCatalogSource {
    path: PathBuf,
    location: String,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    fn location(&self) -> &str {
        &self.location
    }

    #[instrument(skip(self), fields(location = %self.location))]
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| CatalogError::Fetch {
                    location: self.location.clone(),
                    message: e.to_string(),
                })?;
        debug!(bytes = content.len(), "catalog file read");
        parse_catalog_str(&content)
    }
}

/// Fetches the catalog with an HTTP GET.
pub struct HttpCatalogSource {
    url: String,
    client: reqwest::Client,
}

impl HttpCatalogSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Fetch {
                location: url.to_string(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn location(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let fetch_error = |e: reqwest::Error| CatalogError::Fetch {
            location: self.url.clone(),
            message: e.to_string(),
        };

        let response = self.client.get(&self.url).send().await.map_err(fetch_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await.map_err(fetch_error)?;
        debug!(bytes = body.len(), "catalog downloaded");
        parse_catalog_str(&body)
    }
}

/// Pick a source for a catalog location: `http(s)://` URLs are fetched, anything
/// else is read as a file path.
pub fn catalog_source_for(
    location: &str,
    timeout: Option<Duration>,
) -> Result<Box<dyn CatalogSource>, CatalogError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Ok(Box::new(HttpCatalogSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileCatalogSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog_json() -> serde_json::Value {
        serde_json::json!({
            "categories": [{
                "categoryId": "algebra",
                "categoryName": "Algebra",
                "subcategories": [{
                    "subcategoryId": "linear",
                    "subcategoryName": "Linear",
                    "tasks": [
                        {"id": "1", "problemText": "2x = 6", "correctAnswer": "3", "isActual": true}
                    ]
                }]
            }]
        })
    }

    #[tokio::test]
    async fn http_source_loads_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
            .mount(&server)
            .await;

        let url = format!("{}/tasks.json", server.uri());
        let source = catalog_source_for(&url, None).unwrap();
        assert_eq!(source.location(), url);

        let catalog = source.load().await.unwrap();
        assert_eq!(catalog.total_offered_tasks(), 1);
    }

    #[tokio::test]
    async fn http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source =
            HttpCatalogSource::new(&format!("{}/tasks.json", server.uri()), Duration::from_secs(5))
                .unwrap();
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn http_invalid_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let source =
            HttpCatalogSource::new(&format!("{}/tasks.json", server.uri()), Duration::from_secs(5))
                .unwrap();
        assert!(matches!(source.load().await, Err(CatalogError::Parse(_))));
    }

    #[tokio::test]
    async fn file_source() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("tasks.json");
        std::fs::write(&file, catalog_json().to_string()).unwrap();

        let source = catalog_source_for(file.to_str().unwrap(), None).unwrap();
        let catalog = source.load().await.unwrap();
        assert_eq!(catalog.categories[0].category_id, "algebra");

        let missing = FileCatalogSource::new(dir.path().join("missing.json"));
        assert!(matches!(missing.load().await, Err(CatalogError::Fetch { .. })));
    }
}
