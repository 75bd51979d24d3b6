use std::time::Duration;

use async_trait::async_trait;
use bedrock_model::{FetchError, LinkSource, RawLinkSet};
use serde::Deserialize;

pub const DOWNLOAD_LINKS_URL: &str =
    "https://net-secondary.web.minecraft-services.net/api/v1.0/download/links";

/// The links API refuses requests that do not look like they come from a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            url: DOWNLOAD_LINKS_URL.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LinksResponse {
    pub result: LinksResult,
}

#[derive(Debug, Deserialize)]
pub struct LinksResult {
    #[serde(default)]
    pub links: Vec<DownloadLink>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLink {
    pub download_type: String,
    pub download_url: String,
}

impl From<LinksResponse> for RawLinkSet {
    fn from(response: LinksResponse) -> Self {
        RawLinkSet::from_pairs(
            response
                .result
                .links
                .into_iter()
                .map(|link| (link.download_type, link.download_url)),
        )
    }
}

/// Parse a links API body into a [`RawLinkSet`].
///
/// # Errors
/// Returns an error if the body is not the expected JSON document.
pub fn parse_links_response(body: &str) -> Result<RawLinkSet, FetchError> {
    serde_json::from_str::<LinksResponse>(body)
        .map(RawLinkSet::from)
        .map_err(FetchError::parse_from)
}

pub struct DownloadLinksClient {
    client: reqwest::Client,
    url: String,
}

impl DownloadLinksClient {
    /// Build a client for the links API.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(options: &FetchOptions) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self {
            client,
            url: options.url.clone(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LinkSource for DownloadLinksClient {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch_links(&self) -> Result<RawLinkSet, FetchError> {
        log::debug!("Requesting download links from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: self.url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_snippet = response
                .text()
                .await
                .ok()
                .map(|body| response_snippet(&body, 160))
                .unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status,
                body_snippet,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Request {
                url: self.url.clone(),
                source,
            })?;

        let links = parse_links_response(&body)?;
        log::debug!("Links API returned {} download types", links.len());
        Ok(links)
    }
}

fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}

#[cfg(test)]
mod tests {
    use bedrock_model::LinkCategory;

    use super::*;

    const SAMPLE: &str = r#"{
        "result": {
            "links": [
                { "downloadType": "serverJar", "downloadUrl": "https://example.com/server.jar" },
                { "downloadType": "serverBedrockWindows", "downloadUrl": "https://example.com/bin-win/bedrock-server-1.21.50.3.zip" },
                { "downloadType": "serverBedrockLinux", "downloadUrl": "https://example.com/bin-linux/bedrock-server-1.21.50.3.zip" },
                { "downloadType": "serverBedrockPreviewWindows", "downloadUrl": "https://example.com/bin-win-preview/bedrock-server-1.21.60.1.zip" },
                { "downloadType": "serverBedrockPreviewLinux", "downloadUrl": "https://example.com/bin-linux-preview/bedrock-server-1.21.60.1.zip" }
            ]
        }
    }"#;

    #[test]
    fn parses_links_payload() {
        let links = parse_links_response(SAMPLE).expect("sample payload should parse");

        assert_eq!(links.len(), 5);
        assert_eq!(
            links.category(LinkCategory::PreviewLinux),
            Some("https://example.com/bin-linux-preview/bedrock-server-1.21.60.1.zip")
        );
        assert_eq!(links.get("serverJar"), Some("https://example.com/server.jar"));
    }

    #[test]
    fn later_duplicate_download_type_wins() {
        let body = r#"{"result":{"links":[
            {"downloadType":"serverBedrockLinux","downloadUrl":"first"},
            {"downloadType":"serverBedrockLinux","downloadUrl":"second"}
        ]}}"#;

        let links = parse_links_response(body).unwrap();

        assert_eq!(links.category(LinkCategory::Linux), Some("second"));
    }

    #[test]
    fn missing_links_array_is_empty_set() {
        let links = parse_links_response(r#"{"result":{}}"#).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn malformed_payload_is_parse_error() {
        assert!(matches!(
            parse_links_response("<html>blocked</html>"),
            Err(FetchError::Parse(_))
        ));
        assert!(matches!(
            parse_links_response(r#"{"links":[]}"#),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn response_snippet_truncates_and_prefixes() {
        assert_eq!(response_snippet("", 10), "");
        assert_eq!(response_snippet("forbidden by policy", 9), ": forbidden");
    }

    #[test]
    fn client_uses_configured_url() {
        let options = FetchOptions {
            url: "http://127.0.0.1:9/links".to_string(),
            ..FetchOptions::default()
        };
        let client = DownloadLinksClient::new(&options).expect("client should build");
        assert_eq!(client.url(), "http://127.0.0.1:9/links");
        assert_eq!(client.name(), "http://127.0.0.1:9/links");
    }
}
