//! News API response body.

use liftoff_core::Article;
use serde::Deserialize;

use super::NewsError;

/// Raw JSON body returned by the news API, for both success and error replies.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    /// "ok" on success, "error" otherwise.
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<Article>,
    /// Machine-readable error code (e.g., "apiKeyInvalid").
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable error message.
    #[serde(default)]
    pub message: Option<String>,
}

impl NewsApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Articles on an "ok" status, otherwise the API's own error details.
    pub fn into_articles(self) -> Result<Vec<Article>, NewsError> {
        if self.is_ok() {
            Ok(self.articles)
        } else {
            Err(NewsError::Api { code: self.code, message: self.message })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_FIXTURE: &str = r#"{
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": {"id": null, "name": "Spaceflight Now"},
                "author": "Jane Doe",
                "title": "Starship stacks for flight test",
                "description": "Booster and ship mated at Starbase.",
                "url": "https://example.com/starship",
                "urlToImage": null,
                "publishedAt": "2024-06-01T12:00:00Z",
                "content": "..."
            },
            {
                "title": "Falcon 9 flies again",
                "url": "https://example.com/falcon",
                "publishedAt": "2024-06-01T10:00:00Z",
                "extraField": 42
            }
        ]
    }"#;

    #[test]
    fn test_deserialize_ok_response() {
        let response: NewsApiResponse = serde_json::from_str(OK_FIXTURE).unwrap();
        assert!(response.is_ok());
        assert_eq!(response.total_results, Some(2));

        let articles = response.into_articles().unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0]["title"], "Starship stacks for flight test");
        assert_eq!(articles[0]["source"]["name"], "Spaceflight Now");
    }

    #[test]
    fn test_articles_pass_through_unknown_fields() {
        let response: NewsApiResponse = serde_json::from_str(OK_FIXTURE).unwrap();
        let articles = response.into_articles().unwrap();
        assert_eq!(articles[1]["extraField"], 42);
    }

    #[test]
    fn test_error_response() {
        let json = r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}"#;
        let response: NewsApiResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_ok());

        match response.into_articles() {
            Err(NewsError::Api { code, message }) => {
                assert_eq!(code.as_deref(), Some("apiKeyInvalid"));
                assert_eq!(message.as_deref(), Some("Your API key is invalid."));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_ok_without_articles_is_empty() {
        let response: NewsApiResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(response.into_articles().unwrap().is_empty());
    }
}
