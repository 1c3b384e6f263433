//! Remote data source for the search panel.
//!
//! The panel is generic over [`RemoteSource`] so tests can substitute a
//! scripted fake. [`HttpSource`] is the production implementation: a GET
//! against a search endpoint returning a JSON array of items.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::FetchError;
use crate::item::Item;

/// An asynchronous item search backend.
///
/// Contract: `Ok(vec![])` is a legitimate zero-result response and must not
/// be reported as an error. Only transport failures and unusable responses
/// surface as [`FetchError`].
pub trait RemoteSource: Send + Sync + 'static {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = std::result::Result<Vec<Item>, FetchError>> + Send;
}

/// HTTP search backend: `GET <endpoint>?q=<urlencoded-query>`.
///
/// The request timeout lives here, on the client - the panel itself never
/// times out an in-flight fetch.
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn url_for(&self, query: &str) -> String {
        format!("{}?q={}", self.endpoint, urlencoding::encode(query))
    }
}

impl RemoteSource for HttpSource {
    async fn search(&self, query: &str) -> std::result::Result<Vec<Item>, FetchError> {
        let url = self.url_for(query);
        debug!(%url, "dispatching remote search");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.to_string()
                } else {
                    message
                },
            });
        }

        // A 2xx body that is not an item array folds into the server-error
        // arm; the status is kept for diagnostics.
        response
            .json::<Vec<Item>>()
            .await
            .map_err(|err| FetchError::Server {
                status: status.as_u16(),
                message: format!("malformed payload: {err}"),
            })
    }
}
