//! hunter.io async client implementation.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Url;
use tokio_util::sync::CancellationToken;
use tracing::{Span, debug, instrument};

use crate::endpoint::Endpoint;
use crate::models::{
    AccountInformation, DomainSearchResult, EmailCountResult, EmailFinderResult,
    EmailVerifierResult,
};
use crate::query::{
    AccountQuery, DomainSearchQuery, EmailCountQuery, EmailFinderQuery, EmailVerifierQuery,
    Params, Query,
};
use crate::{Error, Result};

/// Async client for the hunter.io v2 API.
///
/// Holds the API key and a pooled HTTP transport. Cloning is cheap and clones
/// share the same connection pool, so one client can serve many tasks.
///
/// Use [`Client::new`] to read the key from `HUNTER_API_KEY`, or
/// [`Client::builder`] for custom settings like a proxy, a timeout or your own
/// `reqwest::Client`.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client using the `HUNTER_API_KEY` environment variable and
    /// the default transport.
    ///
    /// # Examples
    /// ```no_run
    /// # use hunter_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), hunter_client::Error> {
    /// let client = Client::new()?;
    /// let account = client.account().await?;
    /// println!("{}", account.data.plan_name);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Create a client with an explicit API key and the default transport.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Base URL endpoint paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Information about the account owning the API key. This call is free.
    pub async fn account(&self) -> Result<AccountInformation> {
        self.send(&AccountQuery).await
    }

    /// Like [`Client::account`], aborting when `cancel` fires.
    pub async fn account_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<AccountInformation> {
        self.send_with_cancel(&AccountQuery, cancel).await
    }

    /// Every email address hunter.io found for a domain or company.
    ///
    /// # Examples
    /// ```no_run
    /// # use hunter_client::{Client, DomainSearchQuery};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), hunter_client::Error> {
    /// let client = Client::new()?;
    /// let found = client
    ///     .domain_search(&DomainSearchQuery::domain("stripe.com")?.limit(10))
    ///     .await?;
    /// for email in found.data.emails {
    ///     println!("{} ({})", email.value, email.confidence);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn domain_search(&self, query: &DomainSearchQuery) -> Result<DomainSearchResult> {
        self.send(query).await
    }

    /// Like [`Client::domain_search`], aborting when `cancel` fires.
    pub async fn domain_search_with_cancel(
        &self,
        query: &DomainSearchQuery,
        cancel: &CancellationToken,
    ) -> Result<DomainSearchResult> {
        self.send_with_cancel(query, cancel).await
    }

    /// The most likely email address of a person, with a confidence score.
    ///
    /// # Examples
    /// ```no_run
    /// # use hunter_client::{Client, EmailFinderQuery, PersonName, Target};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), hunter_client::Error> {
    /// let client = Client::new()?;
    /// let query = EmailFinderQuery::new(
    ///     Target::domain("asana.com")?,
    ///     PersonName::first_last("Dustin", "Moskovitz")?,
    /// );
    /// let found = client.find_email(&query).await?;
    /// println!("{:?}", found.data.email);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_email(&self, query: &EmailFinderQuery) -> Result<EmailFinderResult> {
        self.send(query).await
    }

    /// Like [`Client::find_email`], aborting when `cancel` fires.
    pub async fn find_email_with_cancel(
        &self,
        query: &EmailFinderQuery,
        cancel: &CancellationToken,
    ) -> Result<EmailFinderResult> {
        self.send_with_cancel(query, cancel).await
    }

    /// Deliverability checks for one address.
    ///
    /// When hunter.io needs longer than its own time budget it answers with
    /// status 202, surfaced as [`Error::ServerError`]`(202)`. The request is not
    /// repeated; poll again with the same query to collect the result.
    pub async fn verify_email(&self, query: &EmailVerifierQuery) -> Result<EmailVerifierResult> {
        self.send(query).await
    }

    /// Like [`Client::verify_email`], aborting when `cancel` fires.
    pub async fn verify_email_with_cancel(
        &self,
        query: &EmailVerifierQuery,
        cancel: &CancellationToken,
    ) -> Result<EmailVerifierResult> {
        self.send_with_cancel(query, cancel).await
    }

    /// How many addresses hunter.io knows for a domain, by category.
    pub async fn count_emails(&self, query: &EmailCountQuery) -> Result<EmailCountResult> {
        self.send(query).await
    }

    /// Like [`Client::count_emails`], aborting when `cancel` fires.
    pub async fn count_emails_with_cancel(
        &self,
        query: &EmailCountQuery,
        cancel: &CancellationToken,
    ) -> Result<EmailCountResult> {
        self.send_with_cancel(query, cancel).await
    }

    /// Send any typed query and decode its response.
    pub async fn send<Q: Query>(&self, query: &Q) -> Result<Q::Output> {
        self.send_with_cancel(query, &CancellationToken::new()).await
    }

    /// Send any typed query under a cancellation token and decode its
    /// response.
    ///
    /// A body that does not match `Q::Output` is an [`Error::Json`].
    pub async fn send_with_cancel<Q: Query>(
        &self,
        query: &Q,
        cancel: &CancellationToken,
    ) -> Result<Q::Output> {
        let body = self
            .request_with_cancel(Q::ENDPOINT, &query.params(), cancel)
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Perform a raw GET against `endpoint` and return the body bytes.
    ///
    /// The API key is always added; parameters with empty values are left
    /// out. Only 200 and 201 succeed, every other status maps to an error via
    /// [`Error::from_status`].
    pub async fn request(&self, endpoint: Endpoint, params: &Params) -> Result<Bytes> {
        self.request_with_cancel(endpoint, params, &CancellationToken::new())
            .await
    }

    /// Like [`Client::request`], returning [`Error::Cancelled`] as soon as
    /// `cancel` fires.
    #[instrument(
        name = "hunter_request",
        skip(self, params, cancel),
        fields(
            http.method = "GET",
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
        )
    )]
    pub async fn request_with_cancel(
        &self,
        endpoint: Endpoint,
        params: &Params,
        cancel: &CancellationToken,
    ) -> Result<Bytes> {
        let url = self
            .base_url
            .join(endpoint.path())
            .map_err(|e| Error::InvalidBaseUrl(e.to_string()))?;

        // Recorded before the query is attached so the key never reaches logs.
        Span::current().record("http.url", url.as_str());

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("request cancelled");
                Err(Error::Cancelled)
            }
            result = self.round_trip(url, params) => result,
        }
    }

    async fn round_trip(&self, url: Url, params: &Params) -> Result<Bytes> {
        let response = self
            .http
            .get(url)
            .query(&query_pairs(&self.api_key, params))
            .send()
            .await?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        match Error::from_status(status) {
            None => Ok(response.bytes().await?),
            Some(err) => {
                // Drain so the pooled connection can be reused.
                match response.bytes().await {
                    Ok(body) => debug!(
                        status = status.as_u16(),
                        body = %String::from_utf8_lossy(&body),
                        "hunter returned an error status"
                    ),
                    Err(e) => debug!(status = status.as_u16(), error = %e, "failed to drain body"),
                }
                Err(err)
            }
        }
    }
}

/// Query pairs for one request: the API key first, then every non-empty
/// parameter in key order. An `api_key` entry in `params` is ignored.
pub(crate) fn query_pairs<'a>(api_key: &'a str, params: &'a Params) -> Vec<(&'a str, &'a str)> {
    std::iter::once((API_KEY_PARAM, api_key))
        .chain(params.non_empty().filter(|(k, _)| *k != API_KEY_PARAM))
        .collect()
}

const API_KEY_PARAM: &str = "api_key";
const API_KEY_ENV: &str = "HUNTER_API_KEY";
const BASE_URL: &str = "https://api.hunter.io/v2/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring a hunter.io client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    http: Option<reqwest::Client>,
    proxy: Option<String>,
    timeout: Duration,
    user_agent: String,
    base_url: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - API key read from `HUNTER_API_KEY`
    /// - A new `reqwest` transport, no proxy
    /// - 30 second request timeout
    /// - `hunter-client/<version>` user agent
    /// - `https://api.hunter.io/v2/` base URL
    pub fn new() -> Self {
        Self {
            api_key: None,
            http: None,
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT_VALUE.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Use this API key instead of `HUNTER_API_KEY`.
    ///
    /// An empty key falls back to the environment variable.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Use an existing `reqwest::Client` as transport.
    ///
    /// Its own settings apply; `proxy`, `timeout` and `user_agent` on this
    /// builder are then ignored.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:9050").
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Deadline for a whole request, connection through body (default: 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the API base URL.
    ///
    /// Useful for testing against a local server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the client.
    ///
    /// Fails with [`Error::MissingApiKey`] when no key was given and
    /// `HUNTER_API_KEY` is unset or empty. No network request is made.
    ///
    /// # Examples
    /// ```no_run
    /// # use hunter_client::Client;
    /// # use std::time::Duration;
    /// # fn main() -> Result<(), hunter_client::Error> {
    /// let client = Client::builder()
    ///     .api_key("my-key")
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let api_key = resolve_api_key(self.api_key, std::env::var(API_KEY_ENV).ok())?;
        let base_url = parse_base_url(&self.base_url)?;

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .user_agent(self.user_agent);
                if let Some(proxy_url) = &self.proxy {
                    builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
                }
                builder.build()?
            }
        };

        Ok(Client {
            http,
            api_key,
            base_url,
        })
    }
}

fn resolve_api_key(explicit: Option<String>, from_env: Option<String>) -> Result<String> {
    explicit
        .filter(|key| !key.is_empty())
        .or(from_env)
        .filter(|key| !key.is_empty())
        .ok_or(Error::MissingApiKey)
}

/// Parse the base URL, making sure it ends with `/` so endpoint paths are
/// appended rather than replacing the last segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    let url = Url::parse(&raw).map_err(|e| Error::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidBaseUrl(raw));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_comes_first_and_empty_params_are_dropped() {
        let params = Params::from([
            ("domain", "stripe.com"),
            ("company", ""),
            ("limit", "10"),
            ("type", ""),
        ]);
        let pairs = query_pairs("secret", &params);
        assert_eq!(
            pairs,
            vec![
                ("api_key", "secret"),
                ("domain", "stripe.com"),
                ("limit", "10"),
            ]
        );
    }

    #[test]
    fn api_key_param_cannot_be_overridden() {
        let params = Params::from([("api_key", "other"), ("email", "steli@close.io")]);
        let pairs = query_pairs("secret", &params);
        assert_eq!(pairs, vec![("api_key", "secret"), ("email", "steli@close.io")]);
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        let key = resolve_api_key(Some("explicit".into()), Some("env".into())).unwrap();
        assert_eq!(key, "explicit");
    }

    #[test]
    fn empty_key_falls_back_to_environment() {
        let key = resolve_api_key(Some(String::new()), Some("env".into())).unwrap();
        assert_eq!(key, "env");
    }

    #[test]
    fn missing_key_is_an_error() {
        assert!(matches!(
            resolve_api_key(None, None),
            Err(Error::MissingApiKey)
        ));
        assert!(matches!(
            resolve_api_key(Some(String::new()), Some(String::new())),
            Err(Error::MissingApiKey)
        ));
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = parse_base_url("http://127.0.0.1:8080/v2").unwrap();
        assert_eq!(
            url.join(Endpoint::DomainSearch.path()).unwrap().as_str(),
            "http://127.0.0.1:8080/v2/domain-search"
        );
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn debug_output_redacts_key() {
        let client = Client::with_api_key("super-secret").unwrap();
        let printed = format!("{client:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("api.hunter.io"));
    }
}
