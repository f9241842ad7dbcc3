use crate::{
    error::GatewayError,
    response::{Resource, decode_page, decode_record},
    types::Page,
};
use nftm_common::{
    AccountSource, DEFAULT_API_URL, NoAccount, REQUEST_TIMEOUT, USER_ADDRESS_HEADER,
};
use reqwest::{
    Method, RequestBuilder,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{fmt, sync::Arc, time::Duration};
use url::Url;

/// Helper type to construct a [`GatewayClient`].
pub struct GatewayBuilder {
    // Note: this is a result, so we can easily chain builder calls
    url: Result<Url, GatewayError>,
    timeout: Duration,
    accounts: Arc<dyn AccountSource>,
}

impl fmt::Debug for GatewayBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayBuilder")
            .field("url", &self.url.as_ref().map(Url::as_str))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl GatewayBuilder {
    /// Creates a new builder for the API rooted at `url`, e.g. `http://localhost:8080/api/v1`.
    pub fn new(url: &str) -> Self {
        let url = Url::parse(url)
            .map_err(|err| GatewayError::invalid_url(url, err))
            .and_then(|url| match url.scheme() {
                "http" | "https" => Ok(url),
                scheme => {
                    let reason = format!("unsupported scheme `{scheme}`");
                    Err(GatewayError::invalid_url(url, reason))
                }
            });
        Self { url, timeout: REQUEST_TIMEOUT, accounts: Arc::new(NoAccount) }
    }

    /// Sets the timeout of a whole request, from connecting until the body has been read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets where the acting account is read from on every request.
    pub fn accounts(mut self, accounts: impl AccountSource + 'static) -> Self {
        self.accounts = Arc::new(accounts);
        self
    }

    pub fn build(self) -> Result<GatewayClient, GatewayError> {
        let Self { url, timeout, accounts } = self;
        let base = url?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(GatewayError::TransportFailure)?;

        Ok(GatewayClient { inner: Arc::new(ClientInner { client, base, timeout, accounts }) })
    }
}

/// Typed client of the marketplace HTTP API.
///
/// Every request carries `Content-Type: application/json` and, when the account source has an
/// account at the time the request is built, an `X-User-Address` header. There are no retries.
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    client: reqwest::Client,
    base: Url,
    timeout: Duration,
    accounts: Arc<dyn AccountSource>,
}

impl fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayClient")
            .field("base", &self.inner.base.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl GatewayClient {
    /// Creates a client for `url` with the default timeout and no account.
    pub fn new(url: &str) -> Result<Self, GatewayError> {
        GatewayBuilder::new(url).build()
    }

    pub fn builder(url: &str) -> GatewayBuilder {
        GatewayBuilder::new(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Resolves `segments` against the base URL, escaping each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.inner.base.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::invalid_url(self.inner.base.as_str(), "cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, GatewayError> {
        let url = self.url(segments)?;
        let mut request = self.inner.client.request(method, url);
        if let Some(account) = self.inner.accounts.current_account() {
            request = request.header(USER_ADDRESS_HEADER, account.to_string());
        }
        Ok(request)
    }

    /// Sends the request and returns the JSON body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<Value, GatewayError> {
        let request = request.build().map_err(GatewayError::TransportFailure)?;
        let (method, path) = (request.method().clone(), request.url().path().to_string());
        debug!(target: "gateway", %method, %path, "sending request");

        let response =
            self.inner.client.execute(request).await.map_err(GatewayError::TransportFailure)?;
        let status = response.status();
        let body = response.text().await.map_err(GatewayError::TransportFailure)?;

        if !status.is_success() {
            let err = GatewayError::rejected(status, &body);
            warn!(target: "gateway", %method, %path, %err, "request rejected");
            return Err(err);
        }
        debug!(target: "gateway", %method, %path, %status, "request succeeded");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|source| GatewayError::Decode { path, source })
    }

    pub(crate) async fn call<T>(
        &self,
        method: Method,
        segments: &[&str],
        decode: impl FnOnce(Value) -> Result<T, serde_json::Error>,
    ) -> Result<T, GatewayError> {
        self.call_with(self.request(method, segments)?, segments, decode).await
    }

    async fn call_with<T>(
        &self,
        request: RequestBuilder,
        segments: &[&str],
        decode: impl FnOnce(Value) -> Result<T, serde_json::Error>,
    ) -> Result<T, GatewayError> {
        let value = self.send(request).await?;
        decode(value).map_err(|source| GatewayError::Decode { path: segments.join("/"), source })
    }

    pub(crate) async fn get_record<T: Resource>(
        &self,
        segments: &[&str],
    ) -> Result<T, GatewayError> {
        self.call(Method::GET, segments, decode_record).await
    }

    pub(crate) async fn get_page<T: Resource>(
        &self,
        segments: &[&str],
        query: &impl Serialize,
    ) -> Result<Page<T>, GatewayError> {
        let request = self.request(Method::GET, segments)?.query(query);
        self.call_with(request, segments, decode_page).await
    }

    /// Sends `body` and decodes the returned record.
    pub(crate) async fn send_record<T: Resource>(
        &self,
        method: Method,
        segments: &[&str],
        body: &impl Serialize,
    ) -> Result<T, GatewayError> {
        let request = self.request(method, segments)?.json(body);
        self.call_with(request, segments, decode_record).await
    }

    /// Sends `body`, if any, and decodes the response as-is.
    pub(crate) async fn send_plain<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&impl Serialize>,
    ) -> Result<T, GatewayError> {
        let mut request = self.request(method, segments)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        self.call_with(request, segments, serde_json::from_value).await
    }
}
