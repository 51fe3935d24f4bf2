// Hand-crafted async HTTP client for the Fundly REST API.
//
// Auth endpoints (`/signin`, `/register`, ...) live at the server root;
// resources live under `/api/`. Authentication is a server session cookie
// captured on sign-in, so the client always carries a cookie jar.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

// ── Error response shapes ────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Fundly API.
///
/// One public method per server operation, grouped in per-entity impl
/// blocks (`auth`, `users`, `budgets`, `categories`, `version`). Each
/// method issues exactly one request and returns its typed result; there
/// are no retries, no caching, and no response transformation beyond
/// deserialization.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference-counted
/// and the session cookie jar is shared across clones.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for the server at `base_url`.
    ///
    /// A cookie jar is added to the transport when none is configured;
    /// without one the session cookie from `/signin` would be dropped and
    /// every `/api/...` call would come back 401.
    pub fn new(base_url: &str, mut transport: TransportConfig) -> Result<Self, Error> {
        if transport.cookie_jar.is_none() {
            transport = transport.with_cookie_jar();
        }
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages the cookie jar).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and make sure it ends with `/` so relative
    /// joins (`api/budgets`, `signin`, ...) resolve under it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"api/budgets"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining relative paths works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    /// The configured `reqwest::Client`, for endpoint impls that need
    /// request shapes the verb helpers don't cover (forms, query params).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_empty(resp).await
    }

    /// POST with an empty body (logout and friends).
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        Self::handle_empty(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    pub(crate) async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                // Truncate on a char boundary; byte 200 may fall mid-character.
                let mut cut = body.len().min(200);
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                let preview = &body[..cut];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    pub(crate) async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Map a non-2xx response into the error taxonomy.
    ///
    /// 401 is always `Unauthorized`. Otherwise the body decides: a JSON
    /// object with a `message` string is a generic server failure; a JSON
    /// object of string fields without one is a field-keyed validation map
    /// (the `/register` contract); anything else carries the raw body.
    pub(crate) async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Unauthorized;
        }

        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorBody>(&raw) {
            if let Some(message) = err.message {
                return Error::Api {
                    status: status.as_u16(),
                    message,
                };
            }
        }

        if let Ok(fields) = serde_json::from_str::<std::collections::HashMap<String, String>>(&raw)
        {
            if !fields.is_empty() {
                return Error::Validation {
                    status: status.as_u16(),
                    errors: fields,
                };
            }
        }

        Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client =
            ApiClient::new("https://funds.example.com", TransportConfig::default()).unwrap();
        assert_eq!(
            client.url("api/budgets").as_str(),
            "https://funds.example.com/api/budgets"
        );
    }

    #[test]
    fn base_url_with_path_prefix_is_preserved() {
        let client =
            ApiClient::new("https://example.com/fundly/", TransportConfig::default()).unwrap();
        assert_eq!(
            client.url("signin").as_str(),
            "https://example.com/fundly/signin"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::new("not a url", TransportConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
