// Authentication endpoints
//
// These live at the server root (`/signin`, `/register`, ...) rather than
// under `/api/`. Sign-in sets a session cookie in the client's jar;
// subsequent `/api/...` requests use that cookie automatically. The client
// itself holds no credential beyond the jar.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::User;

impl ApiClient {
    /// Authenticate with username/password.
    ///
    /// `POST /signin` with form-encoded credentials (the server's login
    /// filter consumes form fields, not JSON). On success the session
    /// cookie lands in the jar; the response body is opaque and ignored.
    pub async fn sign_in(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.url("signin");
        debug!("POST {url} (sign-in)");

        let form = [
            ("username", username),
            ("password", password.expose_secret()),
        ];
        let resp = self.http().post(url).form(&form).send().await?;
        Self::handle_empty(resp).await
    }

    /// End the current session.
    ///
    /// `POST /logout`
    pub async fn sign_out(&self) -> Result<(), Error> {
        self.post_empty("logout").await
    }

    /// Create a new account.
    ///
    /// `POST /register`. A 4xx with a field-keyed body surfaces as
    /// [`Error::Validation`] mapping each rejected field to its reason.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, Error> {
        let body = json!({
            "username": username,
            "email": email,
            "password": password.expose_secret(),
        });
        self.post("register", &body).await
    }

    /// Request a password-reset mail for `email`.
    ///
    /// `POST /request-change-password` with `{"email": ...}`
    pub async fn request_password_change(&self, email: &str) -> Result<(), Error> {
        self.post_no_response("request-change-password", &json!({ "email": email }))
            .await
    }

    /// Complete a password reset with the token from the mail.
    ///
    /// `POST /change-password?email=&token=&newPassword=` -- the server
    /// takes the whole payload as query parameters, empty body.
    pub async fn change_password(
        &self,
        email: &str,
        token: &str,
        new_password: &SecretString,
    ) -> Result<(), Error> {
        let mut url = self.url("change-password");
        url.query_pairs_mut()
            .append_pair("email", email)
            .append_pair("token", token)
            .append_pair("newPassword", new_password.expose_secret());
        debug!("POST {} (change-password)", url.path());

        let resp = self.http().post(url).send().await?;
        Self::handle_empty(resp).await
    }
}
