// Authentication endpoints
//
// Sign-up and sign-in return the bearer token alongside the user; the
// caller decides whether to install it via `set_bearer`. Passwords are
// carried as `SecretString` and exposed only at the serialization point.

use secrecy::{ExposeSecret, SecretString};

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{AuthPayload, SignInRequest, SignUpRequest, UserDto};

impl ApiClient {
    /// `POST /auth/sign-up` -- create an account and obtain a credential.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthPayload, Error> {
        let body = SignUpRequest {
            name,
            email,
            password: password.expose_secret(),
        };
        self.post("auth/sign-up", &body).await
    }

    /// `POST /auth/sign-in` -- exchange credentials for a bearer token.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthPayload, Error> {
        let body = SignInRequest {
            email,
            password: password.expose_secret(),
        };
        self.post("auth/sign-in", &body).await
    }

    /// `POST /auth/logout` -- invalidate the remote session.
    pub async fn logout(&self) -> Result<(), Error> {
        self.post_empty("auth/logout").await
    }

    /// `GET /auth/check` -- resolve the bearer credential to its user.
    pub async fn check(&self) -> Result<UserDto, Error> {
        self.get("auth/check").await
    }
}
