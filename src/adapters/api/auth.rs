//! Sign-in and sign-out

use super::client::ApiClient;
use crate::domain::{AppError, AuthResponse, CongregationId, LoginForm, Result};
use secrecy::ExposeSecret;
use serde::Serialize;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    congregation_id: CongregationId,
}

pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Signs in and stores the returned token in the session
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the congregation is not a number or
    /// the email is blank, and the server's message on rejected credentials.
    pub async fn login(&self, form: &LoginForm) -> Result<AuthResponse> {
        let congregation_id: CongregationId = form
            .congregation
            .parse()
            .map_err(AppError::Validation)?;

        let email = form.email.trim();
        if email.is_empty() {
            return Err(AppError::Validation("email cannot be empty".to_string()));
        }

        let request = LoginRequest {
            email,
            password: form.password.expose_secret().as_ref(),
            congregation_id,
        };

        let response: AuthResponse = self.client.post("/auth/login", &request).await?;
        self.client.session().store_token(&response.access_token).await?;

        tracing::info!(
            user_id = response.user.id,
            congregation_id = %response.user.congregation_id,
            "Signed in"
        );

        Ok(response)
    }

    pub async fn logout(&self) -> Result<()> {
        self.client.session().sign_out().await
    }
}
