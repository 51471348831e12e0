use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::dtos::auth_dtos::{AuthOut, LoginIn, MsgUserOut, SignupIn, UpdateProfileIn};
use crate::dtos::post_dtos::{CommentIn, CreatePostIn, EditPostIn, MsgOut, MsgPostOut};
use crate::models::post::Post;
use crate::models::user::UserPublic;

use super::session::Session;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with an error body; `msg` is its user-facing text.
    #[error("{msg}")]
    Api { status: StatusCode, msg: String },
    #[error("not logged in")]
    NoSession,
}

/// Typed client for the backend, one method per route. Mutating calls
/// return the server's copy of the post so the caller can reconcile its
/// [`Feed`](super::feed::Feed).
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: None,
        }
    }

    /// Resumes a persisted session, e.g. `SessionStore::load`'s result.
    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let body = SignupIn {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        };
        let out: AuthOut = self
            .execute(self.client.post(self.url("/auth/signup")).json(&body))
            .await?;
        Ok(self.start_session(out))
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, ClientError> {
        let body = LoginIn {
            email: email.into(),
            password: password.into(),
        };
        let out: AuthOut = self
            .execute(self.client.post(self.url("/auth/login")).json(&body))
            .await?;
        Ok(self.start_session(out))
    }

    pub fn logout(&mut self) {
        self.session = None;
    }

    pub async fn get_profile(&self) -> Result<UserPublic, ClientError> {
        self.execute(self.authed(Method::GET, "/auth/profile")?).await
    }

    pub async fn update_profile(
        &self,
        name: &str,
        bio: Option<&str>,
    ) -> Result<MsgUserOut, ClientError> {
        let body = UpdateProfileIn {
            name: Some(name.into()),
            bio: bio.map(Into::into),
        };
        self.execute(self.authed(Method::PUT, "/auth/profile")?.json(&body))
            .await
    }

    /// Public route; works logged out.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.execute(self.client.get(self.url("/posts"))).await
    }

    pub async fn create_post(
        &self,
        text: Option<&str>,
        image: Option<&str>,
    ) -> Result<Post, ClientError> {
        let body = CreatePostIn {
            text: text.map(Into::into),
            image: image.map(Into::into),
        };
        self.execute(self.authed(Method::POST, "/posts")?.json(&body))
            .await
    }

    pub async fn toggle_like(&self, post_id: Uuid) -> Result<Post, ClientError> {
        self.execute(self.authed(Method::POST, &format!("/posts/{post_id}/like"))?)
            .await
    }

    pub async fn add_comment(&self, post_id: Uuid, text: &str) -> Result<Post, ClientError> {
        let body = CommentIn { text: text.into() };
        self.execute(
            self.authed(Method::POST, &format!("/posts/{post_id}/comment"))?
                .json(&body),
        )
        .await
    }

    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Post, ClientError> {
        self.execute(self.authed(
            Method::DELETE,
            &format!("/posts/{post_id}/comment/{comment_id}"),
        )?)
        .await
    }

    pub async fn edit_post(&self, post_id: Uuid, edit: EditPostIn) -> Result<MsgPostOut, ClientError> {
        self.execute(
            self.authed(Method::PUT, &format!("/posts/{post_id}"))?
                .json(&edit),
        )
        .await
    }

    pub async fn delete_post(&self, post_id: Uuid) -> Result<MsgOut, ClientError> {
        self.execute(self.authed(Method::DELETE, &format!("/posts/{post_id}"))?)
            .await
    }

    fn start_session(&mut self, out: AuthOut) -> Session {
        let session = Session {
            token: out.token,
            user_id: out.id,
            name: out.name,
        };
        self.session = Some(session.clone());
        session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let session = self.session.as_ref().ok_or(ClientError::NoSession)?;
        Ok(self
            .client
            .request(method, self.url(path))
            .bearer_auth(&session.token))
    }

    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }
        let msg = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("msg")?.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("request failed: {status}"));
        Err(ClientError::Api { status, msg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authed_calls_without_a_session_fail_fast() {
        let client = ApiClient::new("http://localhost:8080/");
        let err = client.authed(Method::GET, "/auth/profile").unwrap_err();
        assert!(matches!(err, ClientError::NoSession));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.url("/posts"), "http://localhost:8080/posts");
    }
}
