//! HTTP access to the activity service.
//!
//! `ActivityService` is the seam between the board and the network. The
//! browser build talks to the server through [`HttpActivityService`], tests
//! plug in an in-memory implementation.

#![allow(async_fn_in_trait)]

use gloo_net::http::{Request, Response};
use urlencoding::encode;

use crate::error::{Result, ServiceError};
use crate::model::{Catalog, ServiceReply};

pub trait ActivityService {
    /// `GET /activities`
    async fn fetch_catalog(&self) -> Result<Catalog>;

    /// `POST /activities/{name}/signup?email={email}`
    async fn signup(&self, activity: &str, email: &str) -> Result<ServiceReply>;

    /// `DELETE /activities/{name}/unregister?email={email}`
    async fn unregister(&self, activity: &str, email: &str) -> Result<ServiceReply>;
}

pub const ACTIVITIES_PATH: &str = "/activities";

pub fn signup_path(activity: &str, email: &str) -> String {
    format!(
        "{ACTIVITIES_PATH}/{}/signup?email={}",
        encode(activity),
        encode(email)
    )
}

pub fn unregister_path(activity: &str, email: &str) -> String {
    format!(
        "{ACTIVITIES_PATH}/{}/unregister?email={}",
        encode(activity),
        encode(email)
    )
}

/// Turns a mutation response into a reply or an error.
///
/// Success bodies must be JSON. Error bodies may be anything; `detail` is
/// picked up when present.
pub fn interpret_reply(status: u16, body: &str) -> Result<ServiceReply> {
    if (200..300).contains(&status) {
        return Ok(serde_json::from_str(body)?);
    }
    let detail = serde_json::from_str::<ServiceReply>(body)
        .ok()
        .and_then(|r| r.detail);
    Err(ServiceError::Status { status, detail })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpActivityService {
    base: String,
}

impl HttpActivityService {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn reply(resp: Response) -> Result<ServiceReply> {
        let status = resp.status();
        let body = resp.text().await?;
        interpret_reply(status, &body)
    }
}

impl ActivityService for HttpActivityService {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let resp = Request::get(&self.url(ACTIVITIES_PATH)).send().await?;
        if !resp.ok() {
            return Err(ServiceError::Status {
                status: resp.status(),
                detail: None,
            });
        }
        let body = resp.text().await?;
        Ok(Catalog::from_json(&body)?)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<ServiceReply> {
        let resp = Request::post(&self.url(&signup_path(activity, email)))
            .send()
            .await?;
        Self::reply(resp).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<ServiceReply> {
        let resp = Request::delete(&self.url(&unregister_path(activity, email)))
            .send()
            .await?;
        Self::reply(resp).await
    }
}
