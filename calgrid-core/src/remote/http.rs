//! HTTP implementation of the event store.

use std::time::Duration;

use reqwest::{Response, StatusCode};

use crate::config::GlobalConfig;
use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::error::{CalGridError, CalGridResult};
use crate::event::{Event, EventDraft, TimeChange};
use crate::remote::EventStore;
use crate::remote::wire::{DraftPayload, ErrorBody, EventPayload, SessionPayload, TimePatchPayload};
use crate::session::{Session, UserProfile};

/// Event store client speaking the service's JSON REST API, authorized with
/// the session's bearer token. Requests carry a timeout so a stalled call
/// cannot keep an event busy forever.
pub struct HttpEventStore {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl HttpEventStore {
    pub fn new(config: &GlobalConfig, session: &Session) -> CalGridResult<Self> {
        Ok(HttpEventStore {
            base_url: config.server_url.trim_end_matches('/').to_string(),
            token: session.token().to_string(),
            http: build_client()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn ensure_success(&self, response: Response, id: Option<&str>) -> CalGridResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = error_message(response).await;
        Err(status_error(status, id, detail))
    }
}

impl EventStore for HttpEventStore {
    async fn list(&self) -> CalGridResult<Vec<Event>> {
        let response = self
            .http
            .get(self.url("/events"))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = self.ensure_success(response, None).await?;

        let payloads: Vec<EventPayload> = response.json().await?;
        payloads.into_iter().map(EventPayload::into_event).collect()
    }

    async fn create(&self, draft: &EventDraft) -> CalGridResult<Event> {
        let response = self
            .http
            .post(self.url("/events"))
            .bearer_auth(&self.token)
            .json(&DraftPayload::from(draft))
            .send()
            .await?;
        let response = self.ensure_success(response, None).await?;

        let payload: EventPayload = response.json().await?;
        payload.into_event()
    }

    async fn update(&self, id: &str, draft: &EventDraft) -> CalGridResult<Event> {
        let response = self
            .http
            .put(self.url(&format!("/events/{}", id)))
            .bearer_auth(&self.token)
            .json(&DraftPayload::from(draft))
            .send()
            .await?;
        let response = self.ensure_success(response, Some(id)).await?;

        let payload: EventPayload = response.json().await?;
        payload.into_event()
    }

    async fn reschedule(&self, id: &str, times: &TimeChange) -> CalGridResult<Event> {
        let response = self
            .http
            .put(self.url(&format!("/events/{}", id)))
            .bearer_auth(&self.token)
            .json(&TimePatchPayload::from(times))
            .send()
            .await?;
        let response = self.ensure_success(response, Some(id)).await?;

        let payload: EventPayload = response.json().await?;
        payload.into_event()
    }

    async fn delete(&self, id: &str) -> CalGridResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/events/{}", id)))
            .bearer_auth(&self.token)
            .send()
            .await?;
        self.ensure_success(response, Some(id)).await?;
        Ok(())
    }
}

/// Fetch the signed-in user's profile from `GET /session`. Used during login,
/// before a session file exists.
pub async fn fetch_profile(server_url: &str, token: &str) -> CalGridResult<UserProfile> {
    let http = build_client()?;
    let response = http
        .get(format!("{}/session", server_url.trim_end_matches('/')))
        .bearer_auth(token)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let detail = error_message(response).await;
        return Err(status_error(status, None, detail));
    }

    let payload: SessionPayload = response.json().await?;
    Ok(payload.user)
}

fn build_client() -> CalGridResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

/// Map a non-2xx status to the error taxonomy. Unauthorized means the user
/// must sign in (or sign in again); it is never reported as a generic failure.
fn status_error(status: StatusCode, id: Option<&str>, detail: String) -> CalGridError {
    match status {
        StatusCode::UNAUTHORIZED => CalGridError::SignInRequired,
        StatusCode::NOT_FOUND => match id {
            Some(id) => CalGridError::EventNotFound(id.to_string()),
            None => CalGridError::Store(detail),
        },
        _ => CalGridError::Store(detail),
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(ErrorBody { error: Some(message) }) => {
            format!("{} (status {})", message, status.as_u16())
        }
        _ => format!("request failed with status {}", status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_sign_in_required() {
        let err = status_error(StatusCode::UNAUTHORIZED, Some("e1"), "detail".to_string());
        assert!(matches!(err, CalGridError::SignInRequired));
    }

    #[test]
    fn not_found_maps_to_event_not_found_when_id_is_known() {
        let err = status_error(StatusCode::NOT_FOUND, Some("e1"), "detail".to_string());
        match err {
            CalGridError::EventNotFound(id) => assert_eq!(id, "e1"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn other_statuses_map_to_store_errors() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, Some("e1"), "boom".to_string());
        match err {
            CalGridError::Store(detail) => assert_eq!(detail, "boom"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
