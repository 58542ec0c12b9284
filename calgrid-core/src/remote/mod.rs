//! Remote event store access.
//!
//! `EventStore` is the seam between mutation logic and the network: the
//! coordinator is generic over it, the HTTP implementation lives in `http`,
//! and tests drive the coordinator with an in-memory store.

pub mod http;
pub mod wire;

pub use http::{HttpEventStore, fetch_profile};

use crate::error::CalGridResult;
use crate::event::{Event, EventDraft, TimeChange};

/// Operations the remote event store must support. Authorization is by
/// session; unauthenticated calls surface as `CalGridError::SignInRequired`.
#[allow(async_fn_in_trait)]
pub trait EventStore {
    /// All events owned by the session user.
    async fn list(&self) -> CalGridResult<Vec<Event>>;

    /// Create an event; the store assigns the id and returns the canonical
    /// representation.
    async fn create(&self, draft: &EventDraft) -> CalGridResult<Event>;

    /// Replace all fields of an existing event.
    async fn update(&self, id: &str, draft: &EventDraft) -> CalGridResult<Event>;

    /// Move/resize: update only the time fields.
    async fn reschedule(&self, id: &str, times: &TimeChange) -> CalGridResult<Event>;

    async fn delete(&self, id: &str) -> CalGridResult<()>;
}
