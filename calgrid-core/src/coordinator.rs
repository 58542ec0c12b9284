//! Optimistic mutation of the local event list against the remote store.
//!
//! Every mutation follows the same path: validate, apply the change to the
//! local list immediately, issue the remote call, then reconcile: the local
//! entry is replaced by the authoritative server representation on success,
//! or restored from the pre-mutation snapshot on failure. All four mutations
//! (create, update, reschedule, delete) are optimistic and all of them roll
//! back; failures are reported and returned, never left as half-applied
//! state.
//!
//! Edits conflicting on one event id are serialized: beginning a mutation
//! while another for the same id is in flight fails with `EditInFlight`.
//! Issued requests are never cancelled; drive every mutation future to
//! completion, or its id stays guarded.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{CalGridError, CalGridResult};
use crate::event::{Event, EventDraft, TimeChange};
use crate::recurrence::{Instance, expand};
use crate::remote::EventStore;

/// Client-side event list kept consistent with a remote store. The store
/// handle is constructed by the caller and moved in; the coordinator holds
/// no global state.
pub struct Coordinator<S> {
    store: S,
    events: Vec<Event>,
    in_flight: HashSet<String>,
}

impl<S: EventStore> Coordinator<S> {
    pub fn new(store: S, events: Vec<Event>) -> Self {
        Coordinator {
            store,
            events,
            in_flight: HashSet::new(),
        }
    }

    /// Construct with the current server-side list.
    pub async fn load(store: S) -> CalGridResult<Self> {
        let events = store.list().await?;
        Ok(Self::new(store, events))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// The displayable instance list, recomputed in full from the current
    /// base events.
    pub fn instances(&self) -> Vec<Instance> {
        expand(&self.events)
    }

    /// Whether a mutation for this event is still in flight.
    pub fn is_busy(&self, id: &str) -> bool {
        self.in_flight.contains(id)
    }

    /// Replace the local list with the server's.
    pub async fn refresh(&mut self) -> CalGridResult<()> {
        self.events = self.store.list().await?;
        Ok(())
    }

    /// Create an event. Applied optimistically under a temporary id which
    /// reconciliation swaps for the server-assigned one. Returns the
    /// server-assigned id.
    pub async fn create(&mut self, draft: EventDraft) -> CalGridResult<String> {
        draft.validate()?;

        let temp_id = format!("pending-{}", Uuid::new_v4());
        self.begin(&temp_id)?;
        self.events.push(draft.clone().into_event(temp_id.clone()));

        match self.store.create(&draft).await {
            Ok(created) => {
                let id = created.id.clone();
                if let Some(entry) = self.events.iter_mut().find(|e| e.id == temp_id) {
                    *entry = created;
                }
                self.finish(&temp_id);
                Ok(id)
            }
            Err(err) => {
                self.events.retain(|e| e.id != temp_id);
                self.finish(&temp_id);
                tracing::warn!(error = %err, "create failed, optimistic event rolled back");
                Err(err)
            }
        }
    }

    /// Full update of an existing event (form submit).
    pub async fn update(&mut self, id: &str, draft: EventDraft) -> CalGridResult<()> {
        draft.validate()?;
        let position = self.position(id)?;
        self.begin(id)?;

        let previous = std::mem::replace(
            &mut self.events[position],
            draft.clone().into_event(id.to_string()),
        );

        match self.store.update(id, &draft).await {
            Ok(server_event) => {
                self.events[position] = server_event;
                self.finish(id);
                Ok(())
            }
            Err(err) => {
                self.events[position] = previous;
                self.finish(id);
                tracing::warn!(event_id = id, error = %err, "update failed, rolled back");
                Err(err)
            }
        }
    }

    /// Move or resize an event (drag interaction). Only the time fields
    /// change; a missing end anchors a zero-duration event at the drop point.
    pub async fn reschedule(&mut self, id: &str, times: TimeChange) -> CalGridResult<()> {
        let end = times.resolved_end();
        if times.start.is_all_day() != end.is_all_day() {
            return Err(CalGridError::Validation(
                "start and end must both be all-day or both timed".to_string(),
            ));
        }
        if end.to_utc() < times.start.to_utc() {
            return Err(CalGridError::Validation(
                "event end must not be before its start".to_string(),
            ));
        }

        let position = self.position(id)?;
        self.begin(id)?;

        let previous = self.events[position].clone();
        self.events[position].start = times.start;
        self.events[position].end = end;

        match self.store.reschedule(id, &times).await {
            Ok(server_event) => {
                // The authoritative representation wins even when it matches
                // the optimistic value.
                self.events[position] = server_event;
                self.finish(id);
                Ok(())
            }
            Err(err) => {
                self.events[position] = previous;
                self.finish(id);
                tracing::warn!(event_id = id, error = %err, "reschedule failed, rolled back");
                Err(err)
            }
        }
    }

    /// Delete an event. Removed optimistically and restored at its original
    /// position if the remote call fails.
    pub async fn delete(&mut self, id: &str) -> CalGridResult<()> {
        let position = self.position(id)?;
        self.begin(id)?;

        let removed = self.events.remove(position);

        match self.store.delete(id).await {
            Ok(()) => {
                self.finish(id);
                Ok(())
            }
            Err(err) => {
                self.events.insert(position, removed);
                self.finish(id);
                tracing::warn!(event_id = id, error = %err, "delete failed, event restored");
                Err(err)
            }
        }
    }

    fn position(&self, id: &str) -> CalGridResult<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalGridError::EventNotFound(id.to_string()))
    }

    fn begin(&mut self, id: &str) -> CalGridResult<()> {
        if !self.in_flight.insert(id.to_string()) {
            return Err(CalGridError::EditInFlight(id.to_string()));
        }
        Ok(())
    }

    fn finish(&mut self, id: &str) {
        self.in_flight.remove(id);
    }
}
