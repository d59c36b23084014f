#![forbid(unsafe_code)]

use serde_json::Value;

use ticketease_contracts::ticket::{Ticket, TicketDraft, TicketId, TicketStatus};
use ticketease_contracts::{ContractViolation, WallClockMs};
use ticketease_storage::{KvStore, StoreAccessor, StoreFault, StoreKeys};

use crate::clock::{iso8601_utc, Clock};

/// Repository-level failure: a field rule or a missing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    Validation(ContractViolation),
    NotFound { id: TicketId },
}

impl From<ContractViolation> for TicketError {
    fn from(violation: ContractViolation) -> Self {
        TicketError::Validation(violation)
    }
}

/// Dashboard overview counts over the live collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TicketCounts {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
}

/// Ticket CRUD over one whole-collection storage key. Every mutation is a
/// full read-modify-write of the sanitized collection; last write wins at
/// collection granularity.
#[derive(Debug)]
pub struct TicketRepository<S: KvStore, C: Clock> {
    store: StoreAccessor<S>,
    clock: C,
    keys: StoreKeys,
}

impl<S: KvStore, C: Clock> TicketRepository<S, C> {
    pub fn new(store: S, clock: C, keys: StoreKeys) -> Self {
        Self {
            store: StoreAccessor::new(store),
            clock,
            keys,
        }
    }

    /// Sanitized view of the stored collection, in insertion order.
    /// Malformed entries are coerced, never dropped.
    pub fn list(&mut self) -> Vec<Ticket> {
        let now = self.clock.now_ms();
        self.store
            .get(&self.keys.tickets)
            .iter()
            .map(|raw| sanitize_ticket(raw, now))
            .collect()
    }

    /// Validates the fields, allocates an id, stamps `createdAt`, appends
    /// and persists the whole collection.
    pub fn create(
        &mut self,
        title: &str,
        description: &str,
        status: &str,
    ) -> Result<Ticket, TicketError> {
        let draft = TicketDraft::v1(title, description, status)?;
        let mut collection = self.list();
        let now = self.clock.now_ms();
        let id = allocate_id(now, &collection);
        let ticket = Ticket::from_draft(&draft, id, iso8601_utc(now));
        collection.push(ticket.clone());
        self.store.set(&self.keys.tickets, &collection);
        Ok(ticket)
    }

    /// Replaces title, description and status on the matching record,
    /// keeping `id` and `createdAt`. Validation rules match `create`.
    pub fn update(
        &mut self,
        id: TicketId,
        title: &str,
        description: &str,
        status: &str,
    ) -> Result<Ticket, TicketError> {
        let draft = TicketDraft::v1(title, description, status)?;
        let mut collection = self.list();
        let Some(slot) = collection.iter_mut().find(|ticket| ticket.id == id) else {
            return Err(TicketError::NotFound { id });
        };
        slot.title = draft.title.clone();
        slot.description = draft.description.clone();
        slot.status = draft.status;
        let updated = slot.clone();
        self.store.set(&self.keys.tickets, &collection);
        Ok(updated)
    }

    /// Removes the matching record and persists; idempotent when `id` is
    /// absent.
    pub fn delete(&mut self, id: TicketId) {
        let mut collection = self.list();
        collection.retain(|ticket| ticket.id != id);
        self.store.set(&self.keys.tickets, &collection);
    }

    /// Dashboard counts: total plus one bucket per status.
    pub fn status_summary(&mut self) -> TicketCounts {
        let mut counts = TicketCounts::default();
        for ticket in self.list() {
            counts.total += 1;
            match ticket.status {
                TicketStatus::Open => counts.open += 1,
                TicketStatus::InProgress => counts.in_progress += 1,
                TicketStatus::Closed => counts.closed += 1,
            }
        }
        counts
    }

    /// Storage failures swallowed on behalf of this repository.
    pub fn faults(&self) -> &[StoreFault] {
        self.store.faults()
    }

    pub fn take_faults(&mut self) -> Vec<StoreFault> {
        self.store.take_faults()
    }
}

/// Coerces one decoded element into a well-formed ticket. Pure and
/// idempotent: every default it fills survives a second pass, so
/// re-sanitizing at any later instant returns the same ticket.
pub fn sanitize_ticket(raw: &Value, now: WallClockMs) -> Ticket {
    Ticket {
        id: sanitize_id(raw.get("id"), now),
        title: coerce_text(raw.get("title")),
        description: coerce_text(raw.get("description")),
        status: sanitize_status(raw.get("status")),
        priority: sanitize_priority(raw.get("priority")),
        created_at: sanitize_created_at(raw.get("createdAt"), now),
    }
}

fn sanitize_id(raw: Option<&Value>, now: WallClockMs) -> TicketId {
    let parsed = match raw {
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(digits)) => digits.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        // Zero and negative ids read as missing identity.
        Some(id) if id > 0 => TicketId(id),
        _ => TicketId(now.0 as i64),
    }
}

fn coerce_text(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn sanitize_status(raw: Option<&Value>) -> TicketStatus {
    match raw {
        Some(Value::String(word)) => TicketStatus::parse(word).unwrap_or(TicketStatus::Open),
        _ => TicketStatus::Open,
    }
}

fn sanitize_priority(raw: Option<&Value>) -> Option<String> {
    match raw {
        Some(Value::String(label)) if !label.is_empty() => Some(label.clone()),
        _ => None,
    }
}

fn sanitize_created_at(raw: Option<&Value>, now: WallClockMs) -> String {
    match raw {
        Some(Value::String(stamp)) if !stamp.is_empty() => stamp.clone(),
        _ => iso8601_utc(now),
    }
}

/// Epoch-millisecond id, bumped past the collection's current maximum so
/// repeated creations within one millisecond stay distinct.
fn allocate_id(now: WallClockMs, collection: &[Ticket]) -> TicketId {
    let max_existing = collection.iter().map(|ticket| ticket.id.0).max().unwrap_or(0);
    TicketId((now.0 as i64).max(max_existing.saturating_add(1)))
}
