#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::{ContractViolation, SchemaVersion, Validate};

pub const TICKET_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

/// Epoch-millisecond-shaped ticket identifier, unique within one board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TicketId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    /// Exact-word parse of the three stored status values.
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "open" => Some(TicketStatus::Open),
            "in_progress" => Some(TicketStatus::InProgress),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Closed => "closed",
        }
    }
}

/// Persisted ticket layout. Field names and the `createdAt` spelling are
/// the storage contract; `id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Ticket {
    pub fn from_draft(draft: &TicketDraft, id: TicketId, created_at: String) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            priority: None,
            created_at,
        }
    }
}

/// Validated create/update fields. The title must survive trimming but is
/// stored as typed, untrimmed; the status word must be one of the three
/// stored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub schema_version: SchemaVersion,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
}

impl TicketDraft {
    pub fn v1(
        title: &str,
        description: &str,
        status: &str,
    ) -> Result<Self, ContractViolation> {
        let status = TicketStatus::parse(status).ok_or(ContractViolation::InvalidValue {
            field: "ticket_draft.status",
            reason: "must be one of open, in_progress, closed",
        })?;
        let draft = Self {
            schema_version: TICKET_CONTRACT_VERSION,
            title: title.to_string(),
            description: description.to_string(),
            status,
        };
        draft.validate()?;
        Ok(draft)
    }
}

impl Validate for TicketDraft {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != TICKET_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "ticket_draft.schema_version",
                reason: "must match TICKET_CONTRACT_VERSION",
            });
        }
        if self.title.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "ticket_draft.title",
                reason: "must be non-empty after trimming",
            });
        }
        Ok(())
    }
}
