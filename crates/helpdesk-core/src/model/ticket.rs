use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Store-assigned ticket identifier
pub type TicketId = i64;

/// Status given to tickets created without an explicit one
pub const STATUS_OPEN: &str = "aberto";

/// Status set by the "mark resolved" shortcut
pub const STATUS_RESOLVED: &str = "resolvido";

/// Ticket - a support request owned by exactly one user
///
/// `status` is free text. `aberto` and `resolvido` are the values the bot
/// itself writes, but any non-empty string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Surrogate key assigned by the store on insert
    pub id: TicketId,

    /// Short summary (required, non-empty)
    pub title: String,

    /// Longer free text, empty when not given
    pub description: String,

    /// Free-text status, `aberto` by default
    pub status: String,

    /// Owning user
    pub owner_id: UserId,
}

impl Ticket {
    /// Check if this ticket carries the resolved status
    pub fn is_resolved(&self) -> bool {
        self.status == STATUS_RESOLVED
    }
}

/// Values for a ticket that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub status: String,
}

impl NewTicket {
    /// Create a ticket draft with an empty description and the open status
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: STATUS_OPEN.to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// The ticket attributes a chat user may set with `key=value`
///
/// Identity (`id`) and ownership (`owner_id`) are not representable here,
/// so no chat input can reach them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketField {
    Status,
    Description,
}

impl TicketField {
    /// Resolve a user-typed key. Matching ignores case and surrounding
    /// whitespace; `descricao` is accepted for the bot's Portuguese help text.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "status" => Some(TicketField::Status),
            "description" | "descricao" => Some(TicketField::Description),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketField::Status => "status",
            TicketField::Description => "description",
        }
    }
}

/// Fields of a `Ticket` that may be changed after creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub status: Option<String>,
    pub description: Option<String>,
}

impl TicketPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set one enumerated field; a later value for the same field wins
    pub fn set(&mut self, field: TicketField, value: impl Into<String>) {
        match field {
            TicketField::Status => self.status = Some(value.into()),
            TicketField::Description => self.description = Some(value.into()),
        }
    }

    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.description.is_none()
    }

    /// Apply the patch in place
    pub fn apply_to(&self, ticket: &mut Ticket) {
        if let Some(status) = &self.status {
            ticket.status = status.clone();
        }
        if let Some(description) = &self.description {
            ticket.description = description.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ticket() -> Ticket {
        Ticket {
            id: 7,
            title: "Erro NF-e".to_string(),
            description: "CEAN inválido".to_string(),
            status: STATUS_OPEN.to_string(),
            owner_id: 1,
        }
    }

    #[test]
    fn test_new_ticket_defaults() {
        let draft = NewTicket::new("Printer jam");
        assert_eq!(draft.title, "Printer jam");
        assert_eq!(draft.description, "");
        assert_eq!(draft.status, STATUS_OPEN);
    }

    #[test]
    fn test_field_keys() {
        assert_eq!(TicketField::from_key("status"), Some(TicketField::Status));
        assert_eq!(TicketField::from_key(" Status "), Some(TicketField::Status));
        assert_eq!(
            TicketField::from_key("descricao"),
            Some(TicketField::Description)
        );
        assert_eq!(
            TicketField::from_key("description"),
            Some(TicketField::Description)
        );
        assert_eq!(TicketField::from_key("id"), None);
        assert_eq!(TicketField::from_key("owner_id"), None);
        assert_eq!(TicketField::from_key("title"), None);
    }

    #[test]
    fn test_patch_apply_keeps_identity() {
        let mut ticket = sample_ticket();
        let mut patch = TicketPatch::new();
        patch.set(TicketField::Status, STATUS_RESOLVED);
        patch.set(TicketField::Description, "Cliente atualizou CEAN");
        patch.apply_to(&mut ticket);

        assert_eq!(ticket.id, 7);
        assert_eq!(ticket.owner_id, 1);
        assert_eq!(ticket.title, "Erro NF-e");
        assert!(ticket.is_resolved());
        assert_eq!(ticket.description, "Cliente atualizou CEAN");
    }

    #[test]
    fn test_later_value_wins() {
        let mut patch = TicketPatch::new();
        patch.set(TicketField::Status, "em análise");
        patch.set(TicketField::Status, "resolvido");
        assert_eq!(patch.status.as_deref(), Some("resolvido"));
    }
}
