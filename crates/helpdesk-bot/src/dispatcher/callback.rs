//! Inline button payloads: `resolve:<id>` and `delete:<id>`

use helpdesk_core::model::TicketId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Resolve(TicketId),
    Delete(TicketId),
}

impl CallbackAction {
    /// Parse button data; `None` for anything malformed or unknown
    pub fn parse(data: &str) -> Option<Self> {
        let (action, id) = data.split_once(':')?;
        let id: TicketId = id.trim().parse().ok()?;

        match action {
            "resolve" => Some(CallbackAction::Resolve(id)),
            "delete" => Some(CallbackAction::Delete(id)),
            _ => None,
        }
    }

    pub fn encode(&self) -> String {
        match self {
            CallbackAction::Resolve(id) => format!("resolve:{}", id),
            CallbackAction::Delete(id) => format!("delete:{}", id),
        }
    }
}
