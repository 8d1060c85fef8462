//! Reply texts and formatting

use helpdesk_core::errors::{HdError, HdErrorKind, HelpdeskError};
use helpdesk_core::model::{Ticket, User};

use super::callback::CallbackAction;

pub const HELP_TEXT: &str = "Bem-vindo ao Bot do Helpdesk! 🤖\n\n\
Comandos rápidos:\n\
/add_usuario Nome | email\n\
/usuarios\n\
/novo_ticket email_do_usuario | título | descrição\n\
/tickets email_do_usuario\n\
/atualizar_ticket id | status=novo_status | descricao=nova_desc\n\
/deletar_ticket id\n\
\nDica: use o caractere '|' para separar campos.";

pub const USAGE_ADD_USER: &str = "Uso: /add_usuario Nome | email";
pub const USAGE_NEW_TICKET: &str = "Uso: /novo_ticket email | título | descrição(opcional)";
pub const USAGE_UPDATE_TICKET: &str =
    "Uso: /atualizar_ticket id | status=novo_status | descricao=texto";
pub const USAGE_DELETE_TICKET: &str = "Uso: /deletar_ticket id";

pub const NO_USERS: &str = "Nenhum usuário cadastrado.";
pub const NO_TICKETS: &str = "Nenhum ticket encontrado.";
pub const OWNER_NOT_FOUND: &str = "❌ Usuário não encontrado para esse email.";
pub const LIST_OWNER_NOT_FOUND: &str = "Usuário não encontrado para esse email.";
pub const TICKET_NOT_FOUND: &str = "Ticket não encontrado.";
pub const DELETED: &str = "🗑️ Deletado.";
pub const TICKET_DELETED: &str = "🗑️ Ticket deletado.";
pub const INVALID_ACTION: &str = "Ação inválida.";

/// Characters of a ticket description shown in listings
pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;

/// A button shown under a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub data: String,
}

/// One outgoing chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// A single row of buttons, empty for plain messages
    pub buttons: Vec<InlineButton>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    /// A ticket card with resolve/delete buttons
    pub fn ticket_card(ticket: &Ticket) -> Self {
        let preview: String = ticket
            .description
            .chars()
            .take(DESCRIPTION_PREVIEW_CHARS)
            .collect();

        Self {
            text: format!(
                "#{} | {}\nStatus: {}\nDesc: {}",
                ticket.id, ticket.title, ticket.status, preview
            ),
            buttons: vec![
                InlineButton {
                    label: "✅ Resolvido".to_string(),
                    data: CallbackAction::Resolve(ticket.id).encode(),
                },
                InlineButton {
                    label: "🗑️ Deletar".to_string(),
                    data: CallbackAction::Delete(ticket.id).encode(),
                },
            ],
        }
    }
}

pub fn user_created(user: &User) -> String {
    format!("✅ Usuário criado: {} - {} ({})", user.id, user.name, user.email)
}

pub fn user_listing(users: &[User]) -> String {
    let lines: Vec<String> = users
        .iter()
        .map(|u| format!("{} - {} ({})", u.id, u.name, u.email))
        .collect();
    format!("👥 Usuários:\n{}", lines.join("\n"))
}

pub fn ticket_created(ticket: &Ticket) -> String {
    format!(
        "🎫 Ticket criado: #{} - {} (status: {})",
        ticket.id, ticket.title, ticket.status
    )
}

pub fn ticket_updated(ticket: &Ticket) -> String {
    format!("✏️ Ticket #{} atualizado. Status: {}", ticket.id, ticket.status)
}

pub fn ticket_resolved(ticket: &Ticket) -> String {
    format!("✅ Ticket #{} marcado como resolvido.", ticket.id)
}

/// Short user-facing reason for a failed command
pub fn describe_error(err: &HdError) -> String {
    if let Some(reason) = err.domain().and_then(describe_validation) {
        return reason;
    }
    match err.kind() {
        HdErrorKind::UniqueConstraintViolation => "email já cadastrado".to_string(),
        HdErrorKind::ForeignKeyViolation => "usuário não existe mais".to_string(),
        HdErrorKind::StorageUnavailable => "banco de dados indisponível".to_string(),
        _ => format!("falha interna ({})", err.code()),
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "name" => "nome",
        "title" => "título",
        other => other,
    }
}

fn describe_validation(err: &HelpdeskError) -> Option<String> {
    match err {
        HelpdeskError::EmptyField { field } => {
            Some(format!("{} não pode ficar vazio", field_label(field)))
        }
        HelpdeskError::FieldTooLong { field, max } => {
            Some(format!("{} passa de {} caracteres", field_label(field), max))
        }
        HelpdeskError::InvalidTicketId { raw } => Some(format!("id de ticket inválido: '{}'", raw)),
        HelpdeskError::MissingConfig { .. } | HelpdeskError::InvalidConfig { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(description: &str) -> Ticket {
        Ticket {
            id: 5,
            title: "Erro NF-e".to_string(),
            description: description.to_string(),
            status: "aberto".to_string(),
            owner_id: 1,
        }
    }

    #[test]
    fn test_ticket_card_format() {
        let card = Reply::ticket_card(&ticket("CEAN inválido"));
        assert_eq!(card.text, "#5 | Erro NF-e\nStatus: aberto\nDesc: CEAN inválido");
        assert_eq!(card.buttons[0].data, "resolve:5");
        assert_eq!(card.buttons[1].data, "delete:5");
    }

    #[test]
    fn test_description_truncated_by_chars() {
        let long = "é".repeat(200);
        let card = Reply::ticket_card(&ticket(&long));
        let desc = card.text.rsplit("Desc: ").next().unwrap();
        assert_eq!(desc.chars().count(), DESCRIPTION_PREVIEW_CHARS);
    }

    #[test]
    fn test_user_listing() {
        let users = vec![
            User::new(1, "Luís", "luis@exemplo.com"),
            User::new(2, "Jamilly", "jamilly@exemplo.com"),
        ];
        assert_eq!(
            user_listing(&users),
            "👥 Usuários:\n1 - Luís (luis@exemplo.com)\n2 - Jamilly (jamilly@exemplo.com)"
        );
    }

    #[test]
    fn test_describe_error() {
        let err = HdError::new(HdErrorKind::UniqueConstraintViolation);
        assert_eq!(describe_error(&err), "email já cadastrado");

        let err = HdError::new(HdErrorKind::Persistence);
        assert_eq!(describe_error(&err), "falha interna (ERR_PERSISTENCE)");
    }

    #[test]
    fn test_validation_errors_described_in_portuguese() {
        let err: HdError = HelpdeskError::EmptyField { field: "title" }.into();
        assert_eq!(describe_error(&err), "título não pode ficar vazio");

        let err: HdError = HelpdeskError::FieldTooLong {
            field: "name",
            max: 120,
        }
        .into();
        assert_eq!(describe_error(&err), "nome passa de 120 caracteres");

        let err: HdError = HelpdeskError::EmptyField { field: "email" }.into();
        assert_eq!(describe_error(&err), "email não pode ficar vazio");

        let err: HdError = HelpdeskError::InvalidTicketId {
            raw: "x".to_string(),
        }
        .into();
        assert_eq!(describe_error(&err), "id de ticket inválido: 'x'");
    }

    #[test]
    fn test_invalid_input_without_domain_error() {
        let err = HdError::new(HdErrorKind::InvalidInput).with_message("bad id");
        assert_eq!(describe_error(&err), "falha interna (ERR_INVALID_INPUT)");
    }
}
