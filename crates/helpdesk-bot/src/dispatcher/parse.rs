//! Chat input parsing

/// The commands the bot answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Start,
    AddUser,
    Users,
    NewTicket,
    Tickets,
    UpdateTicket,
    DeleteTicket,
    Unknown(&'a str),
    /// `/command@OtherBot`, meant for another bot in the same group
    AddressedElsewhere(&'a str),
}

/// Recognize a `/command`, ignoring case
///
/// A `@botname` suffix must match `bot_username` (case-insensitively);
/// when the bot's own name is unknown every suffix is accepted. Returns
/// `None` for text that is not a command at all.
pub fn parse_command<'a>(text: &'a str, bot_username: Option<&str>) -> Option<Command<'a>> {
    let word = text.split_whitespace().next()?;
    let name = word.strip_prefix('/')?;
    let name = match name.split_once('@') {
        Some((name, target)) => match bot_username {
            Some(own) if !target.eq_ignore_ascii_case(own) => {
                return Some(Command::AddressedElsewhere(target));
            }
            _ => name,
        },
        None => name,
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "start" => Command::Start,
        "add_usuario" => Command::AddUser,
        "usuarios" => Command::Users,
        "novo_ticket" => Command::NewTicket,
        "tickets" => Command::Tickets,
        "atualizar_ticket" => Command::UpdateTicket,
        "deletar_ticket" => Command::DeleteTicket,
        _ => Command::Unknown(name),
    };
    Some(command)
}

/// Everything after the command word, trimmed
pub fn command_payload(text: &str) -> &str {
    text.trim_start()
        .split_once(char::is_whitespace)
        .map_or("", |(_command, rest)| rest.trim())
}

/// Split `/command a | b | c` into exactly `expected` trimmed parts
///
/// Missing parts are empty strings; extra parts are dropped.
pub fn parse_pipe_args(text: &str, expected: usize) -> Vec<String> {
    let mut parts: Vec<String> = command_payload(text)
        .split('|')
        .map(|part| part.trim().to_string())
        .collect();
    parts.resize(expected, String::new());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: Option<&str> = Some("HelpdeskBot");

    #[test]
    fn test_parse_command_names() {
        assert_eq!(parse_command("/start", BOT), Some(Command::Start));
        assert_eq!(
            parse_command("/add_usuario Ana | ana@x.com", BOT),
            Some(Command::AddUser)
        );
        assert_eq!(parse_command("/TICKETS", BOT), Some(Command::Tickets));
        assert_eq!(parse_command("/ajuda", BOT), Some(Command::Unknown("ajuda")));
    }

    #[test]
    fn test_bot_suffix_must_name_this_bot() {
        assert_eq!(
            parse_command("/deletar_ticket@HelpdeskBot 3", BOT),
            Some(Command::DeleteTicket)
        );
        assert_eq!(parse_command("/usuarios@helpdeskbot", BOT), Some(Command::Users));
        assert_eq!(
            parse_command("/usuarios@OtherBot", BOT),
            Some(Command::AddressedElsewhere("OtherBot"))
        );
    }

    #[test]
    fn test_any_suffix_accepted_without_own_name() {
        assert_eq!(parse_command("/usuarios@OtherBot", None), Some(Command::Users));
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse_command("olá", BOT), None);
        assert_eq!(parse_command("", BOT), None);
        assert_eq!(parse_command("   ", BOT), None);
    }

    #[test]
    fn test_pipe_args_pad_and_truncate() {
        assert_eq!(
            parse_pipe_args("/add_usuario Ana | ana@x.com", 2),
            vec!["Ana", "ana@x.com"]
        );
        assert_eq!(parse_pipe_args("/add_usuario Ana", 2), vec!["Ana", ""]);
        assert_eq!(parse_pipe_args("/add_usuario", 2), vec!["", ""]);
        assert_eq!(parse_pipe_args("/x a | b | c | d", 3), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_payload_keeps_inner_spaces() {
        assert_eq!(
            command_payload("/novo_ticket  a@x.com | Falha na impressão "),
            "a@x.com | Falha na impressão"
        );
        assert_eq!(command_payload("/tickets"), "");
    }
}
