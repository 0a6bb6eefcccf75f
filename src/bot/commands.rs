//! Parsing of incoming message text into bot commands.

/// A recognised bot command with its raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Register,
    /// `/token <text>`; the argument is everything after the command word.
    Token(String),
    /// `/check`; targets stay in the full message text.
    Check,
    Ban(String),
    Unban(String),
    /// `/plan <user_id> <plan>`
    Plan(String, String),
}

impl Command {
    /// Parse message text. Returns `None` for plain text and unknown commands.
    ///
    /// Accepts the `/cmd@BotName` form used in group chats.
    pub fn parse(text: &str) -> Option<Self> {
        let first_line = text.lines().next()?.trim_start();
        let (word, rest) = match first_line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (first_line, ""),
        };
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name).to_ascii_lowercase();
        let mut args = rest.split_whitespace();

        let command = match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "register" => Command::Register,
            "token" => Command::Token(rest.to_string()),
            "check" => Command::Check,
            "ban" => Command::Ban(args.next().unwrap_or_default().to_string()),
            "unban" => Command::Unban(args.next().unwrap_or_default().to_string()),
            "plan" => Command::Plan(
                args.next().unwrap_or_default().to_string(),
                args.next().unwrap_or_default().to_string(),
            ),
            _ => return None,
        };
        Some(command)
    }

    pub fn is_admin_only(&self) -> bool {
        matches!(self, Command::Ban(_) | Command::Unban(_) | Command::Plan(_, _))
    }
}

pub const HELP_TEXT: &str = "\
<b>linkcheck</b> checks endpoints through your uptime-check service.

/register - create your account
/token &lt;api-token&gt; - save your check service token
/check &lt;targets&gt; - check up to 15 targets, one per line

Target format: <code>host|port|/path|expected_status</code>
Example: <code>status.example.com|443|/health|200</code>";
