//! Text formatting shared by the bot replies and the ticket log.

/// Discord's message content limit.
pub const MESSAGE_LIMIT: usize = 2000;

/// Collapses whitespace and truncates `text` on a word boundary so that the
/// result, including the trailing `...`, fits in `width` characters.
pub fn shorten(text: &str, width: usize) -> String {
    const PLACEHOLDER: &str = "...";

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(PLACEHOLDER.len());
    let mut out = String::new();

    for word in collapsed.split(' ') {
        let extra = if out.is_empty() { 0 } else { 1 };
        if out.chars().count() + extra + word.chars().count() > budget {
            break;
        }
        if extra == 1 {
            out.push(' ');
        }
        out.push_str(word);
    }

    if out.is_empty() {
        // A single word longer than the budget is cut mid-word.
        out = collapsed.chars().take(budget).collect();
    }

    out.push_str(PLACEHOLDER);
    out
}

/// Cuts `text` to at most `max` characters without splitting a character.
pub fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Joins role mentions into as few messages as possible, each at most
/// `MESSAGE_LIMIT` characters long.
pub fn paginate_role_mentions(role_ids: &[u64]) -> Vec<String> {
    let mut pages = Vec::new();
    let mut current = String::new();

    for role_id in role_ids {
        let mention = format!("<@&{}>", role_id);
        let needed = if current.is_empty() {
            mention.len()
        } else {
            mention.len() + 1
        };

        if !current.is_empty() && current.len() + needed > MESSAGE_LIMIT {
            pages.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&mention);
    }

    if !current.is_empty() {
        pages.push(current);
    }

    pages
}

/// Channel name for ticket `number`, with a lock prefix while locked.
pub fn ticket_channel_name(number: i64, locked: bool) -> String {
    if locked {
        format!("🔒-ticket-{}", number)
    } else {
        format!("ticket-{}", number)
    }
}

/// Renders a boolean as the check or cross emoji used in settings embeds.
pub fn yes_no_emoji(value: bool) -> &'static str {
    if value {
        "\u{2705}"
    } else {
        "\u{274c}"
    }
}
