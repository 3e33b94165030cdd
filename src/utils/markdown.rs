//! Telegram MarkdownV2 escaping for feedback messages.

/// Escapes markdown special characters for MarkdownV2 parsing mode
/// 
/// This function escapes all characters that have special meaning in Telegram's
/// MarkdownV2 format to ensure they are displayed as literal text.
/// 
/// # Arguments
/// * `text` - The text to escape
/// 
/// # Returns
/// A string with all markdown special characters escaped with backslashes
/// 
/// # Example
/// ```
/// use tutor_scheduler_bot::utils::markdown::escape_markdown;
/// 
/// let text = "Lesson *paid* (1 000 ₽)";
/// let escaped = escape_markdown(text);
/// assert_eq!(escaped, "Lesson \\*paid\\* \\(1 000 ₽\\)");
/// ```
pub fn escape_markdown(text: &str) -> String {
    text.replace('_', "\\_")
        .replace('*', "\\*")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('~', "\\~")
        .replace('`', "\\`")
        .replace('>', "\\>")
        .replace('#', "\\#")
        .replace('+', "\\+")
        .replace('-', "\\-")
        .replace('=', "\\=")
        .replace('|', "\\|")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('.', "\\.")
        .replace('!', "\\!")
}
