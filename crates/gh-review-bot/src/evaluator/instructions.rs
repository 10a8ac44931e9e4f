//! Detecting the bot's own instructions comment

use gh_client::Comment;

/// Characters of a body compared against the template
pub const PREFIX_CHARS: usize = 30;

/// First `PREFIX_CHARS` characters of `body`, trimmed
///
/// Shorter bodies yield whatever they have.
pub fn comparison_prefix(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(PREFIX_CHARS)
        .map_or(body.len(), |(idx, _)| idx);
    body[..end].trim()
}

/// Whether any comment starts like the instructions template
pub fn instructions_posted(comments: &[Comment], template: &str) -> bool {
    let expected = comparison_prefix(template);
    comments
        .iter()
        .any(|comment| comparison_prefix(&comment.body) == expected)
}
