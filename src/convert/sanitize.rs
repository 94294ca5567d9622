//! Strip code-fence wrapping from generated text.

/// Marker that opens or closes a fenced code block.
pub const FENCE_MARKER: &str = "```";

/// Remove a fence line at the very start and at the very end of `text`.
///
/// Only the first and last lines are inspected. Text with fewer than three
/// lines is returned unchanged.
pub fn sanitize(text: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();

    if lines.len() < 3 {
        return text.to_string();
    }

    if lines[0].contains(FENCE_MARKER) {
        lines.remove(0);
    }

    if lines.last().is_some_and(|l| l.contains(FENCE_MARKER)) {
        lines.pop();
    }

    lines.join("\n")
}
