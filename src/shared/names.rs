pub const MAX_PLAYER_NAME_LENGTH: usize = 20;

/// Collapses whitespace runs and truncates to `MAX_PLAYER_NAME_LENGTH` characters.
/// An empty result falls back to `fallback`.
pub fn sanitize_player_name(name: &str, fallback: &str) -> String {
    let cleaned = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|ch| !ch.is_control())
        .take(MAX_PLAYER_NAME_LENGTH)
        .collect::<String>();
    if cleaned.is_empty() {
        return fallback.to_string();
    }
    cleaned
}
