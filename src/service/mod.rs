pub mod booking_service;
pub mod contact_service;
pub mod notification_service;
pub mod pipeline_stats;
pub mod project_service;

/// Case-insensitive substring match of `search` against any of `fields`.
/// A missing or blank search matches everything.
pub(crate) fn matches_search(search: Option<&str>, fields: &[&str]) -> bool {
    let needle = match search.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_lowercase(),
        _ => return true,
    };
    fields.iter().any(|field| field.to_lowercase().contains(&needle))
}

/// Applies a notes edit: blank clears, anything else is stored trimmed.
pub(crate) fn apply_notes(current: &mut Option<String>, edit: Option<String>) {
    if let Some(notes) = edit {
        let notes = notes.trim();
        *current = if notes.is_empty() { None } else { Some(notes.to_string()) };
    }
}
