pub mod booking;
pub mod contact;
pub mod project;
pub mod submission;

/// Display attributes for a status value, as rendered by the admin panel.
pub trait StatusBadge {
    fn label(&self) -> &'static str;
    /// Badge colour name understood by the admin UI
    fn color(&self) -> &'static str;
}

/// Current time in the format stored on every record.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
