use super::booking::Booking;
use super::contact::ContactSubmission;
use super::project::Project;

/// A stored record that triggers notifications, borrowed for rendering.
#[derive(Debug, Clone, Copy)]
pub enum Submission<'a> {
    Contact(&'a ContactSubmission),
    Booking(&'a Booking),
    BookingCancelled(&'a Booking),
    Project(&'a Project),
}

impl Submission<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Contact(_) => "contact",
            Submission::Booking(_) => "booking",
            Submission::BookingCancelled(_) => "booking-cancelled",
            Submission::Project(_) => "project",
        }
    }

    /// Address of the person who submitted the form.
    pub fn submitter_email(&self) -> &str {
        match self {
            Submission::Contact(c) => &c.email,
            Submission::Booking(b) | Submission::BookingCancelled(b) => &b.email,
            Submission::Project(p) => &p.email,
        }
    }

    pub fn submitter_name(&self) -> &str {
        match self {
            Submission::Contact(c) => &c.name,
            Submission::Booking(b) | Submission::BookingCancelled(b) => &b.name,
            Submission::Project(p) => &p.name,
        }
    }
}
