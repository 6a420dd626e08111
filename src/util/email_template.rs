//! Notification e-mails, one admin alert and one user confirmation per
//! submission kind. Every value interpolated into HTML is escaped.

use crate::model::booking::{Booking, CallType};
use crate::model::project::{Project, ServiceType, Timeline};
use crate::model::submission::Submission;
use crate::model::StatusBadge;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

type Rows = Vec<(&'static str, String)>;

pub fn admin_alert(submission: Submission<'_>) -> RenderedEmail {
    let (subject, heading, intro, rows) = match submission {
        Submission::Contact(c) => (
            format!("New contact message from {}", c.name),
            "New contact message",
            "A new contact message was received.",
            vec![
                ("Name", c.name.clone()),
                ("Email", c.email.clone()),
                ("Phone", optional(&c.phone)),
                ("Subject", optional(&c.subject)),
                ("Message", c.message.clone()),
            ],
        ),
        Submission::Booking(b) => (
            format!("New call booked: {} on {} at {}", b.name, b.date, b.time),
            "New discovery call booking",
            "A new discovery call was booked.",
            booking_rows(b),
        ),
        Submission::BookingCancelled(b) => (
            format!("Call cancelled: {} on {} at {}", b.name, b.date, b.time),
            "Booking cancelled by client",
            "The client cancelled this call. The slot is free again.",
            booking_rows(b),
        ),
        Submission::Project(p) => (
            format!("New project request: {}", p.project_name),
            "New project request",
            "A new project request was received.",
            project_rows(p),
        ),
    };
    render(subject, heading, intro, &rows)
}

pub fn user_confirmation(submission: Submission<'_>) -> RenderedEmail {
    let name = submission.submitter_name();
    match submission {
        Submission::Contact(c) => render(
            "We received your message - Veloria".to_string(),
            "Thanks for reaching out",
            &format!("Hi {}, thanks for contacting Veloria. We usually reply within one business day.", name),
            &vec![("Subject", optional(&c.subject)), ("Your message", c.message.clone())],
        ),
        Submission::Booking(b) => render(
            format!("Your call is booked for {} at {} - Veloria", b.date, b.time),
            "Your discovery call is confirmed",
            &format!("Hi {}, your call is booked. To cancel, use the link in your booking page with this e-mail address.", name),
            &booking_rows(b),
        ),
        Submission::BookingCancelled(b) => render(
            "Your call has been cancelled - Veloria".to_string(),
            "Booking cancelled",
            &format!("Hi {}, your call on {} at {} has been cancelled. You can book a new slot at any time.", name, b.date, b.time),
            &Vec::new(),
        ),
        Submission::Project(p) => render(
            format!("We received your project request: {} - Veloria", p.project_name),
            "Project request received",
            &format!("Hi {}, thanks for telling us about your project. We will review it and get back to you with next steps.", name),
            &vec![
                ("Project", p.project_name.clone()),
                ("Service", service_label(p.service_type).to_string()),
                ("Budget", p.budget.clone()),
                ("Timeline", timeline_label(p.timeline).to_string()),
            ],
        ),
    }
}

fn booking_rows(b: &Booking) -> Rows {
    vec![
        ("Name", b.name.clone()),
        ("Email", b.email.clone()),
        ("Phone", optional(&b.phone)),
        ("Company", optional(&b.company)),
        ("Date", b.date.clone()),
        ("Time", format!("{} ({})", b.time, b.timezone)),
        ("Call type", match b.call_type {
            CallType::Video => "Video call".to_string(),
            CallType::Phone => "Phone call".to_string(),
        }),
        ("Project type", b.project_type.clone()),
        ("Additional info", optional(&b.additional_info)),
        ("Status", b.status.label().to_string()),
    ]
}

fn project_rows(p: &Project) -> Rows {
    vec![
        ("Contact", format!("{} <{}>", p.name, p.email)),
        ("Phone", optional(&p.phone)),
        ("Company", p.company_name.clone()),
        ("Industry", p.industry.clone()),
        ("Service", service_label(p.service_type).to_string()),
        ("Project", p.project_name.clone()),
        ("Description", p.project_description.clone()),
        ("Goals", p.project_goals.join(", ")),
        ("Target audience", p.target_audience.clone()),
        ("Budget", p.budget.clone()),
        ("Timeline", timeline_label(p.timeline).to_string()),
        ("Existing website", optional(&p.existing_website)),
    ]
}

fn service_label(service_type: ServiceType) -> &'static str {
    match service_type {
        ServiceType::Ecommerce => "E-commerce store",
        ServiceType::Blog => "Blog",
        ServiceType::Portfolio => "Portfolio",
        ServiceType::Landing => "Landing page",
        ServiceType::Custom => "Custom website",
    }
}

fn timeline_label(timeline: Timeline) -> &'static str {
    match timeline {
        Timeline::Urgent => "Urgent",
        Timeline::Standard => "Standard",
        Timeline::Relaxed => "Relaxed",
        Timeline::NotSure => "Not sure yet",
    }
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn render(subject: String, heading: &str, intro: &str, rows: &Rows) -> RenderedEmail {
    let mut text = format!("{}\n\n{}\n", heading, intro);
    for (label, value) in rows {
        text.push_str(&format!("\n{}: {}", label, value));
    }
    text.push_str("\n\n--\nVeloria\nThis is an automated message.");

    let table_rows: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr><td class=\"label\">{}</td><td>{}</td></tr>",
                html_escape::encode_text(label),
                html_escape::encode_text(value).replace('\n', "<br>")
            )
        })
        .collect();
    let table = if rows.is_empty() {
        String::new()
    } else {
        format!("<table>{}</table>", table_rows)
    };

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #1f2937; max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background-color: #111827; color: #ffffff; padding: 20px; text-align: center; border-radius: 8px 8px 0 0; }}
        .content {{ background-color: #ffffff; padding: 30px; border: 1px solid #e5e7eb; }}
        table {{ width: 100%; border-collapse: collapse; margin-top: 20px; }}
        td {{ padding: 8px; border-bottom: 1px solid #f3f4f6; vertical-align: top; }}
        td.label {{ font-weight: bold; width: 35%; color: #6b7280; }}
        .footer {{ background-color: #f9fafb; padding: 15px; text-align: center; font-size: 12px; color: #6b7280; border-radius: 0 0 8px 8px; }}
    </style>
</head>
<body>
    <div class="header"><h1>Veloria</h1><h2>{heading}</h2></div>
    <div class="content">
        <p>{intro}</p>
        {table}
    </div>
    <div class="footer"><p>This is an automated message.</p></div>
</body>
</html>"#,
        title = html_escape::encode_text(&subject),
        heading = html_escape::encode_text(heading),
        intro = html_escape::encode_text(intro),
        table = table,
    );

    RenderedEmail { subject, text, html }
}
