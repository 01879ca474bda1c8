//! Text renderings of the client views.
//!
//! Three views derive from the one session-held event collection: the
//! public listing, the numbered buy/sell selection menu, and the admin
//! tables. All functions are pure string builders.

use crate::types::{Event, User};

/// Renders the public event listing.
#[must_use]
pub fn event_list(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events available.\n".to_string();
    }

    let mut out = String::new();
    for event in events {
        out.push_str(&format!(
            "{} - {} at {} - ${:.2} ({} tickets left)\n",
            event.name, event.date, event.location, event.price, event.available_tickets
        ));
        if let Some(description) = &event.description {
            out.push_str(&format!("    {description}\n"));
        }
    }
    out
}

/// Renders the numbered selection menu used by the buy and sell flows.
#[must_use]
pub fn ticket_menu(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events to choose from.\n".to_string();
    }

    let mut out = String::new();
    for (index, event) in events.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} ({}) - ${:.2}\n",
            index + 1,
            event.name,
            event.date,
            event.price
        ));
    }
    out
}

/// Renders the admin event table.
#[must_use]
pub fn admin_event_table(events: &[Event]) -> String {
    let mut out = format!(
        "{:<38} {:<28} {:<12} {:<20} {:>10} {:>8}\n",
        "ID", "NAME", "DATE", "LOCATION", "PRICE", "TICKETS"
    );
    for event in events {
        out.push_str(&format!(
            "{:<38} {:<28} {:<12} {:<20} {:>10.2} {:>8}\n",
            event.id, event.name, event.date, event.location, event.price, event.available_tickets
        ));
    }
    out
}

/// Renders the admin user table. Password hashes never reach the client,
/// so there is nothing to hide here.
#[must_use]
pub fn admin_user_table(users: &[User]) -> String {
    let mut out = format!(
        "{:<38} {:<24} {:<16} {:<28} {:<6}\n",
        "ID", "NAME", "USERNAME", "EMAIL", "ROLE"
    );
    for user in users {
        let role = match user.role {
            crate::types::Role::Admin => "admin",
            crate::types::Role::User => "user",
        };
        out.push_str(&format!(
            "{:<38} {:<24} {:<16} {:<28} {:<6}\n",
            user.id, user.name, user.username, user.email, role
        ));
    }
    out
}
