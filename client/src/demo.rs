//! Fixed demo data for offline mode.
//!
//! When the server is unreachable the client substitutes this three-event
//! sample set and accepts the demo credentials so the UI stays interactive.

use chrono::{TimeZone, Utc};

use crate::types::{Event, Role, User};

/// Username/password accepted by the offline user login.
pub const DEMO_USER_CREDENTIALS: (&str, &str) = ("user", "pass");

/// Username/password accepted by the offline admin login.
pub const DEMO_ADMIN_CREDENTIALS: (&str, &str) = ("admin", "admin123");

/// Placeholder token stored for an offline session.
pub const DEMO_TOKEN: &str = "demo-token";

/// The fixed three-event demo set shown while offline.
#[must_use]
pub fn demo_events() -> Vec<Event> {
    let samples = [
        ("demo-1", "Concert Night", "2026-12-01", "Stadium A", 50.0, 100),
        ("demo-2", "Festival Fun", "2026-12-15", "Park B", 35.0, 200),
        ("demo-3", "Theater Show", "2026-12-20", "Theater C", 75.0, 50),
    ];

    samples
        .into_iter()
        .map(|(id, name, date, location, price, tickets)| Event {
            id: id.to_string(),
            name: name.to_string(),
            date: date.to_string(),
            location: location.to_string(),
            position: None,
            description: None,
            price,
            available_tickets: tickets,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        })
        .collect()
}

/// A stand-in user record for an offline session.
#[must_use]
pub fn demo_user(username: &str, role: Role) -> User {
    User {
        id: format!("demo-{username}"),
        name: username.to_string(),
        email: format!("{username}@demo.local"),
        username: username.to_string(),
        role,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}
