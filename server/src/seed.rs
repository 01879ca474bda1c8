//! Startup seeding of default data.
//!
//! On startup the server populates an empty events collection with a fixed
//! ten-event sample set and creates the default admin account when the
//! `admin` username is absent. Both routines are lookup-then-insert with no
//! isolation between the two steps, which is acceptable for a single-process
//! startup path.

use tracing::{info, warn};

use crate::auth::{hash_password, AuthError};
use crate::store::{Store, StoreError};
use crate::types::{Event, EventInput, Role, User};

/// Username of the default administrator account.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Password of the default administrator account.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Errors that can occur during seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// The fixed sample event set inserted into an empty collection.
#[must_use]
pub fn sample_events() -> Vec<Event> {
    let samples = [
        (
            "Valentine's Day Gala",
            "2026-02-14",
            "Grand Ballroom",
            "Romantic evening with live music and dinner",
            150.0,
            50,
        ),
        (
            "Couple's Night Out",
            "2026-02-14",
            "City Center",
            "Special Valentine's couple event",
            75.0,
            100,
        ),
        (
            "Sweetheart Concert",
            "2026-02-14",
            "Music Hall",
            "Love songs and romantic melodies",
            120.0,
            75,
        ),
        (
            "Tech Conference 2026",
            "2026-04-05",
            "Convention Center",
            "Latest technology trends and innovations",
            299.0,
            200,
        ),
        (
            "Spring Music Festival",
            "2026-03-20",
            "Central Park",
            "Annual spring music celebration",
            85.0,
            500,
        ),
        (
            "Championship Finals",
            "2026-05-15",
            "Mega Arena",
            "Sports championship final match",
            200.0,
            1000,
        ),
        (
            "Summer Beach Party",
            "2026-06-21",
            "Sunset Beach",
            "Beach party with live DJ",
            50.0,
            300,
        ),
        (
            "Corporate Summit",
            "2026-07-10",
            "Business Tower",
            "Annual corporate networking event",
            500.0,
            150,
        ),
        (
            "Food & Wine Festival",
            "2026-08-15",
            "Expo Center",
            "Culinary delights and wine tasting",
            95.0,
            400,
        ),
        (
            "Halloween Horror Night",
            "2026-10-31",
            "Haunted Mansion",
            "Spooky Halloween celebration",
            65.0,
            200,
        ),
    ];

    samples
        .into_iter()
        .map(|(name, date, location, description, price, tickets)| {
            Event::from_input(EventInput {
                name: name.to_string(),
                date: date.to_string(),
                location: location.to_string(),
                position: None,
                description: Some(description.to_string()),
                price: Some(price),
                available_tickets: Some(tickets),
            })
        })
        .collect()
}

/// Inserts the sample event set when the collection is empty.
///
/// A non-empty collection is left untouched, so a restart never duplicates
/// the samples.
pub async fn seed_events_if_empty(store: &dyn Store) -> Result<(), SeedError> {
    if store.count_events().await? > 0 {
        return Ok(());
    }

    let events = sample_events();
    let count = events.len();
    store.insert_events(&events).await?;
    info!(count, "Sample events seeded");
    Ok(())
}

/// Creates the default admin account when the `admin` username is absent.
pub async fn ensure_default_admin(store: &dyn Store) -> Result<(), SeedError> {
    if store
        .find_user_by_username(DEFAULT_ADMIN_USERNAME)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password_hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;
    let admin = User::new(
        "System Administrator",
        "admin@ticketsmaster.com",
        DEFAULT_ADMIN_USERNAME,
        password_hash,
        Role::Admin,
    );
    store.insert_user(admin).await?;
    warn!(
        username = DEFAULT_ADMIN_USERNAME,
        "Default admin user created with the built-in password - change it"
    );
    Ok(())
}
