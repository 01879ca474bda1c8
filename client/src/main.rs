//! TicketsMaster - command-line ticketing client.
//!
//! Talks to the TicketsMaster REST API: browse events, register and log in,
//! and manage events and users as an admin. When the server is unreachable,
//! read paths fall back to a fixed demo data set and the demo credentials
//! keep the login flows usable offline.
//!
//! # Environment Variables
//!
//! See `ticketsmaster_client::config` for available configuration options.

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ticketsmaster_client::api::ApiClient;
use ticketsmaster_client::config::Config;
use ticketsmaster_client::demo::DEMO_TOKEN;
use ticketsmaster_client::error::ClientError;
use ticketsmaster_client::render;
use ticketsmaster_client::session_file::{self, SavedSession};
use ticketsmaster_client::state::{Connection, Session};
use ticketsmaster_client::types::{EventInput, GeoPosition, RegisterRequest};

/// TicketsMaster - command-line ticketing client.
#[derive(Parser, Debug)]
#[command(name = "ticketsmaster")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    TICKETSMASTER_API_URL       Base URL of the REST API (default: http://localhost:3000/api)
    TICKETSMASTER_SESSION_FILE  Persisted session location (default: ~/.ticketsmaster/session.json)

EXAMPLES:
    # Browse events
    ticketsmaster events list

    # Create an account and log in
    ticketsmaster register --name Ada --email ada@example.com --username ada --password s3cret
    ticketsmaster login ada s3cret

    # Admin workflow
    ticketsmaster admin login admin admin123
    ticketsmaster admin users
    ticketsmaster admin reset
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Browse and create events.
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },

    /// Create an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Log in and store the session.
    Login { username: String, password: String },

    /// Drop the stored session.
    Logout,

    /// Pick an event to buy a ticket for (demo flow, no transaction).
    Buy,

    /// Pick an event to sell a ticket for (demo flow, no transaction).
    Sell,

    /// Admin operations; most require `admin login` first.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug)]
enum EventsCommand {
    /// List all events, newest first.
    List,

    /// Show a single event.
    Show { id: String },

    /// Create an event (no login required).
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        tickets: Option<i64>,
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Log in as an admin and store the session.
    Login { username: String, password: String },

    /// Show the admin event table.
    Events,

    /// Update an event's fields.
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        tickets: Option<i64>,
    },

    /// Delete an event.
    Delete { id: String },

    /// Clear all events and restore the sample set.
    Reset,

    /// Show the admin user table.
    Users,

    /// Delete a user account.
    DeleteUser { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

/// Initialize compact logging filtered through `RUST_LOG` (default: warn,
/// so normal command output stays clean).
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    let api = ApiClient::new(config.api_url.clone());
    let mut session = restore_session(&config);

    match cli.command {
        Command::Events { command } => run_events(command, &api, &mut session).await?,
        Command::Register {
            name,
            email,
            username,
            password,
        } => {
            let response = api
                .register(&RegisterRequest {
                    name,
                    email,
                    username,
                    password,
                })
                .await?;
            println!("{} (user id: {})", response.message, response.user_id);
        }
        Command::Login { username, password } => {
            let outcome = api.login(&username, &password).await;
            let message = session.apply_login(outcome, &username, &password, false)?;
            persist_session(&config, &session)?;
            println!("{message}");
        }
        Command::Logout => {
            session_file::clear(&config.session_file)?;
            println!("Logged out.");
        }
        Command::Buy => {
            refresh_events(&api, &mut session).await?;
            print_mode_banner(&session);
            print!("{}", render::ticket_menu(&session.events));
            println!("Buying is a demo flow - no ticket transaction is performed.");
        }
        Command::Sell => {
            refresh_events(&api, &mut session).await?;
            print_mode_banner(&session);
            print!("{}", render::ticket_menu(&session.events));
            println!("Selling is a demo flow - no ticket transaction is performed.");
        }
        Command::Admin { command } => run_admin(command, &config, &api, &mut session).await?,
    }

    Ok(())
}

async fn run_events(
    command: EventsCommand,
    api: &ApiClient,
    session: &mut Session,
) -> Result<()> {
    match command {
        EventsCommand::List => {
            refresh_events(api, session).await?;
            print_mode_banner(session);
            print!("{}", render::event_list(&session.events));
        }
        EventsCommand::Show { id } => {
            let event = api.get_event(&id).await?;
            print!("{}", render::event_list(std::slice::from_ref(&event)));
        }
        EventsCommand::Create {
            name,
            date,
            location,
            description,
            price,
            tickets,
            lat,
            lng,
        } => {
            let position = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(GeoPosition { lat, lng }),
                _ => None,
            };
            let event = api
                .create_event(&EventInput {
                    name,
                    date,
                    location,
                    position,
                    description,
                    price,
                    available_tickets: tickets,
                })
                .await?;
            println!("Event created: {} ({})", event.name, event.id);
        }
    }
    Ok(())
}

async fn run_admin(
    command: AdminCommand,
    config: &Config,
    api: &ApiClient,
    session: &mut Session,
) -> Result<()> {
    match command {
        AdminCommand::Login { username, password } => {
            let outcome = api.admin_login(&username, &password).await;
            let message = session.apply_login(outcome, &username, &password, true)?;
            persist_session(config, session)?;
            println!("{message}");
            return Ok(());
        }
        _ => {}
    }

    // Every other admin command needs a stored admin session.
    let token = match (&session.token, session.is_admin()) {
        (Some(token), true) => token.clone(),
        _ => bail!(ClientError::NoAdminSession),
    };

    if token == DEMO_TOKEN {
        return run_admin_demo(command, api, session).await;
    }

    match command {
        AdminCommand::Login { .. } => unreachable!("handled above"),
        AdminCommand::Events => {
            refresh_events(api, session).await?;
            print!("{}", render::admin_event_table(&session.events));
        }
        AdminCommand::Update {
            id,
            name,
            date,
            location,
            description,
            price,
            tickets,
        } => {
            let event = api
                .update_event(
                    &token,
                    &id,
                    &EventInput {
                        name,
                        date,
                        location,
                        position: None,
                        description,
                        price,
                        available_tickets: tickets,
                    },
                )
                .await?;
            println!("Event updated: {} ({})", event.name, event.id);
        }
        AdminCommand::Delete { id } => {
            let response = api.delete_event(&token, &id).await?;
            println!("{}", response.message);
        }
        AdminCommand::Reset => {
            let response = api.reset_events(&token).await?;
            println!("{} ({} events)", response.message, response.events.len());
        }
        AdminCommand::Users => {
            let users = api.list_users(&token).await?;
            print!("{}", render::admin_user_table(&users));
        }
        AdminCommand::DeleteUser { id } => {
            let response = api.delete_user(&token, &id).await?;
            println!("{}", response.message);
        }
    }

    Ok(())
}

/// Demo-mode admin commands: no server to talk to, so mutations are local
/// to this invocation and reads show the demo data set.
async fn run_admin_demo(
    command: AdminCommand,
    api: &ApiClient,
    session: &mut Session,
) -> Result<()> {
    debug!("Running admin command in demo mode");
    refresh_events(api, session).await?;

    match command {
        AdminCommand::Login { .. } => unreachable!("handled by caller"),
        AdminCommand::Events => {
            print_mode_banner(session);
            print!("{}", render::admin_event_table(&session.events));
        }
        AdminCommand::Update { .. } => {
            println!("Event updated successfully! (Demo mode)");
        }
        AdminCommand::Delete { id } => {
            session.remove_event_locally(&id);
            println!("Event deleted successfully! (Demo mode)");
        }
        AdminCommand::Reset => {
            println!("Events reset successfully! (Demo mode)");
        }
        AdminCommand::Users => {
            println!("User management is unavailable in demo mode.");
        }
        AdminCommand::DeleteUser { .. } => {
            println!("User deleted successfully! (Demo mode)");
        }
    }

    Ok(())
}

/// Refresh point for the event collection: fetch, then run the outcome
/// through the session's transition function (demo fallback included).
async fn refresh_events(api: &ApiClient, session: &mut Session) -> Result<()> {
    let outcome = api.list_events().await;
    session.apply_events(outcome)?;
    Ok(())
}

fn print_mode_banner(session: &Session) {
    if session.connection == Connection::Demo {
        println!("[demo mode - server unreachable, showing sample data]");
    }
}

fn restore_session(config: &Config) -> Session {
    match session_file::load(&config.session_file) {
        Ok(Some(saved)) => Session::with_identity(saved.token, saved.user),
        Ok(None) => Session::new(),
        Err(err) => {
            debug!(error = %err, "Ignoring unreadable session file");
            Session::new()
        }
    }
}

fn persist_session(config: &Config, session: &Session) -> Result<()> {
    if let (Some(token), Some(user)) = (&session.token, &session.user) {
        session_file::save(
            &config.session_file,
            &SavedSession {
                token: token.clone(),
                user: user.clone(),
            },
        )?;
    }
    Ok(())
}
