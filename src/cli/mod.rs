//! CLI layer - commands and dispatch
//!
//! This module contains the command-line front end of the muzeum client.
//! It includes:
//! - Account commands (login, register, logout, whoami)
//! - Catalog and exhibition browsing
//! - Visit booking
//! - Donation offers
//! - Admin commands (donation review, curation, daily schedule)
//!
//! Every command runs against a `CliState` built once from configuration.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod donations;
pub mod output;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::client::{
    ApiClient, ApiError, HttpAuthRepository, HttpDonationRepository, HttpExhibitRepository,
    HttpExhibitionRepository, HttpReservationRepository,
};
use crate::config::Config;
use crate::models::ExhibitCategory;
use crate::services::{
    AuthService, AuthServiceError, BookingService, BookingServiceError, CatalogService,
    CatalogServiceError, CategoryFilter, DonationService, DonationServiceError, ExhibitService,
    ExhibitServiceError, ExhibitionService, ExhibitionServiceError, MediaError, MediaService,
    ScheduleService, ScheduleServiceError, SortOrder, SERVER_ERROR_MESSAGE,
};
use crate::session::{Capability, FileTokenStore, SessionContext, SessionError};

/// Visitor and curator client for the Muzeum Września 1939 API
#[derive(Debug, Parser)]
#[command(name = "muzeum", version, about)]
pub struct Cli {
    /// Configuration file
    #[arg(long, short, default_value = "muzeum.yml", env = "MUZEUM_CONFIG")]
    pub config: PathBuf,

    /// Override `api.base_url`
    #[arg(long)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse the exhibit catalog
    Catalog(CatalogArgs),
    /// Show one exhibit
    Exhibit { id: i64 },
    /// List exhibitions, or show one
    Exhibitions { id: Option<i64> },
    /// Show visit hours of a day
    Slots {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Book a visit
    Book {
        #[arg(long)]
        date: NaiveDate,
        /// Visit hour (HH:MM); without it the free hours are listed
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,
        #[arg(long, default_value_t = 1)]
        guests: u32,
    },
    /// List my reservations
    Reservations,
    /// Offer an item to the museum
    Donate {
        #[arg(long)]
        item_name: String,
        #[arg(long)]
        description: String,
        /// Photo: local file, http(s) URL or data: URL
        #[arg(long)]
        image: Option<String>,
    },
    /// List my donation offers
    Donations,
    /// Curator commands
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Text searched in names and descriptions
    #[arg(long, default_value = "")]
    pub search: String,
    /// Category, or `all`
    #[arg(long, default_value = "all")]
    pub category: CategoryFilter,
    /// newest, oldest or alphabetical
    #[arg(long, default_value = "newest")]
    pub sort: SortOrder,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Donation offers (pending unless --all)
    Donations {
        #[arg(long)]
        all: bool,
    },
    /// Accept a donation offer
    Accept { id: i64 },
    /// Reject a donation offer
    Reject { id: i64 },
    /// Exhibit list, newest first
    Exhibits {
        /// Matches name or production year
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<ExhibitCategory>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Create an exhibit
    AddExhibit(ExhibitArgs),
    /// Change an exhibit; omitted fields keep their value
    UpdateExhibit {
        id: i64,
        #[command(flatten)]
        changes: ExhibitChanges,
    },
    /// Delete an exhibit
    DeleteExhibit { id: i64 },
    /// Exhibition list
    Exhibitions,
    /// Create an exhibition
    AddExhibition(ExhibitionArgs),
    /// Change an exhibition; omitted fields keep their value
    UpdateExhibition {
        id: i64,
        #[command(flatten)]
        changes: ExhibitionChanges,
    },
    /// Delete an exhibition
    DeleteExhibition { id: i64 },
    /// Reservations of a day (default: today)
    Schedule {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Debug, Args)]
pub struct ExhibitArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, default_value = "")]
    pub year: String,
    #[arg(long, default_value = "uniforms")]
    pub category: ExhibitCategory,
    /// Local file, http(s) URL or data: URL
    #[arg(long, default_value = "")]
    pub image: String,
}

#[derive(Debug, Args)]
pub struct ExhibitChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub category: Option<ExhibitCategory>,
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExhibitionArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    /// Banner image: local file, http(s) URL or data: URL
    #[arg(long, default_value = "")]
    pub background: String,
    /// Exhibit id, repeatable; order is kept
    #[arg(long = "exhibit")]
    pub exhibits: Vec<i64>,
}

#[derive(Debug, Args)]
pub struct ExhibitionChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub background: Option<String>,
    /// Add or remove an exhibit, repeatable
    #[arg(long = "toggle")]
    pub toggle: Vec<i64>,
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    crate::models::hh_mm::parse(value).ok_or_else(|| format!("invalid time '{}', expected HH:MM", value))
}

/// Error returned by any command
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthServiceError),
    #[error(transparent)]
    Catalog(#[from] CatalogServiceError),
    #[error(transparent)]
    Booking(#[from] BookingServiceError),
    #[error(transparent)]
    Schedule(#[from] ScheduleServiceError),
    #[error(transparent)]
    Exhibit(#[from] ExhibitServiceError),
    #[error(transparent)]
    Exhibition(#[from] ExhibitionServiceError),
    #[error(transparent)]
    Donation(#[from] DonationServiceError),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CliError {
    /// One-line message for stderr
    pub fn user_message(&self) -> String {
        match self {
            CliError::Auth(e) => e.user_message(),
            CliError::Catalog(e) => e.user_message(),
            CliError::Booking(e) => e.user_message(),
            CliError::Schedule(e) => e.user_message(),
            CliError::Exhibit(e) => e.user_message(),
            CliError::Exhibition(e) => e.user_message(),
            CliError::Donation(e) => e.user_message(),
            CliError::Media(e) => e.user_message(),
            CliError::Session(e) => e.user_message(),
            CliError::Api(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Services shared by all commands
pub struct CliState {
    pub session: Arc<SessionContext>,
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub booking: BookingService,
    pub schedule: ScheduleService,
    pub exhibits: ExhibitService,
    pub exhibitions: ExhibitionService,
    pub donations: DonationService,
    pub media: MediaService,
}

impl CliState {
    /// Restore the stored session and wire services to the API
    pub fn new(config: &Config) -> Result<Self, CliError> {
        let store = Arc::new(FileTokenStore::new(&config.session.store_path));
        let session = Arc::new(SessionContext::init(store, config.session.token_key.clone()));
        let client = ApiClient::new(&config.api, session.clone())?;
        Ok(Self::with_client(client, config))
    }

    /// Wire services to an existing client and its session
    pub fn with_client(client: ApiClient, config: &Config) -> Self {
        let session = client.session().clone();
        let exhibit_repo = HttpExhibitRepository::boxed(client.clone());
        let reservation_repo = HttpReservationRepository::boxed(client.clone());

        Self {
            auth: AuthService::new(HttpAuthRepository::boxed(client.clone()), session.clone()),
            catalog: CatalogService::new(exhibit_repo.clone()),
            booking: BookingService::new(
                reservation_repo.clone(),
                session.clone(),
                config.booking.max_guests,
            ),
            schedule: ScheduleService::new(reservation_repo, session.clone()),
            exhibits: ExhibitService::new(exhibit_repo, session.clone()),
            exhibitions: ExhibitionService::new(
                HttpExhibitionRepository::boxed(client.clone()),
                session.clone(),
            ),
            donations: DonationService::new(HttpDonationRepository::boxed(client), session.clone()),
            media: MediaService::new(config.media.clone()),
            session,
        }
    }

    /// Capability guard for whole commands
    pub fn require(&self, capability: Capability) -> Result<(), CliError> {
        self.session.require(capability)?;
        Ok(())
    }
}

/// Capability a command needs before it runs
pub fn required_capability(command: &Commands) -> Option<Capability> {
    match command {
        Commands::Book { .. }
        | Commands::Reservations
        | Commands::Donate { .. }
        | Commands::Donations => Some(Capability::Authenticated),
        Commands::Admin(_) => Some(Capability::Admin),
        _ => None,
    }
}

/// Run one command
pub async fn run(command: Commands, state: &CliState) -> Result<(), CliError> {
    if let Some(capability) = required_capability(&command) {
        state.require(capability)?;
    }

    match command {
        Commands::Login { email, password } => auth::login(state, &email, &password).await,
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
        } => auth::register(state, first_name, last_name, email, password).await,
        Commands::Logout => auth::logout(state),
        Commands::Whoami => auth::whoami(state),
        Commands::Catalog(args) => catalog::browse(state, args).await,
        Commands::Exhibit { id } => catalog::exhibit(state, id).await,
        Commands::Exhibitions { id } => catalog::exhibitions(state, id).await,
        Commands::Slots { date } => booking::slots(state, date).await,
        Commands::Book { date, time, guests } => booking::book(state, date, time, guests).await,
        Commands::Reservations => booking::reservations(state).await,
        Commands::Donate {
            item_name,
            description,
            image,
        } => donations::donate(state, item_name, description, image).await,
        Commands::Donations => donations::mine(state).await,
        Commands::Admin(command) => admin::run(state, command).await,
    }
}
