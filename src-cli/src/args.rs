//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use volunteer_core::{Config, OrganizationDetails, SignupDetails, SignupRequest, VolunteerDetails};

/// Volunteer - browse and join volunteer events from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "volunteer")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// TOML config file (default: environment and built-in defaults)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Override the local database path
    #[arg(long)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in with email and password
    Login {
        email: String,
        #[arg(long, env = "VOLUNTEER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log in
    Signup(SignupArgs),

    /// Clear the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// List events, optionally filtered
    Events {
        /// Match against event title or organization
        #[arg(short, long)]
        query: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show one event
    Event { id: i64 },

    /// Register the logged-in user for an event
    Register { id: i64 },

    /// Events the logged-in user is registered for
    MyEvents,

    /// Which home screen the session lands on
    Route,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    Volunteer,
    Organization,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SignupArgs {
    pub name: String,
    pub email: String,

    #[arg(long, env = "VOLUNTEER_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long, value_enum, default_value_t = RoleArg::Volunteer)]
    pub role: RoleArg,

    // Volunteer profile
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub bio: Option<String>,

    // Organization profile
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
}

impl SignupArgs {
    pub fn into_request(self) -> SignupRequest {
        match self.role {
            RoleArg::Volunteer => {
                let details = VolunteerDetails {
                    gender: self.gender,
                    age: self.age,
                    bio: self.bio,
                };
                let request = SignupRequest::volunteer(self.name, self.email, self.password);
                if details == VolunteerDetails::default() {
                    request
                } else {
                    request.with_details(SignupDetails::Volunteer(details))
                }
            }
            RoleArg::Organization => {
                let details = OrganizationDetails {
                    description: self.description,
                    location: self.location,
                };
                let request = SignupRequest::organization(self.name, self.email, self.password);
                if details == OrganizationDetails::default() {
                    request
                } else {
                    request.with_details(SignupDetails::Organization(details))
                }
            }
        }
    }
}

impl Args {
    /// Config file or environment, then command-line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::from_env()?,
        };

        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(db) = &self.db {
            config.database_path = db.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
