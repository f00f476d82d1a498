//! Volunteer API Client
//!
//! Typed access to the marketplace HTTP API: authentication, event listing,
//! event registration and a user's registered events.
//!
//! Authentication calls return the raw status and body so the session layer
//! can tell a broken server from a rejected password.

mod client;
mod endpoints;
mod error;
mod types;

pub use client::{ApiClient, ApiResponse, AuthApi, EventsApi};
pub use endpoints::{Endpoints, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use types::{
    AuthResponse, Credentials, Event, OrganizationDetails, Registration, Role, SignupDetails,
    SignupRequest, User, UserEvent, VolunteerDetails,
};

pub type Result<T> = std::result::Result<T, ApiError>;
