//! Wire types shared with the marketplace API

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::convert::Infallible;

use crate::error::ApiError;

/// Account kind. Decides which home screen and profile a user sees.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Volunteer,
    Organization,
    /// A role this client does not know yet; the raw value is kept so it
    /// survives a storage round-trip unchanged.
    Unknown(String),
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "volunteer" => Role::Volunteer,
            "organization" | "organisation" => Role::Organization,
            _ => Role::Unknown(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Volunteer => "volunteer",
            Role::Organization => "organization",
            Role::Unknown(raw) => raw,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::parse(&raw))
    }
}

/// Authenticated account as returned by the API and cached locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawUser")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

// Some endpoints name the identifier `user_id`.
#[derive(Deserialize)]
struct RawUser {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    user_id: Option<i64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: String,
    #[serde(default)]
    role: Option<Role>,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        Self {
            id: raw.user_id.or(raw.id),
            name: raw.name,
            email: raw.email,
            role: raw.role,
        }
    }
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            email: email.into(),
            role: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Name to show in headers, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Login request body.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolunteerDetails {
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationDetails {
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Role-specific signup fields, sent alongside the common ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupDetails {
    Volunteer(VolunteerDetails),
    Organization(OrganizationDetails),
}

/// Signup request body: `{name, email, password, role, ...role fields}`.
#[derive(Clone)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub details: Option<SignupDetails>,
}

impl SignupRequest {
    pub fn volunteer(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: Role::Volunteer,
            details: None,
        }
    }

    pub fn organization(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: Role::Organization,
            details: None,
        }
    }

    pub fn with_details(mut self, details: SignupDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Every common field must be filled in before submitting.
    pub fn validate(&self) -> Result<(), ApiError> {
        let missing = [&self.name, &self.email, &self.password]
            .iter()
            .any(|field| field.trim().is_empty());

        if missing {
            return Err(ApiError::InvalidRequest(
                "Please fill all the fields".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("details", &self.details)
            .finish()
    }
}

impl Serialize for SignupRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("email", &self.email)?;
        map.serialize_entry("password", &self.password)?;
        map.serialize_entry("role", &self.role)?;

        match &self.details {
            Some(SignupDetails::Volunteer(details)) => {
                if let Some(gender) = &details.gender {
                    map.serialize_entry("gender", gender)?;
                }
                if let Some(age) = details.age {
                    map.serialize_entry("age", &age)?;
                }
                if let Some(bio) = &details.bio {
                    map.serialize_entry("bio", bio)?;
                }
            }
            Some(SignupDetails::Organization(details)) => {
                if let Some(description) = &details.description {
                    map.serialize_entry("description", description)?;
                }
                if let Some(location) = &details.location {
                    map.serialize_entry("location", location)?;
                }
            }
            None => {}
        }

        map.end()
    }
}

/// Body of a login or signup response, parsed leniently.
///
/// A body that is empty or not JSON yields an empty response rather than an
/// error; the caller decides what a missing token means for the status code
/// it received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub user: Option<User>,
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return Self::default();
        }

        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Auth response body is not valid JSON");
                return Self::default();
            }
        };

        let token = value
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        let user = value
            .get("user")
            .filter(|user| !user.is_null())
            .and_then(|user| match serde_json::from_value::<User>(user.clone()) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring malformed user record in auth response");
                    None
                }
            });

        let message = value
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .map(str::to_string);

        Self {
            token,
            user,
            message,
        }
    }
}

/// A volunteering activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: i64,
    pub title: String,
    #[serde(default)]
    pub event_type_id: Option<i64>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub city_id: Option<i64>,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Registration row joining a user to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEvent {
    pub user_id: i64,
    pub event_id: i64,
    pub event: Event,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub event_id: Option<i64>,
}
