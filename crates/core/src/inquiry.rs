//! Validated visitor input: contact inquiries and checkout details.
//!
//! Both forms share the same field rules, so they share [`InquiryError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted free-text message.
pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// Longest accepted email address (RFC 5321).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Why a submitted form was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InquiryError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("please enter a valid email address")]
    InvalidEmail,

    #[error("message must be at most {max} characters")]
    MessageTooLong { max: usize },

    #[error("unknown project type: {0}")]
    UnknownProject(String),
}

/// What a visitor wants to talk to the studio about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    #[default]
    General,
    FullHomeDesign,
    RoomStyling,
    CustomFurniture,
    Consultation,
}

impl ProjectKind {
    /// Every option in form display order.
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::FullHomeDesign,
        Self::RoomStyling,
        Self::CustomFurniture,
        Self::Consultation,
    ];

    /// Form value, e.g. `room-styling`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::FullHomeDesign => "full-home-design",
            Self::RoomStyling => "room-styling",
            Self::CustomFurniture => "custom-furniture",
            Self::Consultation => "consultation",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General question",
            Self::FullHomeDesign => "Full home design",
            Self::RoomStyling => "Room styling",
            Self::CustomFurniture => "Custom furniture",
            Self::Consultation => "Design consultation",
        }
    }

    /// Parse a form value. Empty input means [`ProjectKind::General`].
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::UnknownProject` for any other unrecognised value.
    pub fn parse(value: &str) -> Result<Self, InquiryError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::General);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == value)
            .ok_or_else(|| InquiryError::UnknownProject(value.to_string()))
    }
}

/// A contact form submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub project: ProjectKind,
    pub message: String,
}

impl Inquiry {
    /// Validate and normalise a contact form submission.
    ///
    /// Text fields are trimmed and the email is lowercased. Blank optional
    /// fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError` naming the first field that fails validation.
    pub fn new(
        name: &str,
        email: &str,
        phone: Option<&str>,
        project: &str,
        message: &str,
    ) -> Result<Self, InquiryError> {
        let name = required("name", name)?;
        let email = normalize_email(email)?;
        let project = ProjectKind::parse(project)?;
        let message = required("message", message)?;
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(InquiryError::MessageTooLong {
                max: MAX_MESSAGE_LENGTH,
            });
        }

        Ok(Self {
            name,
            email,
            phone: optional(phone),
            project,
            message,
        })
    }
}

/// Contact and delivery details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub notes: Option<String>,
}

/// Raw checkout form fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub address: &'a str,
    pub city: &'a str,
    pub postcode: &'a str,
    pub notes: Option<&'a str>,
}

impl Customer {
    /// Validate and normalise checkout details.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError` naming the first field that fails validation.
    pub fn new(fields: CustomerFields<'_>) -> Result<Self, InquiryError> {
        let name = required("name", fields.name)?;
        let email = normalize_email(fields.email)?;
        let address = required("address", fields.address)?;
        let city = required("city", fields.city)?;
        let postcode = required("postcode", fields.postcode)?;
        let notes = optional(fields.notes);
        if notes
            .as_ref()
            .is_some_and(|n| n.chars().count() > MAX_MESSAGE_LENGTH)
        {
            return Err(InquiryError::MessageTooLong {
                max: MAX_MESSAGE_LENGTH,
            });
        }

        Ok(Self {
            name,
            email,
            phone: optional(fields.phone),
            address,
            city,
            postcode,
            notes,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, InquiryError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(InquiryError::MissingField(field));
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Lowercase and check for `local@domain.tld` shape.
fn normalize_email(email: &str) -> Result<String, InquiryError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(InquiryError::MissingField("email"));
    }
    if email.len() > MAX_EMAIL_LENGTH || email.chars().any(char::is_whitespace) {
        return Err(InquiryError::InvalidEmail);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(InquiryError::InvalidEmail);
    };
    let domain_ok = domain
        .split('.')
        .all(|label| !label.is_empty())
        && domain.contains('.')
        && !domain.contains('@');
    if local.is_empty() || !domain_ok {
        return Err(InquiryError::InvalidEmail);
    }

    Ok(email)
}
