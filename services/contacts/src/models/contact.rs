//! Contact model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{Pagination, Patch};
use crate::validation::{ValidationErrors, Validator};

const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 200;
const PHONE_MAX: usize = 20;

/// Contact entity, owned by exactly one user
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Contact {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New contact creation payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Contact update payload
///
/// `first_name` is mandatory on every update; the other fields only change
/// when they were sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactChanges {
    pub first_name: String,
    pub last_name: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
}

impl ContactChanges {
    /// Merge the changes over a stored contact
    pub fn apply(self, contact: &mut Contact) {
        contact.first_name = self.first_name;
        self.last_name.apply_to(&mut contact.last_name);
        self.email.apply_to(&mut contact.email);
        self.phone.apply_to(&mut contact.phone);
    }
}

/// Request for contact creation
#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateContactRequest {
    pub fn validate(self) -> Result<NewContact, ValidationErrors> {
        let mut validator = Validator::new();
        let first_name = validator.required("first_name", self.first_name, NAME_MAX);
        let last_name = validator.optional("last_name", self.last_name, NAME_MAX);
        let email = validator.optional("email", self.email, EMAIL_MAX);
        validator.email("email", email.as_deref());
        let phone = validator.optional("phone", self.phone, PHONE_MAX);
        validator.phone("phone", phone.as_deref());
        validator.finish()?;

        Ok(NewContact {
            first_name,
            last_name,
            email,
            phone,
        })
    }
}

/// Request for contact update
#[derive(Debug, Default, Deserialize)]
pub struct UpdateContactRequest {
    #[serde(default)]
    pub first_name: Patch<String>,
    #[serde(default)]
    pub last_name: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub phone: Patch<String>,
}

impl UpdateContactRequest {
    pub fn validate(self) -> Result<ContactChanges, ValidationErrors> {
        let mut validator = Validator::new();
        let first_name = validator.required_patch("first_name", self.first_name, NAME_MAX);
        let last_name = validator.optional_patch("last_name", self.last_name, NAME_MAX);
        let email = validator.optional_patch("email", self.email, EMAIL_MAX);
        if let Patch::Value(email) = &email {
            validator.email("email", Some(email));
        }
        let phone = validator.optional_patch("phone", self.phone, PHONE_MAX);
        if let Patch::Value(phone) = &phone {
            validator.phone("phone", Some(phone));
        }
        validator.finish()?;

        Ok(ContactChanges {
            first_name,
            last_name,
            email,
            phone,
        })
    }
}

/// Query parameters for contact search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSearchQuery {
    /// Substring of the first or last name
    pub name: Option<String>,
    /// Substring of the email address
    pub email: Option<String>,
    /// Substring of the phone number
    pub phone: Option<String>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Number of contacts per page
    pub size: Option<i64>,
}

impl ContactSearchQuery {
    /// Split the query into its filter and page request
    pub fn into_parts(self) -> (ContactFilter, Pagination) {
        let filter = ContactFilter {
            name: non_blank(self.name),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
        };
        (filter, Pagination::new(self.page, self.size))
    }
}

/// Substring filters over a user's contacts, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactFilter {
    /// Whether `contact` satisfies every filter, ignoring case
    pub fn matches(&self, contact: &Contact) -> bool {
        let name = self.name.as_deref().is_none_or(|needle| {
            contains(Some(&contact.first_name), needle)
                || contains(contact.last_name.as_deref(), needle)
        });
        let email = self
            .email
            .as_deref()
            .is_none_or(|needle| contains(contact.email.as_deref(), needle));
        let phone = self
            .phone
            .as_deref()
            .is_none_or(|needle| contains(contact.phone.as_deref(), needle));

        name && email && phone
    }
}

fn contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|haystack| haystack.to_lowercase().contains(&needle.to_lowercase()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Response for contact operations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}
