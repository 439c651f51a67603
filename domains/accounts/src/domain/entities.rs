//! Domain entities for the accounts domain

use chrono::{DateTime, Utc};
use kanban_auth::AuthIdentity;
use serde::Serialize;

use kanban_common::{Error, Result};
use validator::ValidateEmail;

/// Maximum length of first/last name columns (varchar(150))
const MAX_NAME_LENGTH: usize = 150;

/// User entity (full row, including the password hash)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Display name: "first last", falling back to the e-mail address
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name, &self.email)
    }

    /// Auth read-model view of this user, used for token issuance
    pub fn identity(&self) -> AuthIdentity {
        AuthIdentity {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            is_active: self.is_active,
            date_joined: self.date_joined,
        }
    }
}

/// A user about to be inserted. The password hash is supplied at insert time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    /// Build a new user from registration input.
    ///
    /// The e-mail doubles as the username; the full name is split on its
    /// first space into first and last name. Runs before any hashing.
    pub fn from_registration(fullname: &str, email: &str) -> Result<Self> {
        let email = email.trim().to_string();
        if !email.validate_email() {
            return Err(Error::Validation("Enter a valid email address.".to_string()));
        }

        let (first_name, last_name) = split_fullname(fullname);
        if first_name.is_empty() {
            return Err(Error::Validation("Full name is required.".to_string()));
        }
        if first_name.chars().count() > MAX_NAME_LENGTH
            || last_name.chars().count() > MAX_NAME_LENGTH
        {
            return Err(Error::Validation(format!(
                "Name parts must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }

        Ok(Self {
            username: email.clone(),
            email,
            first_name,
            last_name,
        })
    }
}

/// Split a full name on its first space: `"Ada King Lovelace"` →
/// `("Ada", "King Lovelace")`.
pub fn split_fullname(fullname: &str) -> (String, String) {
    let trimmed = fullname.trim();
    match trimmed.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

fn display_name(first_name: &str, last_name: &str, email: &str) -> String {
    let name = format!("{} {}", first_name, last_name).trim().to_string();
    if name.is_empty() {
        email.to_string()
    } else {
        name
    }
}

/// Nested user representation embedded in boards and tickets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub fullname: String,
}

impl UserSummary {
    pub fn new(id: i64, email: String, first_name: &str, last_name: &str) -> Self {
        let fullname = display_name(first_name, last_name, &email);
        Self {
            id,
            email,
            fullname,
        }
    }
}

/// The user columns a nested summary is built from
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserColumns {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserColumns> for UserSummary {
    fn from(row: UserColumns) -> Self {
        UserSummary::new(row.id, row.email, &row.first_name, &row.last_name)
    }
}

/// Nullable user columns from a LEFT JOIN (e.g. a ticket's assignee)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionalUserColumns {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl OptionalUserColumns {
    /// `None` when the join produced no user
    pub fn into_summary(self) -> Option<UserSummary> {
        let id = self.id?;
        Some(UserSummary::new(
            id,
            self.email.unwrap_or_default(),
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default(),
        ))
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary::new(user.id, user.email.clone(), &user.first_name, &user.last_name)
    }
}
