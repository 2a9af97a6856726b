//! User records as served by the users endpoint

use serde::{Deserialize, Serialize};

use crate::error::{Result, UserDirError};

/// A single directory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(default, rename = "catchPhrase")]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

impl Address {
    /// Street and zipcode, the part of the address the detail view shows
    pub fn short(&self) -> String {
        match (self.street.is_empty(), self.zipcode.is_empty()) {
            (false, false) => format!("{} {}", self.street, self.zipcode),
            (false, true) => self.street.clone(),
            (true, false) => self.zipcode.clone(),
            (true, true) => String::new(),
        }
    }
}

impl User {
    /// Label/value pairs for the detail overlay and `show` command.
    ///
    /// The first four rows are always present; the extras only when the
    /// endpoint supplied them.
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Name", self.name.clone()),
            ("Username", self.username.clone()),
            ("Email", self.email.clone()),
            ("Address", self.address.short()),
        ];
        if let Some(phone) = &self.phone {
            rows.push(("Phone", phone.clone()));
        }
        if let Some(website) = &self.website {
            rows.push(("Website", website.clone()));
        }
        if let Some(company) = &self.company {
            rows.push(("Company", company.name.clone()));
        }
        rows
    }
}

/// Look a user up by id
pub fn find_user(users: &[User], id: i64) -> Result<&User> {
    users
        .iter()
        .find(|u| u.id == id)
        .ok_or(UserDirError::UserNotFound(id))
}

/// Pretty JSON array of `users`, as printed by `list --json`
pub fn to_json(users: &[&User]) -> Result<String> {
    serde_json::to_string_pretty(users).map_err(UserDirError::Encode)
}
