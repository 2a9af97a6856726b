//! userdir - terminal user directory
//!
//! Fetches a user list from a remote endpoint once at startup, filters it by
//! name as you type and shows the full record of a selected user in an
//! overlay.
//!
//! # Features
//!
//! - **Single fetch**: one `GET` of a JSON user array, no retries
//! - **Live filter**: case-insensitive substring match on every keystroke
//! - **Detail overlay**: name, username, email and address of one user
//! - **Scriptable**: `list` and `show` commands reuse the same pipeline
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use userdir::{filter, DataSource, HttpSource};
//!
//! # async fn run() -> userdir::Result<()> {
//! let endpoint = userdir::DEFAULT_ENDPOINT.parse().expect("valid url");
//! let source = HttpSource::new(endpoint, Duration::from_secs(30))?;
//! let users = source.fetch_users().await?;
//!
//! for user in filter::filter(&users, "clem") {
//!     println!("{}: {}", user.id, user.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod selection;
pub mod source;
pub mod tui;

use std::time::Duration;

use reqwest::Url;

// Re-export main types
pub use error::{FetchError, Result, UserDirError};
pub use model::{find_user, Address, Company, Geo, User};
pub use selection::SelectionState;
pub use source::{DataSource, FetchOutcome, FetchTask, HttpSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Users resource queried when no endpoint is configured
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Users resource to fetch from
    pub endpoint: Url,
    /// Whole-request timeout for the fetch
    pub timeout: Duration,
    /// UI redraw / poll interval
    pub tick_rate: Duration,
}

impl AppConfig {
    pub fn http_source(&self) -> std::result::Result<HttpSource, FetchError> {
        HttpSource::new(self.endpoint.clone(), self.timeout)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout: Duration::from_secs(30),
            tick_rate: Duration::from_millis(50),
        }
    }
}
