//! Runtime configuration.
//!
//! Values come from built-in defaults, overridden by `BUS_ROSTER_*`
//! environment variables (a `.env` file is loaded by the binary first).

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "BUS_ROSTER_";

/// Accepted `dob` input format for students and drivers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// [`DATE_FORMAT`] as shown to people filling in a form.
pub const DATE_FORMAT_HINT: &str = "YYYY-MM-DD";

pub const NAME_MAX_LEN: usize = 100;
pub const CONDITIONS_MAX_LEN: usize = 500;
pub const CONTACT_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// sqlx connection string, e.g. `sqlite://bus_roster.db`.
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://bus_roster.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            max_connections: 5,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
