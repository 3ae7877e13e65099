//! Application context.
//!
//! Wires the three domain stores and the user directory into one explicit
//! value constructed once at process start and threaded through callers —
//! no hidden module-level globals. The stores share a single backing only
//! in the sense of key-namespacing; each owns its state exclusively.

use std::sync::Arc;

use tracing::{debug, info};

use crate::backing::{Backing, SqliteBacking};
use crate::config::Config;
use crate::directory::{Registration, User, UserDirectory};
use crate::error::{Error, Result};
use crate::fleet::{Driver, Registry, Vehicle};
use crate::session::{SessionStore, UserProfile};

/// The assembled application: stores, registries and the user directory.
#[derive(Debug)]
pub struct App {
    session: SessionStore,
    vehicles: Registry<Vehicle>,
    drivers: Registry<Driver>,
    directory: UserDirectory,
}

impl App {
    /// Open the application over the configured database.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing database cannot be opened.
    pub fn open(config: &Config) -> Result<Self> {
        let backing = SqliteBacking::open(config.database_path())?;
        info!("application opened over {}", backing.path().display());
        Ok(Self::with_backing(Arc::new(backing)))
    }

    /// Open the application over an in-memory backing (tests, demos).
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let backing = SqliteBacking::open_in_memory()?;
        Ok(Self::with_backing(Arc::new(backing)))
    }

    /// Assemble the application over any backing.
    #[must_use]
    pub fn with_backing(backing: Arc<dyn Backing>) -> Self {
        Self {
            session: SessionStore::open(Arc::clone(&backing)),
            vehicles: Registry::open(Arc::clone(&backing)),
            drivers: Registry::open(backing),
            directory: UserDirectory::seeded(),
        }
    }

    /// The session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The vehicle registry.
    #[must_use]
    pub fn vehicles(&self) -> &Registry<Vehicle> {
        &self.vehicles
    }

    /// The driver registry.
    #[must_use]
    pub fn drivers(&self) -> &Registry<Driver> {
        &self.drivers
    }

    /// The user directory.
    #[must_use]
    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// Sign in with an email/password pair.
    ///
    /// On a match, the password is stripped and the remaining profile
    /// becomes the session value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] when no account matches.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        let Some(user) = self.directory.find_by_credentials(email, password) else {
            debug!(email, "credential miss");
            return Err(Error::InvalidCredentials);
        };

        let profile = user.profile();
        self.session.set(Some(profile.clone()));
        info!(user = %profile.name, "signed in");
        Ok(profile)
    }

    /// Register a new account.
    ///
    /// Registration does not sign the user in; that matches the original
    /// flow, which sends new users to the sign-in screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmailExists`] when the email is already taken.
    pub fn sign_up(&self, registration: Registration) -> Result<User> {
        self.directory.register(registration)
    }

    /// Clear the session.
    pub fn sign_out(&self) {
        self.session.clear();
        info!("signed out");
    }
}
