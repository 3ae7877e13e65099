//! In-memory user directory.
//!
//! Holds the registered users for the lifetime of the process, seeded with
//! two demo accounts. Registration rejects duplicate emails
//! (case-insensitively); credential lookup matches email
//! case-insensitively and password exactly. Nothing here is persisted —
//! matching the original mock backend, accounts created at runtime vanish
//! when the process exits.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Characters used in generated user ids.
const USER_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated user ids.
const USER_ID_LEN: usize = 4;

/// A directory account, password included.
///
/// The password never leaves this module as part of a session; see
/// [`User::profile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Directory id, 4 random lowercase alphanumerics.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password (demo data, not a credential store).
    pub password: String,
}

impl User {
    /// The user's profile with the password stripped.
    #[must_use]
    pub fn profile(&self) -> crate::session::UserProfile {
        crate::session::UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            extra: serde_json::Map::new(),
        }
    }
}

/// New-account input for [`UserDirectory::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

fn generate_user_id() -> String {
    let mut rng = rand::thread_rng();
    (0..USER_ID_LEN)
        .map(|_| USER_ID_CHARSET[rng.gen_range(0..USER_ID_CHARSET.len())] as char)
        .collect()
}

fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// Process-lifetime list of registered users.
#[derive(Debug)]
pub struct UserDirectory {
    users: std::sync::Mutex<Vec<User>>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

impl UserDirectory {
    /// Create a directory seeded with the two demo accounts.
    #[must_use]
    pub fn seeded() -> Self {
        let users = vec![
            User {
                id: "8aad".to_string(),
                name: "John Doe".to_string(),
                email: "startup7@work.com".to_string(),
                password: "09897867665".to_string(),
            },
            User {
                id: "8aae".to_string(),
                name: "Ashfaq".to_string(),
                email: "asfak@vcbay.co".to_string(),
                password: "1234567890".to_string(),
            },
        ];
        Self {
            users: std::sync::Mutex::new(users),
        }
    }

    /// Create an empty directory (tests).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            users: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Register a new account and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmailExists`] when another account already uses the
    /// email, compared case-insensitively.
    pub fn register(&self, registration: Registration) -> Result<User> {
        let normalized = normalize_email(&registration.email);
        let mut users = self
            .users
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if users
            .iter()
            .any(|user| normalize_email(&user.email) == normalized)
        {
            return Err(Error::email_exists(registration.email));
        }

        let user = User {
            id: generate_user_id(),
            name: registration.name,
            email: registration.email,
            password: registration.password,
        };
        users.push(user.clone());
        Ok(user)
    }

    /// Find the account matching the credential pair, if any.
    ///
    /// Email comparison is case-insensitive; password comparison is exact.
    #[must_use]
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<User> {
        let normalized = normalize_email(email);
        self.users
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .find(|user| normalize_email(&user.email) == normalized && user.password == password)
            .cloned()
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the directory has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str, email: &str, password: &str) -> Registration {
        Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_seeded_directory_has_demo_accounts() {
        let directory = UserDirectory::seeded();
        assert_eq!(directory.len(), 2);
        assert!(directory
            .find_by_credentials("startup7@work.com", "09897867665")
            .is_some());
    }

    #[test]
    fn test_register_appends_user() {
        let directory = UserDirectory::empty();

        let user = directory
            .register(registration("New User", "new@x.com", "secret"))
            .unwrap();

        assert_eq!(directory.len(), 1);
        assert_eq!(user.name, "New User");
        let re = regex::Regex::new(r"^[a-z0-9]{4}$").unwrap();
        assert!(re.is_match(&user.id), "bad id: {}", user.id);
    }

    #[test]
    fn test_register_rejects_duplicate_email_case_insensitively() {
        let directory = UserDirectory::seeded();

        let result = directory.register(registration("Dup", "STARTUP7@WORK.COM", "pw"));
        assert!(result.is_err());
        assert!(result.unwrap_err().is_email_exists());
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_find_by_credentials_email_is_case_insensitive() {
        let directory = UserDirectory::seeded();

        let user = directory.find_by_credentials("Asfak@VCBay.co", "1234567890");
        assert_eq!(user.unwrap().name, "Ashfaq");
    }

    #[test]
    fn test_find_by_credentials_password_is_exact() {
        let directory = UserDirectory::seeded();
        assert!(directory
            .find_by_credentials("asfak@vcbay.co", "wrong")
            .is_none());
    }

    #[test]
    fn test_find_by_credentials_unknown_email() {
        let directory = UserDirectory::seeded();
        assert!(directory.find_by_credentials("nobody@x.com", "pw").is_none());
    }

    #[test]
    fn test_registered_user_can_sign_in() {
        let directory = UserDirectory::seeded();
        directory
            .register(registration("New User", "new@x.com", "secret"))
            .unwrap();

        assert!(directory.find_by_credentials("new@x.com", "secret").is_some());
    }

    #[test]
    fn test_profile_strips_password() {
        let directory = UserDirectory::seeded();
        let user = directory
            .find_by_credentials("startup7@work.com", "09897867665")
            .unwrap();

        let profile = user.profile();
        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.email, "startup7@work.com");
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("password"));
    }
}
