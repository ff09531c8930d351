//! Account session collaborator interface.
//!
//! Authentication is delegated to an external provider that runs a device
//! code login and hands back a serializable session. This module defines the
//! types exchanged with such a provider. No network implementation lives in
//! this crate.
//!
//! # Examples
//!
//! ```
//! use jarmerge_core::session::DeviceCodeNotifier;
//! use jarmerge_core::session::DeviceCodePrompt;
//! use jarmerge_core::session::SessionError;
//! use jarmerge_core::session::SessionProvider;
//! use jarmerge_core::session::SessionToken;
//!
//! struct OfflineProvider;
//!
//! impl SessionProvider for OfflineProvider {
//!     fn acquire_session(
//!         &self,
//!         notifier: &mut dyn DeviceCodeNotifier,
//!     ) -> Result<SessionToken, SessionError> {
//!         notifier.notify(&DeviceCodePrompt::new("ABCD-1234", "https://example.com/device"));
//!         Ok(SessionToken::new("token", "Steve"))
//!     }
//!
//!     fn validate_session(&self, serialized: &str) -> Result<bool, SessionError> {
//!         Ok(SessionToken::from_json(serialized)?.has_access_token())
//!     }
//! }
//!
//! let mut codes = Vec::new();
//! let session = OfflineProvider
//!     .acquire_session(&mut |prompt: &DeviceCodePrompt| codes.push(prompt.user_code.clone()))?;
//! assert_eq!(codes, vec!["ABCD-1234"]);
//! assert!(OfflineProvider.validate_session(&session.to_json()?)?);
//! # Ok::<(), SessionError>(())
//! ```

use std::sync::mpsc::Sender;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

/// Errors reported by session handling.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Serialized session is not valid session JSON.
    #[error("malformed session data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The provider failed to complete login, refresh or validation.
    #[error("session provider failed: {reason}")]
    Provider {
        /// Provider-supplied description.
        reason: String,
    },
}

impl SessionError {
    /// Creates a provider failure.
    pub fn provider(reason: impl Into<String>) -> Self {
        Self::Provider {
            reason: reason.into(),
        }
    }
}

/// Credential bundle returned by a successful login.
///
/// Fields not modelled here are kept in `extra` and written back unchanged,
/// so a token survives a round trip through an older client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Game access token.
    pub access_token: String,
    /// Name of the player profile the token belongs to.
    pub profile_name: String,
    /// Provider-specific fields such as the refresh token chain.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionToken {
    /// Creates a token with no extra fields.
    #[must_use]
    pub fn new(access_token: impl Into<String>, profile_name: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            profile_name: profile_name.into(),
            extra: Map::new(),
        }
    }

    /// Parses a token previously produced by [`SessionToken::to_json`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Malformed` if `json` is not an object with
    /// string `access_token` and `profile_name` fields.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the token, including extra fields.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Malformed` if serialization fails.
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns `true` if the token carries a non-empty access token.
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Code the user must enter to authorize a device login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCodePrompt {
    /// Short code shown to the user.
    pub user_code: String,
    /// Page where the code is entered.
    pub verification_uri: String,
    /// Page with the code already filled in, when the provider offers one.
    pub direct_verification_uri: Option<String>,
}

impl DeviceCodePrompt {
    /// Creates a prompt without a direct verification link.
    #[must_use]
    pub fn new(user_code: impl Into<String>, verification_uri: impl Into<String>) -> Self {
        Self {
            user_code: user_code.into(),
            verification_uri: verification_uri.into(),
            direct_verification_uri: None,
        }
    }

    /// Sets the pre-filled verification link.
    #[must_use]
    pub fn with_direct_uri(mut self, uri: impl Into<String>) -> Self {
        self.direct_verification_uri = Some(uri.into());
        self
    }

    /// Returns the link a user should open: the direct one if present.
    #[must_use]
    pub fn preferred_uri(&self) -> &str {
        self.direct_verification_uri
            .as_deref()
            .unwrap_or(&self.verification_uri)
    }
}

/// Receives the device code while a login is in progress.
///
/// Called synchronously from inside [`SessionProvider::acquire_session`].
pub trait DeviceCodeNotifier {
    /// Presents `prompt` to the user.
    fn notify(&mut self, prompt: &DeviceCodePrompt);
}

impl<F> DeviceCodeNotifier for F
where
    F: FnMut(&DeviceCodePrompt),
{
    fn notify(&mut self, prompt: &DeviceCodePrompt) {
        self(prompt);
    }
}

/// Forwards prompts to another thread. A disconnected receiver is ignored.
impl DeviceCodeNotifier for Sender<DeviceCodePrompt> {
    fn notify(&mut self, prompt: &DeviceCodePrompt) {
        let _ = self.send(prompt.clone());
    }
}

/// External authentication service.
pub trait SessionProvider {
    /// Runs a device code login, reporting the code through `notifier`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Provider` if the login does not complete.
    fn acquire_session(
        &self,
        notifier: &mut dyn DeviceCodeNotifier,
    ) -> Result<SessionToken, SessionError>;

    /// Checks whether a serialized session can still be used.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Malformed` for unparsable input and
    /// `SessionError::Provider` if the provider cannot be reached.
    fn validate_session(&self, serialized: &str) -> Result<bool, SessionError>;
}
