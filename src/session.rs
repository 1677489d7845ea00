//! Delivery parameters handed to a transport together with a message
//!
//! Nothing in this module opens a connection. A [`Session`] only describes
//! where and how a transport should deliver.

use std::{
    fmt::{self, Debug, Formatter},
    time::Duration,
};

use crate::Address;

/// Default plain SMTP port
pub const SMTP_PORT: u16 = 25;
/// Default port for SMTP over TLS
pub const SSL_SMTP_PORT: u16 = 465;
/// Default socket read and connect timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Contains user credentials
#[derive(PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Credentials {
    authentication_identity: String,
    secret: String,
}

impl Credentials {
    /// Create a `Credentials` struct from username and password
    pub fn new(username: String, password: String) -> Credentials {
        Credentials {
            authentication_identity: username,
            secret: password,
        }
    }

    pub fn username(&self) -> &str {
        &self.authentication_identity
    }

    pub fn password(&self) -> &str {
        &self.secret
    }
}

impl<S, T> From<(S, T)> for Credentials
where
    S: Into<String>,
    T: Into<String>,
{
    fn from((username, password): (S, T)) -> Self {
        Credentials::new(username.into(), password.into())
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").finish()
    }
}

/// POP-before-SMTP settings
///
/// Carried as configuration for the transport; no POP login happens here.
#[derive(PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopBeforeSmtp {
    pub enabled: bool,
    pub host: String,
    pub username: String,
    pub password: String,
}

impl Debug for PopBeforeSmtp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopBeforeSmtp")
            .field("enabled", &self.enabled)
            .field("host", &self.host)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Snapshot of the parameters a transport needs to reach the mail server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) host: String,
    pub(crate) smtp_port: u16,
    pub(crate) ssl_smtp_port: u16,
    pub(crate) ssl_on_connect: bool,
    pub(crate) start_tls_enabled: bool,
    pub(crate) start_tls_required: bool,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) socket_timeout: Duration,
    pub(crate) socket_connection_timeout: Duration,
    pub(crate) bounce_address: Option<Address>,
    pub(crate) pop_before_smtp: PopBeforeSmtp,
}

impl Session {
    /// Server to connect to
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port to connect to: the SSL port when connecting over TLS, the plain one otherwise
    pub fn port(&self) -> u16 {
        if self.ssl_on_connect {
            self.ssl_smtp_port
        } else {
            self.smtp_port
        }
    }

    pub fn ssl_on_connect(&self) -> bool {
        self.ssl_on_connect
    }

    pub fn start_tls_enabled(&self) -> bool {
        self.start_tls_enabled
    }

    pub fn start_tls_required(&self) -> bool {
        self.start_tls_required
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn socket_timeout(&self) -> Duration {
        self.socket_timeout
    }

    pub fn socket_connection_timeout(&self) -> Duration {
        self.socket_connection_timeout
    }

    /// Envelope sender overriding the `From` address, if any
    pub fn bounce_address(&self) -> Option<&Address> {
        self.bounce_address.as_ref()
    }

    pub fn pop_before_smtp(&self) -> &PopBeforeSmtp {
        &self.pop_before_smtp
    }
}
