//! Defaults applied to every [`MessageBuilder`](crate::MessageBuilder) created from them

use std::time::Duration;

use crate::{
    message::Mailbox,
    session::{DEFAULT_TIMEOUT, SMTP_PORT, SSL_SMTP_PORT},
};

/// Builder defaults
///
/// **NOTE**: Enable feature "serde" to load it from a configuration file
/// using [serde](https://serde.rs/). Missing fields take their default value.
///
/// ```
/// use billet::{Config, MessageBuilder};
///
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let config = Config::new()
///     .host_name("smtp.example.com")
///     .default_from("Robot <noreply@example.com>".parse()?);
///
/// let builder = MessageBuilder::with_config(config);
/// assert_eq!(builder.host_name(), Some("smtp.example.com"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Sender used by `build` when no `From` address was set
    pub default_from: Option<Mailbox>,
    pub host_name: Option<String>,
    pub smtp_port: u16,
    pub ssl_smtp_port: u16,
    pub socket_timeout: Duration,
    pub socket_connection_timeout: Duration,
    /// Charset appended to text content types lacking one
    pub charset: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_from(mut self, mbox: Mailbox) -> Self {
        self.default_from = Some(mbox);
        self
    }

    pub fn host_name<T: Into<String>>(mut self, host: T) -> Self {
        self.host_name = Some(host.into());
        self
    }

    pub fn smtp_port(mut self, port: u16) -> Self {
        self.smtp_port = port;
        self
    }

    pub fn ssl_smtp_port(mut self, port: u16) -> Self {
        self.ssl_smtp_port = port;
        self
    }

    pub fn socket_timeout(mut self, timeout: Duration) -> Self {
        self.socket_timeout = timeout;
        self
    }

    pub fn socket_connection_timeout(mut self, timeout: Duration) -> Self {
        self.socket_connection_timeout = timeout;
        self
    }

    pub fn charset<T: Into<String>>(mut self, charset: T) -> Self {
        self.charset = Some(charset.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_from: None,
            host_name: None,
            smtp_port: SMTP_PORT,
            ssl_smtp_port: SSL_SMTP_PORT,
            socket_timeout: DEFAULT_TIMEOUT,
            socket_connection_timeout: DEFAULT_TIMEOUT,
            charset: None,
        }
    }
}
