//! The stub transport records message envelopes and content. It can be useful
//! for testing purposes.
//!
//! ```rust
//! use billet::{transport::stub::StubTransport, MessageBuilder, Transport};
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let mut builder = MessageBuilder::new();
//! builder.set_host_name("localhost");
//! builder
//!     .set_subject("Happy new year")?
//!     .set_from("nobody@domain.tld")?
//!     .add_to(["hei@domain.tld"])?;
//! let email = builder.build()?;
//!
//! let sender = StubTransport::new_ok();
//! sender.send(&email).unwrap();
//! assert_eq!(sender.messages().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::{
    error::Error as StdError,
    fmt,
    sync::{Arc, Mutex},
};

use crate::{address::Envelope, Transport};

/// An error returned by the stub transport
#[non_exhaustive]
#[derive(Debug, Copy, Clone)]
pub struct Error;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stub error")
    }
}

impl StdError for Error {}

/// This transport records the message envelope and content, then returns the given response
#[derive(Debug, Clone)]
pub struct StubTransport {
    response: Result<(), Error>,
    message_log: Arc<Mutex<Vec<(Envelope, String)>>>,
}

impl StubTransport {
    /// Creates a new transport that always returns the given Result
    pub fn new(response: Result<(), Error>) -> Self {
        Self {
            response,
            message_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a new transport that always returns a success response
    pub fn new_ok() -> Self {
        Self::new(Ok(()))
    }

    /// Creates a new transport that always returns an error
    pub fn new_error() -> Self {
        Self::new(Err(Error))
    }

    /// Return all logged messages sent using [`Transport::send_raw`]
    pub fn messages(&self) -> Vec<(Envelope, String)> {
        self.message_log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Transport for StubTransport {
    type Ok = ();
    type Error = Error;

    fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "stub transport: {} recipient(s), {} bytes",
            envelope.to().len(),
            email.len()
        );

        self.message_log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((envelope.clone(), String::from_utf8_lossy(email).into()));
        self.response
    }
}
