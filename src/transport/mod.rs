//! ### Sending Messages
//!
//! A [`TransportMessage`] is handed to a [`Transport`], which is responsible
//! for reaching the host named in the message [`Session`](crate::Session)
//! and delivering it.
//!
//! The only transport shipped here is the [`StubTransport`](stub::StubTransport),
//! which records what it is given and is meant for tests.

use crate::{address::Envelope, TransportMessage};

pub mod stub;

/// Blocking Transport method for emails
pub trait Transport {
    /// Response produced by the Transport
    type Ok;
    /// Error produced by the Transport
    type Error;

    /// Sends the email
    fn send(&self, message: &TransportMessage) -> Result<Self::Ok, Self::Error> {
        let raw = message.formatted();
        self.send_raw(message.envelope(), &raw)
    }

    fn send_raw(&self, envelope: &Envelope, email: &[u8]) -> Result<Self::Ok, Self::Error>;
}
