//! Provides a validated way to compose emails
//!
//! ## Usage
//!
//! A [`MessageBuilder`] accumulates recipients, headers and content. Every
//! address, header and subject is checked when it is set, so a rejected
//! call never changes the builder. [`MessageBuilder::build`] then produces an immutable
//! [`TransportMessage`] for a [`Transport`](crate::Transport).
//!
//! ```rust
//! use billet::MessageBuilder;
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let mut builder = MessageBuilder::new();
//! builder.set_host_name("smtp.domain.tld");
//! builder
//!     .set_subject("Happy new year")?
//!     .set_content("text/plain", "Be happy!")?
//!     .set_from("NoBody <nobody@domain.tld>")?
//!     .add_reply_to("yuin@domain.tld", "Yuin")?
//!     .add_to(["hei@domain.tld"])?;
//!
//! let message = builder.build()?;
//! assert_eq!(message.subject(), Some("Happy new year"));
//! # Ok(())
//! # }
//! ```
//!
//! Which formats as:
//!
//! ```sh
//! Date: Sat, 12 Dec 2020 16:33:19 -0000
//! From: NoBody <nobody@domain.tld>
//! Reply-To: Yuin <yuin@domain.tld>
//! To: hei@domain.tld
//! Subject: Happy new year
//! Message-ID: <5e8f9d0c-3a4b-4c7e-9b1a-2f6d8e0c1a3b@localhost>
//! Content-Type: text/plain
//!
//! Be happy!
//! ```

pub use self::{
    builder::MessageBuilder,
    content::Content,
    mailbox::{Mailbox, Mailboxes},
};

mod builder;
mod content;
pub mod header;
mod mailbox;

use std::{
    fmt::Write as _,
    time::{Duration, SystemTime},
};

use uuid::Uuid;

use self::header::{EmailDate, Headers};
use crate::{
    address::Envelope,
    session::{PopBeforeSmtp, Session},
};

const DEFAULT_MESSAGE_ID_DOMAIN: &str = "localhost";

/// Something that can be formatted as an email message
trait EmailFormat {
    fn format(&self, out: &mut String);
}

/// Immutable snapshot of a message, ready to be handed to a transport
#[derive(Clone, Debug)]
pub struct TransportMessage {
    pub(crate) subject: Option<String>,
    pub(crate) from: Mailbox,
    pub(crate) to: Mailboxes,
    pub(crate) cc: Mailboxes,
    pub(crate) bcc: Mailboxes,
    pub(crate) reply_to: Mailboxes,
    pub(crate) headers: Headers,
    pub(crate) sent_date: SystemTime,
    pub(crate) content: Option<Content>,
    pub(crate) message_id: String,
    pub(crate) session: Session,
    pub(crate) envelope: Envelope,
}

impl TransportMessage {
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn from(&self) -> &Mailbox {
        &self.from
    }

    pub fn to(&self) -> &Mailboxes {
        &self.to
    }

    pub fn cc(&self) -> &Mailboxes {
        &self.cc
    }

    pub fn bcc(&self) -> &Mailboxes {
        &self.bcc
    }

    pub fn reply_to(&self) -> &Mailboxes {
        &self.reply_to
    }

    /// Custom headers added with [`MessageBuilder::add_header`]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn sent_date(&self) -> SystemTime {
        self.sent_date
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// Generated `Message-ID`, in the `<UUID@HOSTNAME>` form
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Parameters for the transport delivering this message
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn pop_before_smtp(&self) -> &PopBeforeSmtp {
        self.session.pop_before_smtp()
    }

    pub fn socket_connection_timeout(&self) -> Duration {
        self.session.socket_connection_timeout()
    }

    /// SMTP envelope: bounce address or sender, and every to, cc and bcc recipient
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Get message content formatted for SMTP
    ///
    /// `Bcc` recipients only appear in the envelope.
    pub fn formatted(&self) -> Vec<u8> {
        let mut out = String::new();
        self.format(&mut out);
        out.into_bytes()
    }
}

impl EmailFormat for TransportMessage {
    fn format(&self, out: &mut String) {
        fn line(out: &mut String, name: &str, value: impl std::fmt::Display) {
            // Writing to a String never fails
            let _ = write!(out, "{name}: {value}\r\n");
        }

        line(out, "Date", EmailDate::new(self.sent_date));
        line(out, "From", &self.from);
        if !self.reply_to.is_empty() {
            line(out, "Reply-To", &self.reply_to);
        }
        if !self.to.is_empty() {
            line(out, "To", &self.to);
        }
        if !self.cc.is_empty() {
            line(out, "Cc", &self.cc);
        }
        if let Some(subject) = &self.subject {
            line(out, "Subject", subject);
        }
        line(out, "Message-ID", &self.message_id);
        let _ = write!(out, "{}", self.headers);
        if let Some(content) = &self.content {
            line(out, "Content-Type", content.content_type());
        }

        out.push_str("\r\n");
        if let Some(content) = &self.content {
            out.push_str(content.body());
        }
    }
}

pub(crate) fn generate_message_id() -> String {
    #[cfg(feature = "hostname")]
    let hostname = hostname::get()
        .map_err(|_| ())
        .and_then(|s| s.into_string().map_err(|_| ()))
        .unwrap_or_else(|_| DEFAULT_MESSAGE_ID_DOMAIN.to_owned());
    #[cfg(not(feature = "hostname"))]
    let hostname = DEFAULT_MESSAGE_ID_DOMAIN.to_owned();

    // https://tools.ietf.org/html/rfc5322#section-3.6.4
    format!("<{}@{}>", Uuid::new_v4(), hostname)
}
