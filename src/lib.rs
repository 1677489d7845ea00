//! Billet composes outbound email messages.
//!
//! A [`MessageBuilder`] collects the sender, recipients, reply-to entries,
//! custom headers, subject and content of one message. Every address is
//! validated when it is added, and a rejected call leaves the builder
//! unchanged. [`MessageBuilder::build`] checks that the message is complete
//! and produces an immutable [`TransportMessage`] carrying everything a
//! [`Transport`] needs to deliver it, including the [`Session`] parameters
//! for the mail server.
//!
//! Delivery itself is out of scope: no SMTP client and no MIME encoding are
//! provided.
//!
//! ```rust
//! use billet::MessageBuilder;
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let mut builder = MessageBuilder::new();
//! builder.set_host_name("smtp.example.com");
//! builder
//!     .set_subject("subject")?
//!     .set_content("text/plain", "content")?
//!     .set_from("abcdefghijklmnopqrst@abcdefghijklmnopqrst.com.bd")?
//!     .add_to(["ab@bc.com", "a.b@c.org"])?
//!     .add_cc("ab@bc.com")?
//!     .add_header("X-Mailer", "billet")?
//!     .add_reply_to("email@1.com", "name1")?;
//!
//! let message = builder.build()?;
//! assert_eq!(message.subject(), Some("subject"));
//! assert_eq!(message.envelope().to().len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! * **hostname** (default): use the machine host name in generated `Message-ID`s
//! * **serde**: serialize and deserialize addresses, mailboxes and [`Config`]
//! * **tracing**: emit debug events for rejected input and built messages

#![doc(html_root_url = "https://docs.rs/crate/billet/0.1.0")]
#![forbid(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

pub mod address;
mod config;
pub mod error;
pub mod message;
pub mod session;
pub mod transport;

pub use crate::{
    address::{Address, AddressError},
    config::Config,
    error::Error,
    message::{MessageBuilder, TransportMessage},
    session::Session,
    transport::Transport,
};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
