//! Error type for message composition

use std::{error::Error as StdError, fmt};

use crate::{address::AddressError, BoxError};

// Inspired by https://github.com/seanmonstar/reqwest/blob/a8566383168c0ef06c21f38cbc9213af6ff6db31/src/error.rs

/// The Errors that may occur while composing or building a message
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<BoxError>,
}

impl Error {
    pub(crate) fn new<E>(kind: Kind, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(Inner {
                kind,
                source: source.map(Into::into),
            }),
        }
    }

    /// Returns true if the error was raised by [`MessageBuilder::build`](crate::MessageBuilder::build)
    ///
    /// The specific cause is available through [`source`](StdError::source).
    pub fn is_build(&self) -> bool {
        matches!(self.inner.kind, Kind::Build)
    }

    /// Returns true if an address could not be parsed
    pub fn is_invalid_address(&self) -> bool {
        self.cause_is(|k| matches!(k, Kind::InvalidAddress))
    }

    /// Returns true if an empty recipient list was given
    pub fn is_empty_recipient_list(&self) -> bool {
        self.cause_is(|k| matches!(k, Kind::EmptyRecipientList))
    }

    /// Returns true if a header name or value was rejected
    pub fn is_invalid_argument(&self) -> bool {
        self.cause_is(|k| matches!(k, Kind::InvalidArgument))
    }

    /// Returns true if no host name was configured
    pub fn is_missing_host(&self) -> bool {
        self.cause_is(|k| matches!(k, Kind::MissingHost))
    }

    /// Returns true if the message lacks the fields needed to be sent
    pub fn is_incomplete_message(&self) -> bool {
        self.cause_is(|k| matches!(k, Kind::IncompleteMessage))
    }

    /// Returns true if neither a sender nor a default sender was available
    pub fn is_missing_sender(&self) -> bool {
        self.cause_is(|k| matches!(k, Kind::MissingSender))
    }

    /// Returns the address error behind an invalid address, if any
    pub fn address_error(&self) -> Option<AddressError> {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(addr_err) = err.downcast_ref::<AddressError>() {
                return Some(*addr_err);
            }
            source = err.source();
        }

        None
    }

    // Looks through a build wrapper to the error it carries
    fn cause_is(&self, f: impl Fn(&Kind) -> bool) -> bool {
        if f(&self.inner.kind) {
            return true;
        }

        match (&self.inner.kind, &self.inner.source) {
            (Kind::Build, Some(source)) => source
                .downcast_ref::<Error>()
                .map_or(false, |cause| f(&cause.inner.kind)),
            _ => false,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Kind {
    /// Malformed email address
    InvalidAddress,
    /// Empty list of recipients
    EmptyRecipientList,
    /// Empty or malformed header name or value
    InvalidArgument,
    /// No host name configured
    MissingHost,
    /// Subject, content or recipients missing
    IncompleteMessage,
    /// No sender and no default sender
    MissingSender,
    /// Failure while building a message
    Build,
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("billet::Error");

        builder.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            builder.field("source", source);
        }

        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::InvalidAddress => f.write_str("invalid address")?,
            Kind::EmptyRecipientList => f.write_str("empty recipient list")?,
            Kind::InvalidArgument => f.write_str("invalid argument")?,
            Kind::MissingHost => f.write_str("cannot find valid hostname for mail session")?,
            Kind::IncompleteMessage => f.write_str("incomplete message")?,
            Kind::MissingSender => f.write_str("from address required")?,
            Kind::Build => f.write_str("cannot build message")?,
        };

        if let Some(ref e) = self.inner.source {
            write!(f, ": {e}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| {
            let r: &(dyn std::error::Error + 'static) = &**e;
            r
        })
    }
}

impl From<AddressError> for Error {
    fn from(err: AddressError) -> Error {
        invalid_address(err)
    }
}

pub(crate) fn invalid_address<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::InvalidAddress, Some(e))
}

pub(crate) fn empty_recipient_list() -> Error {
    Error::new(Kind::EmptyRecipientList, None::<BoxError>)
}

pub(crate) fn invalid_argument<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::InvalidArgument, Some(e))
}

pub(crate) fn missing_host() -> Error {
    Error::new(Kind::MissingHost, None::<BoxError>)
}

pub(crate) fn incomplete_message<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::IncompleteMessage, Some(e))
}

pub(crate) fn missing_sender() -> Error {
    Error::new(Kind::MissingSender, None::<BoxError>)
}

pub(crate) fn build(cause: Error) -> Error {
    Error::new(Kind::Build, Some(cause))
}
