//! Custom headers attached to a message
// https://tools.ietf.org/html/rfc5322#section-2.2

use std::{
    fmt::{self, Display},
    ops::Deref,
};

use crate::{error, Error};

mod date;

pub use self::date::EmailDate;

/// Ordered list of custom header fields
///
/// Names compare case-insensitively. Setting a name that is already present
/// replaces its value in place, so each name appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    headers: Vec<(HeaderName, String)>,
}

/// A validated header field name
#[derive(Debug, Clone)]
pub struct HeaderName(String);

impl Headers {
    #[inline]
    pub const fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Validates and records a header, replacing any value stored under the same name
    ///
    /// Returns the replaced value, if any.
    pub fn insert(&mut self, name: &str, value: &str) -> Result<Option<String>, Error> {
        let name = HeaderName::new(name)?;
        check_value(value)?;
        Ok(self.set_raw(name, value.to_owned()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name_, _value)| name.eq_ignore_ascii_case(name_))
            .map(|(_name, value)| value.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &str)> {
        self.headers.iter().map(|(name, value)| (name, value.as_str()))
    }

    fn set_raw(&mut self, name: HeaderName, value: String) -> Option<String> {
        match self
            .headers
            .iter_mut()
            .find(|(name_, _value)| name.eq_ignore_ascii_case(name_))
        {
            Some((_, current_value)) => Some(std::mem::replace(current_value, value)),
            None => {
                self.headers.push((name, value));
                None
            }
        }
    }
}

impl Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            write!(f, "{name}: {value}\r\n")?;
        }

        Ok(())
    }
}

pub(crate) fn check_value(value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(error::invalid_argument("header value can not be empty"));
    }
    if value.contains(['\r', '\n']) {
        return Err(error::invalid_argument(
            "header value can not contain line breaks",
        ));
    }
    Ok(())
}

impl HeaderName {
    /// Validates a header name
    ///
    /// Names must be non-empty printable US-ASCII without a colon.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            return Err(error::invalid_argument("header name can not be empty"));
        }
        if !name.bytes().all(|c| matches!(c, b'!'..=b'9' | b';'..=b'~')) {
            return Err(error::invalid_argument(format!(
                "invalid header name {name:?}"
            )));
        }

        Ok(Self(name.to_owned()))
    }
}

impl Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl Deref for HeaderName {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for HeaderName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<HeaderName> for HeaderName {
    fn eq(&self, other: &HeaderName) -> bool {
        self.eq_ignore_ascii_case(other)
    }
}

impl Eq for HeaderName {}

impl PartialEq<&str> for HeaderName {
    fn eq(&self, other: &&str) -> bool {
        self.eq_ignore_ascii_case(other)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{HeaderName, Headers};

    #[test]
    fn valid_headername() {
        assert_eq!(HeaderName::new("From").unwrap(), "From");
        assert_eq!(HeaderName::new("X-Duck").unwrap(), "X-Duck");
        assert_eq!(HeaderName::new("x-duck").unwrap(), "X-Duck");
    }

    #[test]
    fn invalid_headername() {
        for name in ["", "From:", "Date ", "✉️", "X\tTab"] {
            assert!(
                HeaderName::new(name).unwrap_err().is_invalid_argument(),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn distinct_names_accumulate() {
        let mut headers = Headers::new();
        for (name, value) in [
            ("name1", "value1"),
            ("name2", "value2"),
            ("name3", "value3"),
            ("name4", "value4"),
        ] {
            assert_eq!(headers.insert(name, value).unwrap(), None);
        }

        assert_eq!(headers.len(), 4);
        assert_eq!(headers.get("NAME3"), Some("value3"));
    }

    #[test]
    fn repeated_name_replaces_in_place() {
        let mut headers = Headers::new();
        headers.insert("X-Priority", "1").unwrap();
        headers.insert("X-Mailer", "billet").unwrap();

        let replaced = headers.insert("x-priority", "3").unwrap();
        assert_eq!(replaced.as_deref(), Some("1"));
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.to_string(), "X-Priority: 3\r\nX-Mailer: billet\r\n");
    }

    #[test]
    fn invalid_value_leaves_headers_untouched() {
        let mut headers = Headers::new();
        headers.insert("name1", "value1").unwrap();

        assert!(headers.insert("name2", "").unwrap_err().is_invalid_argument());
        assert!(headers
            .insert("name2", "a\r\nBcc: x@y.z")
            .unwrap_err()
            .is_invalid_argument());
        assert!(headers.insert("", "value").unwrap_err().is_invalid_argument());

        assert_eq!(headers.len(), 1);
    }
}
