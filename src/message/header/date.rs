use std::{
    fmt::{self, Display},
    time::SystemTime,
};

use httpdate::HttpDate;

/// Message `Date` header value
///
/// Defined in [RFC2822](https://tools.ietf.org/html/rfc2822#section-3.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailDate(HttpDate);

impl EmailDate {
    /// Build an `EmailDate` from [`SystemTime`]
    ///
    /// Sub-second precision is dropped.
    pub fn new(st: SystemTime) -> Self {
        Self(st.into())
    }
}

impl From<SystemTime> for EmailDate {
    fn from(st: SystemTime) -> Self {
        Self::new(st)
    }
}

impl From<EmailDate> for SystemTime {
    fn from(this: EmailDate) -> SystemTime {
        this.0.into()
    }
}

impl Display for EmailDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.to_string();
        // `GMT` is an obsolete zone for email, see
        // https://tools.ietf.org/html/rfc2822#appendix-A.6.2
        match s.strip_suffix("GMT") {
            Some(stripped) => write!(f, "{stripped}-0000"),
            None => f.write_str(&s),
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::{Duration, SystemTime};

    use pretty_assertions::assert_eq;

    use super::EmailDate;

    #[test]
    fn format_date() {
        let date = EmailDate::new(SystemTime::UNIX_EPOCH + Duration::from_secs(784_887_151));
        assert_eq!(date.to_string(), "Tue, 15 Nov 1994 08:12:31 -0000");
    }
}
