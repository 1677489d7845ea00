use std::{
    fmt::{Display, Formatter, Result as FmtResult, Write},
    slice::Iter,
    str::FromStr,
};

use crate::address::{Address, AddressError};

/// Represents an email address with an optional name for the sender/recipient.
///
/// This type contains email address and the sender/recipient name (_Some Name \<user@domain.tld\>_ or _withoutname@domain.tld_).
///
/// **NOTE**: Enable feature "serde" to be able to serialize/deserialize it using [serde](https://serde.rs/).
///
/// # Examples
///
/// ```
/// # use billet::message::Mailbox;
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mailbox: Mailbox = "John Smith <example@email.com>".parse()?;
/// assert_eq!(mailbox.name.as_deref(), Some("John Smith"));
/// assert_eq!(mailbox.email.to_string(), "example@email.com");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mailbox {
    /// The name associated with the address.
    pub name: Option<String>,

    /// The email address itself.
    pub email: Address,
}

impl Mailbox {
    /// Creates a new `Mailbox` using an email address and the name of the recipient if there is one.
    pub fn new(name: Option<String>, email: Address) -> Self {
        Mailbox { name, email }
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(name) = &self.name {
            let name = name.trim();
            if !name.is_empty() {
                write_word(f, name)?;
                f.write_str(" <")?;
                self.email.fmt(f)?;
                return f.write_char('>');
            }
        }
        self.email.fmt(f)
    }
}

impl<S: Into<String>, T: Into<String>> TryFrom<(S, T)> for Mailbox {
    type Error = AddressError;

    fn try_from(header: (S, T)) -> Result<Self, Self::Error> {
        let (name, address) = header;
        Ok(Mailbox::new(Some(name.into()), address.into().parse()?))
    }
}

impl FromStr for Mailbox {
    type Err = AddressError;

    fn from_str(src: &str) -> Result<Mailbox, Self::Err> {
        let src = src.trim();
        // Brackets inside a leading quoted display name are not delimiters
        let skip = quoted_prefix_len(src)?;
        let rest = &src[skip..];

        match (rest.find('<'), rest.rfind('>')) {
            (None, None) => Ok(Mailbox::new(None, src.parse()?)),
            (Some(open), Some(close)) if open < close && close == rest.len() - 1 => {
                let inner = &rest[open + 1..close];
                if inner.contains(['<', '>']) {
                    return Err(AddressError::Unbalanced);
                }

                let name = unquote(src[..skip + open].trim());
                let name = if name.is_empty() { None } else { Some(name) };
                Ok(Mailbox::new(name, inner.trim().parse()?))
            }
            (Some(_), Some(_)) => Err(AddressError::InvalidInput),
            _ => Err(AddressError::Unbalanced),
        }
    }
}

impl From<Address> for Mailbox {
    fn from(value: Address) -> Self {
        Self::new(None, value)
    }
}

/// Represents a sequence of [`Mailbox`] instances.
///
/// Insertion order is preserved and duplicates are kept.
///
/// **NOTE**: Enable feature "serde" to be able to serialize/deserialize it using [serde](https://serde.rs/).
#[derive(Debug, Clone, Default, PartialOrd, Ord, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Mailboxes(Vec<Mailbox>);

impl Mailboxes {
    /// Creates a new list of [`Mailbox`] instances.
    pub fn new() -> Self {
        Mailboxes(Vec::new())
    }

    /// Adds a new [`Mailbox`] to the list, in a Vec::push style pattern.
    pub fn push(&mut self, mbox: Mailbox) {
        self.0.push(mbox);
    }

    /// Number of mailboxes in the list
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no mailbox
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Creates an iterator over the [`Mailbox`] instances that are currently stored.
    pub fn iter(&self) -> Iter<'_, Mailbox> {
        self.0.iter()
    }

    /// Creates an iterator over the bare addresses
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.0.iter().map(|mbox| &mbox.email)
    }
}

impl FromIterator<Mailbox> for Mailboxes {
    fn from_iter<T: IntoIterator<Item = Mailbox>>(iter: T) -> Self {
        Self(Vec::from_iter(iter))
    }
}

impl Extend<Mailbox> for Mailboxes {
    fn extend<T: IntoIterator<Item = Mailbox>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Mailboxes {
    type Item = Mailbox;
    type IntoIter = ::std::vec::IntoIter<Mailbox>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mailboxes {
    type Item = &'a Mailbox;
    type IntoIter = Iter<'a, Mailbox>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Mailboxes {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut iter = self.iter();

        if let Some(mbox) = iter.next() {
            mbox.fmt(f)?;

            for mbox in iter {
                f.write_str(", ")?;
                mbox.fmt(f)?;
            }
        }

        Ok(())
    }
}

// Length of a leading quoted-string, including both quotes
fn quoted_prefix_len(src: &str) -> Result<usize, AddressError> {
    if !src.starts_with('"') {
        return Ok(0);
    }

    let mut escaped = false;
    for (i, c) in src.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Ok(i + 1),
            _ => {}
        }
    }
    Err(AddressError::Unbalanced)
}

fn unquote(name: &str) -> String {
    match name.strip_prefix('"').and_then(|n| n.strip_suffix('"')) {
        Some(quoted) => {
            let mut out = String::with_capacity(quoted.len());
            let mut chars = quoted.chars();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => out.extend(chars.next()),
                    c => out.push(c),
                }
            }
            out
        }
        None => name.to_owned(),
    }
}

// https://datatracker.ietf.org/doc/html/rfc2822#section-3.2.4
fn is_atom_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == ' '
        || c == '\t'
        || !c.is_ascii()
        || "!#$%&'*+-/=?^_`{|}~".contains(c)
}

// Phrases with specials are written as a quoted string
fn write_word(f: &mut Formatter<'_>, s: &str) -> FmtResult {
    if s.chars().all(is_atom_char) {
        return f.write_str(s);
    }

    f.write_char('"')?;
    for c in s.chars() {
        match c {
            // Folding is not supported
            '\r' | '\n' => f.write_char(' ')?,
            '"' | '\\' => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_bare_address() {
        let mbox: Mailbox = "ab@bc.com".parse().unwrap();
        assert_eq!(mbox, Mailbox::new(None, "ab@bc.com".parse().unwrap()));
    }

    #[test]
    fn parse_named_address() {
        let mbox: Mailbox = "K. <kayo@example.com>".parse().unwrap();
        assert_eq!(mbox.name.as_deref(), Some("K."));
        assert_eq!(mbox.email.as_ref(), "kayo@example.com");

        let mbox: Mailbox = "<kayo@example.com>".parse().unwrap();
        assert_eq!(mbox.name, None);
    }

    #[test]
    fn parse_quoted_name() {
        let mbox: Mailbox = r#""Doe, \"J\"" <j@example.com>"#.parse().unwrap();
        assert_eq!(mbox.name.as_deref(), Some(r#"Doe, "J""#));
    }

    #[test]
    fn parse_quoted_name_with_brackets() {
        let mbox: Mailbox = r#""a<b" <x@y.com>"#.parse().unwrap();
        assert_eq!(mbox.name.as_deref(), Some("a<b"));
        assert_eq!(mbox.email.as_ref(), "x@y.com");
        assert_eq!(mbox.to_string(), r#""a<b" <x@y.com>"#);

        let mbox: Mailbox = r#""x> \"y<\"" <x@y.com>"#.parse().unwrap();
        assert_eq!(mbox.name.as_deref(), Some(r#"x> "y<""#));

        assert_eq!(
            r#""a<b <x@y.com>"#.parse::<Mailbox>(),
            Err(AddressError::Unbalanced)
        );
    }

    #[test]
    fn parse_unbalanced() {
        assert_eq!(
            "Name <ab@bc.com".parse::<Mailbox>(),
            Err(AddressError::Unbalanced)
        );
        assert_eq!(
            "Name ab@bc.com>".parse::<Mailbox>(),
            Err(AddressError::Unbalanced)
        );
        assert_eq!(
            "Name <ab@bc.com> trailing".parse::<Mailbox>(),
            Err(AddressError::InvalidInput)
        );
    }

    #[test]
    fn format_mailbox() {
        let mbox = Mailbox::try_from(("name1", "email@1.com")).unwrap();
        assert_eq!(mbox.to_string(), "name1 <email@1.com>");

        let mbox = Mailbox::try_from(("Doe, John", "john@example.com")).unwrap();
        assert_eq!(mbox.to_string(), r#""Doe, John" <john@example.com>"#);

        let mbox = Mailbox::try_from(("  ", "john@example.com")).unwrap();
        assert_eq!(mbox.to_string(), "john@example.com");
    }

    #[test]
    fn format_mailboxes_keeps_order() {
        let mboxes: Mailboxes = ["ab@bc.com", "a.b@c.org", "ab@bc.com"]
            .iter()
            .map(|s| s.parse::<Mailbox>().unwrap())
            .collect();

        assert_eq!(mboxes.len(), 3);
        assert_eq!(mboxes.to_string(), "ab@bc.com, a.b@c.org, ab@bc.com");
    }
}
