use super::Address;
use crate::{error, Error};

/// Simple email envelope representation
///
/// We only accept mailboxes, and do not support source routes (as per RFC).
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    /// The envelope recipients' addresses
    ///
    /// This can not be empty.
    forward_path: Vec<Address>,
    /// The envelope sender address
    reverse_path: Option<Address>,
}

impl Envelope {
    /// Creates a new envelope, which may fail if `to` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use billet::{address::Envelope, Address};
    ///
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// let sender = "from@email.com".parse::<Address>()?;
    /// let recipients = vec!["to@email.com".parse::<Address>()?];
    ///
    /// let envelope = Envelope::new(Some(sender), recipients)?;
    /// assert_eq!(envelope.to().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// If `to` has no elements in it.
    pub fn new(from: Option<Address>, to: Vec<Address>) -> Result<Envelope, Error> {
        if to.is_empty() {
            return Err(error::incomplete_message(
                "at least one receiver address required",
            ));
        }
        Ok(Envelope {
            forward_path: to,
            reverse_path: from,
        })
    }

    /// Gets the destination addresses of the envelope.
    pub fn to(&self) -> &[Address] {
        self.forward_path.as_slice()
    }

    /// Gets the sender of the envelope.
    pub fn from(&self) -> Option<&Address> {
        self.reverse_path.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_forward_path_is_rejected() {
        let from = "from@email.com".parse::<Address>().unwrap();
        let err = Envelope::new(Some(from), vec![]).unwrap_err();
        assert!(err.is_incomplete_message());
    }

    #[test]
    fn senderless_envelope() {
        let to = vec!["to@email.com".parse::<Address>().unwrap()];
        let envelope = Envelope::new(None, to.clone()).unwrap();
        assert!(envelope.from().is_none());
        assert_eq!(envelope.to(), to.as_slice());
    }
}
