//! Named and unnamed mailboxes used in message headers

mod types;

pub use self::types::{Mailbox, Mailboxes};
