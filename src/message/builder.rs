use std::time::{Duration, SystemTime};

use super::{
    generate_message_id,
    header::{check_value, Headers},
    Content, Mailbox, Mailboxes, TransportMessage,
};
use crate::{
    address::{Address, Envelope},
    error,
    session::{Credentials, PopBeforeSmtp, Session},
    Config, Error,
};

/// Accumulates the parts of one outbound message
///
/// Every address-accepting call validates its input immediately. A call that
/// fails leaves the builder exactly as it was.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    host_name: Option<String>,
    smtp_port: u16,
    ssl_smtp_port: u16,
    ssl_on_connect: bool,
    start_tls_enabled: bool,
    start_tls_required: bool,
    credentials: Option<Credentials>,
    socket_timeout: Duration,
    socket_connection_timeout: Duration,
    bounce_address: Option<Address>,
    pop_before_smtp: PopBeforeSmtp,
    default_from: Option<Mailbox>,
    charset: Option<String>,

    subject: Option<String>,
    content: Option<Content>,
    from: Option<Mailbox>,
    to: Mailboxes,
    cc: Mailboxes,
    bcc: Mailboxes,
    reply_to: Mailboxes,
    headers: Headers,
    sent_date: Option<SystemTime>,
}

impl MessageBuilder {
    /// Creates an empty builder with default settings
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty builder seeded with `config`
    pub fn with_config(config: Config) -> Self {
        Self {
            host_name: config.host_name,
            smtp_port: config.smtp_port,
            ssl_smtp_port: config.ssl_smtp_port,
            ssl_on_connect: false,
            start_tls_enabled: false,
            start_tls_required: false,
            credentials: None,
            socket_timeout: config.socket_timeout,
            socket_connection_timeout: config.socket_connection_timeout,
            bounce_address: None,
            pop_before_smtp: PopBeforeSmtp::default(),
            default_from: config.default_from,
            charset: config.charset,

            subject: None,
            content: None,
            from: None,
            to: Mailboxes::new(),
            cc: Mailboxes::new(),
            bcc: Mailboxes::new(),
            reply_to: Mailboxes::new(),
            headers: Headers::new(),
            sent_date: None,
        }
    }

    /// Appends one or more `To` recipients
    ///
    /// Fails if `addresses` is empty or if any of them is invalid, in which
    /// case none of them is added.
    pub fn add_to<I, S>(&mut self, addresses: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = parse_recipients(addresses)?;
        self.to.extend(parsed);
        Ok(self)
    }

    /// Appends a `Cc` recipient
    pub fn add_cc(&mut self, address: &str) -> Result<&mut Self, Error> {
        let mbox = parse_mailbox(address)?;
        self.cc.push(mbox);
        Ok(self)
    }

    /// Appends one or more `Bcc` recipients, with the same rules as [`add_to`](Self::add_to)
    pub fn add_bcc<I, S>(&mut self, addresses: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = parse_recipients(addresses)?;
        self.bcc.extend(parsed);
        Ok(self)
    }

    /// Adds a custom header
    ///
    /// Name and value must be non-empty. A name that was already added has
    /// its value replaced.
    pub fn add_header(&mut self, name: &str, value: &str) -> Result<&mut Self, Error> {
        match self.headers.insert(name, value) {
            Ok(_replaced) => Ok(self),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("rejected header {name:?}: {err}");
                Err(err)
            }
        }
    }

    /// Appends a `Reply-To` entry; the display name is used as given
    pub fn add_reply_to(&mut self, address: &str, name: &str) -> Result<&mut Self, Error> {
        let email = parse_address(address)?;
        let name = if name.is_empty() {
            None
        } else {
            Some(name.to_owned())
        };
        self.reply_to.push(Mailbox::new(name, email));
        Ok(self)
    }

    /// Sets the `From` address
    ///
    /// Accepts `user@domain` as well as `Name <user@domain>`.
    pub fn set_from(&mut self, address: &str) -> Result<&mut Self, Error> {
        self.from = Some(parse_mailbox(address)?);
        Ok(self)
    }

    /// Sets the `From` address with a display name
    pub fn set_from_named(&mut self, address: &str, name: &str) -> Result<&mut Self, Error> {
        let email = parse_address(address)?;
        self.from = Some(Mailbox::new(Some(name.to_owned()), email));
        Ok(self)
    }

    /// Sets the subject
    ///
    /// An empty subject clears it. Line breaks are rejected.
    pub fn set_subject<T: Into<String>>(&mut self, subject: T) -> Result<&mut Self, Error> {
        let subject = subject.into();
        if subject.is_empty() {
            self.subject = None;
            return Ok(self);
        }

        check_value(&subject).map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::debug!("rejected subject {subject:?}: {err}");
            err
        })?;
        self.subject = Some(subject);
        Ok(self)
    }

    /// Sets the body and its content type
    ///
    /// The content type must be non-empty and fit on a single line.
    pub fn set_content<T: Into<String>, B: Into<String>>(
        &mut self,
        content_type: T,
        body: B,
    ) -> Result<&mut Self, Error> {
        let content_type = content_type.into();
        check_value(&content_type)?;
        self.content = Some(Content::new(content_type, body));
        Ok(self)
    }

    pub fn set_host_name<T: Into<String>>(&mut self, host: T) -> &mut Self {
        self.host_name = Some(host.into());
        self
    }

    /// Configured mail server, `None` until one is set
    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    pub fn set_smtp_port(&mut self, port: u16) -> &mut Self {
        self.smtp_port = port;
        self
    }

    pub fn set_ssl_smtp_port(&mut self, port: u16) -> &mut Self {
        self.ssl_smtp_port = port;
        self
    }

    /// Connect over TLS from the start, on the SSL port
    pub fn set_ssl_on_connect(&mut self, ssl: bool) -> &mut Self {
        self.ssl_on_connect = ssl;
        self
    }

    pub fn set_start_tls_enabled(&mut self, enabled: bool) -> &mut Self {
        self.start_tls_enabled = enabled;
        self
    }

    /// Require STARTTLS; implies it is enabled
    pub fn set_start_tls_required(&mut self, required: bool) -> &mut Self {
        self.start_tls_required = required;
        if required {
            self.start_tls_enabled = true;
        }
        self
    }

    /// Credentials for SMTP authentication
    pub fn set_authentication<U: Into<String>, P: Into<String>>(
        &mut self,
        username: U,
        password: P,
    ) -> &mut Self {
        self.credentials = Some(Credentials::new(username.into(), password.into()));
        self
    }

    pub fn set_socket_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.socket_timeout = timeout;
        self
    }

    pub fn set_socket_connection_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.socket_connection_timeout = timeout;
        self
    }

    /// Timeout for establishing the connection, 60 seconds unless configured
    pub fn socket_connection_timeout(&self) -> Duration {
        self.socket_connection_timeout
    }

    /// Envelope sender receiving bounces instead of the `From` address
    pub fn set_bounce_address(&mut self, address: &str) -> Result<&mut Self, Error> {
        self.bounce_address = Some(parse_address(address)?);
        Ok(self)
    }

    /// Charset appended to `text/*` content types that do not declare one
    pub fn set_charset<T: Into<String>>(&mut self, charset: T) -> &mut Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn set_pop_before_smtp<H, U, P>(
        &mut self,
        enabled: bool,
        host: H,
        username: U,
        password: P,
    ) -> &mut Self
    where
        H: Into<String>,
        U: Into<String>,
        P: Into<String>,
    {
        self.pop_before_smtp = PopBeforeSmtp {
            enabled,
            host: host.into(),
            username: username.into(),
            password: password.into(),
        };
        self
    }

    pub fn set_sent_date(&mut self, date: SystemTime) -> &mut Self {
        self.sent_date = Some(date);
        self
    }

    /// The configured sent date, or the current time if none was set
    ///
    /// Without a configured date every call reads the clock again.
    pub fn sent_date(&self) -> SystemTime {
        self.sent_date.unwrap_or_else(SystemTime::now)
    }

    /// Session parameters for the configured host
    ///
    /// Fails if no host name was set. Each call returns a fresh snapshot of
    /// the current settings.
    pub fn mail_session(&self) -> Result<Session, Error> {
        let host = self.host_name.clone().ok_or_else(error::missing_host)?;

        Ok(Session {
            host,
            smtp_port: self.smtp_port,
            ssl_smtp_port: self.ssl_smtp_port,
            ssl_on_connect: self.ssl_on_connect,
            start_tls_enabled: self.start_tls_enabled,
            start_tls_required: self.start_tls_required,
            credentials: self.credentials.clone(),
            socket_timeout: self.socket_timeout,
            socket_connection_timeout: self.socket_connection_timeout,
            bounce_address: self.bounce_address.clone(),
            pop_before_smtp: self.pop_before_smtp.clone(),
        })
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn from_address(&self) -> Option<&Mailbox> {
        self.from.as_ref()
    }

    pub fn to_addresses(&self) -> &Mailboxes {
        &self.to
    }

    pub fn cc_addresses(&self) -> &Mailboxes {
        &self.cc
    }

    pub fn bcc_addresses(&self) -> &Mailboxes {
        &self.bcc
    }

    pub fn reply_to_addresses(&self) -> &Mailboxes {
        &self.reply_to
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Validates the accumulated state and creates a [`TransportMessage`]
    ///
    /// Checks, in order: a host name, a subject or content, a sender (the
    /// `From` address or the configured default) and at least one recipient.
    /// Any failure is returned as a build error whose source is the specific
    /// cause. The builder is left untouched either way.
    pub fn build(&self) -> Result<TransportMessage, Error> {
        match self.try_build() {
            Ok(message) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "built message {} for {} recipient(s)",
                    message.message_id,
                    message.envelope.to().len()
                );
                Ok(message)
            }
            Err(cause) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("message build failed: {cause}");
                Err(error::build(cause))
            }
        }
    }

    fn try_build(&self) -> Result<TransportMessage, Error> {
        let session = self.mail_session()?;

        if self.subject.is_none() && self.content.is_none() {
            return Err(error::incomplete_message("subject or content required"));
        }

        let from = self
            .from
            .clone()
            .or_else(|| self.default_from.clone())
            .ok_or_else(error::missing_sender)?;

        let recipients = self
            .to
            .addresses()
            .chain(self.cc.addresses())
            .chain(self.bcc.addresses())
            .cloned()
            .collect();
        let reverse_path = session
            .bounce_address
            .clone()
            .unwrap_or_else(|| from.email.clone());
        let envelope = Envelope::new(Some(reverse_path), recipients)?;

        Ok(TransportMessage {
            subject: self.subject.clone(),
            from,
            to: self.to.clone(),
            cc: self.cc.clone(),
            bcc: self.bcc.clone(),
            reply_to: self.reply_to.clone(),
            headers: self.headers.clone(),
            sent_date: self.sent_date(),
            content: self.content.as_ref().map(|c| self.with_charset(c)),
            message_id: generate_message_id(),
            session,
            envelope,
        })
    }

    fn with_charset(&self, content: &Content) -> Content {
        match &self.charset {
            Some(charset)
                if content.content_type().starts_with("text/")
                    && !content.content_type().contains("charset=") =>
            {
                Content::new(
                    format!("{}; charset={charset}", content.content_type()),
                    content.body(),
                )
            }
            _ => content.clone(),
        }
    }
}

impl Default for MessageBuilder {
    fn default() -> Self {
        MessageBuilder::new()
    }
}

fn parse_address(address: &str) -> Result<Address, Error> {
    address.trim().parse().map_err(|err| {
        #[cfg(feature = "tracing")]
        tracing::debug!("rejected address {address:?}: {err}");
        error::invalid_address(err)
    })
}

fn parse_mailbox(address: &str) -> Result<Mailbox, Error> {
    address.parse().map_err(|err| {
        #[cfg(feature = "tracing")]
        tracing::debug!("rejected address {address:?}: {err}");
        error::invalid_address(err)
    })
}

// Parses all or nothing
fn parse_recipients<I, S>(addresses: I) -> Result<Vec<Mailbox>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parsed = addresses
        .into_iter()
        .map(|address| parse_mailbox(address.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    if parsed.is_empty() {
        return Err(error::empty_recipient_list());
    }
    Ok(parsed)
}

#[cfg(test)]
mod test {
    use std::time::{Duration, SystemTime};

    use pretty_assertions::assert_eq;

    use super::MessageBuilder;
    use crate::{message::Mailbox, Config};

    const TEST_EMAILS: [&str; 3] = [
        "ab@bc.com",
        "a.b@c.org",
        "abcdefghijklmnopqrst@abcdefghijklmnopqrst.com.bd",
    ];

    fn complete() -> MessageBuilder {
        let mut builder = MessageBuilder::new();
        builder.set_host_name("hostname");
        builder
            .set_subject("subject")
            .unwrap()
            .set_content("text/plain", "content")
            .unwrap();
        builder.set_from(TEST_EMAILS[2]).unwrap();
        builder.add_to(TEST_EMAILS).unwrap();
        builder
    }

    #[test]
    fn add_to_is_atomic() {
        let mut builder = MessageBuilder::new();
        builder.add_to(["ab@bc.com"]).unwrap();

        let err = builder
            .add_to(["a.b@c.org", "not an address", "x@y.org"])
            .unwrap_err();
        assert!(err.is_invalid_address());
        assert_eq!(builder.to_addresses().len(), 1);
    }

    #[test]
    fn add_bcc_rejects_empty_list() {
        let mut builder = MessageBuilder::new();
        let err = builder.add_bcc(Vec::<String>::new()).unwrap_err();
        assert!(err.is_empty_recipient_list());
        assert!(builder.bcc_addresses().is_empty());
    }

    #[test]
    fn reply_to_keeps_order_and_names() {
        let mut builder = MessageBuilder::new();
        builder
            .add_reply_to("email@1.com", "name1")
            .unwrap()
            .add_reply_to("email@2.com", "")
            .unwrap();

        let entries: Vec<String> = builder
            .reply_to_addresses()
            .iter()
            .map(Mailbox::to_string)
            .collect();
        assert_eq!(entries, ["name1 <email@1.com>", "email@2.com"]);

        assert!(builder
            .add_reply_to("email@", "name3")
            .unwrap_err()
            .is_invalid_address());
        assert_eq!(builder.reply_to_addresses().len(), 2);
    }

    #[test]
    fn sent_date_round_trip() {
        let mut builder = MessageBuilder::new();
        let date = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        builder.set_sent_date(date);
        assert_eq!(builder.sent_date(), date);
        assert_eq!(builder.sent_date(), builder.sent_date());
    }

    #[test]
    fn build_requires_subject_or_content() {
        let mut builder = MessageBuilder::new();
        builder.set_host_name("hostname");
        builder.set_from("ab@bc.com").unwrap();
        builder.add_to(["a.b@c.org"]).unwrap();

        let err = builder.build().unwrap_err();
        assert!(err.is_build());
        assert!(err.is_incomplete_message());

        builder.set_content("text/plain", "body only").unwrap();
        assert!(builder.build().is_ok());
    }

    #[test]
    fn build_requires_recipient() {
        let mut builder = MessageBuilder::new();
        builder.set_host_name("hostname");
        builder.set_subject("subject").unwrap();
        builder.set_from("ab@bc.com").unwrap();

        let err = builder.build().unwrap_err();
        assert!(err.is_incomplete_message());

        builder.add_cc("a.b@c.org").unwrap();
        assert!(builder.build().is_ok());
    }

    #[test]
    fn build_checks_host_first() {
        let builder = MessageBuilder::new();
        let err = builder.build().unwrap_err();
        assert!(err.is_build());
        assert!(err.is_missing_host());
    }

    #[test]
    fn build_falls_back_to_default_sender() {
        let mut builder = MessageBuilder::new();
        builder.set_host_name("hostname");
        builder.set_subject("subject").unwrap();
        builder.add_to(["a.b@c.org"]).unwrap();
        assert!(builder.build().unwrap_err().is_missing_sender());

        let config = Config::new().default_from("Robot <robot@bc.com>".parse().unwrap());
        let mut builder = MessageBuilder::with_config(config);
        builder.set_host_name("hostname");
        builder.set_subject("subject").unwrap();
        builder.add_to(["a.b@c.org"]).unwrap();

        let message = builder.build().unwrap();
        assert_eq!(message.from().to_string(), "Robot <robot@bc.com>");
    }

    #[test]
    fn envelope_includes_all_recipients() {
        let mut builder = complete();
        builder.add_cc("cc@c.org").unwrap();
        builder.add_bcc(["bcc@c.org"]).unwrap();

        let message = builder.build().unwrap();
        let envelope = message.envelope();
        assert_eq!(envelope.from().unwrap().as_ref(), TEST_EMAILS[2]);
        assert_eq!(envelope.to().len(), 5);
        assert_eq!(envelope.to()[4].as_ref(), "bcc@c.org");
    }

    #[test]
    fn bounce_address_is_reverse_path() {
        let mut builder = complete();
        builder.set_bounce_address("bounces@bc.com").unwrap();

        let message = builder.build().unwrap();
        assert_eq!(message.envelope().from().unwrap().as_ref(), "bounces@bc.com");
        assert_eq!(message.from().email.as_ref(), TEST_EMAILS[2]);
    }

    #[test]
    fn charset_is_appended_to_text() {
        let mut builder = complete();
        builder.set_charset("utf-8");
        let message = builder.build().unwrap();
        assert_eq!(
            message.content().unwrap().content_type(),
            "text/plain; charset=utf-8"
        );

        builder
            .set_content("text/html; charset=iso-8859-1", "<p>hi</p>")
            .unwrap();
        let message = builder.build().unwrap();
        assert_eq!(
            message.content().unwrap().content_type(),
            "text/html; charset=iso-8859-1"
        );
    }

    #[test]
    fn formatted_hides_bcc() {
        let mut builder = complete();
        builder.add_bcc(["hidden@c.org"]).unwrap();
        builder.add_header("X-Mailer", "billet").unwrap();
        builder.set_sent_date(SystemTime::UNIX_EPOCH + Duration::from_secs(784_887_151));

        let message = builder.build().unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.starts_with(concat!(
            "Date: Tue, 15 Nov 1994 08:12:31 -0000\r\n",
            "From: abcdefghijklmnopqrst@abcdefghijklmnopqrst.com.bd\r\n",
            "To: ab@bc.com, a.b@c.org, abcdefghijklmnopqrst@abcdefghijklmnopqrst.com.bd\r\n",
            "Subject: subject\r\n",
            "Message-ID: <",
        )));
        assert!(formatted.ends_with(concat!(
            "X-Mailer: billet\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "content",
        )));
        assert!(!formatted.contains("hidden@c.org"));
    }

    #[test]
    fn subject_with_line_break_is_rejected() {
        let mut builder = complete();
        let err = builder
            .set_subject("hi\r\nBcc: evil@attacker.com")
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(builder.subject(), Some("subject"));

        let formatted = String::from_utf8(builder.build().unwrap().formatted()).unwrap();
        assert!(!formatted.contains("evil@attacker.com"));
    }

    #[test]
    fn content_type_with_line_break_is_rejected() {
        let mut builder = complete();
        for content_type in ["text/plain\r\nX-Evil: 1", "text/plain\nX-Evil: 1", ""] {
            let err = builder.set_content(content_type, "body").unwrap_err();
            assert!(err.is_invalid_argument(), "{content_type:?} should be rejected");
        }
        assert_eq!(builder.content().unwrap().content_type(), "text/plain");

        let formatted = String::from_utf8(builder.build().unwrap().formatted()).unwrap();
        assert!(!formatted.contains("X-Evil"));
    }

    #[test]
    fn empty_subject_counts_as_unset() {
        let mut builder = MessageBuilder::new();
        builder.set_host_name("hostname");
        builder.set_from("ab@bc.com").unwrap();
        builder.add_to(["a.b@c.org"]).unwrap();

        builder.set_subject("subject").unwrap().set_subject("").unwrap();
        assert_eq!(builder.subject(), None);
        assert!(builder.build().unwrap_err().is_incomplete_message());

        builder.set_content("text/plain", "body").unwrap();
        let formatted = String::from_utf8(builder.build().unwrap().formatted()).unwrap();
        assert!(!formatted.contains("Subject:"));
    }

    #[test]
    fn session_reflects_settings() {
        let mut builder = MessageBuilder::new();
        assert!(builder.mail_session().unwrap_err().is_missing_host());

        builder
            .set_host_name("hostname")
            .set_ssl_on_connect(true)
            .set_start_tls_required(true)
            .set_authentication("user", "secret")
            .set_pop_before_smtp(false, "string", "string", "string");

        let session = builder.mail_session().unwrap();
        assert_eq!(session.host(), "hostname");
        assert_eq!(session.port(), 465);
        assert!(session.start_tls_enabled());
        assert_eq!(session.credentials().unwrap().username(), "user");
        assert!(!session.pop_before_smtp().enabled);
        assert_eq!(session.socket_timeout(), Duration::from_secs(60));
    }
}
