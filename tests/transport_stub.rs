use billet::{transport::stub::StubTransport, MessageBuilder, Transport, TransportMessage};

fn message() -> TransportMessage {
    let mut builder = MessageBuilder::new();
    builder.set_host_name("localhost");
    builder
        .set_subject("Happy new year")
        .unwrap()
        .set_content("text/plain", "Be happy!")
        .unwrap()
        .set_from("NoBody <nobody@domain.tld>")
        .unwrap()
        .add_reply_to("yuin@domain.tld", "Yuin")
        .unwrap()
        .add_to(["Hei <hei@domain.tld>"])
        .unwrap()
        .add_bcc(["secret@domain.tld"])
        .unwrap();
    builder.build().unwrap()
}

#[test]
fn stub_transport() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let sender_ok = StubTransport::new_ok();
    let sender_ko = StubTransport::new_error();
    let email = message();

    sender_ok.send(&email).unwrap();
    sender_ko.send(&email).unwrap_err();

    let messages = sender_ok.messages();
    assert_eq!(messages.len(), 1);

    let (envelope, formatted) = &messages[0];
    assert_eq!(envelope, email.envelope());
    assert_eq!(envelope.from().unwrap().as_ref(), "nobody@domain.tld");
    assert_eq!(envelope.to().len(), 2);

    assert!(formatted.contains("From: NoBody <nobody@domain.tld>\r\n"));
    assert!(formatted.contains("Reply-To: Yuin <yuin@domain.tld>\r\n"));
    assert!(formatted.contains("To: Hei <hei@domain.tld>\r\n"));
    assert!(!formatted.contains("secret@domain.tld"));
    assert!(formatted.ends_with("\r\n\r\nBe happy!"));
}

#[test]
fn stub_transport_clones_share_log() {
    let sender = StubTransport::new_ok();
    let clone = sender.clone();

    clone.send(&message()).unwrap();
    assert_eq!(sender.messages().len(), 1);
}
