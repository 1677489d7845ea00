use billet::{message::Mailbox, Address, MessageBuilder};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("parse address", |b| {
        b.iter(|| assert!(black_box("test@mail.local").parse::<Address>().is_ok()))
    });
    c.bench_function("parse named mailbox", |b| {
        b.iter(|| assert!(black_box("Test <test@mail.local>").parse::<Mailbox>().is_ok()))
    });
    c.bench_function("add recipients", |b| {
        b.iter(|| {
            let mut builder = MessageBuilder::new();
            builder
                .add_to(black_box([
                    "ab@bc.com",
                    "a.b@c.org",
                    "Test <test@mail.local>",
                ]))
                .unwrap();
            builder
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
