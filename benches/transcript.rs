use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parley::core::app::App;
use parley::core::conversation::Conversation;
use parley::core::message::Message;

fn make_messages(n_pairs: usize, base: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(n_pairs * 2);
    for _ in 0..n_pairs {
        messages.push(Message::user(base));
        messages.push(Message::bot(base));
    }
    messages
}

fn bench_transcript_lines(c: &mut Criterion) {
    let base = "The quick brown fox jumps over the lazy dog. ".repeat(4);

    let mut group = c.benchmark_group("transcript_lines");
    for n_pairs in [10usize, 100, 500] {
        let app = App::new(
            Conversation::from_messages(make_messages(n_pairs, base.as_str())),
            "dark",
        );
        group.throughput(Throughput::Elements((n_pairs * 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_pairs), &app, |b, app| {
            b.iter(|| app.transcript_lines())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transcript_lines);
criterion_main!(benches);
