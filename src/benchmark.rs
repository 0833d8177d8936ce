use criterion::{black_box, criterion_group, criterion_main, Criterion};
use thompson_re::{compile, matching::Matcher, Automaton, Simulator};

fn nested_stars(depth: usize) -> String {
    format!("{}a*{}", "(".repeat(depth), ")*".repeat(depth))
}

fn do_the_work(nfa: &Automaton, text: &str, expected: bool) {
    assert_eq!(expected, nfa.is_match(text))
}

fn criterion_benchmark_nested_quantifiers(c: &mut Criterion) {
    let pattern = nested_stars(8).repeat(4);
    let nfa = compile(&pattern).unwrap();
    let accepted = "a".repeat(10_000);
    let rejected = format!("{}b", accepted);

    let expected = regex::Regex::new(&format!("^(?:{})$", pattern))
        .unwrap()
        .is_match(&accepted);

    c.bench_function("nested stars accept", |b| {
        b.iter(|| do_the_work(black_box(&nfa), black_box(&accepted), expected))
    });
    c.bench_function("nested stars reject", |b| {
        b.iter(|| do_the_work(black_box(&nfa), black_box(&rejected), false))
    });
}

fn criterion_benchmark_optional_prefix(c: &mut Criterion) {
    // a?^n a^n against a^n, the classic backtracking blow-up.
    let n = 32;
    let pattern = format!("{}{}", "a?".repeat(n), "a".repeat(n));
    let nfa = compile(&pattern).unwrap();
    let text = "a".repeat(n);
    c.bench_function("optional prefix", |b| {
        let mut simulator = Simulator::new(&nfa);
        b.iter(|| assert!(simulator.is_match(black_box(&text))))
    });
}

criterion_group!(
    benches,
    criterion_benchmark_nested_quantifiers,
    criterion_benchmark_optional_prefix
);
criterion_main!(benches);
