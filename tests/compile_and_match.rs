use itertools::Itertools;
use thompson_re::{compile, compile_with_flags, matches, Matcher, ParserError, RegexFlags};

fn accepts(pattern: &str, text: &str) -> bool {
    matches(&compile(pattern).unwrap(), text)
}

/// Every string over `alphabet` of length at most `max_len`.
fn all_texts(alphabet: &[char], max_len: usize) -> Vec<String> {
    (0..=max_len)
        .flat_map(|len| {
            (0..len)
                .map(|_| alphabet.iter())
                .multi_cartesian_product()
                .map(|chars| chars.into_iter().collect::<String>())
                .collect::<Vec<_>>()
        })
        .collect()
}

#[test]
fn test_empty_pattern() {
    assert_eq!(accepts("", ""), true);
    assert_eq!(accepts("", "x"), false);
}

#[test]
fn test_literal_patterns_match_only_themselves() {
    for pattern in ["a", "abc", "hello world", "x.y", "1+1=2"] {
        let literal: String = pattern
            .chars()
            .map(|c| match c {
                '*' | '+' | '?' | '|' | '(' | ')' | '\\' => format!("\\{}", c),
                c => c.to_string(),
            })
            .collect();
        let nfa = compile(&literal).unwrap();
        assert_eq!(matches(&nfa, pattern), true, "{}", pattern);
        assert_eq!(matches(&nfa, &pattern[1..]), false, "{}", pattern);
        assert_eq!(matches(&nfa, &format!("{}!", pattern)), false, "{}", pattern);
    }
}

#[test]
fn test_alternation() {
    assert_eq!(accepts("a|b", "a"), true);
    assert_eq!(accepts("a|b", "b"), true);
    assert_eq!(accepts("a|b", "ab"), false);
    assert_eq!(accepts("a|", ""), true);
    assert_eq!(accepts("|", ""), true);
    assert_eq!(accepts("|", "|"), false);
}

#[test]
fn test_quantifiers() {
    assert_eq!(accepts("a*", ""), true);
    assert_eq!(accepts("a*", "aaaa"), true);
    assert_eq!(accepts("a*", "b"), false);

    assert_eq!(accepts("a+", ""), false);
    assert_eq!(accepts("a+", "a"), true);
    assert_eq!(accepts("a+", "aaa"), true);

    assert_eq!(accepts("ab?c", "ac"), true);
    assert_eq!(accepts("ab?c", "abc"), true);
    assert_eq!(accepts("ab?c", "abbc"), false);
}

#[test]
fn test_grouping() {
    assert_eq!(accepts("(ab)+", "ababab"), true);
    assert_eq!(accepts("(ab)+", "ababa"), false);
    assert_eq!(accepts("()", ""), true);
    assert_eq!(accepts("(a|b)*c", "abbac"), true);
    assert_eq!(accepts("((a|b)c)?d", "bcd"), true);
    assert_eq!(accepts("((a|b)c)?d", "cd"), false);
}

#[test]
fn test_second_quantifier_is_literal() {
    assert_eq!(accepts("a**", "aa*"), true);
    assert_eq!(accepts("a**", "aa"), false);
    assert_eq!(accepts("*", "*"), true);
    assert_eq!(accepts("a|+", "+"), true);
}

#[test]
fn test_escapes() {
    assert_eq!(accepts("a\\nb", "a\nb"), true);
    assert_eq!(accepts("a\\nb", "anb"), false);
    assert_eq!(accepts("\\t", "\t"), true);
    assert_eq!(accepts("\\*+", "***"), true);
    assert_eq!(accepts("\\\\", "\\"), true);
    assert_eq!(accepts("\\|", "|"), true);
}

#[test]
fn test_malformed_patterns() {
    assert!(matches!(
        compile("a\\"),
        Err(ParserError::DanglingEscape(_, 1))
    ));
    assert!(matches!(
        compile("(a"),
        Err(ParserError::UnmatchedParenthesis(_, 0))
    ));
    assert!(matches!(compile("a)"), Err(ParserError::TrailingInput(_, 1))));
}

#[test]
fn test_compile_is_deterministic() {
    for pattern in ["(a|b)*abb", "a)", "x(y|z)+\\", ""] {
        let first = compile(pattern);
        let second = compile(pattern);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.state_count(), b.state_count());
                assert_eq!(a.start(), b.start());
                assert_eq!(a.out(), b.out());
                assert_eq!(a.to_dot(), b.to_dot());
            }
            (Err(a), Err(b)) => assert_eq!(a, b),
            _ => panic!("{:?} compiled inconsistently", pattern),
        }
    }
}

#[test]
fn test_automaton_size_is_linear() {
    for repeat in 1..=16 {
        let pattern = "(((a*)*)*)*".repeat(repeat);
        let nfa = compile(&pattern).unwrap();
        assert!(nfa.state_count() <= 4 * pattern.len() + 2);
    }
    let pattern = "||||(|)";
    assert!(compile(pattern).unwrap().state_count() <= 4 * pattern.len() + 2);
}

#[test]
fn test_pathological_patterns_finish() {
    let pattern = "(((a*)*)*)*".repeat(16);
    let nfa = compile(&pattern).unwrap();
    let text = "a".repeat(5_000);
    assert_eq!(nfa.is_match(&text), true);
    assert_eq!(nfa.is_match(&format!("{}b", text)), false);

    let n = 40;
    let nfa = compile(&format!("{}{}", "a?".repeat(n), "a".repeat(n))).unwrap();
    assert_eq!(nfa.is_match(&"a".repeat(n)), true);
    assert_eq!(nfa.is_match(&"a".repeat(2 * n)), true);
    assert_eq!(nfa.is_match(&"a".repeat(2 * n + 1)), false);
}

#[test]
fn test_agrees_with_regex_crate() {
    let patterns = [
        "a",
        "ab|ba",
        "(a|b)*abb",
        "a+b*",
        "(ab)+|b?",
        "((a|b)(a|b))*",
        "a?a?b+",
        "(a*b*)*a",
        "(b|ab*a)*",
    ];
    let texts = all_texts(&['a', 'b'], 6);
    for pattern in patterns {
        let nfa = compile(pattern).unwrap();
        let oracle = regex::Regex::new(&format!("^(?:{})$", pattern)).unwrap();
        for text in &texts {
            assert_eq!(
                nfa.is_match(text),
                oracle.is_match(text),
                "pattern {:?} on {:?}",
                pattern,
                text
            );
        }
    }
}

#[test]
fn test_shared_across_threads() {
    let nfa = compile_with_flags("(a|b)*c", RegexFlags::DEBUG).unwrap();
    std::thread::scope(|scope| {
        for text in ["abc", "bbbc", "c", "ab"] {
            let nfa = &nfa;
            scope.spawn(move || assert_eq!(nfa.is_match(text), text.ends_with('c')));
        }
    });
}
