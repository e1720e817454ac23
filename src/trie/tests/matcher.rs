use super::*;

use proptest::prelude::*;
use rstest::rstest;

fn trie_of(entries: &[(&str, i32)]) -> Trie<i32> {
    let mut trie = Trie::new();
    for (pattern, value) in entries {
        trie.insert(pattern, *value).unwrap();
    }
    trie
}

#[cfg(test)]
mod basic_match {
    use super::*;

    #[test]
    fn match_char() {
        let trie = trie_of(&[("abc", 1)]);

        assert_eq!(run(&trie, "abc"), Some(("abc", &1)));
        assert_eq!(run(&trie, "abcd"), Some(("abc", &1)));
        assert_eq!(run(&trie, "ab"), None);
        assert_eq!(run(&trie, "zabc"), None);
        assert_eq!(run(&trie, ""), None);
    }

    #[test]
    fn match_longest() {
        let trie = trie_of(&[("a", 1), ("ab", 2)]);

        assert_eq!(run(&trie, "abc"), Some(("ab", &2)));
        assert_eq!(run(&trie, "ac"), Some(("a", &1)));
        assert_eq!(run(&trie, "b"), None);
    }

    #[test]
    fn match_longest_regardless_of_order() {
        let trie = trie_of(&[("ab", 2), ("a", 1)]);

        assert_eq!(run(&trie, "abc"), Some(("ab", &2)));
        assert_eq!(run(&trie, "ac"), Some(("a", &1)));
    }

    #[test]
    fn match_falls_back_to_shorter() {
        let trie = trie_of(&[("-", 1), ("->", 2), ("-->", 3)]);

        assert_eq!(run(&trie, "--x"), Some(("-", &1)));
        assert_eq!(run(&trie, "-->"), Some(("-->", &3)));
        assert_eq!(run(&trie, "->-"), Some(("->", &2)));
    }

    #[test]
    fn match_multibyte() {
        let trie = trie_of(&[("α", 1), ("αβ", 2)]);

        assert_eq!(run(&trie, "αβγ"), Some(("αβ", &2)));
        assert_eq!(run(&trie, "αγ"), Some(("α", &1)));
    }

    #[test]
    fn match_metachar() {
        let trie = trie_of(&[(r"a\+c", 1), (r"\*\*", 2), ("+", 3)]);

        assert_eq!(run(&trie, "a+c"), Some(("a+c", &1)));
        assert_eq!(run(&trie, "aac"), None);
        assert_eq!(run(&trie, "**"), Some(("**", &2)));
        assert_eq!(run(&trie, "+"), Some(("+", &3)));
    }
}

#[test]
fn union() {
    let trie = trie_of(&[("oo|inf(inity)?", 1), ("in", 2)]);

    assert_eq!(run(&trie, "oo"), Some(("oo", &1)));
    assert_eq!(run(&trie, "inf"), Some(("inf", &1)));
    assert_eq!(run(&trie, "infinity"), Some(("infinity", &1)));
    assert_eq!(run(&trie, "infini"), Some(("inf", &1)));
    assert_eq!(run(&trie, "int"), Some(("in", &2)));
}

#[test]
fn option() {
    let trie = trie_of(&[("ab?c", 1)]);

    assert_eq!(run(&trie, "ac"), Some(("ac", &1)));
    assert_eq!(run(&trie, "abc"), Some(("abc", &1)));
    assert_eq!(run(&trie, "ab"), None);
    assert_eq!(run(&trie, "abbc"), None);
}

#[test]
fn plus() {
    let mut trie = trie_of(&[("inf+i?n?i?t?y", 1)]);

    assert_eq!(run(&trie, "infinity"), Some(("infinity", &1)));
    assert_eq!(run(&trie, "infy"), Some(("infy", &1)));
    assert_eq!(run(&trie, "infffity"), Some(("infffity", &1)));
    assert_eq!(run(&trie, "inffofity"), None);
    assert_eq!(run(&trie, "inf"), None);

    trie.insert("inf+i?n?i?t?y?", 2).unwrap();

    assert_eq!(run(&trie, "inf"), Some(("inf", &2)));
    assert_eq!(run(&trie, "infinity"), Some(("infinity", &1)));
}

#[test]
fn star() {
    {
        let trie = trie_of(&[("a[0-9]*z", 1)]);

        assert_eq!(run(&trie, "a2017z"), Some(("a2017z", &1)));
        assert_eq!(run(&trie, "az"), Some(("az", &1)));
        assert_eq!(run(&trie, "a2017"), None);
    }
    {
        let trie = trie_of(&[("a[0-9]*z?", 1)]);

        assert_eq!(run(&trie, "a"), Some(("a", &1)));
        assert_eq!(run(&trie, "a2"), Some(("a2", &1)));
        assert_eq!(run(&trie, "a2z"), Some(("a2z", &1)));
        assert_eq!(run(&trie, "a90000"), Some(("a90000", &1)));
        assert_eq!(run(&trie, "a9z0"), Some(("a9z", &1)));
    }
}

#[rstest]
#[case("ag", Some("ag"))]
#[case("a0g", Some("a0g"))]
#[case("c2f5h", Some("c2f5h"))]
#[case("bdg", Some("bdg"))]
#[case("a", None)]
#[case("a0", None)]
#[case("dg", None)]
fn classes(#[case] input: &str, #[case] expect: Option<&str>) {
    let trie = trie_of(&[("[a-c][0-2]?[d-f]?[3-5]?[g-h]", 1)]);

    assert_eq!(trie.longest_match(input).map(|m| m.text), expect);
}

#[test]
fn classes_then_optional_tail() {
    let mut trie = trie_of(&[("[a-c][0-2]?[d-f]?[3-5]?[g-h]", 1)]);
    trie.insert("[a-c][0-2]?[d-f]?[3-5]?[g-h]?", 2).unwrap();

    assert_eq!(run(&trie, "a"), Some(("a", &2)));
    assert_eq!(run(&trie, "a1"), Some(("a1", &2)));
    assert_eq!(run(&trie, "ag"), Some(("ag", &1)));
}

#[cfg(test)]
mod groups {
    use super::*;

    #[test]
    fn group() {
        let trie = trie_of(&[("hel(lo)", 1)]);

        assert_eq!(run(&trie, "hello"), Some(("hello", &1)));
        assert_eq!(run(&trie, "hel"), None);
    }

    #[test]
    fn group_option() {
        let trie = trie_of(&[("hel(lo)?ya", 1)]);

        assert_eq!(run(&trie, "helya"), Some(("helya", &1)));
        assert_eq!(run(&trie, "helloya"), Some(("helloya", &1)));
        assert_eq!(run(&trie, "hellya"), None);
    }

    #[test]
    fn group_plus() {
        let trie = trie_of(&[("hel(lo)+ya", 1)]);

        assert_eq!(run(&trie, "helloya"), Some(("helloya", &1)));
        assert_eq!(run(&trie, "helloloya"), Some(("helloloya", &1)));
        assert_eq!(run(&trie, "hellollya"), None);
        assert_eq!(run(&trie, "helloolya"), None);
        assert_eq!(run(&trie, "helya"), None);
    }

    #[test]
    fn group_star() {
        let trie = trie_of(&[("x(ab)*", 1)]);

        assert_eq!(run(&trie, "x"), Some(("x", &1)));
        assert_eq!(run(&trie, "xabab"), Some(("xabab", &1)));
        assert_eq!(run(&trie, "xaba"), Some(("xab", &1)));
    }

    #[test]
    fn group_optional_tail() {
        let trie = trie_of(&[("[0-9]+(.[0-9]+)?", 1)]);

        assert_eq!(run(&trie, "21.91"), Some(("21.91", &1)));
        assert_eq!(run(&trie, "21"), Some(("21", &1)));
        assert_eq!(run(&trie, "21."), Some(("21", &1)));
    }

    #[test]
    fn group_union() {
        let trie = trie_of(&[("a(+|-)b", 1)]);

        assert_eq!(run(&trie, "a+b"), Some(("a+b", &1)));
        assert_eq!(run(&trie, "a-b"), Some(("a-b", &1)));
        assert_eq!(run(&trie, "a*b"), None);
    }

    #[test]
    fn nested_group() {
        let trie = trie_of(&[("a(b(cd)?)+e", 1)]);

        assert_eq!(run(&trie, "abe"), Some(("abe", &1)));
        assert_eq!(run(&trie, "abcde"), Some(("abcde", &1)));
        assert_eq!(run(&trie, "abcdbbcde"), Some(("abcdbbcde", &1)));
        assert_eq!(run(&trie, "ace"), None);
    }

    #[test]
    fn shared_inline_group() {
        let trie = trie_of(&[("(lo)x", 1), ("(lo)y", 2)]);

        assert_eq!(run(&trie, "lox"), Some(("lox", &1)));
        assert_eq!(run(&trie, "loy"), Some(("loy", &2)));
    }

    #[test]
    fn empty_group_repeat_terminates() {
        let trie = trie_of(&[("a(b?)*c", 1), ("x(y*)+", 2), ("p()*q", 3)]);

        assert_eq!(run(&trie, "ac"), Some(("ac", &1)));
        assert_eq!(run(&trie, "abbc"), Some(("abbc", &1)));
        assert_eq!(run(&trie, "abd"), None);
        assert_eq!(run(&trie, "x"), Some(("x", &2)));
        assert_eq!(run(&trie, "xyyy"), Some(("xyyy", &2)));
        assert_eq!(run(&trie, "pq"), Some(("pq", &3)));
        assert_eq!(run(&trie, "pr"), None);
    }
}

#[cfg(test)]
mod named_groups {
    use super::*;

    #[test]
    fn named_group() {
        let mut trie = Trie::new();
        trie.learn("FLOAT", "[0-9]+(.[0-9]+)").unwrap();
        trie.insert("a{FLOAT}?", 1).unwrap();

        assert_eq!(run(&trie, "a4.2"), Some(("a4.2", &1)));
        assert_eq!(run(&trie, "a"), Some(("a", &1)));
        assert_eq!(run(&trie, "a4"), Some(("a", &1)));
    }

    #[test]
    fn backslash() {
        {
            let mut trie = Trie::new();
            trie.insert(r"a\{FLOAT}?", 1).unwrap();

            assert_eq!(run(&trie, "a{FLOAT"), Some(("a{FLOAT", &1)));
            assert_eq!(run(&trie, "a{FLOAT}"), Some(("a{FLOAT}", &1)));
        }
        {
            let mut trie = Trie::new();
            trie.learn("FLOAT", "[0-9]+(.[0-9]+)?").unwrap();
            trie.insert(r"a\\{FLOAT}?", 1).unwrap();

            assert_eq!(run(&trie, r"a\2.22"), Some((r"a\2.22", &1)));
            assert_eq!(run(&trie, r"a\"), Some((r"a\", &1)));
        }
    }

    #[test]
    fn greek_operator_greek() {
        let mut trie = Trie::new();
        trie.learn("WS", "[ \t\r\n\u{c}]").unwrap();
        trie.learn("GREEK_LETTER", "α|β|γ|δ").unwrap();
        trie.insert("{GREEK_LETTER}{WS}*(+|-){WS}*{GREEK_LETTER}", 1)
            .unwrap();

        assert_eq!(run(&trie, "α+α"), Some(("α+α", &1)));
        assert_eq!(run(&trie, "β - δ!"), Some(("β - δ", &1)));
        assert_eq!(run(&trie, "β -"), None);
    }

    #[test]
    fn named_group_inside_learned_group() {
        let mut trie = Trie::new();
        trie.learn("DIGIT", "[0-9]").unwrap();
        trie.learn("INT", "{DIGIT}+").unwrap();
        trie.insert("#{INT}", 1).unwrap();

        assert_eq!(run(&trie, "#123;"), Some(("#123", &1)));
        assert_eq!(run(&trie, "#;"), None);
    }

    #[test]
    fn relearn_affects_later_patterns_only() {
        let mut trie = Trie::new();
        trie.learn("X", "a").unwrap();
        trie.insert("({X})1", 1).unwrap();
        trie.learn("X", "b").unwrap();
        trie.insert("({X})2", 2).unwrap();

        assert_eq!(run(&trie, "a1"), Some(("a1", &1)));
        assert_eq!(run(&trie, "b2"), Some(("b2", &2)));
        assert_eq!(run(&trie, "b1"), None);
    }
}

proptest! {
    #[test]
    fn match_is_idempotent(input in "[a-z0-9.+ ]{0,12}") {
        let mut trie = Trie::new();
        trie.learn("FLOAT", "[0-9]+(.[0-9]+)?").unwrap();
        trie.insert("{FLOAT}", 1).unwrap();
        trie.insert("[a-z]+", 2).unwrap();
        trie.insert("a(b?)*c", 3).unwrap();
        trie.insert("+", 4).unwrap();

        let first = trie.longest_match(&input);
        let second = trie.longest_match(&input);
        prop_assert_eq!(first.clone(), second);

        if let Some(m) = first {
            prop_assert!(input.starts_with(m.text));
            prop_assert!(!m.text.is_empty());
        }
    }
}
