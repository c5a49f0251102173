//! Property-based tests for the markup interpreter
//!
//! These tests check the interpreter invariants over generated input:
//! - Text without elements is a single text leaf under `root`
//! - Keyed and positional tag options parse into the map and the list
//! - The content of `[kbd]`, `[code]` and `[codeblock]` is never interpreted

use bbcode_parser::{BbcodeInterpreter, Interpreter, Node, TagKind, parse_options};
use proptest::collection::btree_map;
use proptest::prelude::*;

/// Text that cannot open an element
fn plain_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Arbitrary characters except `[`
        "[^\\[]{0,64}",
        // Prose with closing brackets and slashes
        "[a-zA-Z0-9 .,:/\\]\n]{0,64}",
    ]
}

fn option_key_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

fn option_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9.:/_*-]{1,12}"
}

/// Options are written with one or more spaces in front of each token
fn separator_strategy() -> impl Strategy<Value = String> {
    " {1,3}"
}

fn positional_option_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._*]{1,12}"
}

/// Element content mixing text with markup-looking characters
fn literal_content_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z \\[\\]/=]{0,40}",
        // Well-formed markup that would be interpreted anywhere else
        "[a-z ]{0,8}\\[(b|i|u|br|lb|Node2D)\\][a-z ]{0,8}(\\[/(b|i|u)\\])?",
    ]
}

fn literal_tag_strategy() -> impl Strategy<Value = (&'static str, TagKind)> {
    prop_oneof![
        Just(("kbd", TagKind::Keyboard)),
        Just(("code", TagKind::Code)),
        Just(("codeblock", TagKind::Codeblock)),
    ]
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_plain_text_is_single_leaf(text in plain_text_strategy()) {
            let root = BbcodeInterpreter::new().interpret(&text);

            prop_assert_eq!(root.name.as_str(), "root");
            prop_assert_eq!(root.children, vec![Node::text(&text)]);
        }

        #[test]
        fn test_keyed_options(
            pairs in btree_map(option_key_strategy(), option_value_strategy(), 0..6),
            separators in prop::collection::vec(separator_strategy(), 6),
        ) {
            let raw: String = pairs
                .iter()
                .zip(&separators)
                .map(|((key, value), sep)| format!("{sep}{key}={value}"))
                .collect();
            let options = parse_options(&raw);

            prop_assert!(options.list.is_empty(), "positional options in {:?}", raw);
            prop_assert_eq!(options.map.len(), pairs.len());
            for (key, value) in &pairs {
                prop_assert_eq!(options.get(key), Some(value.as_str()));
            }

            let parsed: Vec<(&str, &str)> = options.map.iter().collect();
            let expected: Vec<(&str, &str)> =
                pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            prop_assert_eq!(parsed, expected);
        }

        #[test]
        fn test_positional_options(
            tokens in prop::collection::vec(positional_option_strategy(), 0..6),
            sep in separator_strategy(),
        ) {
            let raw: String = tokens.iter().map(|token| format!("{sep}{token}")).collect();
            let options = parse_options(&raw);

            prop_assert_eq!(&options.list, &tokens);
            prop_assert!(options.map.is_empty());
            for (index, token) in tokens.iter().enumerate() {
                prop_assert_eq!(options.positional(index), token.as_str());
            }
            prop_assert_eq!(options.positional(tokens.len()), "");
        }

        #[test]
        fn test_literal_content_is_not_interpreted(
            (tag, kind) in literal_tag_strategy(),
            content in literal_content_strategy(),
        ) {
            let closing = format!("[/{tag}]");
            prop_assume!(!content.contains(&closing));

            let source = format!("[{tag}]{content}{closing}");
            let root = BbcodeInterpreter::new().interpret(&source);

            prop_assert_eq!(root.children.len(), 1, "source: {:?}", source);
            let element = root.children[0].as_tag().unwrap();
            prop_assert_eq!(element.kind(), kind);
            prop_assert_eq!(&element.children, &vec![Node::text(&content)]);
        }
    }
}
