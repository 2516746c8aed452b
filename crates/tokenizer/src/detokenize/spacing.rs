//! Spacing repair around punctuation, brackets, currency and numbers.
//!
//! Subword detokenizers join tokens with spaces, which leaves artifacts such
//! as `( text )` or `$ 5 . 00`. The rules below run as one ordered table:
//! the final comma rule re-inserts the space the numeric rules before it may
//! have removed after a non-numeric comma, so the order is part of the
//! behavior.

use regex::Regex;
use std::sync::OnceLock;

/// One rewrite in the spacing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingRule {
    /// Replace every occurrence of the first string with the second
    Literal(&'static str, &'static str),
    /// Regex replacement, `$n` referring to capture groups
    Pattern(&'static str, &'static str),
}

/// The spacing rules in application order.
pub const SPACING_RULES: [SpacingRule; 14] = [
    SpacingRule::Literal("( ", "("),
    SpacingRule::Literal(" )", ")"),
    SpacingRule::Literal("[ ", "["),
    SpacingRule::Literal(" ]", "]"),
    SpacingRule::Literal(" / ", "/"),
    SpacingRule::Literal("„ ", "„"),
    SpacingRule::Literal(" - ", "-"),
    SpacingRule::Literal(" ' ", "'"),
    SpacingRule::Pattern(r"([0-9])( )([\.,])", "${1}${3}"),
    SpacingRule::Pattern(r"([\.,])( )([0-9])", "${1}${3}"),
    SpacingRule::Pattern(r"([0-9])(:)( )([0-9])", "${1}${2}${4}"),
    SpacingRule::Literal(" %", "%"),
    SpacingRule::Literal("$ ", "$"),
    SpacingRule::Pattern(r"([^0-9])(,)([0-9])", "${1}${2} ${3}"),
];

enum Step {
    Literal(&'static str, &'static str),
    Pattern(Regex, &'static str),
}

fn steps() -> &'static [Step] {
    static STEPS: OnceLock<Vec<Step>> = OnceLock::new();
    STEPS.get_or_init(|| {
        SPACING_RULES
            .iter()
            .map(|rule| match *rule {
                SpacingRule::Literal(from, to) => Step::Literal(from, to),
                SpacingRule::Pattern(pattern, to) => {
                    Step::Pattern(Regex::new(pattern).expect("Invalid spacing rule"), to)
                }
            })
            .collect()
    })
}

/// Remove detokenization spaces by applying [`SPACING_RULES`] in order.
pub fn remove_spaces(text: &str) -> String {
    let mut text = text.to_string();
    for step in steps() {
        text = match step {
            Step::Literal(from, to) => text.replace(*from, to),
            Step::Pattern(re, to) => re.replace_all(&text, *to).into_owned(),
        };
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets() {
        assert_eq!(remove_spaces("( hello )"), "(hello)");
        assert_eq!(remove_spaces("see [ 1 ] and ( 2 )"), "see [1] and (2)");
        assert_eq!(remove_spaces("( )"), "()");
    }

    #[test]
    fn test_currency_and_decimals() {
        assert_eq!(remove_spaces("$ 5 . 00"), "$5.00");
        assert_eq!(remove_spaces("pi is 3 . 14"), "pi is 3.14");
        assert_eq!(remove_spaces("1 , 000 people"), "1,000 people");
    }

    #[test]
    fn test_time_and_percent() {
        assert_eq!(remove_spaces("at 12: 30 sharp"), "at 12:30 sharp");
        assert_eq!(remove_spaces("up 50 %"), "up 50%");
    }

    #[test]
    fn test_joiners() {
        assert_eq!(remove_spaces("and / or"), "and/or");
        assert_eq!(remove_spaces("well - known"), "well-known");
        assert_eq!(remove_spaces("rock ' n roll"), "rock'n roll");
        assert_eq!(remove_spaces("„ Guten Tag"), "„Guten Tag");
    }

    #[test]
    fn test_comma_before_digit_after_non_digit() {
        assert_eq!(remove_spaces("a,5"), "a, 5");
        // rule 10 joins ", 5" first, the last rule spaces it again
        assert_eq!(remove_spaces("a, 5"), "a, 5");
        assert_eq!(remove_spaces("2,5"), "2,5");
    }

    #[test]
    fn test_comma_after_space() {
        // the space before the comma is a non-digit too
        assert_eq!(remove_spaces("word , 5"), "word , 5");
        assert_eq!(remove_spaces("a ,b"), "a ,b");
    }

    #[test]
    fn test_clean_text_untouched() {
        assert_eq!(remove_spaces("Hello, world."), "Hello, world.");
        assert_eq!(remove_spaces(""), "");
    }

    #[test]
    fn test_mixed_numbers() {
        assert_eq!(remove_spaces("3 . 14 and 2 , 5"), "3.14 and 2,5");
    }

    #[test]
    fn test_rule_table_order() {
        assert_eq!(SPACING_RULES[0], SpacingRule::Literal("( ", "("));
        assert_eq!(
            SPACING_RULES[13],
            SpacingRule::Pattern(r"([^0-9])(,)([0-9])", "${1}${2} ${3}")
        );
    }
}
