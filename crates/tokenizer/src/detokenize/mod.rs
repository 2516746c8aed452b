//! Detokenization repair.
//!
//! This module undoes the spacing artifacts a subword detokenizer leaves in
//! its output. It runs after the wrapped model has joined tokens back into
//! text: quotes are repaired first, then spacing.

pub mod quotes;
pub mod spacing;

pub use quotes::handle_quotes;
pub use spacing::{remove_spaces, SpacingRule, SPACING_RULES};

/// Trim surrounding whitespace, then apply [`handle_quotes`] and
/// [`remove_spaces`] in that order.
pub fn repair(text: &str) -> String {
    remove_spaces(&handle_quotes(text.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_order() {
        assert_eq!(
            repair(r#" He paid " $ 5 . 00 " ( cash ) "#),
            r#"He paid "$5.00" (cash)"#
        );
    }

    #[test]
    fn test_repair_trims_before_quotes() {
        // surrounding whitespace goes before the quote pass
        assert_eq!(repair("  \" a \"  "), "\"a\"");
    }

    #[test]
    fn test_repair_empty() {
        assert_eq!(repair(""), "");
        assert_eq!(repair("   "), "");
    }
}
