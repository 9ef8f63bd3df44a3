//! Raw Row Tokenizer
//!
//! A listing row arrives as the text of its DOM nodes joined with `|`.
//! Each node's text is trimmed and empty nodes are dropped, which mirrors
//! how the row was flattened in the first place.

/// Separator between DOM-node texts in a flattened row
pub const ROW_SEPARATOR: char = '|';

/// Split a flattened row into its ordered tokens
pub fn tokenize(row_text: &str) -> Vec<&str> {
    row_text
        .split(ROW_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" | | ").is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let tokens = tokenize("#1|V2|Floki|/|WBNB|$|0.006326");
        assert_eq!(tokens, vec!["#1", "V2", "Floki", "/", "WBNB", "$", "0.006326"]);
    }

    #[test]
    fn test_tokens_trimmed() {
        assert_eq!(tokenize(" a | b|c "), vec!["a", "b", "c"]);
    }
}
