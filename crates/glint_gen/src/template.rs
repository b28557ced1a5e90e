//! Template token lists
//!
//! Catalog entries are written as compact source strings and parsed once into
//! tokens, so expansion never splices raw text or rescans for marker
//! characters.
//!
//! Source syntax:
//! - `&` a slot to be expanded
//! - `#` a random literal in `(0, 1)`
//! - `&MASK&` the anchor where a mask is placed (root templates only)

/// Slot marker in template sources.
pub const SLOT_MARK: char = '&';
/// Literal marker in template sources.
pub const LITERAL_MARK: char = '#';
/// Anchor marker in template sources.
pub const ANCHOR_MARK: &str = "&MASK&";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    Slot,
    Literal,
    Anchor,
}

/// A parsed template with its slot, literal and anchor counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    tokens: Vec<Token>,
    slots: usize,
    literals: usize,
    anchors: usize,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut rest = source;

        while let Some(c) = rest.chars().next() {
            let token = if rest.starts_with(ANCHOR_MARK) {
                rest = &rest[ANCHOR_MARK.len()..];
                Token::Anchor
            } else if c == SLOT_MARK {
                rest = &rest[c.len_utf8()..];
                Token::Slot
            } else if c == LITERAL_MARK {
                rest = &rest[c.len_utf8()..];
                Token::Literal
            } else {
                text.push(c);
                rest = &rest[c.len_utf8()..];
                continue;
            };

            if !text.is_empty() {
                tokens.push(Token::Text(std::mem::take(&mut text)));
            }
            tokens.push(token);
        }
        if !text.is_empty() {
            tokens.push(Token::Text(text));
        }

        Self::from_tokens(tokens)
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let count = |wanted: &Token| tokens.iter().filter(|t| *t == wanted).count();
        let slots = count(&Token::Slot);
        let literals = count(&Token::Literal);
        let anchors = count(&Token::Anchor);
        Self {
            tokens,
            slots,
            literals,
            anchors,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of slots, i.e. the arity of a function or mask.
    pub fn arity(&self) -> usize {
        self.slots
    }

    pub fn literals(&self) -> usize {
        self.literals
    }

    pub fn anchors(&self) -> usize {
        self.anchors
    }

    /// Source form of the template; `parse(t.source()) == t`.
    pub fn source(&self) -> String {
        self.tokens
            .iter()
            .map(|token| match token {
                Token::Text(text) => text.as_str(),
                Token::Slot => "&",
                Token::Literal => "#",
                Token::Anchor => ANCHOR_MARK,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    #[test]
    fn test_parse_function_template() {
        let t = Template::parse("op_add(&, &)");
        assert_eq!(
            t.tokens(),
            &[text("op_add("), Token::Slot, text(", "), Token::Slot, text(")")]
        );
        assert_eq!(t.arity(), 2);
        assert_eq!(t.literals(), 0);
    }

    #[test]
    fn test_parse_literals_and_plain_text() {
        let t = Template::parse("op_dist(in.uv.x, in.uv.y, #, #)");
        assert_eq!(t.arity(), 0);
        assert_eq!(t.literals(), 2);

        let t = Template::parse("inv_x");
        assert_eq!(t.tokens(), &[text("inv_x")]);

        let t = Template::parse("#");
        assert_eq!(t.tokens(), &[Token::Literal]);
    }

    #[test]
    fn test_parse_anchor() {
        let t = Template::parse("x = &MASK&; y = &;");
        assert_eq!(
            t.tokens(),
            &[text("x = "), Token::Anchor, text("; y = "), Token::Slot, text(";")]
        );
        assert_eq!(t.anchors(), 1);
        assert_eq!(t.arity(), 1);
    }

    #[test]
    fn test_source_round_trips() {
        let source = "mask_inv(mask_add(rgb, &)) #&MASK&";
        assert_eq!(Template::parse(source).source(), source);
    }

    #[test]
    fn test_empty_template() {
        let t = Template::parse("");
        assert!(t.tokens().is_empty());
        assert_eq!(t.arity(), 0);
    }
}
