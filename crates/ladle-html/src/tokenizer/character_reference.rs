//! Character reference decoding for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! Only a handful of named references are recognised; numeric references
//! are fully supported.

use super::core::{HTMLTokenizer, TokenizerState};

/// [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
///
/// The subset that shows up in ordinary markup. The flag marks names that
/// browsers also accept without a trailing semicolon.
const NAMED_CHARACTER_REFERENCES: &[(&str, char, bool)] = &[
    ("amp", '&', true),
    ("lt", '<', true),
    ("gt", '>', true),
    ("quot", '"', true),
    ("apos", '\'', false),
    ("nbsp", '\u{00A0}', true),
    ("copy", '\u{00A9}', true),
    ("reg", '\u{00AE}', true),
    ("hellip", '\u{2026}', false),
    ("mdash", '\u{2014}', false),
    ("ndash", '\u{2013}', false),
];

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Entered just after a `&`. Decodes the reference if there is one, then
    /// flushes the result to wherever the `&` came from and returns to the
    /// return state. An unrecognised reference leaves the `&` as literal text.
    pub(super) fn handle_character_reference_state(&mut self) {
        self.unconsume_current();

        let decoded = if self.next_few_characters_are("#") {
            self.consume_numeric_character_reference()
        } else {
            self.consume_named_character_reference()
        };

        self.flush_code_points_consumed_as_character_reference(decoded.unwrap_or('&'));
        let return_state = self.return_state.take().unwrap_or(TokenizerState::Data);
        self.switch_to(return_state);
    }

    /// Returns true if the return state is an attribute value state.
    /// "consumed as part of an attribute"
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute,
    /// then append each character to the current attribute's value. Otherwise,
    /// emit each character as a character token."
    fn flush_code_points_consumed_as_character_reference(&mut self, c: char) {
        if self.is_consumed_as_part_of_attribute() {
            if let Some(token) = self.current_token.as_mut() {
                token.append_to_current_attribute_value(c);
            }
        } else {
            self.emit_character_token(c);
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    fn consume_named_character_reference(&mut self) -> Option<char> {
        for &(name, c, legacy) in NAMED_CHARACTER_REFERENCES {
            if !self.next_few_characters_are(name) {
                continue;
            }
            let with_semicolon = self.peek_codepoint(name.chars().count()) == Some(';');
            if with_semicolon {
                self.consume_string(name);
                self.consume_string(";");
                return Some(c);
            }
            if !legacy {
                continue;
            }
            // "If the character reference was consumed as part of an attribute,
            // and the last character matched is not a U+003B SEMICOLON character
            // (;), and the next input character is either a U+003D EQUALS SIGN
            // character (=) or an ASCII alphanumeric, then, for historical
            // reasons, flush code points consumed as a character reference and
            // switch to the return state."
            let next = self.peek_codepoint(name.chars().count());
            if self.is_consumed_as_part_of_attribute()
                && next.is_some_and(|n| n == '=' || n.is_ascii_alphanumeric())
            {
                return None;
            }
            self.log_parse_error("missing-semicolon-after-character-reference");
            self.consume_string(name);
            return Some(c);
        }
        None
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    /// through [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    fn consume_numeric_character_reference(&mut self) -> Option<char> {
        let hex = matches!(self.peek_codepoint(1), Some('x' | 'X'));
        let prefix_len = if hex { 2 } else { 1 };
        let radix = if hex { 16 } else { 10 };

        let digits: String = self.input[self.current_pos + prefix_len..]
            .chars()
            .take_while(|c| c.is_digit(radix))
            .collect();

        // "Anything else - This is an absence-of-digits-in-numeric-character-reference
        // parse error. Flush code points consumed as a character reference.
        // Reconsume in the return state."
        if digits.is_empty() {
            self.log_parse_error("absence-of-digits-in-numeric-character-reference");
            return None;
        }

        self.current_pos += prefix_len + digits.len();
        if self.next_few_characters_are(";") {
            self.consume_string(";");
        } else {
            self.log_parse_error("missing-semicolon-after-character-reference");
        }

        // Saturate instead of overflowing; anything this large is out of range anyway.
        let code = u32::from_str_radix(&digits, radix).unwrap_or(u32::MAX);

        // "If the number is 0x00, then this is a null-character-reference parse error."
        // "If the number is greater than 0x10FFFF, then this is a
        // character-reference-outside-unicode-range parse error."
        // "If the number is a surrogate, then this is a surrogate-character-reference
        // parse error."
        // In all three cases: "Set the character reference code to 0xFFFD."
        match char::from_u32(code) {
            Some('\0') | None => {
                self.log_parse_error("invalid-numeric-character-reference");
                Some(char::REPLACEMENT_CHARACTER)
            }
            Some(c) => Some(c),
        }
    }
}
