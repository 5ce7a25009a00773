//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")
//! - RCDATA/RAWTEXT end tag detection
//! - Attribute helpers for duplicate detection

use ladle_common::warning::warn_once;

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;
use crate::issue::ParseIssue;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns the character at the current position and advances the position.
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Step back over the character consumed at the top of the main loop, for
    /// states that look ahead from their own starting position.
    pub(super) const fn unconsume_current(&mut self) {
        if let Some(c) = self.current_input_character {
            self.current_pos -= c.len_utf8();
        }
    }

    /// Peek at a codepoint at the given offset from the current position without
    /// consuming it. Used for lookahead operations like "the next few characters are".
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..."
    ///
    /// Check if the next few characters match the target string exactly.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input[self.current_pos..]
            .get(..target.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(target))
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C' | '\r')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current token" - adds the token to the output stream.
    ///
    /// NOTE: In the HTML standard the tree builder switches the tokenizer into RCDATA or
    /// RAWTEXT. Since we run the tokenizer before the parser, we detect those
    /// elements here and switch states accordingly.
    pub fn emit_token(&mut self) {
        let Some(token) = self.current_token.take() else {
            return;
        };

        if let Token::StartTag { ref name, .. } = token {
            self.last_start_tag_name = Some(name.clone());
            match name.as_str() {
                // "A start tag whose tag name is "title"... Follow the generic
                // RCDATA element parsing algorithm."
                "title" | "textarea" => self.switch_to(TokenizerState::RCDATA),
                // "Follow the generic raw text element parsing algorithm."
                // Script data escapes are not implemented, so script content
                // is raw text as well.
                "style" | "script" | "xmp" | "iframe" | "noembed" | "noframes" => {
                    self.switch_to(TokenizerState::RAWTEXT);
                }
                _ => {}
            }
        }

        self.token_stream.push(token);
    }

    /// "Emit the current input character as a character token."
    pub fn emit_character_token(&mut self, c: char) {
        self.token_stream.push(Token::Character { data: c });
    }

    /// "Emit an end-of-file token."
    ///
    /// Stops the main loop.
    pub fn emit_eof_token(&mut self) {
        self.token_stream.push(Token::EndOfFile);
        self.at_eof = true;
    }
}

// =============================================================================
// RCDATA/RAWTEXT Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    ///
    /// Called just after a `<` has been consumed in RCDATA or RAWTEXT. Looks
    /// ahead for `/name` followed by whitespace, `/`, or `>`.
    pub(super) fn at_appropriate_end_tag(&self) -> bool {
        let Some(name) = self.last_start_tag_name.as_deref() else {
            return false;
        };
        let rest = &self.input[self.current_pos..];
        let Some(after_solidus) = rest.strip_prefix('/') else {
            return false;
        };
        let matches_name = after_solidus
            .get(..name.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name));

        matches_name
            && after_solidus[name.len()..]
                .chars()
                .next()
                .is_some_and(|c| Self::is_whitespace_char(c) || c == '/' || c == '>')
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state... if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error and the new attribute must be
    /// removed from the token."
    ///
    /// NOTE: We report the error but keep the attribute. Queries see every
    /// attribute in source order and decide for themselves which one wins.
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);

        if is_duplicate {
            self.log_parse_error("duplicate-attribute");
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records a parse error and logs it through the ladle-common warning
    /// system. Parse errors in HTML are not fatal; the tokenizer recovers
    /// and continues.
    pub(super) fn log_parse_error(&mut self, code: &str) {
        let pos = self.current_pos;
        warn_once("HTML Tokenizer", code);
        self.issues.push(ParseIssue::error(
            format!("{code} at position {pos}"),
            self.token_stream.len(),
        ));
    }
}
