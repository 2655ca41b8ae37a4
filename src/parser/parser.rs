//! Recursive descent parser for AL objects
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: members the
//! analyzers never inspect (keys, triggers, procedures, ...) are kept as
//! opaque `SECTION` nodes.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse AL source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    /// Index of the first token at nesting depth 0 that is one of `stops`
    /// or an unmatched closing delimiter.
    fn scan_to(&self, stops: &[SyntaxKind]) -> usize {
        let mut depth = 0usize;
        let mut idx = self.pos;
        while let Some(token) = self.tokens.get(idx) {
            match token.kind {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    if depth == 0 {
                        return idx;
                    }
                    depth -= 1;
                }
                kind if depth == 0 && stops.contains(&kind) => return idx,
                _ => {}
            }
            idx += 1;
        }
        idx
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Comments on the same line after a terminator belong to the node it
    /// ends. Whitespace not followed by a comment stays outside.
    fn bump_trailing_trivia(&mut self) {
        let last_comment = self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .take_while(|t| t.kind == SyntaxKind::WHITESPACE || t.kind.is_comment())
            .enumerate()
            .filter(|(_, t)| t.kind.is_comment())
            .map(|(offset, _)| offset)
            .last();
        if let Some(offset) = last_comment {
            for _ in 0..=offset {
                self.bump();
            }
        }
    }

    /// Wrap tokens up to (not including) `stops` in a node of `kind`,
    /// leaving trailing trivia outside of it.
    fn bump_delimited(&mut self, kind: SyntaxKind, stops: &[SyntaxKind]) -> bool {
        let end = self.scan_to(stops);
        let last = (self.pos..end)
            .rev()
            .find(|&idx| !self.tokens[idx].kind.is_trivia());
        self.start_node(kind);
        if let Some(last) = last {
            while self.pos <= last {
                self.bump();
            }
        }
        self.finish_node();
        last.is_some()
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: fn(SyntaxKind) -> bool) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        self.bump();
        while !self.at_eof() && !recovery(self.current_kind()) {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = Object*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            if self.current_kind().is_object_keyword() {
                self.parse_object();
            } else {
                self.error_recover("expected object declaration", SyntaxKind::is_object_keyword);
            }
        }

        self.finish_node();
    }

    /// Object = ObjectKw Integer? Name ExtendsClause? ObjectBody
    fn parse_object(&mut self) {
        self.start_node(SyntaxKind::OBJECT);
        self.bump();
        self.skip_trivia();

        if !self.eat(SyntaxKind::INTEGER) {
            self.error("expected object id");
        }
        self.skip_trivia();
        self.parse_name();
        self.skip_trivia();

        if self.at(SyntaxKind::EXTENDS_KW) {
            self.start_node(SyntaxKind::EXTENDS_CLAUSE);
            self.bump();
            self.skip_trivia();
            self.parse_name();
            self.finish_node();
            self.skip_trivia();
        }

        if self.at(SyntaxKind::L_BRACE) {
            self.parse_object_body();
        } else {
            self.error("expected '{'");
        }

        self.finish_node();
    }

    /// Name = Ident | QuotedIdent
    fn parse_name(&mut self) -> bool {
        if self.current_kind().is_ident_like() {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
            true
        } else {
            self.error("expected name");
            false
        }
    }

    /// ObjectBody = '{' (Property | FieldsSection | Section)* '}'
    fn parse_object_body(&mut self) {
        self.start_node(SyntaxKind::OBJECT_BODY);
        self.bump();

        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error("expected '}'");
                break;
            }
            if self.eat(SyntaxKind::R_BRACE) {
                break;
            }
            match self.current_kind() {
                SyntaxKind::FIELDS_KW if self.nth(1) == SyntaxKind::L_BRACE => {
                    self.parse_fields_section()
                }
                kind if kind.is_ident_like() && self.nth(1) == SyntaxKind::EQ => {
                    self.parse_property()
                }
                _ => self.parse_section(),
            }
        }

        self.finish_node();
    }

    /// FieldsSection = 'fields' '{' (Field | Section)* '}'
    fn parse_fields_section(&mut self) {
        self.start_node(SyntaxKind::FIELDS_SECTION);
        self.bump();
        self.skip_trivia();
        self.expect(SyntaxKind::L_BRACE);

        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error("expected '}'");
                break;
            }
            if self.eat(SyntaxKind::R_BRACE) {
                break;
            }
            if self.at(SyntaxKind::FIELD_KW) {
                self.parse_field();
            } else {
                self.parse_section();
            }
        }

        self.finish_node();
    }

    /// Field = 'field' '(' Integer ';' Name ';' DataType ')' PropertyList
    fn parse_field(&mut self) {
        self.start_node(SyntaxKind::FIELD);
        self.bump();
        self.skip_trivia();

        if self.expect(SyntaxKind::L_PAREN) {
            self.skip_trivia();
            if !self.eat(SyntaxKind::INTEGER) {
                self.error("expected field number");
            }
            self.skip_trivia();
            self.expect(SyntaxKind::SEMICOLON);
            self.skip_trivia();
            self.parse_name();
            self.skip_trivia();
            self.expect(SyntaxKind::SEMICOLON);
            self.skip_trivia();
            if !self.bump_delimited(SyntaxKind::DATA_TYPE, &[SyntaxKind::SEMICOLON]) {
                self.error("expected data type");
            }
            self.skip_trivia();
            self.expect(SyntaxKind::R_PAREN);
        }

        self.skip_trivia();
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_property_list();
        } else {
            self.error("expected property list");
        }

        self.finish_node();
    }

    /// PropertyList = '{' (Property | Section)* '}'
    fn parse_property_list(&mut self) {
        self.start_node(SyntaxKind::PROPERTY_LIST);
        self.bump();

        loop {
            self.skip_trivia();
            if self.at_eof() {
                self.error("expected '}'");
                break;
            }
            if self.eat(SyntaxKind::R_BRACE) {
                break;
            }
            if self.current_kind().is_ident_like() && self.nth(1) == SyntaxKind::EQ {
                self.parse_property();
            } else {
                self.parse_section();
            }
        }

        self.finish_node();
    }

    /// Property = Ident '=' PropertyValue ';' TrailingTrivia
    fn parse_property(&mut self) {
        self.start_node(SyntaxKind::PROPERTY);
        self.bump();
        self.skip_trivia();
        self.bump();
        self.skip_trivia();

        if !self.bump_delimited(SyntaxKind::PROPERTY_VALUE, &[SyntaxKind::SEMICOLON]) {
            self.error("expected property value");
        }
        self.skip_trivia();
        if self.expect(SyntaxKind::SEMICOLON) {
            self.bump_trailing_trivia();
        }

        self.finish_node();
    }

    /// Opaque member: balanced tokens up to a closing brace or a top-level
    /// `;` outside of `begin`/`end` blocks.
    fn parse_section(&mut self) {
        if matches!(
            self.current_kind(),
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET
        ) {
            self.error_recover("unexpected closing delimiter", |kind| {
                !matches!(kind, SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET)
            });
            return;
        }

        self.start_node(SyntaxKind::SECTION);
        let mut depth = 0usize;
        let mut blocks = 0usize;

        while let Some(token) = self.current() {
            let kind = token.kind;
            match kind {
                SyntaxKind::L_BRACE | SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => depth += 1,
                SyntaxKind::R_BRACE | SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                    if depth == 0 && blocks == 0 && kind == SyntaxKind::R_BRACE {
                        break;
                    }
                    continue;
                }
                SyntaxKind::SEMICOLON if depth == 0 && blocks == 0 => {
                    self.bump();
                    break;
                }
                SyntaxKind::IDENT => {
                    if token.text.eq_ignore_ascii_case("begin")
                        || token.text.eq_ignore_ascii_case("case")
                    {
                        blocks += 1;
                    } else if token.text.eq_ignore_ascii_case("end") {
                        blocks = blocks.saturating_sub(1);
                    }
                }
                _ => {}
            }
            self.bump();
        }

        self.finish_node();
    }
}
