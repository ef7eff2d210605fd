//! Statement-level YANG reader
//!
//! Tokenizes the generic statement grammar of RFC 7950 section 6 (keywords,
//! unquoted/quoted arguments, `+` concatenation, comments, blocks) and builds
//! a [`Statement`] tree. No semantic validation is performed.

use std::path::Path;

use crate::features::parsing::domain::{Statement, StatementTree};
use crate::features::parsing::ports::{ParseError, ParseResult, Parser};

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Word(String),
    Quoted(String),
    Semicolon,
    OpenBrace,
    CloseBrace,
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            TokenKind::Word(w) => format!("'{}'", w),
            TokenKind::Quoted(_) => "quoted string".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::OpenBrace => "'{'".to_string(),
            TokenKind::CloseBrace => "'}'".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let Some(c) = self.peek() else { break };
            let line = self.line;
            let kind = match c {
                ';' => {
                    self.bump();
                    TokenKind::Semicolon
                }
                '{' => {
                    self.bump();
                    TokenKind::OpenBrace
                }
                '}' => {
                    self.bump();
                    TokenKind::CloseBrace
                }
                '"' => TokenKind::Quoted(self.double_quoted()?),
                '\'' => TokenKind::Quoted(self.single_quoted()?),
                _ => TokenKind::Word(self.word()),
            };
            tokens.push(Token { kind, line });
        }
        Ok(tokens)
    }

    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.line;
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some('*'), Some('/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => {
                                self.bump();
                            }
                            (None, _) => {
                                return Err(ParseError::syntax(start, "unterminated block comment"))
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn word(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ';' | '{' | '}' | '"' | '\'') {
                break;
            }
            if c == '/' && matches!(self.peek_at(1), Some('/') | Some('*')) {
                break;
            }
            out.push(c);
            self.bump();
        }
        out
    }

    fn double_quoted(&mut self) -> ParseResult<String> {
        let start = self.line;
        // Continuation lines are de-indented up to the column after the quote
        let indent = self.column + 1;
        self.bump();
        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(ParseError::syntax(start, "unterminated double-quoted string"));
            };
            match c {
                '"' => break,
                '\\' => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => {
                        return Err(ParseError::syntax(start, "unterminated double-quoted string"))
                    }
                },
                '\n' => {
                    let trimmed = out.trim_end_matches([' ', '\t']).len();
                    out.truncate(trimmed);
                    out.push('\n');
                    self.skip_indent(indent);
                }
                other => out.push(other),
            }
        }
        Ok(out)
    }

    fn skip_indent(&mut self, indent: usize) {
        let mut skipped = 0;
        while skipped < indent {
            match self.peek() {
                Some(' ') => {
                    self.bump();
                    skipped += 1;
                }
                Some('\t') => {
                    self.bump();
                    skipped += 8;
                }
                _ => break,
            }
        }
    }

    fn single_quoted(&mut self) -> ParseResult<String> {
        let start = self.line;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\'') => break,
                Some(c) => out.push(c),
                None => {
                    return Err(ParseError::syntax(start, "unterminated single-quoted string"))
                }
            }
        }
        Ok(out)
    }
}

struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenCursor {
    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map(|t| t.line).unwrap_or(1)
    }

    fn statement(&mut self) -> ParseResult<Statement> {
        let token = self
            .next()
            .ok_or_else(|| ParseError::syntax(self.last_line(), "unexpected end of input"))?;
        let keyword = match token.kind {
            TokenKind::Word(word) => word,
            other => {
                return Err(ParseError::syntax(
                    token.line,
                    format!("expected keyword, found {}", other.describe()),
                ))
            }
        };
        let mut statement = Statement::new(keyword, token.line);

        if matches!(
            self.peek_kind(),
            Some(TokenKind::Word(_)) | Some(TokenKind::Quoted(_))
        ) {
            statement.argument = Some(self.argument()?);
        }

        let terminator = self.next().ok_or_else(|| {
            ParseError::syntax(
                self.last_line(),
                format!("statement '{}' is not terminated", statement.keyword),
            )
        })?;
        match terminator.kind {
            TokenKind::Semicolon => Ok(statement),
            TokenKind::OpenBrace => {
                loop {
                    match self.peek_kind() {
                        Some(TokenKind::CloseBrace) => {
                            self.next();
                            break;
                        }
                        None => {
                            return Err(ParseError::syntax(
                                statement.line,
                                format!("missing '}}' for statement '{}'", statement.keyword),
                            ))
                        }
                        _ => {
                            let child = self.statement()?;
                            statement.children.push(child);
                        }
                    }
                }
                Ok(statement)
            }
            other => Err(ParseError::syntax(
                terminator.line,
                format!("expected ';' or '{{', found {}", other.describe()),
            )),
        }
    }

    fn argument(&mut self) -> ParseResult<String> {
        let token = self
            .next()
            .ok_or_else(|| ParseError::syntax(self.last_line(), "missing argument"))?;
        match token.kind {
            TokenKind::Word(word) => Ok(word),
            TokenKind::Quoted(mut text) => {
                while matches!(self.peek_kind(), Some(TokenKind::Word(w)) if w == "+")
                    && matches!(self.peek_kind_at(1), Some(TokenKind::Quoted(_)))
                {
                    self.next();
                    if let Some(Token {
                        kind: TokenKind::Quoted(next),
                        ..
                    }) = self.next()
                    {
                        text.push_str(&next);
                    }
                }
                Ok(text)
            }
            other => Err(ParseError::syntax(
                token.line,
                format!("expected argument, found {}", other.describe()),
            )),
        }
    }
}

/// Default [`Parser`] adapter
#[derive(Debug, Default, Clone, Copy)]
pub struct YangStatementParser;

impl YangStatementParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for YangStatementParser {
    fn parse(&self, source: &str, file_path: &Path) -> ParseResult<StatementTree> {
        let tokens = Lexer::new(source).tokenize()?;
        if tokens.is_empty() {
            return Err(ParseError::syntax(1, "empty document"));
        }
        let mut cursor = TokenCursor { tokens, pos: 0 };
        let root = cursor.statement()?;
        if let Some(token) = cursor.next() {
            return Err(ParseError::syntax(
                token.line,
                format!(
                    "unexpected {} after '{}' statement",
                    token.kind.describe(),
                    root.keyword
                ),
            ));
        }
        Ok(StatementTree::new(root, file_path))
    }

    fn name(&self) -> &'static str {
        "yang-statement"
    }
}
