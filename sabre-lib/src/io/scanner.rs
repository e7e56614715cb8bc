/*!

Token scanner for the structured formats the core reads: clause statistics, annotations,
file-variable lists, axiom-filter specifications, precedence and weight declarations, and PCL
listings. The full problem-source parsers (TPTP/LOP) live outside the core; this scanner only
covers the token shapes those formats need.

Tokens carry their source position so syntax and semantic errors can report
`source:line:column`. `#` and `%` start comments running to the end of the line.

*/

use crate::error::{Error, Result, SourcePos};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
  Ident,
  PosInt,
  Float,
  OpenParen,
  CloseParen,
  OpenBracket,
  CloseBracket,
  Comma,
  Colon,
  Semicolon,
  EqualSign,
  LesserSign,
  GreaterSign,
  /// `++`, the positive-literal marker.
  PlusPlus,
  /// `--`, the negative-literal marker.
  MinusMinus,
  Eof,
}

impl TokenKind {
  pub fn describe(self) -> &'static str {
    match self {
      TokenKind::Ident        => "identifier",
      TokenKind::PosInt       => "positive integer",
      TokenKind::Float        => "number",
      TokenKind::OpenParen    => "'('",
      TokenKind::CloseParen   => "')'",
      TokenKind::OpenBracket  => "'['",
      TokenKind::CloseBracket => "']'",
      TokenKind::Comma        => "','",
      TokenKind::Colon        => "':'",
      TokenKind::Semicolon    => "';'",
      TokenKind::EqualSign    => "'='",
      TokenKind::LesserSign   => "'<'",
      TokenKind::GreaterSign  => "'>'",
      TokenKind::PlusPlus     => "'++'",
      TokenKind::MinusMinus   => "'--'",
      TokenKind::Eof          => "end of input",
    }
  }
}

#[derive(Clone, Debug)]
pub struct Token {
  pub kind:  TokenKind,
  pub text:  String,
  /// Numeric value for `PosInt` tokens; 0 otherwise.
  pub value: u64,
  pub pos:   SourcePos,
}

pub struct Scanner {
  chars:  Vec<char>,
  offset: usize,
  line:   u32,
  column: u32,
  source: String,

  current: Token,
}

impl Scanner {
  pub fn new(source_name: &str, input: &str) -> Scanner {
    let mut scanner = Scanner {
      chars:  input.chars().collect(),
      offset: 0,
      line:   1,
      column: 1,
      source: source_name.to_string(),
      current: Token {
        kind:  TokenKind::Eof,
        text:  String::new(),
        value: 0,
        pos:   SourcePos { source: source_name.to_string(), line: 1, column: 1 },
      },
    };
    scanner.advance();
    scanner
  }

  #[inline(always)]
  pub fn current(&self) -> &Token {
    &self.current
  }

  #[inline(always)]
  pub fn pos(&self) -> SourcePos {
    self.current.pos.clone()
  }

  #[inline(always)]
  pub fn test(&self, kind: TokenKind) -> bool {
    self.current.kind == kind
  }

  pub fn test_any(&self, kinds: &[TokenKind]) -> bool {
    kinds.contains(&self.current.kind)
  }

  #[inline(always)]
  pub fn at_eof(&self) -> bool {
    self.current.kind == TokenKind::Eof
  }

  /// Consumes the current token if it has the expected kind, or fails with a syntax error.
  pub fn accept(&mut self, kind: TokenKind) -> Result<Token> {
    if self.current.kind != kind {
      return Err(self.unexpected(kind.describe()));
    }
    let token = self.current.clone();
    self.advance();
    Ok(token)
  }

  /// Consumes an identifier token with the exact given text.
  pub fn accept_keyword(&mut self, keyword: &str) -> Result<()> {
    if self.current.kind != TokenKind::Ident || self.current.text != keyword {
      return Err(self.unexpected(&format!("'{}'", keyword)));
    }
    self.advance();
    Ok(())
  }

  /// Consumes a `PosInt` and returns its value.
  pub fn accept_pos_int(&mut self) -> Result<u64> {
    let token = self.accept(TokenKind::PosInt)?;
    Ok(token.value)
  }

  /// Consumes a `Float` or `PosInt` and returns its value as a float.
  pub fn accept_float(&mut self) -> Result<f64> {
    if self.test(TokenKind::PosInt) {
      let token = self.accept(TokenKind::PosInt)?;
      return Ok(token.value as f64);
    }
    let token = self.accept(TokenKind::Float)?;
    token.text.parse::<f64>().map_err(|_| {
      Error::syntax(token.pos.clone(), "floating point number", token.text.clone())
    })
  }

  /// A syntax error describing the current token.
  pub fn unexpected(&self, expected: &str) -> Error {
    let found = if self.current.kind == TokenKind::Eof {
      "end of input".to_string()
    } else {
      format!("'{}'", self.current.text)
    };
    Error::syntax(self.current.pos.clone(), expected, found)
  }

  /// Scans the next token into `current`.
  pub fn advance(&mut self) {
    self.skip_trivia();

    let pos = SourcePos {
      source: self.source.clone(),
      line:   self.line,
      column: self.column,
    };

    let Some(&ch) = self.chars.get(self.offset) else {
      self.current = Token { kind: TokenKind::Eof, text: String::new(), value: 0, pos };
      return;
    };

    let (kind, text) = match ch {
      '(' => (TokenKind::OpenParen, self.take(1)),
      ')' => (TokenKind::CloseParen, self.take(1)),
      '[' => (TokenKind::OpenBracket, self.take(1)),
      ']' => (TokenKind::CloseBracket, self.take(1)),
      ',' => (TokenKind::Comma, self.take(1)),
      ':' => (TokenKind::Colon, self.take(1)),
      ';' => (TokenKind::Semicolon, self.take(1)),
      '=' => (TokenKind::EqualSign, self.take(1)),
      '<' => (TokenKind::LesserSign, self.take(1)),
      '>' => (TokenKind::GreaterSign, self.take(1)),
      '+' if self.peek(1) == Some('+') => (TokenKind::PlusPlus, self.take(2)),
      '-' if self.peek(1) == Some('-') => (TokenKind::MinusMinus, self.take(2)),
      '0'..='9' => {
        let text = self.take_while(|c| c.is_ascii_digit());
        if self.peek(0) == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
          let mut text = text;
          text.push_str(&self.take(1));
          text.push_str(&self.take_while(|c| c.is_ascii_digit()));
          if self.peek(0) == Some('e') || self.peek(0) == Some('E') {
            text.push_str(&self.take(1));
            if self.peek(0) == Some('-') || self.peek(0) == Some('+') {
              text.push_str(&self.take(1));
            }
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
          }
          (TokenKind::Float, text)
        } else {
          (TokenKind::PosInt, text)
        }
      }
      c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
        let text = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        (TokenKind::Ident, text)
      }
      _ => {
        // An unknown character becomes a one-character identifier-like token so the caller's
        // accept() produces a positioned syntax error for it.
        let text = self.take(1);
        (TokenKind::Ident, text)
      }
    };

    let value = if kind == TokenKind::PosInt {
      text.parse::<u64>().unwrap_or(u64::MAX)
    } else {
      0
    };

    self.current = Token { kind, text, value, pos };
  }

  fn skip_trivia(&mut self) {
    loop {
      match self.chars.get(self.offset) {
        Some(&c) if c.is_whitespace() => {
          self.step();
        }
        Some(&('#' | '%')) => {
          while let Some(&c) = self.chars.get(self.offset) {
            self.step();
            if c == '\n' {
              break;
            }
          }
        }
        _ => return,
      }
    }
  }

  fn peek(&self, ahead: usize) -> Option<char> {
    self.chars.get(self.offset + ahead).copied()
  }

  fn take(&mut self, count: usize) -> String {
    let mut text = String::new();
    for _ in 0..count {
      if let Some(&c) = self.chars.get(self.offset) {
        text.push(c);
        self.step();
      }
    }
    text
  }

  fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
    let mut text = String::new();
    while let Some(&c) = self.chars.get(self.offset) {
      if !predicate(c) {
        break;
      }
      text.push(c);
      self.step();
    }
    text
  }

  fn step(&mut self) {
    if let Some(&c) = self.chars.get(self.offset) {
      self.offset += 1;
      if c == '\n' {
        self.line += 1;
        self.column = 1;
      } else {
        self.column += 1;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tokens_and_positions() {
    let mut scanner = Scanner::new("test", "foo(12, 3.5) # comment\n++bar");
    assert!(scanner.test(TokenKind::Ident));
    assert_eq!(scanner.current().text, "foo");
    assert_eq!(scanner.pos().line, 1);

    scanner.accept(TokenKind::Ident).unwrap();
    scanner.accept(TokenKind::OpenParen).unwrap();
    assert_eq!(scanner.accept_pos_int().unwrap(), 12);
    scanner.accept(TokenKind::Comma).unwrap();
    assert_eq!(scanner.accept_float().unwrap(), 3.5);
    scanner.accept(TokenKind::CloseParen).unwrap();

    assert!(scanner.test(TokenKind::PlusPlus));
    assert_eq!(scanner.pos().line, 2);
    scanner.accept(TokenKind::PlusPlus).unwrap();
    scanner.accept(TokenKind::Ident).unwrap();
    assert!(scanner.at_eof());
  }

  #[test]
  fn unexpected_token_is_a_syntax_error() {
    let mut scanner = Scanner::new("test", "abc");
    let err = scanner.accept(TokenKind::PosInt).unwrap_err();
    match err {
      Error::Syntax { pos, .. } => {
        assert_eq!(pos.source, "test");
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
      }
      other => panic!("expected syntax error, got {:?}", other),
    }
  }

  #[test]
  fn integers_and_floats_are_distinguished() {
    let mut scanner = Scanner::new("test", "7 7.0 7.25e-1");
    assert_eq!(scanner.accept_pos_int().unwrap(), 7);
    assert_eq!(scanner.accept_float().unwrap(), 7.0);
    assert_eq!(scanner.accept_float().unwrap(), 0.725);
  }
}
