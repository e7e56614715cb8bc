/*!

File variables: `<ident> = <value>;` lists, with comments allowed between entries. New
definitions overwrite old ones. Values are stored as the raw token text between `=` and `;`;
typed access is provided by the getters, and a missing required variable is a semantic error.

*/

use sabre_abs::HashMap;

use crate::{
  error::{Error, Result, SourcePos},
  io::scanner::{Scanner, TokenKind},
};

#[derive(Clone, Debug, Default)]
pub struct FileVars {
  vars: HashMap<String, String>,
}

impl FileVars {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.vars.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }

  /// Parses definitions until end of input; returns the number of variables read.
  pub fn parse(&mut self, scanner: &mut Scanner) -> Result<usize> {
    let mut count = 0;
    while !scanner.at_eof() {
      let name = scanner.accept(TokenKind::Ident)?.text;
      scanner.accept(TokenKind::EqualSign)?;

      let mut value = String::new();
      while !scanner.test(TokenKind::Semicolon) {
        if scanner.at_eof() {
          return Err(scanner.unexpected("';'"));
        }
        value.push_str(&scanner.current().text);
        scanner.advance();
      }
      scanner.accept(TokenKind::Semicolon)?;

      self.vars.insert(name, value);
      count += 1;
    }
    Ok(count)
  }

  #[inline(always)]
  pub fn get(&self, name: &str) -> Option<&str> {
    self.vars.get(name).map(String::as_str)
  }

  /// A required variable; missing is a semantic error attributed to `pos`.
  pub fn get_required(&self, name: &str, pos: &SourcePos) -> Result<&str> {
    self
        .get(name)
        .ok_or_else(|| Error::semantic(pos.clone(), format!("required file variable {} missing", name)))
  }

  /// A boolean-valued variable; values are the literals `true` and `false`.
  pub fn get_bool(&self, name: &str, pos: &SourcePos) -> Result<bool> {
    match self.get_required(name, pos)? {
      "true" => Ok(true),
      "false" => Ok(false),
      other => Err(Error::semantic(
        pos.clone(),
        format!("file variable {} should be true or false, not {}", name, other),
      )),
    }
  }

  pub fn get_int(&self, name: &str, pos: &SourcePos) -> Result<i64> {
    let value = self.get_required(name, pos)?;
    value.parse::<i64>().map_err(|_| {
      Error::semantic(
        pos.clone(),
        format!("file variable {} should be an integer, not {}", name, value),
      )
    })
  }

  pub fn print(&self) -> String {
    let mut names: Vec<&String> = self.vars.keys().collect();
    names.sort();
    let mut out = String::new();
    for name in names {
      out.push_str(name);
      out.push('=');
      out.push_str(&self.vars[name]);
      out.push_str(";\n");
    }
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_overwrite_and_getters() {
    let mut scanner = Scanner::new(
      "vars",
      "# generated\nlimit = 300;\nverbose = true;\nlimit = 400;\n",
    );
    let mut vars = FileVars::new();
    assert_eq!(vars.parse(&mut scanner).unwrap(), 3);
    assert_eq!(vars.len(), 2);

    let pos = scanner.pos();
    assert_eq!(vars.get_int("limit", &pos).unwrap(), 400);
    assert!(vars.get_bool("verbose", &pos).unwrap());
  }

  #[test]
  fn missing_required_is_semantic() {
    let vars = FileVars::new();
    let pos = SourcePos { source: "vars".into(), line: 1, column: 1 };
    let err = vars.get_required("absent", &pos).unwrap_err();
    assert!(matches!(err, Error::Semantic { .. }));
  }

  #[test]
  fn round_trip() {
    let mut scanner = Scanner::new("vars", "a=1;b=true;");
    let mut vars = FileVars::new();
    vars.parse(&mut scanner).unwrap();

    let printed = vars.print();
    let mut reparsed = FileVars::new();
    let mut scanner = Scanner::new("vars2", &printed);
    reparsed.parse(&mut scanner).unwrap();
    assert_eq!(reparsed.get("a"), Some("1"));
    assert_eq!(reparsed.get("b"), Some("true"));
  }
}
