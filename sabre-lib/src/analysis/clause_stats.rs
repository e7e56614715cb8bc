/*!

A fixed vector of per-clause search statistics with a bit-exact text form:

```text
( 2,  1,  0, 12,  3,   0)
```

printed as `(%2,%3,%3,%3,%3, %3)` — note the extra space before the last field. Lists pair each
vector with a clause identifier, `<id>:<stats>`, separated by whitespace, and parse into an
identifier-keyed tree.

*/

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use crate::{
  error::Result,
  io::scanner::{Scanner, TokenKind},
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClauseStats {
  pub proof_distance:  u64,
  pub simplify_used:   u64,
  pub simplify_unused: u64,
  pub generate_used:   u64,
  pub generate_unused: u64,
  pub subsumed:        u64,
}

impl ClauseStats {
  /// Parses `( d, su, sn, gu, gn, sub )`.
  pub fn parse(scanner: &mut Scanner) -> Result<ClauseStats> {
    let mut stats = ClauseStats::default();
    scanner.accept(TokenKind::OpenParen)?;
    stats.proof_distance = scanner.accept_pos_int()?;
    scanner.accept(TokenKind::Comma)?;
    stats.simplify_used = scanner.accept_pos_int()?;
    scanner.accept(TokenKind::Comma)?;
    stats.simplify_unused = scanner.accept_pos_int()?;
    scanner.accept(TokenKind::Comma)?;
    stats.generate_used = scanner.accept_pos_int()?;
    scanner.accept(TokenKind::Comma)?;
    stats.generate_unused = scanner.accept_pos_int()?;
    scanner.accept(TokenKind::Comma)?;
    stats.subsumed = scanner.accept_pos_int()?;
    scanner.accept(TokenKind::CloseParen)?;
    Ok(stats)
  }
}

impl Display for ClauseStats {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "({:2},{:3},{:3},{:3},{:3}, {:3})",
      self.proof_distance,
      self.simplify_used,
      self.simplify_unused,
      self.generate_used,
      self.generate_unused,
      self.subsumed
    )
  }
}

/// Parses a whitespace-separated list of `<id>:<stats>` pairs until end of input.
pub fn parse_clause_stats_list(scanner: &mut Scanner) -> Result<BTreeMap<u64, ClauseStats>> {
  let mut list = BTreeMap::new();
  while !scanner.at_eof() {
    let ident = scanner.accept_pos_int()?;
    scanner.accept(TokenKind::Colon)?;
    let stats = ClauseStats::parse(scanner)?;
    list.insert(ident, stats);
  }
  Ok(list)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn print_format_is_exact() {
    let stats = ClauseStats {
      proof_distance:  2,
      simplify_used:   1,
      simplify_unused: 0,
      generate_used:   12,
      generate_unused: 3,
      subsumed:        0,
    };
    assert_eq!(stats.to_string(), "( 2,  1,  0, 12,  3,   0)");
  }

  #[test]
  fn parse_print_round_trip() {
    let stats = ClauseStats {
      proof_distance:  4,
      simplify_used:   123,
      simplify_unused: 5,
      generate_used:   0,
      generate_unused: 999,
      subsumed:        37,
    };
    let printed = stats.to_string();
    let mut scanner = Scanner::new("stats", &printed);
    let reparsed = ClauseStats::parse(&mut scanner).unwrap();
    assert_eq!(reparsed, stats);
    assert!(scanner.at_eof());
  }

  #[test]
  fn list_parses_into_keyed_tree() {
    let input = "3:( 1,  0,  0,  2,  0,   0)\n7:( 0,  5,  1,  0,  0,   2)";
    let mut scanner = Scanner::new("stats", input);
    let list = parse_clause_stats_list(&mut scanner).unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[&3].generate_used, 2);
    assert_eq!(list[&7].subsumed, 2);
  }

  #[test]
  fn malformed_stats_is_syntax_error() {
    let mut scanner = Scanner::new("stats", "(1, 2, 3)");
    assert!(ClauseStats::parse(&mut scanner).is_err());
  }
}
