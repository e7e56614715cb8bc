/*!

The ordering control block: the immutable bundle of kind + precedence + weights that defines a
term ordering.

Precedence is a total linear order over function codes. A freshly created OCB orders symbols by
code; parsed precedence constraints (`f > g = h, a < b`) are inserted incrementally into a
relation matrix whose transitive closure is maintained, an incompatible constraint being a
semantic error. After constraint insertion the total order is re-derived, breaking remaining ties
by code.

*/

use std::cmp::Ordering;

use crate::{
  error::{Error, Result, SourcePos},
  io::scanner::{Scanner, TokenKind},
  terms::Signature,
  FunCode,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderingKind {
  Lpo,
  /// LPO without sharing-based shortcuts, safe while the term graph is being mutated.
  LpoCopy,
  Kbo,
  /// The linear-time balanced KBO variant; decides the same ordering as [`OrderingKind::Kbo`].
  Kbo6,
}

/// Default weight assigned to every symbol until changed.
pub const W_DEFAULT_WEIGHT: i64 = 1;

/// Relation matrix entries for incremental precedence constraints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PrecRelation {
  Unknown,
  Greater,
  Less,
  Equal,
}

pub struct Ocb {
  pub kind: OrderingKind,

  /// Total precedence: `rank[code - 1]`; larger rank = greater symbol.
  ranks: Vec<i64>,
  /// Per-symbol weights, `weights[code - 1]`.
  weights: Vec<i64>,
  pub var_weight: i64,

  /// Pairwise constraint closure; only allocated once a constraint is inserted.
  constraints: Option<Vec<PrecRelation>>,
  sig_size:    usize,
}

impl Ocb {
  /// Creates an OCB over the current signature with default weights and code-ordered
  /// precedence.
  pub fn new(kind: OrderingKind, sig: &Signature) -> Self {
    let sig_size = sig.size();
    Ocb {
      kind,
      ranks: (0..sig_size as i64).collect(),
      weights: vec![W_DEFAULT_WEIGHT; sig_size],
      var_weight: W_DEFAULT_WEIGHT,
      constraints: None,
      sig_size,
    }
  }

  #[inline(always)]
  fn slot(&self, code: FunCode) -> usize {
    debug_assert!(code.is_function());
    debug_assert!((code.0 as usize) <= self.sig_size, "symbol created after OCB");
    (code.0 - 1) as usize
  }

  // region Precedence

  #[inline(always)]
  pub fn precedence_rank(&self, code: FunCode) -> i64 {
    self.ranks[self.slot(code)]
  }

  pub fn set_precedence_rank(&mut self, code: FunCode, rank: i64) {
    let slot = self.slot(code);
    self.ranks[slot] = rank;
  }

  /// Compares two symbols in the precedence.
  #[inline(always)]
  pub fn compare_precedence(&self, f: FunCode, g: FunCode) -> Ordering {
    self.ranks[self.slot(f)].cmp(&self.ranks[self.slot(g)])
  }

  /// Inserts `f rel g` into the precedence constraints and re-derives the total order. An
  /// incompatible constraint is a semantic error at `pos`.
  pub fn add_precedence_constraint(
    &mut self,
    f: FunCode,
    g: FunCode,
    relation: Ordering,
    pos: &SourcePos,
  ) -> Result<()> {
    let n = self.sig_size;
    if self.constraints.is_none() {
      self.constraints = Some(vec![PrecRelation::Unknown; n * n]);
    }

    let wanted = match relation {
      Ordering::Greater => PrecRelation::Greater,
      Ordering::Less    => PrecRelation::Less,
      Ordering::Equal   => PrecRelation::Equal,
    };
    if !self.constrain(self.slot(f), self.slot(g), wanted) {
      return Err(Error::semantic(
        pos.clone(),
        "precedence incompatible with previous ordering".to_string(),
      ));
    }
    self.close_constraints(pos)?;
    self.rederive_ranks();
    Ok(())
  }

  fn relation(&self, i: usize, j: usize) -> PrecRelation {
    match &self.constraints {
      None => PrecRelation::Unknown,
      Some(matrix) => matrix[i * self.sig_size + j],
    }
  }

  /// Records `i rel j` (and its inverse); false on direct conflict.
  fn constrain(&mut self, i: usize, j: usize, relation: PrecRelation) -> bool {
    let existing = self.relation(i, j);
    if existing == relation {
      return true;
    }
    if existing != PrecRelation::Unknown {
      return false;
    }
    if i == j && relation != PrecRelation::Equal {
      return false;
    }

    let inverse = match relation {
      PrecRelation::Greater => PrecRelation::Less,
      PrecRelation::Less    => PrecRelation::Greater,
      other => other,
    };
    let n = self.sig_size;
    let matrix = self.constraints.as_mut().unwrap();
    matrix[i * n + j] = relation;
    matrix[j * n + i] = inverse;
    true
  }

  /// Recomputes the transitive closure to a fixpoint, failing on any derived conflict.
  fn close_constraints(&mut self, pos: &SourcePos) -> Result<()> {
    let n = self.sig_size;
    let mut changed = true;
    while changed {
      changed = false;
      for i in 0..n {
        for j in 0..n {
          let r1 = self.relation(i, j);
          if r1 == PrecRelation::Unknown {
            continue;
          }
          for k in 0..n {
            let r2 = self.relation(j, k);
            let Some(derived) = combine_relations(r1, r2) else { continue };
            let existing = self.relation(i, k);
            if existing == derived {
              continue;
            }
            if existing != PrecRelation::Unknown || !self.constrain(i, k, derived) {
              return Err(Error::semantic(
                pos.clone(),
                "precedence incompatible with previous ordering".to_string(),
              ));
            }
            changed = true;
          }
        }
      }
    }
    Ok(())
  }

  /// Re-derives total ranks from the constraint closure: repeatedly peel off the minimal
  /// symbols, keeping code order among incomparable ones and sharing ranks among equals.
  fn rederive_ranks(&mut self) {
    let n = self.sig_size;
    let mut assigned = vec![false; n];
    let mut next_rank = 0i64;

    while assigned.iter().any(|&done| !done) {
      // A symbol is minimal if no unassigned symbol is strictly below it.
      let minimal: Vec<usize> = (0..n)
          .filter(|&i| !assigned[i])
          .filter(|&i| {
            (0..n).all(|j| assigned[j] || self.relation(i, j) != PrecRelation::Greater)
          })
          .collect();
      debug_assert!(!minimal.is_empty(), "constraint closure contains a cycle");

      // The lowest-coded minimal symbol and everything constrained equal to it share a rank.
      let seed = minimal[0];
      for &i in minimal.iter() {
        if i == seed || self.relation(seed, i) == PrecRelation::Equal {
          self.ranks[i] = next_rank;
          assigned[i] = true;
        }
      }
      next_rank += 1;
    }
  }

  // endregion

  // region Weights

  #[inline(always)]
  pub fn weight(&self, code: FunCode) -> i64 {
    self.weights[self.slot(code)]
  }

  pub fn set_weight(&mut self, code: FunCode, weight: i64) {
    let slot = self.slot(code);
    self.weights[slot] = weight;
  }

  /// KBO admissibility: positive variable weight, and every unary symbol weighs at least as much
  /// as a variable.
  pub fn kbo_admissible(&self, sig: &Signature) -> bool {
    if self.var_weight <= 0 {
      return false;
    }
    sig
        .iter_codes()
        .filter(|&code| sig.arity(code) == 1)
        .all(|code| self.weight(code) >= self.var_weight)
  }

  // endregion

  // region Parsing

  /// Parses a precedence: comma-separated chains of `f > g = h` constraints over known symbols.
  pub fn parse_precedence(&mut self, scanner: &mut Scanner, sig: &Signature) -> Result<()> {
    if scanner.test(TokenKind::Ident) {
      self.parse_precedence_chain(scanner, sig)?;
      while scanner.test(TokenKind::Comma) {
        scanner.accept(TokenKind::Comma)?;
        self.parse_precedence_chain(scanner, sig)?;
      }
    }
    Ok(())
  }

  fn parse_precedence_chain(&mut self, scanner: &mut Scanner, sig: &Signature) -> Result<()> {
    let mut f = parse_known_symbol(scanner, sig)?;
    while scanner.test_any(&[TokenKind::GreaterSign, TokenKind::LesserSign, TokenKind::EqualSign]) {
      let relation = parse_comparison_symbol(scanner)?;
      let pos = scanner.pos();
      let g = parse_known_symbol(scanner, sig)?;
      self.add_precedence_constraint(f, g, relation, &pos)?;
      f = g;
    }
    Ok(())
  }

  /// Parses a comma-separated list of `f:w` weight declarations; returns the number parsed.
  pub fn parse_weights(&mut self, scanner: &mut Scanner, sig: &Signature) -> Result<usize> {
    let mut count = 0;
    if scanner.test(TokenKind::Ident) {
      self.parse_weight_declaration(scanner, sig)?;
      count += 1;
      while scanner.test(TokenKind::Comma) {
        scanner.accept(TokenKind::Comma)?;
        self.parse_weight_declaration(scanner, sig)?;
        count += 1;
      }
    }
    Ok(count)
  }

  fn parse_weight_declaration(&mut self, scanner: &mut Scanner, sig: &Signature) -> Result<()> {
    let code = parse_known_symbol(scanner, sig)?;
    scanner.accept(TokenKind::Colon)?;
    let weight = scanner.accept_pos_int()? as i64;
    self.set_weight(code, weight * W_DEFAULT_WEIGHT);
    Ok(())
  }

  // endregion
}

fn combine_relations(r1: PrecRelation, r2: PrecRelation) -> Option<PrecRelation> {
  use PrecRelation::*;
  match (r1, r2) {
    (Greater, Greater) | (Greater, Equal) | (Equal, Greater) => Some(Greater),
    (Less, Less) | (Less, Equal) | (Equal, Less) => Some(Less),
    (Equal, Equal) => Some(Equal),
    _ => None,
  }
}

/// Parses an identifier that must already be interned in the signature.
fn parse_known_symbol(scanner: &mut Scanner, sig: &Signature) -> Result<FunCode> {
  let pos = scanner.pos();
  let token = scanner.accept(TokenKind::Ident)?;
  sig
      .find(&token.text)
      .ok_or_else(|| Error::semantic(pos, format!("{} is not a known symbol", token.text)))
}

/// Parses one of `<`, `>`, `=` into the corresponding comparison result.
fn parse_comparison_symbol(scanner: &mut Scanner) -> Result<Ordering> {
  if scanner.test(TokenKind::GreaterSign) {
    scanner.accept(TokenKind::GreaterSign)?;
    Ok(Ordering::Greater)
  } else if scanner.test(TokenKind::LesserSign) {
    scanner.accept(TokenKind::LesserSign)?;
    Ok(Ordering::Less)
  } else if scanner.test(TokenKind::EqualSign) {
    scanner.accept(TokenKind::EqualSign)?;
    Ok(Ordering::Equal)
  } else {
    Err(scanner.unexpected("one of '<', '>', '='"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::terms::{ProblemType, TermBank};

  fn bank_with_symbols() -> (TermBank, FunCode, FunCode, FunCode) {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let f = bank.mk_symbol("f", 1);
    let g = bank.mk_symbol("g", 1);
    let a = bank.mk_symbol("a", 0);
    (bank, f, g, a)
  }

  #[test]
  fn default_precedence_is_total() {
    let (bank, f, g, a) = bank_with_symbols();
    let ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);

    assert_eq!(ocb.compare_precedence(f, g), Ordering::Less);
    assert_eq!(ocb.compare_precedence(g, a), Ordering::Less);
    assert_eq!(ocb.compare_precedence(f, f), Ordering::Equal);
  }

  #[test]
  fn parsed_constraints_override_default() {
    let (bank, f, g, a) = bank_with_symbols();
    let mut ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);

    let mut scanner = Scanner::new("prec", "f > g > a");
    ocb.parse_precedence(&mut scanner, &bank.sig).unwrap();
    assert!(scanner.at_eof());

    assert_eq!(ocb.compare_precedence(f, g), Ordering::Greater);
    assert_eq!(ocb.compare_precedence(g, a), Ordering::Greater);
    assert_eq!(ocb.compare_precedence(f, a), Ordering::Greater);
  }

  #[test]
  fn equal_chains_share_rank() {
    let (bank, f, g, a) = bank_with_symbols();
    let mut ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);

    let mut scanner = Scanner::new("prec", "f = g, f > a");
    ocb.parse_precedence(&mut scanner, &bank.sig).unwrap();

    assert_eq!(ocb.compare_precedence(f, g), Ordering::Equal);
    assert_eq!(ocb.compare_precedence(g, a), Ordering::Greater);
  }

  #[test]
  fn incompatible_constraint_is_semantic_error() {
    let (bank, ..) = bank_with_symbols();
    let mut ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);

    let mut scanner = Scanner::new("prec", "f > g, g > a, a > f");
    let err = ocb.parse_precedence(&mut scanner, &bank.sig).unwrap_err();
    assert!(matches!(err, Error::Semantic { .. }));
  }

  #[test]
  fn unknown_symbol_is_semantic_error() {
    let (bank, ..) = bank_with_symbols();
    let mut ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);

    let mut scanner = Scanner::new("prec", "f > mystery");
    let err = ocb.parse_precedence(&mut scanner, &bank.sig).unwrap_err();
    assert!(matches!(err, Error::Semantic { .. }));
  }

  #[test]
  fn weights_parse_and_admissibility() {
    let (bank, f, g, _) = bank_with_symbols();
    let mut ocb = Ocb::new(OrderingKind::Kbo, &bank.sig);

    let mut scanner = Scanner::new("weights", "f:3, g:2");
    assert_eq!(ocb.parse_weights(&mut scanner, &bank.sig).unwrap(), 2);
    assert_eq!(ocb.weight(f), 3);
    assert_eq!(ocb.weight(g), 2);
    assert!(ocb.kbo_admissible(&bank.sig));

    ocb.set_weight(f, 0);
    assert!(!ocb.kbo_admissible(&bank.sig));
  }
}
