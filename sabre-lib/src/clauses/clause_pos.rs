/*!

Positions of subterms in clauses: a literal index, a side, and a path of argument indices into
the chosen side. Compact positions identify where an index entry or an inference partner lives
without holding a reference into the clause.

*/

use sabre_abs::SmallVec;

use crate::{
  clauses::clause::Clause,
  clauses::eqn::Eqn,
  terms::TermBank,
  ClauseIdent,
  TermIndex,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EqnSide {
  Left,
  Right,
}

impl EqnSide {
  #[inline(always)]
  pub fn other(self) -> EqnSide {
    match self {
      EqnSide::Left => EqnSide::Right,
      EqnSide::Right => EqnSide::Left,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClausePos {
  pub clause:  ClauseIdent,
  /// Index of the literal within the clause.
  pub literal: usize,
  pub side:    EqnSide,
  /// Argument path from the top of the side down to the designated subterm; empty means the
  /// position is the side itself.
  pub pos: SmallVec<[u32; 4]>,
}

impl ClausePos {
  pub fn top(clause: ClauseIdent, literal: usize, side: EqnSide) -> ClausePos {
    ClausePos {
      clause,
      literal,
      side,
      pos: SmallVec::new(),
    }
  }

  #[inline(always)]
  pub fn is_top(&self) -> bool {
    self.pos.is_empty()
  }

  #[inline(always)]
  pub fn literal_of<'c>(&self, clause: &'c Clause) -> &'c Eqn {
    &clause.literals()[self.literal]
  }

  /// The designated side of the literal.
  pub fn get_side(&self, clause: &Clause) -> TermIndex {
    let eqn = self.literal_of(clause);
    match self.side {
      EqnSide::Left => eqn.lterm,
      EqnSide::Right => eqn.rterm,
    }
  }

  /// The side not designated by the position.
  pub fn get_other_side(&self, clause: &Clause) -> TermIndex {
    let eqn = self.literal_of(clause);
    match self.side {
      EqnSide::Left => eqn.rterm,
      EqnSide::Right => eqn.lterm,
    }
  }

  /// The subterm the position path designates.
  pub fn get_subterm(&self, bank: &TermBank, clause: &Clause) -> TermIndex {
    let mut term = self.get_side(clause);
    for &step in self.pos.iter() {
      term = bank.args(term)[step as usize];
    }
    term
  }
}

/// Iterates the sides of maximal literals of the given sign that can serve as rewriting or
/// superposition tops: for oriented literals only the left (maximal) side, otherwise both.
pub fn iter_maximal_sides<'c>(
  clause: &'c Clause,
  positive: bool,
) -> impl Iterator<Item = (usize, EqnSide, TermIndex)> + 'c {
  clause
      .literals()
      .iter()
      .enumerate()
      .filter(move |(_, eqn)| eqn.is_maximal() && eqn.is_positive() == positive)
      .flat_map(|(index, eqn)| {
        let mut sides: SmallVec<[(usize, EqnSide, TermIndex); 2]> =
            SmallVec::from_slice(&[(index, EqnSide::Left, eqn.lterm)]);
        if !eqn.is_oriented() {
          sides.push((index, EqnSide::Right, eqn.rterm));
        }
        sides
      })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    orderings::{Ocb, OrderingKind},
    terms::ProblemType,
  };

  #[test]
  fn subterm_addressing() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let f = bank.mk_symbol("f", 2);
    let g = bank.mk_symbol("g", 1);
    let a = bank.mk_constant("a");
    let b = bank.mk_constant("b");
    let gb = bank.apply(g, &[b]);
    let fagb = bank.apply(f, &[a, gb]);

    let eqn = Eqn::new(&mut bank, fagb, a, true);
    let clause = Clause::new(vec![eqn]);

    let mut pos = ClausePos::top(clause.ident, 0, EqnSide::Left);
    assert_eq!(pos.get_side(&clause), fagb);
    assert_eq!(pos.get_other_side(&clause), a);
    assert!(pos.is_top());

    pos.pos.push(1);
    assert_eq!(pos.get_subterm(&bank, &clause), gb);
    pos.pos.push(0);
    assert_eq!(pos.get_subterm(&bank, &clause), b);
  }

  #[test]
  fn maximal_side_iteration_respects_orientation() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let f = bank.mk_symbol("f", 1);
    let a_code = bank.mk_symbol("a", 0);
    let mut ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);
    ocb.set_precedence_rank(f, 20);
    ocb.set_precedence_rank(a_code, 10);

    let a = bank.apply(a_code, &[]);
    let fa = bank.apply(f, &[a]);
    let eqn = Eqn::new(&mut bank, fa, a, true);
    let mut clause = Clause::new(vec![eqn]);
    clause.orient_literals(&ocb, &bank);
    clause.mark_maximal_literals(&ocb, &bank);

    // Oriented: only the left side shows up.
    let sides: Vec<_> = iter_maximal_sides(&clause, true).collect();
    assert_eq!(sides.len(), 1);
    assert_eq!(sides[0].2, fa);
  }
}
