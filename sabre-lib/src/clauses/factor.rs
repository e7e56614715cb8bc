/*!

Ordered equality factoring.

From `C ∨ s ≃ t ∨ u ≃ v` with σ a unifier of `s` and `u`, equality factoring derives
`σ(C ∨ u ≃ v ∨ t ≄ v)`. Partner enumeration pairs the sides of maximal positive literals with
the sides of every other positive literal; unifiers come from the CSU iterator, so the
higher-order build automatically sees prefix solutions too. The ordering blocks factors where
the instantiated `from` side is already smaller than its own partner term.

*/

use crate::{
  clauses::{
    clause::Clause,
    clause_pos::{iter_maximal_sides, ClausePos, EqnSide},
    eqn::{Eqn, EqnProperty},
  },
  orderings::{ordering_greater, Ocb},
  terms::{DerefPolicy, Substitution, TermBank},
  unify::CsuIter,
};

/// All candidate position pairs for equality factoring in the clause: a maximal positive
/// literal side paired with a side of a different positive literal.
pub fn equality_factor_partners(clause: &Clause) -> Vec<(ClausePos, ClausePos)> {
  let mut pairs = Vec::new();

  for (lit1, side1, _) in iter_maximal_sides(clause, true) {
    for (lit2, eqn2) in clause.literals().iter().enumerate() {
      if lit2 == lit1 || !eqn2.is_positive() {
        continue;
      }
      for side2 in [EqnSide::Left, EqnSide::Right] {
        pairs.push((
          ClausePos::top(clause.ident, lit1, side1),
          ClausePos::top(clause.ident, lit2, side2),
        ));
      }
    }
  }
  pairs
}

/// Builds the equality factor for the unifier currently recorded in the substitution. Returns
/// `None` when the ordering constraint rejects the factor.
pub fn compute_equality_factor(
  bank: &mut TermBank,
  ocb: &Ocb,
  clause: &Clause,
  pos1: &ClausePos,
  pos2: &ClausePos,
) -> Option<Clause> {
  let s = pos1.get_side(clause);
  let t = pos1.get_other_side(clause);
  let v = pos2.get_other_side(clause);

  // σ(s) must not be smaller than σ(t), else the factored literal could never be used.
  if ordering_greater(ocb, bank, t, s, DerefPolicy::Always, DerefPolicy::Always) {
    return None;
  }

  let mut literals = Vec::with_capacity(clause.literal_count());
  for (index, eqn) in clause.literals().iter().enumerate() {
    if index == pos1.literal {
      continue;
    }
    let lterm = bank.insert_instantiated(eqn.lterm);
    let rterm = bank.insert_instantiated(eqn.rterm);
    literals.push(Eqn::new(bank, lterm, rterm, eqn.is_positive()));
  }

  let t_inst = bank.insert_instantiated(t);
  let v_inst = bank.insert_instantiated(v);
  let mut condition = Eqn::new(bank, t_inst, v_inst, false);
  condition.set_property(EqnProperty::InheritsParamod);
  literals.push(condition);

  let mut factor = Clause::new(literals);
  factor.proof_depth = clause.proof_depth + 1;
  factor.parents.push(clause.ident);
  Some(factor)
}

/// Enumerates all equality factors of the clause, bounding each unifier search by `budget`.
pub fn clause_equality_factors(
  bank: &mut TermBank,
  ocb: &Ocb,
  clause: &Clause,
  budget: usize,
) -> Vec<Clause> {
  let mut factors = Vec::new();
  let mut subst = Substitution::new();

  for (pos1, pos2) in equality_factor_partners(clause) {
    let s = pos1.get_side(clause);
    let u = pos2.get_side(clause);

    let mut csu = CsuIter::new(bank, s, u, budget);
    while csu.next_unifier(bank, &mut subst) {
      if let Some(factor) = compute_equality_factor(bank, ocb, clause, &pos1, &pos2) {
        factors.push(factor);
      }
    }
    debug_assert!(subst.is_empty());
  }
  factors
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    orderings::OrderingKind,
    terms::ProblemType,
  };

  #[test]
  fn factoring_merges_unifiable_positive_literals() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let individual = bank.types.individual_type();
    let x = bank.fresh_variable(individual);
    let f = bank.mk_symbol("f", 1);
    let a_code = bank.mk_symbol("a", 0);
    let b_code = bank.mk_symbol("b", 0);
    let mut ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);
    ocb.set_precedence_rank(f, 30);
    ocb.set_precedence_rank(a_code, 20);
    ocb.set_precedence_rank(b_code, 10);

    let a = bank.apply(a_code, &[]);
    let b = bank.apply(b_code, &[]);
    let fx = bank.apply(f, &[x]);
    let fa = bank.apply(f, &[a]);

    // f(X) = b ∨ f(a) = b factors into b ≠ b ∨ f(a) = b under X := a.
    let eqn1 = Eqn::new(&mut bank, fx, b, true);
    let eqn2 = Eqn::new(&mut bank, fa, b, true);
    let mut clause = Clause::new(vec![eqn1, eqn2]);
    clause.mark_maximal_literals(&ocb, &bank);

    let factors = clause_equality_factors(&mut bank, &ocb, &clause, 16);
    assert!(!factors.is_empty());

    let has_expected = factors.iter().any(|factor| {
      factor.literal_count() == 2
          && factor.neg_lit_no() == 1
          && factor.literals().iter().any(|eqn| {
            eqn.is_negative() && eqn.lterm == b && eqn.rterm == b
          })
    });
    assert!(has_expected);

    for factor in factors {
      assert_eq!(factor.parents.as_slice(), &[clause.ident]);
      assert_eq!(factor.proof_depth, clause.proof_depth + 1);
    }
  }

  #[test]
  fn no_factors_without_a_second_positive_literal() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let a = bank.mk_constant("a");
    let b = bank.mk_constant("b");
    let ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);

    let eqn1 = Eqn::new(&mut bank, a, b, true);
    let eqn2 = Eqn::new(&mut bank, a, b, false);
    let mut clause = Clause::new(vec![eqn1, eqn2]);
    clause.mark_maximal_literals(&ocb, &bank);

    let factors = clause_equality_factors(&mut bank, &ocb, &clause, 16);
    assert!(factors.is_empty());
  }
}
