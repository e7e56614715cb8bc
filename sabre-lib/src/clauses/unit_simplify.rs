/*!

Unit cut-off and unit subsumption against an indexed set of unit clauses.

A unit `s = t` (or `s ≠ t`) simplifies a literal `l = r` when some σ maps `s` to `l` and `t` to
`r`: with the same sign the whole clause is subsumed, with the opposite sign the literal is cut
(simplify-reflect). Top-level mode tests only the root equation; full mode descends into the
unique conflict position, where only positive units are sound. In the higher-order build the
trailing arguments left by partial matching must agree on both sides for the step to be sound.

*/

use sabre_abs::log::debug;

use crate::{
  clauses::{
    clause::{Clause, ClauseProperty},
    clause_pos::ClausePos,
    clause_set::ClauseSet,
  },
  indexing::PdtSearch,
  terms::{ProblemType, Substitution, TermBank},
  unify::{match_possibly_partial, remaining_args_same},
  TermIndex,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnitSimplifyMode {
  NoSimplify,
  TopSimplify,
  FullSimplify,
}

impl UnitSimplifyMode {
  pub fn name(self) -> &'static str {
    match self {
      UnitSimplifyMode::NoSimplify   => "NoSimplify",
      UnitSimplifyMode::TopSimplify  => "TopSimplify",
      UnitSimplifyMode::FullSimplify => "FullSimplify",
    }
  }

  pub fn from_name(name: &str) -> Option<UnitSimplifyMode> {
    match name {
      "NoSimplify"   => Some(UnitSimplifyMode::NoSimplify),
      "TopSimplify"  => Some(UnitSimplifyMode::TopSimplify),
      "FullSimplify" => Some(UnitSimplifyMode::FullSimplify),
      _ => None,
    }
  }
}

#[derive(Clone, Debug)]
pub struct SimplifyRes {
  pub pos: ClausePos,
  /// Target arguments not consumed by a partial higher-order match; 0 in first-order sessions.
  pub remaining_args: usize,
}

/// Finds a unit `s = t` in `units` such that `σs = t1` and `σt = t2` for some σ, optionally
/// restricted to units of the given sign.
pub fn find_top_simplifying_unit(
  bank: &mut TermBank,
  units: &ClauseSet,
  t1: TermIndex,
  t2: TermIndex,
  sign: Option<bool>,
) -> Option<SimplifyRes> {
  let index = units.demod_index.as_ref()?;
  let mut subst = Substitution::new();
  let mut search = PdtSearch::new(index, bank, &subst, t1);
  let mut result = None;

  while let Some((_, pos)) = search.next_match(index, bank, &mut subst) {
    let clause = units.get(pos.clause).expect("index entry for a clause not in the set");
    debug_assert!(clause.is_unit());

    if let Some(wanted) = sign {
      if clause.literals()[pos.literal].is_positive() != wanted {
        continue;
      }
    }

    let other_side = pos.get_other_side(clause);
    if let Some(remaining) = match_possibly_partial(bank, &mut subst, other_side, t2) {
      debug_assert!(bank.problem_type() == ProblemType::HigherOrder || remaining == 0);
      result = Some(SimplifyRes { pos, remaining_args: remaining });
      break;
    }
  }

  search.abort(bank, &mut subst);
  result
}

/// Finds a simplifying or subsuming unit for `t1 = t2`, descending into the unique conflict
/// position when the top equation yields nothing. Only positive units are sound below the top.
pub fn find_simplifying_unit(
  bank: &mut TermBank,
  units: &ClauseSet,
  mut t1: TermIndex,
  mut t2: TermIndex,
  positive_only: bool,
) -> Option<SimplifyRes> {
  if t1 == t2 {
    return None;
  }
  let sign = if positive_only { Some(true) } else { None };
  if let Some(result) = find_top_simplifying_unit(bank, units, t1, t2, sign) {
    return remaining_args_same(bank, t1, t2, result.remaining_args).then_some(result);
  }

  loop {
    if bank.f_code(t1) != bank.f_code(t2) || bank.arity(t1) == 0 {
      return None;
    }

    // Descend only when exactly one argument pair conflicts.
    let mut conflict = None;
    for (&arg1, &arg2) in bank.args(t1).iter().zip(bank.args(t2).iter()) {
      if arg1 != arg2 {
        if conflict.is_some() {
          return None;
        }
        conflict = Some((arg1, arg2));
      }
    }
    let Some((next1, next2)) = conflict else {
      return None;
    };
    t1 = next1;
    t2 = next2;

    if let Some(result) = find_top_simplifying_unit(bank, units, t1, t2, Some(true)) {
      return remaining_args_same(bank, t1, t2, result.remaining_args).then_some(result);
    }
  }
}

/// Simplifies a clause with the indexed units from `unit_set`, performing simplify-reflect and
/// subsumption steps. Returns false iff the clause is subsumed by a unit.
pub fn clause_simplify_with_unit_set(
  bank: &mut TermBank,
  clause: &mut Clause,
  unit_set: &mut ClauseSet,
  mode: UnitSimplifyMode,
) -> bool {
  if mode == UnitSimplifyMode::NoSimplify {
    return true;
  }

  let mut index = 0;
  while index < clause.literal_count() {
    let lterm = clause.literals()[index].lterm;
    let rterm = clause.literals()[index].rterm;

    let result = match mode {
      UnitSimplifyMode::TopSimplify => find_top_simplifying_unit(bank, unit_set, lterm, rterm, None),
      UnitSimplifyMode::FullSimplify => find_simplifying_unit(bank, unit_set, lterm, rterm, false),
      UnitSimplifyMode::NoSimplify => unreachable!(),
    };

    let Some(result) = result else {
      index += 1;
      continue;
    };

    let unit_ident = result.pos.clause;
    let unit_positive = {
      let unit = unit_set.get(unit_ident).expect("simplifying unit vanished");
      unit.literals()[result.pos.literal].is_positive()
    };

    if clause.literals()[index].is_positive() == unit_positive {
      debug!(
        clause = clause.ident,
        unit = unit_ident,
        "clause subsumed by unit"
      );
      let clause_weight = clause.standard_weight(bank);
      let unit = unit_set.get_mut(unit_ident).expect("simplifying unit vanished");
      if !clause.is_unit() && clause_weight == unit.standard_weight(bank) {
        unit.set_property(ClauseProperty::Protected);
      }
      if clause.has_property(ClauseProperty::SetOfSupport) {
        unit.set_property(ClauseProperty::SetOfSupport);
      }
      return false;
    }

    debug!(
      clause = clause.ident,
      unit = unit_ident,
      "literal cut with unit"
    );
    clause.clear_property(ClauseProperty::LimitedRW);
    clause.remove_literal(index);
  }
  true
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    clauses::eqn::Eqn,
    terms::ProblemType,
  };

  struct Fixture {
    bank:  TermBank,
    units: ClauseSet,
  }

  /// Unit set containing f(X) = a.
  fn fixture() -> Fixture {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let individual = bank.types.individual_type();
    let x = bank.fresh_variable(individual);
    let f = bank.mk_symbol("f", 1);
    let a = bank.mk_constant("a");
    let fx = bank.apply(f, &[x]);

    let mut units = ClauseSet::with_demod_index();
    let eqn = Eqn::new(&mut bank, fx, a, true);
    units.insert(&bank, Clause::new(vec![eqn]));

    Fixture { bank, units }
  }

  #[test]
  fn same_sign_unit_subsumes() {
    let mut fx = fixture();
    let f = fx.bank.sig.find("f").unwrap();
    let a = fx.bank.mk_constant("a");
    let b = fx.bank.mk_constant("b");
    let fb = fx.bank.apply(f, &[b]);

    // f(b) = a ∨ b = a is subsumed by f(X) = a.
    let eqn1 = Eqn::new(&mut fx.bank, fb, a, true);
    let eqn2 = Eqn::new(&mut fx.bank, b, a, true);
    let mut clause = Clause::new(vec![eqn1, eqn2]);

    let kept = clause_simplify_with_unit_set(
      &mut fx.bank,
      &mut clause,
      &mut fx.units,
      UnitSimplifyMode::TopSimplify,
    );
    assert!(!kept);
  }

  #[test]
  fn opposite_sign_unit_cuts_the_literal() {
    let mut fx = fixture();
    let f = fx.bank.sig.find("f").unwrap();
    let a = fx.bank.mk_constant("a");
    let b = fx.bank.mk_constant("b");
    let fb = fx.bank.apply(f, &[b]);

    // f(b) ≠ a ∨ b = a loses its first literal.
    let eqn1 = Eqn::new(&mut fx.bank, fb, a, false);
    let eqn2 = Eqn::new(&mut fx.bank, b, a, true);
    let mut clause = Clause::new(vec![eqn1, eqn2]);

    let kept = clause_simplify_with_unit_set(
      &mut fx.bank,
      &mut clause,
      &mut fx.units,
      UnitSimplifyMode::TopSimplify,
    );
    assert!(kept);
    assert_eq!(clause.literal_count(), 1);
    assert!(clause.literals()[0].is_positive());
  }

  #[test]
  fn full_mode_descends_into_conflict_positions() {
    let mut fx = fixture();
    let f = fx.bank.sig.find("f").unwrap();
    let g = fx.bank.mk_symbol("g", 2);
    let a = fx.bank.mk_constant("a");
    let b = fx.bank.mk_constant("b");
    let c = fx.bank.mk_constant("c");

    // g(f(b), c) = g(a, c): top fails, but the conflict pair (f(b), a) resolves against
    // f(X) = a.
    let fb = fx.bank.apply(f, &[b]);
    let left = fx.bank.apply(g, &[fb, c]);
    let right = fx.bank.apply(g, &[a, c]);

    let found = find_simplifying_unit(&mut fx.bank, &fx.units, left, right, false);
    assert!(found.is_some());

    let top_only = find_top_simplifying_unit(&mut fx.bank, &fx.units, left, right, None);
    assert!(top_only.is_none());
  }

  #[test]
  fn untouched_clause_survives() {
    let mut fx = fixture();
    let a = fx.bank.mk_constant("a");
    let b = fx.bank.mk_constant("b");

    let eqn = Eqn::new(&mut fx.bank, b, a, true);
    let mut clause = Clause::new(vec![eqn]);
    let kept = clause_simplify_with_unit_set(
      &mut fx.bank,
      &mut clause,
      &mut fx.units,
      UnitSimplifyMode::FullSimplify,
    );
    assert!(kept);
    assert_eq!(clause.literal_count(), 1);
  }
}
