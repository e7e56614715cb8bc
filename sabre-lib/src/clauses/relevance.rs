/*!

Relevance analysis.

Starting from the conjectures, symbols reachable through shared occurrences are assigned
increasing relevance levels; clauses containing a relevant symbol become relevant themselves on
the next round. The closure is bounded by a configurable depth, splitting the set into a "core"
that is conjecture-connected within the bound and a "rest" that is not. After initialization the
core holds the newly found relevant clauses, the rest holds the remainder, and
`f_code_relevance` records for every symbol the level at which it was found (relevant symbols
only).

*/

use sabre_abs::HashMap;

use crate::{
  clauses::{
    clause::{Clause, ClauseProperty},
    clause_set::ClauseSet,
  },
  terms::TermBank,
  ClauseIdent,
  FunCode,
  TermIndex,
};

#[derive(Debug, Default)]
pub struct Relevance {
  pub clauses_core: Vec<ClauseIdent>,
  pub clauses_rest: Vec<ClauseIdent>,
  /// Relevance level per function symbol; absent means never reached.
  pub f_code_relevance: HashMap<FunCode, u32>,
}

/// Sorts the conjectures of `set` into `core` and the remainder into `rest`; returns the number
/// of conjectures found.
pub fn split_conjectures(set: &ClauseSet, core: &mut Vec<ClauseIdent>, rest: &mut Vec<ClauseIdent>) -> usize {
  let mut found = 0;
  for clause in set.iter() {
    if clause.has_property(ClauseProperty::Conjecture) {
      core.push(clause.ident);
      found += 1;
    } else {
      rest.push(clause.ident);
    }
  }
  found
}

/// Computes the bounded symbol-occurrence closure over `set`.
pub fn relevance_compute(bank: &TermBank, set: &ClauseSet, max_depth: u32) -> Relevance {
  let mut data = Relevance::default();
  split_conjectures(set, &mut data.clauses_core, &mut data.clauses_rest);

  let mut frontier = data.clauses_core.clone();
  let mut level = 1;

  while !frontier.is_empty() && level <= max_depth {
    // Symbols of the freshly relevant clauses get this level.
    let mut new_codes = Vec::new();
    for &ident in frontier.iter() {
      let clause = set.get(ident).expect("core clause not in set");
      for code in clause_f_codes(bank, clause) {
        if !data.f_code_relevance.contains_key(&code) {
          data.f_code_relevance.insert(code, level);
          new_codes.push(code);
        }
      }
    }
    if new_codes.is_empty() {
      break;
    }

    // Clauses touching a newly relevant symbol join the core on the next level.
    frontier.clear();
    data.clauses_rest.retain(|&ident| {
      let clause = set.get(ident).expect("rest clause not in set");
      let touched = clause_f_codes(bank, clause)
          .iter()
          .any(|code| new_codes.contains(code));
      if touched {
        frontier.push(ident);
      }
      !touched
    });
    data.clauses_core.extend(frontier.iter().copied());
    level += 1;
  }

  data
}

/// The distinct function symbols occurring in the clause.
fn clause_f_codes(bank: &TermBank, clause: &Clause) -> Vec<FunCode> {
  let mut codes = Vec::new();
  for eqn in clause.literals() {
    collect_codes(bank, eqn.lterm, &mut codes);
    collect_codes(bank, eqn.rterm, &mut codes);
  }
  codes
}

fn collect_codes(bank: &TermBank, term: TermIndex, out: &mut Vec<FunCode>) {
  let cell = bank.cell(term);
  if cell.is_variable() {
    return;
  }
  if !out.contains(&cell.f_code) {
    out.push(cell.f_code);
  }
  for &arg in cell.args.iter() {
    collect_codes(bank, arg, out);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    clauses::eqn::Eqn,
    terms::ProblemType,
  };

  #[test]
  fn closure_is_depth_bounded() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let a = bank.mk_constant("a");
    let b = bank.mk_constant("b");
    let c = bank.mk_constant("c");
    let d = bank.mk_constant("d");

    let mut set = ClauseSet::new();

    // Conjecture mentions a; a=b links b; b=c links c; d=d stays isolated.
    let conj_eqn = Eqn::new(&mut bank, a, a, false);
    let mut conjecture = Clause::new(vec![conj_eqn]);
    conjecture.set_property(ClauseProperty::Conjecture);
    let conj_id = set.insert(&bank, conjecture);

    let ab = Eqn::new(&mut bank, a, b, true);
    let ab_id = set.insert(&bank, Clause::new(vec![ab]));
    let bc = Eqn::new(&mut bank, b, c, true);
    let bc_id = set.insert(&bank, Clause::new(vec![bc]));
    let dd = Eqn::new(&mut bank, d, d, true);
    let dd_id = set.insert(&bank, Clause::new(vec![dd]));

    // Depth 1: only the conjecture's own symbols are relevant; a=b joins, b=c does not yet.
    let shallow = relevance_compute(&bank, &set, 1);
    assert!(shallow.clauses_core.contains(&conj_id));
    assert!(shallow.clauses_core.contains(&ab_id));
    assert!(shallow.clauses_rest.contains(&bc_id));
    assert!(shallow.clauses_rest.contains(&dd_id));

    // Depth 3 closes over b: b=c joins the core, d=d never does.
    let deep = relevance_compute(&bank, &set, 3);
    assert!(deep.clauses_core.contains(&bc_id));
    assert!(deep.clauses_rest.contains(&dd_id));

    let a_code = bank.sig.find("a").unwrap();
    let b_code = bank.sig.find("b").unwrap();
    let d_code = bank.sig.find("d").unwrap();
    assert_eq!(deep.f_code_relevance.get(&a_code), Some(&1));
    assert_eq!(deep.f_code_relevance.get(&b_code), Some(&2));
    assert_eq!(deep.f_code_relevance.get(&d_code), None);
  }
}
