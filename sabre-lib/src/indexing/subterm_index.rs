/*!

Subterm indexing: a hashed map from shared subterms to the clauses in which they occur, split
into "restricted" and "full" rewriting occurrences. The top of the left-hand side of an oriented
positive maximal literal is a restricted occurrence — ordinary rewriting must not touch it — and
every other non-variable subterm is a full one. The top-level map is keyed by `f_code` so all
occurrences of symbols can be enumerated without touching the term bank.

*/

use std::collections::{BTreeMap, BTreeSet};

use sabre_abs::HashMap;

use crate::{
  clauses::{Clause, EqnProperty},
  terms::TermBank,
  ClauseIdent,
  FunCode,
  TermIndex,
};

#[derive(Clone, Debug, Default)]
pub struct SubtermOcc {
  pub rw_rest: BTreeSet<ClauseIdent>,
  pub rw_full: BTreeSet<ClauseIdent>,
}

impl SubtermOcc {
  pub fn is_empty(&self) -> bool {
    self.rw_rest.is_empty() && self.rw_full.is_empty()
  }
}

#[derive(Clone, Debug, Default)]
pub struct SubtermIndex {
  index: HashMap<FunCode, BTreeMap<TermIndex, SubtermOcc>>,
  clause_count: usize,
}

impl SubtermIndex {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline(always)]
  pub fn clause_count(&self) -> usize {
    self.clause_count
  }

  /// The occurrence record for a shared term, if any clause contains it.
  pub fn find(&self, bank: &TermBank, term: TermIndex) -> Option<&SubtermOcc> {
    self.index.get(&bank.f_code(term))?.get(&term)
  }

  /// Registers every indexable subterm of the clause. Returns the number of subterm occurrences
  /// visited.
  pub fn insert_clause(&mut self, bank: &TermBank, clause: &Clause) -> usize {
    let mut visited = 0;
    self.clause_count += 1;
    for (term, restricted) in clause_idx_subterms(bank, clause) {
      visited += 1;
      let occ = self
          .index
          .entry(bank.f_code(term))
          .or_default()
          .entry(term)
          .or_default();
      if restricted {
        occ.rw_rest.insert(clause.ident);
      } else {
        occ.rw_full.insert(clause.ident);
      }
    }
    visited
  }

  /// Removes every record of the clause.
  pub fn delete_clause(&mut self, bank: &TermBank, clause: &Clause) {
    self.clause_count = self.clause_count.saturating_sub(1);
    for (term, _) in clause_idx_subterms(bank, clause) {
      let code = bank.f_code(term);
      if let Some(by_term) = self.index.get_mut(&code) {
        if let Some(occ) = by_term.get_mut(&term) {
          occ.rw_rest.remove(&clause.ident);
          occ.rw_full.remove(&clause.ident);
          if occ.is_empty() {
            by_term.remove(&term);
          }
        }
        if by_term.is_empty() {
          self.index.remove(&code);
        }
      }
    }
  }

  /// All terms with the given top symbol that occur somewhere in the indexed clauses.
  pub fn terms_with_symbol(&self, code: FunCode) -> impl Iterator<Item = (TermIndex, &SubtermOcc)> {
    self.index.get(&code).into_iter().flatten().map(|(&term, occ)| (term, occ))
  }
}

/// Enumerates the indexable (non-variable) subterm occurrences of a clause with their
/// restriction flag. The left-hand top of a maximal positive oriented literal is restricted; all
/// other positions, its own subterms included, are full.
fn clause_idx_subterms(bank: &TermBank, clause: &Clause) -> Vec<(TermIndex, bool)> {
  let mut result = Vec::new();
  for eqn in clause.literals() {
    let restricted_rw = eqn.is_maximal()
        && eqn.is_positive()
        && eqn.properties.contains(EqnProperty::Oriented);
    term_idx_subterms(bank, eqn.lterm, restricted_rw, &mut result);
    term_idx_subterms(bank, eqn.rterm, false, &mut result);
  }
  result
}

fn term_idx_subterms(bank: &TermBank, term: TermIndex, restricted: bool, out: &mut Vec<(TermIndex, bool)>) {
  if bank.is_variable(term) {
    return;
  }
  out.push((term, restricted));
  for &arg in bank.args(term) {
    term_idx_subterms(bank, arg, false, out);
  }
}
