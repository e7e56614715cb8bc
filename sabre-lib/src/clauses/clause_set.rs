/*!

Clause sets.

A clause set keeps its members in insertion order behind an identifier-keyed map, with cached
clause and literal counts. A set can carry a demodulator index (a perfect discrimination tree
over the left-hand sides of its unit clauses) and a subterm index; both are maintained through
insertion and extraction so they never go stale.

*/

use sabre_abs::HashMap;

use crate::{
  clauses::{
    clause::{Clause, ClauseProperty},
    clause_pos::{ClausePos, EqnSide},
  },
  indexing::{PdTree, SubtermIndex},
  terms::TermBank,
  ClauseIdent,
  SysDate,
};

#[derive(Default)]
pub struct ClauseSet {
  members: HashMap<ClauseIdent, Clause>,
  /// Insertion order; extraction keeps the order of the survivors.
  order: Vec<ClauseIdent>,

  literal_count: usize,
  pub date:      SysDate,

  pub demod_index:   Option<PdTree<ClausePos>>,
  pub subterm_index: Option<SubtermIndex>,
}

impl ClauseSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a set maintaining a demodulator index over its unit clauses.
  pub fn with_demod_index() -> Self {
    ClauseSet {
      demod_index: Some(PdTree::new()),
      ..Self::default()
    }
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.order.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }

  #[inline(always)]
  pub fn literal_count(&self) -> usize {
    self.literal_count
  }

  #[inline(always)]
  pub fn contains(&self, ident: ClauseIdent) -> bool {
    self.members.contains_key(&ident)
  }

  #[inline(always)]
  pub fn get(&self, ident: ClauseIdent) -> Option<&Clause> {
    self.members.get(&ident)
  }

  #[inline(always)]
  pub fn get_mut(&mut self, ident: ClauseIdent) -> Option<&mut Clause> {
    self.members.get_mut(&ident)
  }

  /// Inserts the clause, registering it in the attached indexes. Returns its identifier.
  pub fn insert(&mut self, bank: &TermBank, mut clause: Clause) -> ClauseIdent {
    debug_assert!(!self.members.contains_key(&clause.ident));

    self.literal_count += clause.literal_count();

    if let Some(index) = self.demod_index.as_mut() {
      if clause.is_unit() {
        index_unit_clause(index, bank, &clause);
        clause.set_property(ClauseProperty::DemodIndexed);
      }
    }
    if let Some(index) = self.subterm_index.as_mut() {
      index.insert_clause(bank, &clause);
      clause.set_property(ClauseProperty::SubtermIndexed);
    }

    let ident = clause.ident;
    self.order.push(ident);
    self.members.insert(ident, clause);
    ident
  }

  /// Removes and returns the clause, deregistering it from the attached indexes.
  pub fn extract(&mut self, bank: &TermBank, ident: ClauseIdent) -> Option<Clause> {
    let mut clause = self.members.remove(&ident)?;
    let position = self.order.iter().position(|&other| other == ident);
    debug_assert!(position.is_some());
    if let Some(position) = position {
      self.order.remove(position);
    }

    self.literal_count -= clause.literal_count();

    if clause.has_property(ClauseProperty::DemodIndexed) {
      if let Some(index) = self.demod_index.as_mut() {
        deindex_unit_clause(index, bank, &clause);
      }
      clause.clear_property(ClauseProperty::DemodIndexed);
    }
    if clause.has_property(ClauseProperty::SubtermIndexed) {
      if let Some(index) = self.subterm_index.as_mut() {
        index.delete_clause(bank, &clause);
      }
      clause.clear_property(ClauseProperty::SubtermIndexed);
    }

    Some(clause)
  }

  /// Removes and returns the oldest clause.
  pub fn extract_first(&mut self, bank: &TermBank) -> Option<Clause> {
    let ident = *self.order.first()?;
    self.extract(bank, ident)
  }

  /// Iterates clauses in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = &Clause> {
    self.order.iter().map(move |ident| &self.members[ident])
  }

  pub fn idents(&self) -> impl Iterator<Item = ClauseIdent> + '_ {
    self.order.iter().copied()
  }
}

/// A unit clause is indexed under its left-hand side, and under the right one too while it is
/// not oriented (either side may then serve as a rewrite top).
fn index_unit_clause(index: &mut PdTree<ClausePos>, bank: &TermBank, clause: &Clause) {
  debug_assert!(clause.is_unit());
  let eqn = &clause.literals()[0];

  index.insert_dated(
    bank,
    eqn.lterm,
    clause.date,
    ClausePos::top(clause.ident, 0, EqnSide::Left),
  );
  if !eqn.is_oriented() && eqn.lterm != eqn.rterm {
    index.insert_dated(
      bank,
      eqn.rterm,
      clause.date,
      ClausePos::top(clause.ident, 0, EqnSide::Right),
    );
  }
}

fn deindex_unit_clause(index: &mut PdTree<ClausePos>, bank: &TermBank, clause: &Clause) {
  let eqn = &clause.literals()[0];
  index.delete(bank, eqn.lterm, |pos| pos.clause == clause.ident);
  if !eqn.is_oriented() && eqn.lterm != eqn.rterm {
    index.delete(bank, eqn.rterm, |pos| pos.clause == clause.ident);
  }
}
