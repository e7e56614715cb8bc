/*!

Literal selection.

Selection marks a subset of (usually negative) literals as the only admissible inference
literals of a clause. Two rules come before any strategy: literals carrying the inherited
paramodulation flag are selected whenever the clause has a negative literal at all, and a
strategy only fires when the clause passes its min/max caps on literal counts and weight.

*/

use once_cell::sync::Lazy;
use sabre_abs::HashMap;

use crate::{
  clauses::{
    clause::Clause,
    eqn::EqnProperty,
  },
  terms::TermBank,
};

type SelectFn = fn(&TermBank, &mut Clause);

pub struct SelectionStrategy {
  pub name: &'static str,
  /// Caps: the strategy fires only when the counts and weight lie inside these bounds.
  pub min_neg_literals: usize,
  pub max_pos_literals: Option<usize>,
  pub max_literals:     Option<usize>,
  pub max_weight:       Option<i64>,

  select: SelectFn,
}

static SELECTION_STRATEGIES: Lazy<HashMap<&'static str, SelectionStrategy>> = Lazy::new(|| {
  let mut table: HashMap<&'static str, SelectionStrategy> = HashMap::new();
  for strategy in [
    SelectionStrategy {
      name: "NoSelection",
      min_neg_literals: 0,
      max_pos_literals: None,
      max_literals: None,
      max_weight: None,
      select: select_none,
    },
    SelectionStrategy {
      name: "SelectNegativeLiterals",
      min_neg_literals: 1,
      max_pos_literals: None,
      max_literals: None,
      max_weight: None,
      select: select_all_negative,
    },
    SelectionStrategy {
      name: "SelectLargestNegLit",
      min_neg_literals: 1,
      max_pos_literals: None,
      max_literals: None,
      max_weight: None,
      select: select_largest_negative,
    },
    SelectionStrategy {
      name: "SelectSmallestNegLit",
      min_neg_literals: 1,
      max_pos_literals: None,
      max_literals: None,
      max_weight: None,
      select: select_smallest_negative,
    },
  ] {
    table.insert(strategy.name, strategy);
  }
  table
});

/// Looks up a built-in selection strategy by name.
pub fn find_selection_strategy(name: &str) -> Option<&'static SelectionStrategy> {
  SELECTION_STRATEGIES.get(name)
}

/// Applies literal selection to the clause. Inherited paramodulation literals trump the
/// strategy; the strategy itself is consulted only inside its caps.
pub fn select_literals(bank: &TermBank, clause: &mut Clause, strategy: &SelectionStrategy) {
  for eqn in clause.literals_mut() {
    eqn.clear_property(EqnProperty::Selected);
  }

  let inherited: Vec<usize> = clause
      .literals()
      .iter()
      .enumerate()
      .filter(|(_, eqn)| eqn.properties.contains(EqnProperty::InheritsParamod))
      .map(|(index, _)| index)
      .collect();
  if !inherited.is_empty() && clause.neg_lit_no() > 0 {
    for index in inherited {
      clause.literals_mut()[index].set_property(EqnProperty::Selected);
    }
    return;
  }

  if clause.neg_lit_no() < strategy.min_neg_literals {
    return;
  }
  if strategy.max_pos_literals.is_some_and(|cap| clause.pos_lit_no() > cap) {
    return;
  }
  if strategy.max_literals.is_some_and(|cap| clause.literal_count() > cap) {
    return;
  }
  if strategy
      .max_weight
      .is_some_and(|cap| clause.standard_weight(bank) > cap)
  {
    return;
  }

  (strategy.select)(bank, clause);
}

fn select_none(_bank: &TermBank, _clause: &mut Clause) {}

fn select_all_negative(_bank: &TermBank, clause: &mut Clause) {
  for eqn in clause.literals_mut() {
    if eqn.is_negative() {
      eqn.set_property(EqnProperty::Selected);
    }
  }
}

fn select_by_weight(bank: &TermBank, clause: &mut Clause, largest: bool) {
  let chosen = clause
      .literals()
      .iter()
      .enumerate()
      .filter(|(_, eqn)| eqn.is_negative())
      .map(|(index, eqn)| (index, eqn.standard_weight(bank)))
      .reduce(|best, candidate| {
        let better = if largest {
          candidate.1 > best.1
        } else {
          candidate.1 < best.1
        };
        if better { candidate } else { best }
      });

  if let Some((index, _)) = chosen {
    clause.literals_mut()[index].set_property(EqnProperty::Selected);
  }
}

fn select_largest_negative(bank: &TermBank, clause: &mut Clause) {
  select_by_weight(bank, clause, true);
}

fn select_smallest_negative(bank: &TermBank, clause: &mut Clause) {
  select_by_weight(bank, clause, false);
}
