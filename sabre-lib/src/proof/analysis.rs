/*!

Simple structural analysis of a PCL protocol: step counts by justification class and the
extremal clauses by literal count and standard weight.

*/

use std::fmt::{Display, Formatter};

use crate::{
  proof::pcl::{Justification, PclProtocol},
  terms::TermBank,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProtocolStats {
  pub steps:         usize,
  pub initial_steps: usize,
  pub derived_steps: usize,

  pub max_literal_count: usize,
  pub avg_literal_count: f64,
  pub max_clause_weight:  i64,
  pub empty_clause_steps: usize,
}

/// Computes the protocol statistics in one pass.
pub fn protocol_analyse(protocol: &PclProtocol, bank: &TermBank) -> ProtocolStats {
  let mut stats = ProtocolStats::default();
  let mut literal_total = 0usize;

  for step in protocol.iter() {
    stats.steps += 1;
    match &step.justification {
      Justification::Initial => stats.initial_steps += 1,
      _ => stats.derived_steps += 1,
    }

    let literals = step.clause.literal_count();
    literal_total += literals;
    stats.max_literal_count = stats.max_literal_count.max(literals);
    stats.max_clause_weight = stats.max_clause_weight.max(step.clause.standard_weight(bank));
    if step.clause.is_empty() {
      stats.empty_clause_steps += 1;
    }
  }

  if stats.steps > 0 {
    stats.avg_literal_count = literal_total as f64 / stats.steps as f64;
  }
  stats
}

impl Display for ProtocolStats {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "# Steps        : {:6}", self.steps)?;
    writeln!(f, "# Initial      : {:6}", self.initial_steps)?;
    writeln!(f, "# Derived      : {:6}", self.derived_steps)?;
    writeln!(f, "# Empty clauses: {:6}", self.empty_clause_steps)?;
    writeln!(f, "# Max literals : {:6}", self.max_literal_count)?;
    writeln!(f, "# Avg literals : {:9.2}", self.avg_literal_count)?;
    writeln!(f, "# Max weight   : {:6}", self.max_clause_weight)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    io::scanner::Scanner,
    terms::ProblemType,
  };

  #[test]
  fn counts_and_extremes() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let mut protocol = PclProtocol::new();
    let mut scanner = Scanner::new(
      "pcl",
      "1 : [++p(a)] : initial\n2 : [++f(a)=a, --p(a)] : initial\n3 : [] : cn(quote(2))\n",
    );
    protocol.parse(&mut scanner, &mut bank).unwrap();

    let stats = protocol_analyse(&protocol, &bank);
    assert_eq!(stats.steps, 3);
    assert_eq!(stats.initial_steps, 2);
    assert_eq!(stats.derived_steps, 1);
    assert_eq!(stats.empty_clause_steps, 1);
    assert_eq!(stats.max_literal_count, 2);
    assert!((stats.avg_literal_count - 1.0).abs() < f64::EPSILON);
    assert!(stats.max_clause_weight > 0);
  }
}
