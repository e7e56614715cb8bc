/*!

The contract between the core and the heuristic registry.

The core never computes clause scores itself; the host registers evaluator constructors by name
and the saturation loop orders its queues with whatever the registry hands back. The only
built-in is the plain clause-weight evaluator, which the registry always knows so tests and
defaults have something to run with.

*/

use sabre_abs::HashMap;

use crate::{clauses::Clause, terms::TermBank};

pub trait ClauseEvaluator {
  fn name(&self) -> &str;
  /// The score of a clause; smaller is better.
  fn evaluate(&self, bank: &TermBank, clause: &Clause) -> f64;
}

type EvaluatorCtor = Box<dyn Fn() -> Box<dyn ClauseEvaluator>>;

/// Name-keyed registry of evaluator constructors.
#[derive(Default)]
pub struct EvalRegistry {
  constructors: HashMap<String, EvaluatorCtor>,
}

impl EvalRegistry {
  pub fn new() -> Self {
    let mut registry = Self::default();
    registry.register("ClauseWeight", || Box::new(ClauseWeightEval));
    registry
  }

  pub fn register(
    &mut self,
    name: &str,
    constructor: impl Fn() -> Box<dyn ClauseEvaluator> + 'static,
  ) {
    self.constructors.insert(name.to_string(), Box::new(constructor));
  }

  /// Instantiates the named evaluator, if registered.
  pub fn create(&self, name: &str) -> Option<Box<dyn ClauseEvaluator>> {
    self.constructors.get(name).map(|constructor| constructor())
  }
}

/// Standard clause weight as a score.
pub struct ClauseWeightEval;

impl ClauseEvaluator for ClauseWeightEval {
  fn name(&self) -> &str {
    "ClauseWeight"
  }

  fn evaluate(&self, bank: &TermBank, clause: &Clause) -> f64 {
    clause.standard_weight(bank) as f64
  }
}
