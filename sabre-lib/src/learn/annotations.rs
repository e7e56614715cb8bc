/*!

Annotations: per-example evaluation vectors in the form `<source_id>:(v0,v1,…)`. The first value
is a count weighting the rest, so combining two annotations forms the count-weighted mean of the
tails and sums the counts. A declared vector length is enforced on parse — too many or too few
values is a syntax error, as is a duplicate source identifier within one list.

*/

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use sabre_abs::join_iter;

use crate::{
  error::{Error, Result},
  io::scanner::{Scanner, TokenKind},
};

#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
  pub key:    u64,
  /// `values[0]` is the example count; the tail is the weighted payload.
  pub values: Vec<f64>,
}

impl Annotation {
  /// Parses `<id>:(v0,…,v_{n-1})` expecting exactly `expected` values. At least one value is
  /// required.
  pub fn parse(scanner: &mut Scanner, expected: usize) -> Result<Annotation> {
    debug_assert!(expected >= 1);
    let key = scanner.accept_pos_int()?;
    scanner.accept(TokenKind::Colon)?;
    scanner.accept(TokenKind::OpenParen)?;

    let mut values = Vec::with_capacity(expected);
    while !scanner.test(TokenKind::CloseParen) {
      if values.len() == expected {
        return Err(Error::syntax(
          scanner.pos(),
          "annotation with declared length",
          "annotation with more elements than expected".to_string(),
        ));
      }
      values.push(scanner.accept_float()?);
      if !scanner.test(TokenKind::CloseParen) {
        scanner.accept(TokenKind::Comma)?;
      }
    }
    if values.len() < expected {
      return Err(Error::syntax(
        scanner.pos(),
        "annotation with declared length",
        "annotation with fewer elements than expected".to_string(),
      ));
    }
    scanner.accept(TokenKind::CloseParen)?;

    Ok(Annotation { key, values })
  }

  #[inline(always)]
  pub fn count(&self) -> f64 {
    self.values[0]
  }

  /// Combines another annotation into this one: the tails become the count-weighted average,
  /// the counts add up.
  pub fn combine(&mut self, other: &Annotation) {
    debug_assert_eq!(self.values.len(), other.values.len());
    let self_weight = self.count();
    let other_weight = other.count();
    let total = self_weight + other_weight;

    for (value, &other_value) in self.values.iter_mut().zip(other.values.iter()).skip(1) {
      *value = (*value * self_weight + other_value * other_weight) / total;
    }
    self.values[0] = total;
  }

  /// Evaluates the annotation under the given weights: Σ values[i+1] · weights[i].
  pub fn eval(&self, weights: &[f64]) -> f64 {
    self
        .values
        .iter()
        .skip(1)
        .zip(weights.iter())
        .map(|(value, weight)| value * weight)
        .sum()
  }
}

impl Display for Annotation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}:({})",
      self.key,
      join_iter(self.values.iter().map(|value| float_text(*value)), ",")
    )
  }
}

fn float_text(value: f64) -> String {
  if value == value.trunc() && value.is_finite() {
    format!("{:.1}", value)
  } else {
    format!("{}", value)
  }
}

/// Parses a list of annotations until end of input, keyed by source identifier. A duplicate
/// identifier is a syntax error.
pub fn parse_annotation_list(scanner: &mut Scanner, expected: usize) -> Result<BTreeMap<u64, Annotation>> {
  let mut tree = BTreeMap::new();
  while !scanner.at_eof() {
    let pos = scanner.pos();
    let annotation = Annotation::parse(scanner, expected)?;
    if tree.contains_key(&annotation.key) {
      return Err(Error::syntax(
        pos,
        "unique annotation identifier",
        format!("duplicate annotation for example {}", annotation.key),
      ));
    }
    tree.insert(annotation.key, annotation);
  }
  Ok(tree)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_print_round_trip() {
    let mut scanner = Scanner::new("anno", "12:(2.0,0.5,3.0)");
    let annotation = Annotation::parse(&mut scanner, 3).unwrap();
    assert_eq!(annotation.key, 12);
    assert_eq!(annotation.values, vec![2.0, 0.5, 3.0]);

    let printed = annotation.to_string();
    let mut scanner = Scanner::new("anno2", &printed);
    let reparsed = Annotation::parse(&mut scanner, 3).unwrap();
    assert_eq!(reparsed, annotation);
  }

  #[test]
  fn length_mismatch_is_syntax_error() {
    let mut scanner = Scanner::new("anno", "1:(1.0,2.0)");
    assert!(Annotation::parse(&mut scanner, 3).is_err());

    let mut scanner = Scanner::new("anno", "1:(1.0,2.0,3.0,4.0)");
    assert!(Annotation::parse(&mut scanner, 3).is_err());
  }

  #[test]
  fn combine_is_a_weighted_mean() {
    let mut left = Annotation { key: 1, values: vec![1.0, 4.0] };
    let right = Annotation { key: 2, values: vec![3.0, 0.0] };
    left.combine(&right);

    assert_eq!(left.values[0], 4.0);
    assert_eq!(left.values[1], 1.0);
  }

  #[test]
  fn duplicate_keys_rejected() {
    let mut scanner = Scanner::new("anno", "1:(1.0) 2:(2.0) 1:(3.0)");
    let err = parse_annotation_list(&mut scanner, 1).unwrap_err();
    assert!(matches!(err, Error::Syntax { .. }));
  }

  #[test]
  fn eval_ignores_the_count() {
    let annotation = Annotation { key: 1, values: vec![5.0, 2.0, 3.0] };
    assert_eq!(annotation.eval(&[1.0, 2.0]), 8.0);
  }
}
