/*!

String formatting helpers used by the various printers.

*/

/// Joins the items of a slice into a single string with the given separator.
pub fn join_string<T: ToString>(items: &[T], separator: &str) -> String {
  join_iter(items.iter().map(|item| item.to_string()), separator)
}

/// Joins the items of an iterator of strings into a single string with the given separator.
pub fn join_iter<I>(items: I, separator: &str) -> String
    where I: IntoIterator,
          I::Item: AsRef<str>
{
  let mut result = String::new();
  for (i, item) in items.into_iter().enumerate() {
    if i > 0 {
      result.push_str(separator);
    }
    result.push_str(item.as_ref());
  }
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn join() {
    assert_eq!(join_string(&[1, 2, 3], ", "), "1, 2, 3");
    assert_eq!(join_iter(Vec::<&str>::new(), ","), "");
  }
}
