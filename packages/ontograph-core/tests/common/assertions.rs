//! Custom assertions for graph query results

use ontograph_core::TermId;
use pretty_assertions::assert_eq;

/// Assert that a query returned exactly `expected`, in any order
pub fn assert_terms<I>(actual: I, expected: &[&str])
where
    I: IntoIterator<Item = TermId>,
{
    let mut actual: Vec<String> = actual.into_iter().map(|t| t.to_string()).collect();
    actual.sort();
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(actual, expected);
}
