//! Per-group parameter types and sub-clients.

pub mod eligibility;
pub mod offers;
pub mod reference;

/// Comma-join ids the way list parameters are sent. Blank ids are dropped.
pub(crate) fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&["101", " 102 ", ""]), "101,102");
        assert_eq!(join_ids::<&str>(&[]), "");
    }
}
