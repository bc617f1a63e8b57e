use super::entity::SearchCounter;
use crate::domain::{DomainError, DomainResult};

/// Validates all SearchCounter invariants
pub fn validate_search_counter(counter: &SearchCounter) -> DomainResult<()> {
    if counter.search_term.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Search term cannot be empty".to_string(),
        ));
    }

    if counter.count == 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Counter for '{}' must be at least 1",
            counter.search_term
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(term: &str, count: u64) -> SearchCounter {
        SearchCounter {
            id: "doc-1".to_string(),
            search_term: term.to_string(),
            count,
            poster_url: None,
            movie_id: 1,
        }
    }

    #[test]
    fn test_valid_counter() {
        assert!(validate_search_counter(&counter("batman", 1)).is_ok());
    }

    #[test]
    fn test_empty_term_fails() {
        assert!(validate_search_counter(&counter("", 1)).is_err());
    }

    #[test]
    fn test_zero_count_fails() {
        assert!(validate_search_counter(&counter("batman", 0)).is_err());
    }
}
