//! Turning tokens into candidate resources.

use oboro_suggest_traits::{normalize, SuggestError, VocabularyStore};

/// Find the resources the vocabulary index associates with `tokens`.
///
/// Tokens are looked up one at a time, case-insensitively. Each resource is
/// kept once, in the order it was first found across tokens. Resources whose
/// identifier contains `excluded_marker` are generic search result pages and
/// are skipped. Empty tokens are ignored.
///
/// # Errors
/// [`SuggestError::NoMatch`] if no resource was found, or
/// [`SuggestError::StoreUnavailable`] if the vocabulary could not be read.
pub async fn match_resources(
    tokens: &[&str],
    vocabulary: &dyn VocabularyStore,
    excluded_marker: &str,
) -> Result<Vec<String>, SuggestError> {
    let mut resources: Vec<String> = Vec::new();

    for token in tokens.iter().filter(|token| !token.is_empty()) {
        let terms = vocabulary.find_terms_by_value(&normalize(token)).await?;
        for term in terms {
            if !term.href.contains(excluded_marker) && !resources.contains(&term.href) {
                resources.push(term.href);
            }
        }
    }

    if resources.is_empty() {
        Err(SuggestError::NoMatch)
    } else {
        Ok(resources)
    }
}
