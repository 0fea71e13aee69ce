//! Random selection from candidate lists, and resource metadata lookup.

use oboro_suggest_traits::{MetadataStore, SuggestError};
use rand::{seq::SliceRandom, Rng};

/// Pick one of `items` uniformly at random.
///
/// # Errors
/// The error built by `when_empty` if there is nothing to pick from.
pub fn pick<'a, T, R, F>(items: &'a [T], rng: &mut R, when_empty: F) -> Result<&'a T, SuggestError>
where
    R: Rng + ?Sized,
    F: FnOnce() -> SuggestError,
{
    items.choose(rng).ok_or_else(when_empty)
}

/// A resource together with what is known about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedResource {
    /// The resource identifier.
    pub url: String,
    /// The recorded title, or empty.
    pub title: String,
    /// The recorded description, or empty.
    pub description: String,
}

/// Look up the title and description of `url`. Unknown resources get empty
/// strings.
///
/// # Errors
/// [`SuggestError::StoreUnavailable`] if the metadata store could not be read.
pub async fn resolve_resource(
    url: &str,
    metadata: &dyn MetadataStore,
) -> Result<ResolvedResource, SuggestError> {
    let found = metadata.find_by_resource(url).await?;
    let (title, description) = found
        .map(|meta| (meta.title, meta.description))
        .unwrap_or_default();

    Ok(ResolvedResource {
        url: url.to_string(),
        title,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::{pick, resolve_resource};
    use oboro_stores::MemoryMetadata;
    use oboro_suggest_traits::{ResourceMetadata, SuggestError};
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn pick_from_empty_is_the_given_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty: Vec<u8> = vec![];
        assert!(matches!(
            pick(&empty, &mut rng, || SuggestError::NoQuestionMatch),
            Err(SuggestError::NoQuestionMatch)
        ));
    }

    #[test]
    fn pick_is_a_member() {
        let mut rng = StdRng::seed_from_u64(0);
        let items = vec![1, 2, 3];
        for _ in 0..50 {
            let picked = pick(&items, &mut rng, || SuggestError::NoMatch).expect("not empty");
            assert!(items.contains(picked));
        }
    }

    #[tokio::test]
    async fn known_resource_is_described() {
        let metadata = MemoryMetadata::new(vec![ResourceMetadata {
            href: "https://example.org/go".to_string(),
            title: "Go".to_string(),
            description: "All about Go".to_string(),
            is_checked: true,
        }]);
        let resolved = resolve_resource("https://example.org/go", &metadata)
            .await
            .expect("store is available");
        assert_eq!(resolved.title, "Go");
        assert_eq!(resolved.description, "All about Go");
    }

    #[tokio::test]
    async fn unknown_resource_has_empty_description() {
        let metadata = MemoryMetadata::new(vec![]);
        let resolved = resolve_resource("https://example.org/unknown", &metadata)
            .await
            .expect("absence is not an error");
        assert_eq!(resolved.url, "https://example.org/unknown");
        assert_eq!(resolved.title, "");
        assert_eq!(resolved.description, "");
    }
}
