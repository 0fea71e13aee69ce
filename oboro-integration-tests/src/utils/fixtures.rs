//! The reference data every test server starts with.

use oboro_suggest_traits::{Lang, Question, ResourceMetadata, Term};

/// A resource with a recorded title.
pub const GO_DOC: &str = "https://go.dev/doc/";

/// A resource with no recorded metadata.
pub const GO_BLOG: &str = "https://go.dev/blog/";

/// A search page, which is never suggested.
pub const GO_SEARCH: &str = "https://www.google.com/search?q=go";

/// Vocabulary where every eligible keyword of a "Go" phrase seeds a question.
pub fn terms() -> Vec<Term> {
    vec![
        Term::new("Go", GO_DOC, "Noun", 10),
        Term::new("goroutine", GO_DOC, "Noun", 6),
        Term::new("channel", GO_DOC, "Noun", 5),
        Term::new("compile", GO_DOC, "Verb", 4),
        Term::new("Gopher", GO_BLOG, "Noun", 2),
        Term::new("goroutine", GO_BLOG, "Noun", 1),
        Term::new("Go", GO_SEARCH, "Noun", 99),
        Term::new("search", GO_SEARCH, "Noun", 99),
        Term::new("Pascal", "https://example.org/pascal", "Noun", 1),
        Term::new("compile", "https://example.org/pascal", "Verb", 1),
    ]
}

/// A question seeded with `seed`.
fn question(id: &str, seed: &str, seed_type: &str, lang: Option<Lang>) -> Question {
    Question {
        id: id.to_string(),
        question_ja: format!("{}について知っていますか?", seed),
        question_en: format!("Do you know about {}?", seed),
        seed_ja: seed.to_string(),
        seed_en: seed.to_string(),
        seed_type: seed_type.to_string(),
        lang,
    }
}

/// The question bank.
pub fn questions() -> Vec<Question> {
    vec![
        question("0000000000000000000000a1", "goroutine", "Noun", None),
        question("0000000000000000000000a2", "channel", "Noun", None),
        question("0000000000000000000000a3", "Gopher", "Noun", None),
        question("0000000000000000000000a4", "compile", "Verb", None),
        question("0000000000000000000000a5", "search", "Noun", None),
    ]
}

/// Recorded resource metadata.
pub fn metadata() -> Vec<ResourceMetadata> {
    vec![ResourceMetadata {
        href: GO_DOC.to_string(),
        title: "Documentation".to_string(),
        description: "The Go documentation".to_string(),
        is_checked: false,
    }]
}
