//! Prompt constants and the context fusion template.
//!
//! The exact frame wording is configuration, not derived data: every
//! augmented message is produced by the same deterministic template.

use algomentor_core::retriever::Passage;

/// The fixed instruction prompt seated at index 0 of every conversation.
pub const DSA_SYSTEM_PROMPT: &str = "\
You are a helpful assistant specializing in Data Structures and Algorithms (DSA).

Instructions:
- Provide only a helpful and accurate answer.
- If the question is unrelated to DSA, respond with: \"I can only answer questions related to Data Structures and Algorithms. Please ask a relevant question.\"
- If the context does not contain the answer, use your own DSA knowledge to respond.
- If you genuinely don't know the answer, reply with: \"I don't know.\"";

/// Substituted when an attached image yields no usable text.
pub const NO_TEXT_PLACEHOLDER: &str = "[no readable text was detected in the attached image]";

/// Label separating typed input from image-derived text in a merged query.
const IMAGE_TEXT_LABEL: &str = "Text from image:";

/// Merge typed input with image-derived text.
///
/// `image_text` is `Some` whenever an image was supplied (the extractor
/// placeholder at minimum), so a turn with an image always has an actionable
/// query. Returns `None` when there is nothing actionable at all.
pub fn merge_inputs(user_text: &str, image_text: Option<&str>) -> Option<String> {
    let user_text = user_text.trim();
    match image_text {
        None if user_text.is_empty() => None,
        None => Some(user_text.to_string()),
        Some(image) if user_text.is_empty() => Some(format!(
            "Explain the following content, which was extracted from an image:\n{image}"
        )),
        Some(image) => Some(format!("{user_text}\n\n{IMAGE_TEXT_LABEL}\n{image}")),
    }
}

/// Build the augmented user message: retrieved passages joined by newline,
/// then the fixed frame embedding the merged question after the context.
pub fn build_augmented_query(passages: &[Passage], question: &str) -> String {
    let context = passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    format!("Context:\n{context}\n\nQuestion:\n{question}")
}
