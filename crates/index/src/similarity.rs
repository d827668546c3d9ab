//! Vector similarity utilities.

use crate::store::IndexedPassage;
use algomentor_core::retriever::Passage;

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal.
/// Returns 0.0 if either vector is zero-length or empty.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// Rank passages by cosine similarity to a query embedding.
///
/// Returns the top-k passages sorted by descending similarity, with `score`
/// set to the cosine similarity value.
pub fn rank_by_similarity(
    passages: &[IndexedPassage],
    query_embedding: &[f32],
    k: usize,
) -> Vec<Passage> {
    let mut scored: Vec<(f32, &IndexedPassage)> = passages
        .iter()
        .map(|p| (cosine_similarity(&p.embedding, query_embedding), p))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(k);

    scored
        .into_iter()
        .map(|(score, p)| Passage {
            text: p.text.clone(),
            source: p.source.clone(),
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(text: &str, embedding: Vec<f32>) -> IndexedPassage {
        IndexedPassage {
            text: text.into(),
            source: None,
            embedding,
        }
    }

    #[test]
    fn cosine_identical_vectors() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn cosine_empty_and_mismatched() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn cosine_zero_vector() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn cosine_known_value() {
        // [1,1] · [1,0] = 1, |[1,1]| = sqrt(2), |[1,0]| = 1 → ~0.7071
        let a = vec![1.0, 1.0];
        let b = vec![1.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 0.7071).abs() < 0.001);
    }

    #[test]
    fn ranks_by_descending_similarity() {
        let query = vec![1.0, 0.0, 0.0];
        let passages = vec![
            passage("orthogonal", vec![0.0, 1.0, 0.0]),
            passage("identical", vec![1.0, 0.0, 0.0]),
            passage("partial", vec![0.5, 0.5, 0.0]),
        ];

        let results = rank_by_similarity(&passages, &query, 10);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].text, "identical");
        assert_eq!(results[1].text, "partial");
        assert_eq!(results[2].text, "orthogonal");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn respects_k() {
        let query = vec![1.0, 0.0];
        let passages: Vec<_> = (0..10)
            .map(|i| passage(&format!("p{i}"), vec![1.0, i as f32 * 0.1]))
            .collect();

        let results = rank_by_similarity(&passages, &query, 2);
        assert_eq!(results.len(), 2);
    }
}
