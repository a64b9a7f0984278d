use fxhash::hash64;

/// Deterministic local embedding: token-level feature hashing.
///
/// Each lowercased alphanumeric token is hashed into a signed bucket, so texts
/// that share vocabulary land on the same buckets and score a higher cosine
/// than unrelated texts. The result is L2-normalized; text with no tokens
/// yields the zero vector (which downstream cosine treats as similarity 0.0).
pub(crate) fn hashed_embedding(text: &str, dimension: usize) -> Vec<f32> {
    let mut vector = vec![0f32; dimension];
    for token in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let token = token.to_lowercase();
        let h = hash64(token.as_bytes());
        let bucket = (h % dimension as u64) as usize;
        let sign = if h & (1 << 63) == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign;
    }
    l2_normalize_in_place(&mut vector);
    vector
}

/// Normalize `vector` to unit length in place. Zero vectors are left untouched.
pub(crate) fn l2_normalize_in_place(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if na == 0.0 || nb == 0.0 {
            0.0
        } else {
            dot / (na * nb)
        }
    }

    #[test]
    fn same_text_same_vector() {
        let a = hashed_embedding("hello world", 384);
        let b = hashed_embedding("hello world", 384);
        assert_eq!(a, b);
    }

    #[test]
    fn produced_vector_has_requested_dimension() {
        assert_eq!(hashed_embedding("some text", 384).len(), 384);
        assert_eq!(hashed_embedding("some text", 768).len(), 768);
    }

    #[test]
    fn output_is_unit_length_for_nonempty_text() {
        let v = hashed_embedding("a few tokens here", 384);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
    }

    #[test]
    fn empty_text_yields_zero_vector() {
        let v = hashed_embedding("", 384);
        assert!(v.iter().all(|&x| x == 0.0));

        let punct = hashed_embedding("!!! ... ???", 384);
        assert!(punct.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn tokenization_ignores_case_and_punctuation() {
        let a = hashed_embedding("The Cat, sat!", 384);
        let b = hashed_embedding("the cat sat", 384);
        assert_eq!(a, b);
    }

    #[test]
    fn overlapping_sentences_score_higher_than_unrelated() {
        let s1 = hashed_embedding("The cat sat on the mat", 384);
        let s2 = hashed_embedding("A cat is sitting on a mat", 384);
        let q1 = hashed_embedding("cat", 384);
        let q2 = hashed_embedding("stock market report", 384);

        assert!(cosine(&s1, &s2) > cosine(&q1, &q2));
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        let mut v = vec![0.0f32; 8];
        l2_normalize_in_place(&mut v);
        assert!(v.iter().all(|&x| x == 0.0));
    }
}
