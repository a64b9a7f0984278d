use crate::error::StoreError;

/// Cosine similarity between two equal-length vectors.
///
/// Accumulates in f64 so large-magnitude vectors stay numerically stable.
/// If either operand has zero norm the similarity is defined as `0.0` -
/// a deliberate policy, not an error or NaN.
pub fn cosine(a: &[f32], b: &[f32]) -> Result<f32, StoreError> {
    if a.len() != b.len() {
        return Err(StoreError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(cosine_unchecked(a, b))
}

/// Cosine over slices already known to have equal length.
pub(crate) fn cosine_unchecked(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0f64;
    let mut norm_a = 0f64;
    let mut norm_b = 0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}
