/// Normalized edit-distance similarity in `[0, 1]`.
///
/// Computed as `(max_len - levenshtein) / max_len` over characters. Two empty
/// strings are identical (1.0); one empty string against a non-empty one
/// scores 0.0. Case is not folded here, callers lower-case first.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = strsim::levenshtein(a, b);
    (max_len - distance) as f64 / max_len as f64
}
