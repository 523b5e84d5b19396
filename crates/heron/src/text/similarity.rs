//! Approximate string similarity on a 0-100 scale.
//!
//! [`weighted_ratio`] blends a plain edit-based ratio with token-order-insensitive and
//! partial (best-window) variants, weighting each by how different the two string
//! lengths are. All functions compare Unicode scalar values, not bytes, and return 0
//! when either input is empty.

use ahash::AHashSet;

const UNBASE_SCALE: f64 = 0.95;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Indel similarity: `2 * LCS / (len1 + len2) * 100`.
pub fn ratio(s1: &str, s2: &str) -> f64 {
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }
    ratio_chars(&chars(s1), &chars(s2))
}

fn partial_ratio_ordered(shorter: &[char], longer: &[char]) -> f64 {
    let len1 = shorter.len();
    let len2 = longer.len();
    let mut best = 0.0f64;

    for end in 1..len1 {
        best = best.max(ratio_chars(shorter, &longer[..end]));
    }

    for start in 0..=(len2 - len1) {
        best = best.max(ratio_chars(shorter, &longer[start..start + len1]));
        if best >= 100.0 {
            return 100.0;
        }
    }

    for start in (len2 - len1 + 1)..len2 {
        best = best.max(ratio_chars(shorter, &longer[start..]));
    }

    best
}

/// Best ratio of the shorter string against every equally long window of the longer one.
pub fn partial_ratio(s1: &str, s2: &str) -> f64 {
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }

    let a = chars(s1);
    let b = chars(s2);

    match a.len().cmp(&b.len()) {
        std::cmp::Ordering::Less => partial_ratio_ordered(&a, &b),
        std::cmp::Ordering::Greater => partial_ratio_ordered(&b, &a),
        std::cmp::Ordering::Equal => partial_ratio_ordered(&a, &b).max(partial_ratio_ordered(&b, &a)),
    }
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

fn join_sorted<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    let mut tokens: Vec<&str> = tokens.into_iter().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Ratio after sorting whitespace-separated tokens.
pub fn token_sort_ratio(s1: &str, s2: &str) -> f64 {
    ratio(&sorted_tokens(s1).join(" "), &sorted_tokens(s2).join(" "))
}

/// Ratio over token sets, rewarding one side's tokens being contained in the other's.
pub fn token_set_ratio(s1: &str, s2: &str) -> f64 {
    let tokens_a: AHashSet<&str> = s1.split_whitespace().collect();
    let tokens_b: AHashSet<&str> = s2.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = join_sorted(tokens_a.intersection(&tokens_b).copied());
    let diff_ab = join_sorted(tokens_a.difference(&tokens_b).copied());
    let diff_ba = join_sorted(tokens_b.difference(&tokens_a).copied());

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab = chars(&diff_ab);
    let diff_ba = chars(&diff_ba);
    let sect_len = intersection.chars().count();
    let separator = usize::from(sect_len > 0);
    let sect_ab_len = sect_len + separator + diff_ab.len();
    let sect_ba_len = sect_len + separator + diff_ba.len();

    // the diff-vs-diff distance is scored against the full "intersection + diff" lengths
    let distance = diff_ab.len() + diff_ba.len() - 2 * lcs_len(&diff_ab, &diff_ba);
    let result = 100.0 * (1.0 - distance as f64 / (sect_ab_len + sect_ba_len) as f64);

    if sect_len == 0 {
        return result;
    }

    // intersection is a prefix of both "intersection + diff" strings, so their ratio
    // against it only depends on lengths
    let sect_ab_ratio = 200.0 * sect_len as f64 / (sect_len + sect_ab_len) as f64;
    let sect_ba_ratio = 200.0 * sect_len as f64 / (sect_len + sect_ba_len) as f64;

    result.max(sect_ab_ratio).max(sect_ba_ratio)
}

/// Partial ratio over token-sorted strings; any shared token scores 100.
pub fn partial_token_ratio(s1: &str, s2: &str) -> f64 {
    let tokens_a: AHashSet<&str> = s1.split_whitespace().collect();
    let tokens_b: AHashSet<&str> = s2.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    if tokens_a.intersection(&tokens_b).next().is_some() {
        return 100.0;
    }

    partial_ratio(&sorted_tokens(s1).join(" "), &sorted_tokens(s2).join(" "))
}

/// Weighted combination of the ratios above.
///
/// Similar-length strings use the plain and token ratios. When one string is at least
/// 1.5 times longer, partial matches count too, scaled down by 0.9 (or 0.6 once the
/// length ratio reaches 8).
pub fn weighted_ratio(s1: &str, s2: &str) -> f64 {
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }

    let len1 = s1.chars().count() as f64;
    let len2 = s2.chars().count() as f64;
    let len_ratio = len1.max(len2) / len1.min(len2);

    let end_ratio = ratio(s1, s2);

    if len_ratio < 1.5 {
        let token_ratio = token_sort_ratio(s1, s2).max(token_set_ratio(s1, s2));
        return end_ratio.max(token_ratio * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };

    end_ratio
        .max(partial_ratio(s1, s2) * partial_scale)
        .max(partial_token_ratio(s1, s2) * UNBASE_SCALE * partial_scale)
}
