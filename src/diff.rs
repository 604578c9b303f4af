//! Similarity scoring between the original and rewritten sentence.

use std::collections::HashMap;

/// How much the rewrite changed the original, as `round(1 - ratio, 2)` where
/// ratio is the classic sequence-matcher similarity `2*M / (len(a)+len(b))`
/// (M = total chars covered by the longest matching blocks, found by
/// recursively splitting around the longest common contiguous block).
///
/// 0.0 means identical, 1.0 means no shared blocks at all. Symmetric in its
/// arguments. Two empty strings count as identical (ratio 1.0, diff 0.0).
/// Operates on chars so CJK input is scored per character, not per byte.
pub fn diff_ratio(original: &str, rewritten: &str) -> f64 {
    let a: Vec<char> = original.chars().collect();
    let b: Vec<char> = rewritten.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }

    let matched = matching_chars(&a, &b, 0, a.len(), 0, b.len());
    let ratio = 2.0 * matched as f64 / total as f64;
    ((1.0 - ratio) * 100.0).round() / 100.0
}

/// Total chars covered by matching blocks within `a[alo..ahi]` / `b[blo..bhi]`:
/// find the longest common block, then recurse on the pieces left and right
/// of it. Adjacent recursion windows can't merge blocks across the pivot, so
/// each matched char is counted exactly once.
fn matching_chars(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
    if size == 0 {
        return 0;
    }
    size + matching_chars(a, b, alo, i, blo, j)
        + matching_chars(a, b, i + size, ahi, j + size, bhi)
}

/// Longest block `a[i..i+size] == b[j..j+size]` with `alo <= i`, `blo <= j`.
/// Ties resolve to the earliest block in `a`, then earliest in `b`.
/// `j2len[j]` holds the length of the longest match ending at `a[i]`/`b[j]`,
/// carried row by row so each block is extended in O(1).
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0usize);
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut row: HashMap<usize, usize> = HashMap::new();
        for j in blo..bhi {
            if b[j] != a[i] {
                continue;
            }
            let size = if j > blo {
                j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
            } else {
                1
            };
            row.insert(j, size);
            if size > best.2 {
                best = (i + 1 - size, j + 1 - size, size);
            }
        }
        j2len = row;
    }

    best
}
