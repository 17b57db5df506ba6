// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Approximate substring alignment (Sellers' algorithm).
//!
//! Plain Levenshtein compares whole strings; here the pattern may start
//! anywhere in the text for free, which is what "location-independent" means
//! for the fuzzy stage. Row 0 of the DP is all zeros, so the best cell in the
//! last row is the cheapest occurrence of the pattern anywhere in the text.
//!
//! Two passes keep memory flat on long bodies: a two-column sweep finds the
//! best end position and its error count, then a full matrix over the short
//! window `[end - m - k, end)` traces back to where the occurrence starts.

/// Best approximate occurrence of a pattern inside a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Edit operations needed (lower is better).
    pub errors: usize,
    /// Character span `[start, end)` of the occurrence in the text.
    pub start: usize,
    pub end: usize,
}

impl Alignment {
    /// Errors per pattern character; 0.0 is a perfect occurrence.
    pub fn score(&self, pattern_len: usize) -> f64 {
        if pattern_len == 0 {
            return 1.0;
        }
        self.errors as f64 / pattern_len as f64
    }
}

#[inline]
fn cost(a: char, b: char) -> usize {
    usize::from(a != b)
}

/// Find the cheapest occurrence of `pattern` in `text` with at most `max_errors` edits.
///
/// Ties on error count resolve to the earliest end position.
pub fn align(pattern: &[char], text: &[char], max_errors: usize) -> Option<Alignment> {
    let m = pattern.len();
    if m == 0 || text.is_empty() {
        return None;
    }

    // Pass 1: best end position.
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr: Vec<usize> = vec![0; m + 1];
    let mut best_errors = prev[m];
    let mut best_end = 0;

    for (j, &tc) in text.iter().enumerate() {
        curr[0] = 0;
        for i in 1..=m {
            curr[i] = (prev[i - 1] + cost(pattern[i - 1], tc))
                .min(prev[i] + 1)
                .min(curr[i - 1] + 1);
        }
        if curr[m] < best_errors {
            best_errors = curr[m];
            best_end = j + 1;
            if best_errors == 0 {
                break;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    if best_errors > max_errors || best_end == 0 {
        return None;
    }

    // Pass 2: traceback inside the window that can hold the occurrence.
    let window_start = best_end.saturating_sub(m + best_errors);
    let window = &text[window_start..best_end];
    let n = window.len();

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = (dp[i - 1][j - 1] + cost(pattern[i - 1], window[j - 1]))
                .min(dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1);
        }
    }

    let (mut i, mut j) = (m, n);
    while i > 0 {
        if j > 0 && dp[i][j] == dp[i - 1][j - 1] + cost(pattern[i - 1], window[j - 1]) {
            i -= 1;
            j -= 1;
        } else if dp[i][j] == dp[i - 1][j] + 1 {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    Some(Alignment {
        errors: dp[m][n],
        start: window_start + j,
        end: best_end,
    })
}
