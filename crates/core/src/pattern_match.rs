//! SQL LIKE pattern matching.
//!
//! Two wildcards:
//! - `%` matches zero or more characters
//! - `_` matches exactly one character
//!
//! Matching is **case-sensitive** and operates on Unicode scalar values.

use alloc::vec::Vec;

/// SQL LIKE pattern matching.
///
/// `%` matches any sequence of zero or more characters.
/// `_` matches exactly one character.
///
/// ```
/// use tern_core::pattern_match::like;
/// assert!(like("hello", "h%o"));
/// assert!(like("hello", "_ello"));
/// assert!(!like("hello", "world"));
/// ```
pub fn like(value: &str, pattern: &str) -> bool {
    let v: Vec<char> = value.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    like_recursive(&v, &p, 0, 0)
}

fn like_recursive(v: &[char], p: &[char], vi: usize, pi: usize) -> bool {
    if pi == p.len() {
        return vi == v.len();
    }
    match p[pi] {
        '%' => {
            // % matches zero or more characters
            for skip in vi..=v.len() {
                if like_recursive(v, p, skip, pi + 1) {
                    return true;
                }
            }
            false
        }
        '_' => {
            // _ matches exactly one character
            vi < v.len() && like_recursive(v, p, vi + 1, pi + 1)
        }
        ch => vi < v.len() && v[vi] == ch && like_recursive(v, p, vi + 1, pi + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_exact() {
        assert!(like("hello", "hello"));
        assert!(!like("hello", "world"));
    }

    #[test]
    fn like_percent() {
        assert!(like("hello", "%"));
        assert!(like("hello", "h%"));
        assert!(like("hello", "%o"));
        assert!(like("hello", "h%o"));
        assert!(like("hello", "%ell%"));
        assert!(!like("hello", "x%"));
    }

    #[test]
    fn like_underscore() {
        assert!(like("hello", "_ello"));
        assert!(like("hello", "h_llo"));
        assert!(like("hello", "_____"));
        assert!(!like("hello", "______"));
    }

    #[test]
    fn like_combined() {
        assert!(like("hello", "h%_o"));
        assert!(like("hello world", "hello%"));
        assert!(like("hello world", "%world"));
    }

    #[test]
    fn like_empty() {
        assert!(like("", ""));
        assert!(like("", "%"));
        assert!(!like("", "_"));
        assert!(!like("", "a"));
    }
}
