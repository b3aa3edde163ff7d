/// Compare two commit ids over the length of the shorter one.
///
/// Parent ids coming from the log backend may be abbreviated, so a full
/// length comparison would miss most matches. Two empty ids are equal, and
/// an empty id matches anything.
pub fn equal_hashes(a: &str, b: &str) -> bool {
    let len = a.len().min(b.len());
    a.as_bytes()[..len] == b.as_bytes()[..len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_tolerant() {
        assert!(equal_hashes("abcd1234", "abcd"));
        assert!(equal_hashes("abcd", "abcd1234"));
        assert!(!equal_hashes("abcd", "abce"));
    }

    #[test]
    fn test_reflexive() {
        for sha in ["", "a", "0123456789abcdef0123456789abcdef01234567"] {
            assert!(equal_hashes(sha, sha));
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(equal_hashes("", ""));
        assert!(equal_hashes("", "abc"));
        assert!(equal_hashes("abc", ""));
    }

    #[test]
    fn test_multibyte_does_not_panic() {
        // byte-wise comparison never slices through a char boundary
        assert!(!equal_hashes("é", "e"));
        assert!(equal_hashes("éa", "é"));
    }
}
