//! Key ordering.

use std::cmp::Ordering;

/// Compare two keys.
///
/// Bytes are compared as unsigned values up to the shorter length; if one key
/// is a prefix of the other, the shorter one sorts first. A zero byte is an
/// ordinary byte here, so `b"a\0"` sorts after `b"a"`.
///
/// ```rust
/// use std::cmp::Ordering;
/// use rbkeys::compare;
///
/// assert_eq!(compare(b"ab", b"abc"), Ordering::Less);
/// assert_eq!(compare(b"123\x80", b"123\x7f"), Ordering::Greater);
/// ```
#[inline]
pub fn compare(a: &[u8], b: &[u8]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.cmp(y) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }
    a.len().cmp(&b.len())
}
