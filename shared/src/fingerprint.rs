//! Integrity fingerprint for ledger entries
//!
//! This is a placeholder, NOT a cryptographic hash. It folds the JSON text of
//! a record into a 32-bit rolling hash (`acc * 31 + unit`, wrapping), so it is
//! trivially collidable and provides no tamper-evidence. Output format is
//! `0x` followed by 8 lowercase hex digits.

use serde::Serialize;

/// Fingerprint a serializable record.
///
/// Deterministic for a fixed value: typed structs serialize their fields in
/// declaration order.
pub fn fingerprint<T: Serialize + ?Sized>(record: &T) -> String {
    // Serialization only fails for maps with non-string keys
    let text = serde_json::to_string(record).unwrap_or_else(|e| {
        debug_assert!(false, "record failed to serialize: {}", e);
        String::new()
    });
    fingerprint_str(&text)
}

/// Fingerprint already-serialized text
pub fn fingerprint_str(text: &str) -> String {
    render(fold_utf16(text))
}

/// Recompute the fingerprint of `record` and compare with `expected`
pub fn verify<T: Serialize + ?Sized>(record: &T, expected: &str) -> bool {
    fingerprint(record) == expected
}

/// Check that `value` has the fingerprint shape
pub fn is_fingerprint(value: &str) -> bool {
    value.len() == 10
        && value.starts_with("0x")
        && value[2..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

// Operates on UTF-16 code units so astral characters contribute two units.
fn fold_utf16(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

fn render(acc: i32) -> String {
    format!("0x{:08x}", acc.unsigned_abs())
}
