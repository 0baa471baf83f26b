//! Admiral identity and call sign generation

use crate::core::types::Timestamp;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Name every profile starts with
pub const PLACEHOLDER_NAME: &str = "Cadet";

/// Call sign every profile starts with
pub const PLACEHOLDER_CALL_SIGN: &str = "NEW-01";

/// Name given to a cadet at first contact
pub const COMMISSIONED_NAME: &str = "Admiral";

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmiralProfile {
    pub name: String,
    pub call_sign: String,
}

impl AdmiralProfile {
    pub fn new(name: impl Into<String>, call_sign: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            call_sign: call_sign.into(),
        }
    }

    /// Still carrying the placeholder name
    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_NAME
    }
}

impl Default for AdmiralProfile {
    fn default() -> Self {
        Self::new(PLACEHOLDER_NAME, PLACEHOLDER_CALL_SIGN)
    }
}

/// Generate a call sign of the form `ADM-XXXX-YYYY`
///
/// `XXXX` is the tail of the base-36 millisecond timestamp, `YYYY` is random.
pub fn generate_call_sign<R: Rng>(rng: &mut R, now: Timestamp) -> String {
    let millis = now.timestamp_millis().max(0) as u64;
    let encoded = to_base36(millis);
    let tail = &encoded[encoded.len().saturating_sub(4)..];
    let random: String = (0..4)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("ADM-{:0>4}-{}", tail, random)
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".into();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // digits are ASCII from BASE36
    String::from_utf8(digits).unwrap_or_default()
}
