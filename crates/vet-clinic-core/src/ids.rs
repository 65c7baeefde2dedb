//! Opaque identifiers: `prefix + random base-36 suffix`.

use crate::entropy::Entropy;

pub const ANIMAL_PREFIX: &str = "anim_";
pub const APPOINTMENT_PREFIX: &str = "apt_";
pub const STAFF_PREFIX: &str = "staff_";

/// Length of the random suffix.
pub const SUFFIX_LEN: usize = 9;

/// Generate a new identifier. No collision check is performed.
pub fn new_id(prefix: &str, entropy: &mut dyn Entropy) -> String {
    format!("{}{}", prefix, entropy.token(SUFFIX_LEN))
}
