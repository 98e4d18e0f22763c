use sha2::{Digest, Sha256};

/// Rejection rounds before falling back to a plain modulo. The chance of ever
/// needing a second round is below `len / 2^128`.
const MAX_REJECTION_ROUNDS: u32 = 16;

/// Derive a 32-byte seed from a domain tag and a list of parts.
///
/// `seed = sha256( 0x00 || len(domain) || domain || (len(part) || part)* )`
///
/// Every part is length-prefixed (u32 big-endian) so that adjacent parts
/// cannot be re-split into a colliding input.
pub fn derive_seed(domain: &str, parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update([0x00]);
    hasher.update((domain.len() as u32).to_be_bytes());
    hasher.update(domain.as_bytes());
    for part in parts {
        hasher.update((part.len() as u32).to_be_bytes());
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Pick an index in `0..len` uniformly from a 32-byte seed.
///
/// The first 16 bytes are read as a big-endian u128 and accepted only when
/// they fall below the largest multiple of `len`, which removes modulo bias.
/// A rejected value is re-hashed as `sha256(0x01 || current)` and retried.
///
/// Returns `None` when `len == 0`.
pub fn select_index(seed: &[u8; 32], len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let n = len as u128;
    let limit = u128::MAX - (u128::MAX % n);

    let mut current = *seed;
    let mut value = ticket(&current);
    for _ in 0..MAX_REJECTION_ROUNDS {
        if value < limit {
            break;
        }
        let mut hasher = Sha256::new();
        hasher.update([0x01]);
        hasher.update(current);
        current = hasher.finalize().into();
        value = ticket(&current);
    }

    Some((value % n) as usize)
}

fn ticket(bytes: &[u8; 32]) -> u128 {
    let mut ticket_bytes = [0u8; 16];
    ticket_bytes.copy_from_slice(&bytes[0..16]);
    u128::from_be_bytes(ticket_bytes)
}
