//! Perfect hashing over unit identities.
//!
//! For a fixed set of keys the search finds `a` and `r` such that
//!
//! ```text
//! h(x) = ((x * a) ^ ((x * a) >> r)) % prime % n
//! ```
//!
//! sends every key to its own slot in `0..n`. All arithmetic happens in
//! `u128`, so `x * a` cannot wrap for 64-bit keys.

use std::fmt;

use hhat_ir::hash::IrHash;
use log::debug;
use owo_colors::OwoColorize;

use crate::{error::PhfError, options::PhfLimits};

/// Anything that can be placed by the perfect hash.
pub trait PhfKey {
    fn phf_key(&self) -> u64;
}

impl PhfKey for u64 {
    fn phf_key(&self) -> u64 {
        *self
    }
}

impl PhfKey for IrHash {
    fn phf_key(&self) -> u64 {
        self.uid()
    }
}

impl<T: PhfKey> PhfKey for &T {
    fn phf_key(&self) -> u64 {
        (*self).phf_key()
    }
}

/// Picks the modulus for a set of `n` keys.
pub fn phf_prime(n: usize) -> u64 {
    match n {
        0..=32 => 37,
        33..=64 => 67,
        65..=256 => 257,
        257..=4096 => 4099,
        4097..=16384 => 16411,
        _ => 1_048_583,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhfParams {
    pub a: u64,
    pub r: u32,
    pub prime: u64,
    pub n: usize,
}

impl PhfParams {
    pub fn slot_of(&self, key: u64) -> usize {
        slot(key, self.a, self.r, self.prime, self.n)
    }
}

impl fmt::Display for PhfParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a={} r={} prime={} n={}",
            self.a, self.r, self.prime, self.n
        )
    }
}

#[inline]
fn slot(key: u64, a: u64, r: u32, prime: u64, n: usize) -> usize {
    let xa = u128::from(key) * u128::from(a);
    // shifts past the width of u128 leave nothing to mix in
    let mixed = xa ^ xa.checked_shr(r).unwrap_or(0);
    // result is below n, which fits in usize
    ((mixed % u128::from(prime)) % n as u128) as usize
}

/// Searches `a` (outer) then `r` (inner) for the first collision-free
/// parameters, and returns the items reordered so that item `i` sits in
/// slot `i`.
///
/// Keys must be distinct; two equal keys can never be separated and the
/// search runs until the limits are exhausted.
pub fn generate<T: PhfKey>(
    items: Vec<T>,
    limits: PhfLimits,
) -> Result<(Vec<T>, PhfParams), PhfError> {
    let n = items.len();

    if n == 0 {
        return Err(PhfError::Empty);
    }

    let prime = phf_prime(n);
    let keys = items.iter().map(|item| item.phf_key()).collect::<Vec<_>>();
    let mut placed = vec![None::<usize>; n];

    for a in 1..limits.a_limit {
        for r in 0..limits.r_limit {
            if try_place(&keys, a, r, prime, &mut placed) {
                let params = PhfParams { a, r, prime, n };

                debug!("{} {params}", "Perfect Hash".bold().bright_white());

                return Ok((reorder(items, &placed), params));
            }
        }
    }

    Err(PhfError::Exhausted {
        len: n,
        a_limit: limits.a_limit,
        r_limit: limits.r_limit,
    })
}

fn try_place(keys: &[u64], a: u64, r: u32, prime: u64, placed: &mut [Option<usize>]) -> bool {
    placed.fill(None);

    for (idx, &key) in keys.iter().enumerate() {
        let at = slot(key, a, r, prime, keys.len());

        if placed[at].is_some() {
            return false;
        }

        placed[at] = Some(idx);
    }

    true
}

/// Moves every item into the slot it was placed in.
fn reorder<T>(items: Vec<T>, placed: &[Option<usize>]) -> Vec<T> {
    let mut items = items.into_iter().map(Some).collect::<Vec<_>>();

    placed
        .iter()
        .filter_map(|idx| idx.and_then(|idx| items[idx].take()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primes_by_size_class() {
        assert_eq!(phf_prime(1), 37);
        assert_eq!(phf_prime(32), 37);
        assert_eq!(phf_prime(33), 67);
        assert_eq!(phf_prime(256), 257);
        assert_eq!(phf_prime(4096), 4099);
        assert_eq!(phf_prime(16384), 16411);
        assert_eq!(phf_prime(16385), 1_048_583);
    }

    #[test]
    fn places_every_key_in_its_own_slot() {
        let keys = vec![3u64, 17, 4242, u64::MAX, 1 << 40, 99];
        let (ordered, params) = generate(keys.clone(), PhfLimits::default()).unwrap();

        assert_eq!(params.n, keys.len());
        assert_eq!(ordered.len(), keys.len());

        for (slot, key) in ordered.iter().enumerate() {
            assert_eq!(params.slot_of(*key), slot);
        }
        for key in &keys {
            assert!(ordered.contains(key));
        }
    }

    #[test]
    fn single_key_takes_first_parameters() {
        let (ordered, params) = generate(vec![12345u64], PhfLimits::default()).unwrap();

        assert_eq!(ordered, vec![12345]);
        assert_eq!((params.a, params.r), (1, 0));
    }

    #[test]
    fn search_is_deterministic() {
        let keys = vec![8u64, 1, 77, 1024, 5];
        let first = generate(keys.clone(), PhfLimits::default()).unwrap();
        let second = generate(keys, PhfLimits::default()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            generate(Vec::<u64>::new(), PhfLimits::default()),
            Err(PhfError::Empty)
        );
    }

    #[test]
    fn duplicate_keys_exhaust_the_search() {
        let limits = PhfLimits {
            a_limit: 8,
            r_limit: 4,
        };

        assert!(matches!(
            generate(vec![7u64, 7], limits),
            Err(PhfError::Exhausted { len: 2, .. })
        ));
    }

    #[test]
    fn shift_limit_past_key_width() {
        let limits = PhfLimits {
            a_limit: 2,
            r_limit: 200,
        };

        assert_eq!(
            generate(vec![0u64, 0], limits),
            Err(PhfError::Exhausted {
                len: 2,
                a_limit: 2,
                r_limit: 200,
            })
        );
        assert_eq!(slot(u64::MAX, 3, 150, 37, 4), slot(u64::MAX, 3, 128, 37, 4));

        let (ordered, _) = generate(vec![5u64, 9, 13], limits).unwrap();
        assert_eq!(ordered.len(), 3);
    }
}
