use std::fmt;

use itertools::Itertools;

use crate::sticker::{STICKER_COUNT, Sticker};

/// A permutation of the 54 sticker slots.
///
/// `mapping[i]` is the slot that the sticker starting in slot `i` is carried
/// to. Composition follows application order: `a.compose(&b)` applies `a`
/// first.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    mapping: [u8; STICKER_COUNT],
}

impl Permutation {
    #[must_use]
    pub fn identity() -> Permutation {
        Permutation {
            // Map every value to itself
            mapping: std::array::from_fn(|i| i as u8),
        }
    }

    /// Build a permutation from disjoint cycles; slots not mentioned stay put.
    #[must_use]
    pub fn from_cycles(cycles: &[Vec<Sticker>]) -> Permutation {
        let mut permutation = Permutation::identity();

        for cycle in cycles {
            for (start, end) in cycle.iter().cycle().tuple_windows().take(cycle.len()) {
                permutation.mapping[start.id()] = end.id() as u8;
            }
        }

        permutation
    }

    pub(crate) fn from_fn(mut f: impl FnMut(Sticker) -> Sticker) -> Permutation {
        let mut mapping = [0; STICKER_COUNT];
        for sticker in Sticker::all() {
            mapping[sticker.id()] = f(sticker).id() as u8;
        }

        let permutation = Permutation { mapping };
        assert!(
            permutation.is_bijective(),
            "Sticker mapping is not a permutation"
        );
        permutation
    }

    fn is_bijective(&self) -> bool {
        let mut covered = [false; STICKER_COUNT];
        for &value in &self.mapping {
            covered[value as usize] = true;
        }
        covered.iter().all(|&x| x)
    }

    /// Where the sticker starting in `sticker` is carried.
    #[must_use]
    pub fn image(&self, sticker: Sticker) -> Sticker {
        Sticker::from_id(self.mapping[sticker.id()] as usize).expect("mapping stays in range")
    }

    /// The sticker carried into `slot`.
    #[must_use]
    pub fn preimage(&self, slot: Sticker) -> Sticker {
        let id = self
            .mapping
            .iter()
            .position(|&value| value as usize == slot.id())
            .expect("a permutation covers every slot");
        Sticker::from_id(id).expect("mapping stays in range")
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.mapping.iter().enumerate().all(|(i, &v)| i == v as usize)
    }

    /// Apply `other` after `self`, in place.
    pub fn compose(&mut self, other: &Permutation) {
        for value in &mut self.mapping {
            *value = other.mapping[*value as usize];
        }
    }

    #[must_use]
    pub fn composed(&self, other: &Permutation) -> Permutation {
        let mut out = self.clone();
        out.compose(other);
        out
    }

    #[must_use]
    pub fn inverse(&self) -> Permutation {
        let mut mapping = [0; STICKER_COUNT];
        for (i, &value) in self.mapping.iter().enumerate() {
            mapping[value as usize] = i as u8;
        }
        Permutation { mapping }
    }

    /// The stickers that do not stay in their own slot.
    pub fn moved(&self) -> impl Iterator<Item = Sticker> + '_ {
        Sticker::all().filter(|&sticker| self.image(sticker) != sticker)
    }

    /// The non-trivial cycles of this permutation, each starting at its
    /// smallest sticker.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<Sticker>> {
        let mut covered = [false; STICKER_COUNT];
        let mut cycles = vec![];

        for start in Sticker::all() {
            if covered[start.id()] {
                continue;
            }

            covered[start.id()] = true;
            let mut cycle = vec![start];

            loop {
                let next = self.image(*cycle.last().expect("cycle starts non-empty"));

                if cycle[0] == next {
                    break;
                }

                covered[next.id()] = true;
                cycle.push(next);
            }

            if cycle.len() > 1 {
                cycles.push(cycle);
            }
        }

        cycles
    }

    /// The number of times this permutation must be applied to return to the
    /// identity.
    #[must_use]
    pub fn order(&self) -> usize {
        self.cycles()
            .iter()
            .map(Vec::len)
            .fold(1, |acc, len| acc / gcd(acc, len) * len)
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    loop {
        if b == 0 {
            return a;
        }

        let rem = a % b;
        a = b;
        b = rem;
    }
}

impl Default for Permutation {
    fn default() -> Self {
        Permutation::identity()
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return write!(f, "()");
        }

        for cycle in self.cycles() {
            write!(f, "({})", cycle.iter().join(" "))?;
        }

        Ok(())
    }
}
