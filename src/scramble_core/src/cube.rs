//! Sticker-level replay of sequences.

use log::trace;

use crate::{
    geometry::{Face, Orientation},
    move_table::{basic_permutation, orientation_permutation, permutation_of},
    permutation::Permutation,
    sequence::{ScrambleSequence, SequenceError},
    step::{Step, Turn},
    sticker::{Cubie, STICKER_COUNT, Sticker},
};

/// Don't-care flags, keyed by solved sticker identity so that a flag travels
/// with its piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeutralMask {
    neutral: [bool; STICKER_COUNT],
}

impl NeutralMask {
    #[must_use]
    pub fn none() -> NeutralMask {
        NeutralMask {
            neutral: [false; STICKER_COUNT],
        }
    }

    #[must_use]
    pub fn from_stickers(stickers: impl IntoIterator<Item = Sticker>) -> NeutralMask {
        let mut mask = NeutralMask::none();
        for sticker in stickers {
            mask.set(sticker, true);
        }
        mask
    }

    pub fn set(&mut self, sticker: Sticker, neutral: bool) {
        self.neutral[sticker.id()] = neutral;
    }

    #[must_use]
    pub fn is_neutral(&self, sticker: Sticker) -> bool {
        self.neutral[sticker.id()]
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.neutral.iter().filter(|&&neutral| neutral).count()
    }

    /// The flag of every sticker moves to the sticker `permutation` carries it
    /// to.
    fn permuted(&self, permutation: &Permutation) -> NeutralMask {
        let mut out = NeutralMask::none();
        for sticker in Sticker::all() {
            out.set(permutation.image(sticker), self.is_neutral(sticker));
        }
        out
    }
}

impl Default for NeutralMask {
    fn default() -> Self {
        NeutralMask::none()
    }
}

/// Sticker colors under the standard color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Yellow,
    Green,
    Blue,
    Red,
    Orange,
    /// A sticker marked as don't-care
    Neutral,
}

impl Color {
    #[must_use]
    pub fn of_face(face: Face) -> Color {
        match face {
            Face::U => Color::White,
            Face::D => Color::Yellow,
            Face::F => Color::Green,
            Face::B => Color::Blue,
            Face::R => Color::Red,
            Face::L => Color::Orange,
        }
    }
}

/// A cube position: for every solved sticker, the slot it currently occupies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CubeState {
    permutation: Permutation,
    neutral: NeutralMask,
}

impl CubeState {
    #[must_use]
    pub fn new() -> CubeState {
        CubeState::default()
    }

    /// Back to solved. The neutral mask is kept.
    pub fn reset(&mut self) {
        self.permutation = Permutation::identity();
    }

    #[must_use]
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Perform one step. Grouping tokens do nothing.
    pub fn apply_step(&mut self, step: Step) {
        match step {
            Step::Turn(turn) => self.apply_turn(turn),
            Step::OpenGroup | Step::CloseGroup(_) => {}
        }
    }

    pub fn apply_turn(&mut self, turn: Turn) {
        for basic in turn.equivalent_basic_turns() {
            let permutation = basic_permutation(basic).expect("expansions are basic");
            self.permutation.compose(permutation);
        }
    }

    /// Perform every turn of `sequence` once, in order, ignoring groups and
    /// their repeats.
    pub fn apply_scramble(&mut self, sequence: &ScrambleSequence) {
        for &step in sequence {
            self.apply_step(step);
        }
        trace!("Applied {sequence}");
    }

    /// Perform `sequence` with every group repeated as written.
    pub fn apply_developed(&mut self, sequence: &ScrambleSequence) -> Result<(), SequenceError> {
        let mut developed = sequence.clone();
        developed.develop_groups(true)?;
        self.apply_scramble(&developed);
        Ok(())
    }

    /// Which solved sticker occupies `slot`.
    #[must_use]
    pub fn solved_identity_at(&self, slot: Sticker) -> Sticker {
        self.permutation.preimage(slot)
    }

    /// The slot the solved sticker `sticker` currently occupies.
    #[must_use]
    pub fn slot_of(&self, sticker: Sticker) -> Sticker {
        self.permutation.image(sticker)
    }

    /// Which piece sits where `piece` sits in the solved cube.
    #[must_use]
    pub fn solved_piece_at(&self, piece: Cubie) -> Cubie {
        let slot = piece.stickers()[0];
        self.solved_identity_at(slot).cubie()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.permutation.is_identity()
    }

    /// The same position held with U on top and F in front, judged by the
    /// centers.
    #[must_use]
    pub fn normalized(&self) -> CubeState {
        let held = Orientation::from_images(|face| self.slot_of(Sticker::center(face)).face())
            .expect("centers only move by whole-cube rotations");

        let mut out = self.clone();
        out.permutation
            .compose(&orientation_permutation(held.inverse()));
        out
    }

    /// Whether the two positions differ only in how the cube is held.
    #[must_use]
    pub fn same_up_to_rotation(&self, other: &CubeState) -> bool {
        self.normalized().permutation == other.normalized().permutation
    }

    #[must_use]
    pub fn neutral_mask(&self) -> &NeutralMask {
        &self.neutral
    }

    pub fn set_neutral_mask(&mut self, mask: NeutralMask) {
        self.neutral = mask;
    }

    #[must_use]
    pub fn is_neutral_at(&self, slot: Sticker) -> bool {
        self.neutral.is_neutral(self.solved_identity_at(slot))
    }

    /// Re-key the neutral mask as if the pattern it describes were held
    /// after the whole-cube rotation `turn`.
    ///
    /// # Panics
    ///
    /// Panics if `turn` is not a whole-cube rotation.
    pub fn rotate_neutral_mask(&mut self, turn: Turn) {
        assert!(turn.is_rotation(), "{turn} is not a whole-cube rotation");
        self.neutral = self.neutral.permuted(&permutation_of(turn));
    }

    #[must_use]
    pub fn color_at(&self, slot: Sticker) -> Color {
        let solved = self.solved_identity_at(slot);
        if self.neutral.is_neutral(solved) {
            Color::Neutral
        } else {
            Color::of_face(solved.face())
        }
    }
}
