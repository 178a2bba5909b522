//! Whole-sequence rewrites.
//!
//! Every fallible transform validates its input before touching the sequence,
//! so an `Err` always leaves the sequence exactly as it was.

use std::ops::RangeBounds;

use log::debug;

use crate::{
    geometry::{Axis, Orientation},
    sequence::{ScrambleSequence, SequenceError},
    step::{Layer, Movement, Repeat, Step, Turn},
};

impl ScrambleSequence {
    /// Merge adjacent turns of the same kind, dropping pairs that cancel.
    /// Returns whether anything changed. The result is a fixed point, so a
    /// second call returns `false`.
    pub fn shrink(&mut self) -> bool {
        let changed = shrink_steps(self.steps_mut());
        if changed {
            debug!("Shrunk to {self}");
        }
        changed
    }

    /// Shrink the turns in `range`, also letting turns on the same axis pass
    /// each other to find cancellations. The range must be balanced. Returns
    /// whether anything changed.
    pub fn simplify(&mut self, range: impl RangeBounds<usize>) -> Result<bool, SequenceError> {
        let range = self.resolve_balanced(range)?;

        let original = &self.steps()[range.clone()];
        let mut steps = original.to_vec();
        while collapse_axis_runs(&mut steps) {}

        let changed = steps != original;
        self.steps_mut().splice(range, steps).for_each(drop);

        if changed {
            debug!("Simplified to {self}");
        }
        Ok(changed)
    }

    /// Delete every whole-cube rotation, renaming the turns after it so that
    /// the cube ends in the same state up to how it is held.
    ///
    /// Fails when a group repeated more than once changes the orientation,
    /// since no relabeling can express the later repetitions.
    pub fn remove_turns(&mut self) -> Result<bool, SequenceError> {
        let mut frame = Orientation::IDENTITY;
        let mut open_frames: Vec<(usize, Orientation)> = vec![];
        let mut steps = Vec::with_capacity(self.len());
        let mut removed = 0;

        for (i, &step) in self.iter().enumerate() {
            match step {
                Step::OpenGroup => {
                    open_frames.push((i, frame));
                    steps.push(step);
                }
                Step::CloseGroup(repeat) => {
                    if let Some((open, open_frame)) = open_frames.pop() {
                        if repeat > Repeat::ONCE && open_frame != frame {
                            return Err(SequenceError::RotationInRepeatedGroup {
                                open,
                                repeat: repeat.get(),
                            });
                        }
                    }
                    steps.push(step);
                }
                Step::Turn(turn) => match turn.orientation() {
                    Some(rotation) => {
                        frame = rotation.inverse().then(frame);
                        removed += 1;
                    }
                    None => steps.push(Step::Turn(turn.relabel(frame))),
                },
            }
        }

        if removed == 0 {
            return Ok(false);
        }

        *self = ScrambleSequence::from(steps);
        debug!("Removed {removed} rotations: {self}");
        Ok(true)
    }

    /// Replace every wide, whole-layer and compound turn by the single-layer
    /// turns it stands for.
    pub fn to_basic_steps(&mut self) {
        let steps = self
            .iter()
            .flat_map(|step| step.equivalent_basic_steps())
            .collect::<Vec<_>>();
        *self.steps_mut() = steps;
    }

    /// Reverse the order of the steps in `range`. Group openers and closers
    /// swap roles, keeping each closer's repeat with its group.
    pub fn reverse(&mut self, range: impl RangeBounds<usize>) -> Result<(), SequenceError> {
        let range = self.resolve_balanced(range)?;
        let steps = &mut self.steps_mut()[range];

        steps.reverse();

        let mut repeats = vec![];
        for step in steps.iter_mut() {
            match *step {
                Step::CloseGroup(repeat) => {
                    repeats.push(repeat);
                    *step = Step::OpenGroup;
                }
                Step::OpenGroup => {
                    let repeat = repeats.pop().expect("the range is balanced");
                    *step = Step::CloseGroup(repeat);
                }
                Step::Turn(_) => {}
            }
        }

        Ok(())
    }

    /// Invert every turn in `range` in place, without reordering.
    pub fn invert(&mut self, range: impl RangeBounds<usize>) -> Result<(), SequenceError> {
        let range = self.resolve(range)?;

        for step in &mut self.steps_mut()[range] {
            if let Some(inverse) = step.inverse() {
                *step = inverse;
            }
        }

        Ok(())
    }

    /// Turn the sequence into its algebraic inverse: performing the result
    /// after the original restores the starting state.
    pub fn inverse_and_reverse(&mut self) -> Result<(), SequenceError> {
        self.reverse(..)?;
        self.invert(..)
    }

    /// Conjugate `range` by a whole-cube rotation: afterwards the range does
    /// what `rotation range rotation'` did before, with no rotation tokens
    /// added.
    pub fn apply_turn(
        &mut self,
        axis: Axis,
        movement: Movement,
        range: impl RangeBounds<usize>,
    ) -> Result<(), SequenceError> {
        let range = self.resolve_balanced(range)?;
        let frame = Turn::new(Layer::rotation(axis), movement)
            .orientation()
            .expect("whole-cube layers are rotations")
            .inverse();

        for step in &mut self.steps_mut()[range] {
            if let Step::Turn(turn) = *step {
                *step = Step::Turn(turn.relabel(frame));
            }
        }

        Ok(())
    }

    /// Expand repeated groups into literal copies, innermost first. Groups
    /// performed once keep their parentheses unless `flatten_single` is set.
    pub fn develop_groups(&mut self, flatten_single: bool) -> Result<(), SequenceError> {
        let range = self.resolve_balanced(..)?;
        let steps = develop(&self.steps()[range], flatten_single);
        *self.steps_mut() = steps;
        Ok(())
    }

    /// Close every group still open at the end of the sequence.
    pub fn complete_groups(&mut self) {
        for _ in 0..self.nest_value() {
            self.push(Step::CloseGroup(Repeat::ONCE));
        }
    }
}

fn shrink_steps(steps: &mut Vec<Step>) -> bool {
    let mut changed = false;
    let mut i = 0;

    while i + 1 < steps.len() {
        let (Step::Turn(a), Step::Turn(b)) = (steps[i], steps[i + 1]) else {
            i += 1;
            continue;
        };

        if !a.same_kind(b) {
            i += 1;
            continue;
        }

        changed = true;
        match a.merge(b) {
            Some(merged) => {
                steps[i] = Step::Turn(merged);
                steps.remove(i + 1);
            }
            None => {
                steps.drain(i..i + 2);
                i = i.saturating_sub(1);
            }
        }
    }

    changed
}

/// Within every run of adjacent turns on one axis, sum the turns of each kind
/// in order of first appearance. Returns whether the steps changed.
fn collapse_axis_runs(steps: &mut Vec<Step>) -> bool {
    let mut out = Vec::with_capacity(steps.len());
    let mut i = 0;

    while i < steps.len() {
        let Step::Turn(first) = steps[i] else {
            out.push(steps[i]);
            i += 1;
            continue;
        };

        let axis = first.layer().axis();
        let run_len = steps[i..]
            .iter()
            .take_while(|step| step.layer().is_some_and(|layer| layer.axis() == axis))
            .count();

        let mut kinds: Vec<(Turn, u8)> = vec![];
        for turn in steps[i..i + run_len].iter().filter_map(|step| step.turn()) {
            match kinds.iter_mut().find(|(kind, _)| kind.same_kind(turn)) {
                Some((_, quarter_turns)) => {
                    *quarter_turns = (*quarter_turns + turn.movement().quarter_turns()) % 4;
                }
                None => kinds.push((turn, turn.movement().quarter_turns())),
            }
        }

        out.extend(kinds.into_iter().filter_map(|(kind, quarter_turns)| {
            Movement::from_quarter_turns(quarter_turns)
                .map(|movement| Step::Turn(kind.with_movement(movement)))
        }));
        i += run_len;
    }

    let changed = out != *steps;
    *steps = out;
    changed
}

fn develop(steps: &[Step], flatten_single: bool) -> Vec<Step> {
    let mut frames: Vec<Vec<Step>> = vec![vec![]];

    for &step in steps {
        match step {
            Step::OpenGroup => frames.push(vec![]),
            Step::CloseGroup(repeat) => {
                let body = frames.pop().expect("the steps are balanced");
                let parent = frames.last_mut().expect("the steps are balanced");

                if repeat > Repeat::ONCE || flatten_single {
                    for _ in 0..repeat.get() {
                        parent.extend_from_slice(&body);
                    }
                } else {
                    parent.push(Step::OpenGroup);
                    parent.extend(body);
                    parent.push(Step::CloseGroup(Repeat::ONCE));
                }
            }
            Step::Turn(_) => frames
                .last_mut()
                .expect("the outermost frame is never popped")
                .push(step),
        }
    }

    frames.pop().expect("the outermost frame is never popped")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> ScrambleSequence {
        ScrambleSequence::from_text(text)
    }

    fn transformed(
        text: &str,
        f: impl FnOnce(&mut ScrambleSequence) -> Result<(), SequenceError>,
    ) -> Result<String, SequenceError> {
        let mut sequence = seq(text);
        f(&mut sequence)?;
        Ok(sequence.to_string())
    }

    #[test]
    fn shrink_merges_and_cancels() {
        let mut sequence = seq("R R U U' R F2 F2 F");
        assert!(sequence.shrink());
        assert_eq!(sequence.to_string(), "R' F");
        assert!(!sequence.shrink());
        assert_eq!(sequence.to_string(), "R' F");

        let mut sequence = seq("R U U' R'");
        assert!(sequence.shrink());
        assert!(sequence.is_empty());
    }

    #[test]
    fn shrink_respects_groups_and_kinds() {
        let mut sequence = seq("R (R' U)2 Rw R x x'");
        assert!(sequence.shrink());
        assert_eq!(sequence.to_string(), "R (R' U)2 Rw R");
    }

    #[test]
    fn simplify_passes_commuting_turns() {
        let mut sequence = seq("R L R' U D U' D'");
        assert_eq!(sequence.simplify(..), Ok(true));
        assert_eq!(sequence.to_string(), "L");

        let mut sequence = seq("F B F x R x'");
        assert_eq!(sequence.simplify(..), Ok(true));
        assert_eq!(sequence.to_string(), "F2 B R");

        let mut sequence = seq("R U F");
        assert_eq!(sequence.simplify(..), Ok(false));
    }

    #[test]
    fn simplify_stays_in_range() {
        let mut sequence = seq("R R L R' L'");
        assert_eq!(sequence.simplify(2..), Ok(true));
        assert_eq!(sequence.to_string(), "R R R'");

        let mut sequence = seq("(R R)2 R");
        let before = sequence.clone();
        assert_eq!(
            sequence.simplify(1..),
            Err(SequenceError::Unbalanced { start: 1, end: 5 })
        );
        assert_eq!(sequence, before);

        assert_eq!(sequence.simplify(0..4), Ok(true));
        assert_eq!(sequence.to_string(), "(R2)2 R");
    }

    #[test]
    fn remove_turns_relabels_later_moves() {
        let mut sequence = seq("R x U y R");
        assert_eq!(sequence.remove_turns(), Ok(true));
        assert_eq!(sequence.to_string(), "R F U");

        let mut sequence = seq("Rc U Lc U");
        assert_eq!(sequence.remove_turns(), Ok(true));
        assert_eq!(sequence.to_string(), "F U");

        let mut sequence = seq("R U");
        assert_eq!(sequence.remove_turns(), Ok(false));
    }

    #[test]
    fn remove_turns_rejects_rotating_repeats() {
        let mut sequence = seq("(R x)2 U");
        let before = sequence.clone();
        assert_eq!(
            sequence.remove_turns(),
            Err(SequenceError::RotationInRepeatedGroup { open: 0, repeat: 2 })
        );
        assert_eq!(sequence, before);

        let mut sequence = seq("(R x) U (y F y')3");
        assert_eq!(sequence.remove_turns(), Ok(true));
        assert_eq!(sequence.to_string(), "(R) F (R)3");
    }

    #[test]
    fn basic_steps() {
        let mut sequence = seq("(Rw Fs)2 Uc M");
        sequence.to_basic_steps();
        assert_eq!(sequence.to_string(), "(R M' F B')2 y M");
    }

    #[test]
    fn reverse_swaps_group_roles() {
        assert_eq!(
            transformed("(R U)3 F ((B)2 D)", |s| s.reverse(..)).unwrap(),
            "(D (B)2) F (U R)3"
        );
        assert_eq!(transformed("R U F", |s| s.reverse(1..)).unwrap(), "R F U");

        let mut sequence = seq("(R U");
        let before = sequence.clone();
        assert!(sequence.reverse(..).is_err());
        assert_eq!(sequence, before);
        assert!(seq("R) (U").reverse(..).is_err());
    }

    #[test]
    fn invert_keeps_order() {
        assert_eq!(
            transformed("(R U2 Fw')2 x", |s| s.invert(..)).unwrap(),
            "(R' U2 Fw)2 x'"
        );
        assert_eq!(transformed("R U F", |s| s.invert(1..2)).unwrap(), "R U' F");
        assert!(seq("R").invert(0..3).is_err());
    }

    #[test]
    fn inverse_and_reverse_is_the_inverse() {
        assert_eq!(
            transformed("R U R' U'", ScrambleSequence::inverse_and_reverse).unwrap(),
            "U R U' R'"
        );
        assert_eq!(
            transformed("(R U)2 F", ScrambleSequence::inverse_and_reverse).unwrap(),
            "F' (U' R')2"
        );
        assert!(seq("(R").inverse_and_reverse().is_err());
    }

    #[test]
    fn apply_turn_relabels() {
        assert_eq!(
            transformed("R U E M y", |s| s.apply_turn(Axis::X, Movement::Cw, ..)).unwrap(),
            "R F S' M z"
        );
        assert_eq!(
            transformed("U U", |s| s.apply_turn(Axis::Y, Movement::Half, 1..)).unwrap(),
            "U U"
        );
        assert_eq!(
            transformed("F F", |s| s.apply_turn(Axis::Y, Movement::Cw, 1..)).unwrap(),
            "F R"
        );
        assert!(seq("(R").apply_turn(Axis::Z, Movement::Ccw, ..).is_err());
    }

    #[test]
    fn develop_expands_innermost_first() {
        assert_eq!(
            transformed("((R U)2 F)2", |s| s.develop_groups(true)).unwrap(),
            "R U R U F R U R U F"
        );
        assert_eq!(
            transformed("(R (U)2) F", |s| s.develop_groups(false)).unwrap(),
            "(R U U) F"
        );
        assert_eq!(
            transformed("(R (U)2) F", |s| s.develop_groups(true)).unwrap(),
            "R U U F"
        );
        assert!(seq("(R U").develop_groups(true).is_err());
    }

    #[test]
    fn complete_groups_closes_open_groups() {
        let mut sequence = seq("((R U)2 (F");
        sequence.complete_groups();
        assert_eq!(sequence.to_string(), "((R U)2 (F))");
        assert!(sequence.are_parentheses_ok());

        let mut sequence = seq("R U");
        sequence.complete_groups();
        assert_eq!(sequence.to_string(), "R U");
    }
}
