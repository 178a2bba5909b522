//! Move counting under the common speedcubing metrics.

use std::fmt;

use crate::{
    sequence::ScrambleSequence,
    step::{Compound, Movement, Step, Turn},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Half turn metric: any turn of one outer layer counts once
    Htm,
    /// Quarter turn metric: half turns count twice
    Qtm,
    /// Slice turn metric: any turn of one block of adjacent layers counts once
    Stm,
    /// Execution turn metric: every token counts once, rotations included
    Etm,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Htm, Metric::Qtm, Metric::Stm, Metric::Etm];

    /// Cost of a single turn.
    #[must_use]
    pub fn cost(self, turn: Turn) -> usize {
        if self == Metric::Etm {
            return 1;
        }
        if turn.is_rotation() {
            return 0;
        }

        let quarter = usize::from(self == Metric::Qtm && turn.movement() == Movement::Half) + 1;

        let blocks = match turn.compound_modifier() {
            Some(Compound::Slice) if self == Metric::Stm => 1,
            Some(_) => 2,
            None if turn.layer().is_slice() && self != Metric::Stm => 2,
            None => 1,
        };

        blocks * quarter
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Htm => "HTM",
            Metric::Qtm => "QTM",
            Metric::Stm => "STM",
            Metric::Etm => "ETM",
        };
        write!(f, "{name}")
    }
}

impl ScrambleSequence {
    /// Length of the sequence as performed, with every group repeated.
    /// Unclosed groups count once and stray closers are ignored.
    #[must_use]
    pub fn move_count(&self, metric: Metric) -> usize {
        let mut totals = vec![0_usize];

        for &step in self {
            match step {
                Step::Turn(turn) => {
                    *totals.last_mut().expect("the outermost total is never popped") +=
                        metric.cost(turn);
                }
                Step::OpenGroup => totals.push(0),
                Step::CloseGroup(repeat) => {
                    if totals.len() > 1 {
                        let body = totals.pop().expect("checked above");
                        *totals.last_mut().expect("checked above") += body * usize::from(repeat.get());
                    }
                }
            }
        }

        totals.into_iter().sum()
    }
}
