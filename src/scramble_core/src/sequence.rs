use std::{
    fmt,
    ops::{Bound, Index, Range, RangeBounds},
};

use itertools::Itertools;
use log::trace;
use thiserror::Error;

use crate::{
    geometry::Face,
    parser,
    step::{Movement, Step, Turn, Width},
};

/// An ordered list of move and group tokens.
///
/// Group balance is a derived property: while a sequence is being edited it may
/// hold unmatched openers or closers. Operations that would lose the pairing
/// of groups refuse to run on unbalanced input and leave the sequence as it
/// was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScrambleSequence {
    steps: Vec<Step>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Index {index} is out of bounds for a sequence of {len} steps")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Range {start}..{end} is invalid for a sequence of {len} steps")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("Parentheses are unbalanced in {start}..{end}")]
    Unbalanced { start: usize, end: usize },
    #[error(
        "The group opened at {open} is repeated {repeat} times but changes the cube's orientation"
    )]
    RotationInRepeatedGroup { open: usize, repeat: u8 },
}

impl ScrambleSequence {
    #[must_use]
    pub fn new() -> ScrambleSequence {
        ScrambleSequence { steps: Vec::new() }
    }

    /// Parse canonical text. See [`parser::parse_strict`].
    #[must_use]
    pub fn from_text(text: &str) -> ScrambleSequence {
        parser::parse_strict(text)
    }

    /// Parse text written by [`to_text`](Self::to_text) with `separator`.
    /// Whitespace separates words too. An empty separator adds nothing.
    #[must_use]
    pub fn from_text_with(text: &str, separator: &str) -> ScrambleSequence {
        if separator.is_empty() {
            return parser::parse_strict(text);
        }

        text.split(separator)
            .flat_map(|part| parser::parse_strict(part).steps)
            .collect()
    }

    /// Parse arbitrary, possibly noisy text. See [`parser::parse_lenient`].
    #[must_use]
    pub fn from_text_lenient(text: &str) -> ScrambleSequence {
        parser::parse_lenient(text)
    }

    /// Join the tokens with `separator`, except directly after `(` and
    /// directly before `)`.
    #[must_use]
    pub fn to_text(&self, separator: &str) -> String {
        let mut out = String::new();

        for (i, step) in self.steps.iter().enumerate() {
            let glued = i == 0
                || matches!(self.steps[i - 1], Step::OpenGroup)
                || matches!(step, Step::CloseGroup(_));
            if !glued {
                out.push_str(separator);
            }
            out.push_str(&step.to_string());
        }

        out
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// The move tokens, skipping grouping.
    pub fn turns(&self) -> impl Iterator<Item = Turn> + '_ {
        self.steps.iter().filter_map(|step| step.turn())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Insert `step` before position `pos`; `pos == len` appends.
    pub fn insert(&mut self, step: Step, pos: usize) -> Result<(), SequenceError> {
        if pos > self.steps.len() {
            return Err(SequenceError::IndexOutOfBounds {
                index: pos,
                len: self.steps.len(),
            });
        }

        self.steps.insert(pos, step);
        Ok(())
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn delete(&mut self, pos: usize) -> Result<Step, SequenceError> {
        if pos >= self.steps.len() {
            return Err(SequenceError::IndexOutOfBounds {
                index: pos,
                len: self.steps.len(),
            });
        }

        Ok(self.steps.remove(pos))
    }

    pub fn delete_last(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    /// A detached copy of `count` steps starting at `start`.
    pub fn slice(&self, start: usize, count: usize) -> Result<ScrambleSequence, SequenceError> {
        let range = self.resolve(start..start.saturating_add(count))?;
        Ok(ScrambleSequence::from(self.steps[range].to_vec()))
    }

    pub fn append(&mut self, other: &ScrambleSequence) {
        self.steps.extend_from_slice(&other.steps);
    }

    /// Depth of open groups after the last token. Excess closers never drive
    /// it below zero.
    #[must_use]
    pub fn nest_value(&self) -> usize {
        Self::depth_of(&self.steps).0
    }

    /// Whether every opener has a closer and no closer comes first.
    #[must_use]
    pub fn are_parentheses_ok(&self) -> bool {
        Self::is_balanced(&self.steps)
    }

    /// Number of move tokens, ignoring grouping and repeats.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns().count()
    }

    /// Check a range against the sequence and convert it to a half-open range.
    pub fn resolve(&self, range: impl RangeBounds<usize>) -> Result<Range<usize>, SequenceError> {
        let len = self.steps.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };

        if start > end || end > len {
            return Err(SequenceError::InvalidRange { start, end, len });
        }

        Ok(start..end)
    }

    /// Like [`Self::resolve`], also requiring the range to be balanced.
    pub(crate) fn resolve_balanced(
        &self,
        range: impl RangeBounds<usize>,
    ) -> Result<Range<usize>, SequenceError> {
        let range = self.resolve(range)?;
        if !Self::is_balanced(&self.steps[range.clone()]) {
            trace!("Rejecting unbalanced range {range:?} of {self}");
            return Err(SequenceError::Unbalanced {
                start: range.start,
                end: range.end,
            });
        }
        Ok(range)
    }

    /// Final open depth, and whether a closer ever came without an opener.
    fn depth_of(steps: &[Step]) -> (usize, bool) {
        let mut depth = 0_usize;
        let mut excess_close = false;

        for step in steps {
            match step {
                Step::OpenGroup => depth += 1,
                Step::CloseGroup(_) => match depth.checked_sub(1) {
                    Some(v) => depth = v,
                    None => excess_close = true,
                },
                Step::Turn(_) => {}
            }
        }

        (depth, excess_close)
    }

    pub(crate) fn is_balanced(steps: &[Step]) -> bool {
        Self::depth_of(steps) == (0, false)
    }

    pub(crate) fn steps_mut(&mut self) -> &mut Vec<Step> {
        &mut self.steps
    }

    /// A random sequence of `length` face turns drawn from the 18 canonical
    /// moves. The same face never appears twice in a row, and no three moves
    /// in a row share an axis. The same seed always gives the same sequence.
    #[must_use]
    pub fn random(length: usize, seed: u64) -> ScrambleSequence {
        const LOOKBACK: usize = 2;

        let mut rng = fastrand::Rng::with_seed(seed);
        let mut steps = Vec::with_capacity(length);
        let mut faces: Vec<Face> = Vec::with_capacity(length);

        while faces.len() < length {
            let choice = rng.usize(..Face::ALL.len() * Movement::ALL.len());
            let face = Face::ALL[choice / Movement::ALL.len()];
            let movement = Movement::ALL[choice % Movement::ALL.len()];

            if faces.last() == Some(&face) {
                continue;
            }

            let recent = &faces[faces.len().saturating_sub(LOOKBACK)..];
            if recent.len() == LOOKBACK && recent.iter().all(|other| other.axis() == face.axis()) {
                continue;
            }

            faces.push(face);
            steps.push(Step::Turn(Turn::face(face, movement, Width::Single)));
        }

        ScrambleSequence::from(steps)
    }
}

impl From<Vec<Step>> for ScrambleSequence {
    fn from(steps: Vec<Step>) -> Self {
        ScrambleSequence { steps }
    }
}

impl FromIterator<Step> for ScrambleSequence {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        ScrambleSequence {
            steps: iter.into_iter().collect(),
        }
    }
}

impl Extend<Step> for ScrambleSequence {
    fn extend<T: IntoIterator<Item = Step>>(&mut self, iter: T) {
        self.steps.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ScrambleSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl Index<usize> for ScrambleSequence {
    type Output = Step;

    fn index(&self, index: usize) -> &Self::Output {
        &self.steps[index]
    }
}

impl fmt::Display for ScrambleSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text(" "))
    }
}

/// Debug helper listing tokens one by one, `[R, U, (, ...]`.
#[must_use]
pub fn token_list(sequence: &ScrambleSequence) -> String {
    format!("[{}]", sequence.iter().join(", "))
}
