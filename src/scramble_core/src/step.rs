//! Move tokens and the algebra on a single token.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{
    geometry::{Axis, Face, Orientation},
    parser,
};

/// What a move token turns: a face, a middle slice or the whole cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    U,
    D,
    F,
    B,
    R,
    L,
    /// Middle slice between R and L, turning like L
    M,
    /// Middle slice between U and D, turning like D
    E,
    /// Middle slice between F and B, turning like F
    S,
    /// Whole cube, turning like R
    X,
    /// Whole cube, turning like U
    Y,
    /// Whole cube, turning like F
    Z,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Movement {
    /// Quarter turn clockwise
    Cw,
    /// Quarter turn counterclockwise
    Ccw,
    /// Half turn
    Half,
}

/// How many layers a face turn takes with it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Width {
    #[default]
    Single,
    /// The face and the adjacent middle slice
    Wide,
    /// All three layers, the same as a whole-cube rotation
    Whole,
}

/// Simultaneous turns of a face and its opposite face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Compound {
    /// The opposite face turns the same way in space (`Rs` is `R L'`)
    Slice,
    /// The opposite face turns its own clockwise (`Ra` is `R L`)
    AntiSlice,
}

/// A single move token. Constructors only produce valid combinations: width
/// and compound modifiers only appear on face layers, never together.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Turn {
    layer: Layer,
    movement: Movement,
    width: Width,
    compound: Option<Compound>,
}

/// A token of a scramble sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    Turn(Turn),
    OpenGroup,
    /// Closes the innermost open group, which is performed `repeat` times.
    CloseGroup(Repeat),
}

pub const MAX_REPEAT: u8 = 9;

/// How many times a group is performed, always in `1..=MAX_REPEAT`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Repeat(u8);

impl Repeat {
    pub const ONCE: Repeat = Repeat(1);

    #[must_use]
    pub fn new(count: u8) -> Option<Repeat> {
        (1..=MAX_REPEAT).contains(&count).then_some(Repeat(count))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Layer {
    pub const ALL: [Layer; 12] = [
        Layer::U,
        Layer::D,
        Layer::F,
        Layer::B,
        Layer::R,
        Layer::L,
        Layer::M,
        Layer::E,
        Layer::S,
        Layer::X,
        Layer::Y,
        Layer::Z,
    ];

    #[must_use]
    pub fn face(self) -> Option<Face> {
        match self {
            Layer::U => Some(Face::U),
            Layer::D => Some(Face::D),
            Layer::F => Some(Face::F),
            Layer::B => Some(Face::B),
            Layer::R => Some(Face::R),
            Layer::L => Some(Face::L),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_slice(self) -> bool {
        matches!(self, Layer::M | Layer::E | Layer::S)
    }

    #[must_use]
    pub fn is_rotation(self) -> bool {
        matches!(self, Layer::X | Layer::Y | Layer::Z)
    }

    /// The face whose clockwise quarter turn this layer's clockwise quarter
    /// turn follows.
    #[must_use]
    pub fn direction(self) -> Face {
        match self {
            Layer::U | Layer::Y => Face::U,
            Layer::D | Layer::E => Face::D,
            Layer::F | Layer::S | Layer::Z => Face::F,
            Layer::B => Face::B,
            Layer::R | Layer::X => Face::R,
            Layer::L | Layer::M => Face::L,
        }
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        self.direction().axis()
    }

    /// The middle slice on `axis`.
    #[must_use]
    pub fn slice(axis: Axis) -> Layer {
        match axis {
            Axis::X => Layer::M,
            Axis::Y => Layer::E,
            Axis::Z => Layer::S,
        }
    }

    /// The whole-cube rotation about `axis`.
    #[must_use]
    pub fn rotation(axis: Axis) -> Layer {
        match axis {
            Axis::X => Layer::X,
            Axis::Y => Layer::Y,
            Axis::Z => Layer::Z,
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Layer::U => 'U',
            Layer::D => 'D',
            Layer::F => 'F',
            Layer::B => 'B',
            Layer::R => 'R',
            Layer::L => 'L',
            Layer::M => 'M',
            Layer::E => 'E',
            Layer::S => 'S',
            Layer::X => 'x',
            Layer::Y => 'y',
            Layer::Z => 'z',
        }
    }
}

impl From<Face> for Layer {
    fn from(face: Face) -> Self {
        match face {
            Face::U => Layer::U,
            Face::D => Layer::D,
            Face::F => Layer::F,
            Face::B => Layer::B,
            Face::R => Layer::R,
            Face::L => Layer::L,
        }
    }
}

impl Movement {
    pub const ALL: [Movement; 3] = [Movement::Cw, Movement::Ccw, Movement::Half];

    /// Clockwise quarter turns, `1..=3`.
    #[must_use]
    pub fn quarter_turns(self) -> u8 {
        match self {
            Movement::Cw => 1,
            Movement::Half => 2,
            Movement::Ccw => 3,
        }
    }

    /// The movement worth `quarter_turns` clockwise quarter turns, or `None`
    /// when that is a multiple of a full turn.
    #[must_use]
    pub fn from_quarter_turns(quarter_turns: u8) -> Option<Movement> {
        match quarter_turns % 4 {
            1 => Some(Movement::Cw),
            2 => Some(Movement::Half),
            3 => Some(Movement::Ccw),
            _ => None,
        }
    }

    #[must_use]
    pub fn inverse(self) -> Movement {
        match self {
            Movement::Cw => Movement::Ccw,
            Movement::Ccw => Movement::Cw,
            Movement::Half => Movement::Half,
        }
    }

    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Movement::Cw => "",
            Movement::Ccw => "'",
            Movement::Half => "2",
        }
    }
}

impl Turn {
    /// A single-layer turn. Face turns, slice turns and whole-cube rotations
    /// are all single-layer in this sense.
    #[must_use]
    pub fn new(layer: Layer, movement: Movement) -> Turn {
        Turn {
            layer,
            movement,
            width: Width::Single,
            compound: None,
        }
    }

    #[must_use]
    pub fn face(face: Face, movement: Movement, width: Width) -> Turn {
        Turn {
            layer: face.into(),
            movement,
            width,
            compound: None,
        }
    }

    #[must_use]
    pub fn compound(face: Face, compound: Compound, movement: Movement) -> Turn {
        Turn {
            layer: face.into(),
            movement,
            width: Width::Single,
            compound: Some(compound),
        }
    }

    #[must_use]
    pub fn layer(self) -> Layer {
        self.layer
    }

    #[must_use]
    pub fn movement(self) -> Movement {
        self.movement
    }

    #[must_use]
    pub fn width(self) -> Width {
        self.width
    }

    #[must_use]
    pub fn compound_modifier(self) -> Option<Compound> {
        self.compound
    }

    /// Whether the move table holds this turn directly.
    #[must_use]
    pub fn is_basic(self) -> bool {
        self.width == Width::Single && self.compound.is_none()
    }

    /// Whether this turn reorients the whole cube without changing its state:
    /// `x`, `y`, `z` and whole-width face turns.
    #[must_use]
    pub fn is_rotation(self) -> bool {
        self.layer.is_rotation() || self.width == Width::Whole
    }

    /// Whether `other` addresses the same layers with the same modifiers, so
    /// that the two can merge into one token.
    #[must_use]
    pub fn same_kind(self, other: Turn) -> bool {
        self.layer == other.layer && self.width == other.width && self.compound == other.compound
    }

    #[must_use]
    pub fn with_movement(self, movement: Movement) -> Turn {
        Turn { movement, ..self }
    }

    #[must_use]
    pub fn inverse(self) -> Turn {
        self.with_movement(self.movement.inverse())
    }

    /// Merge two turns of the same kind. `None` when they cancel.
    ///
    /// # Panics
    ///
    /// Panics if the turns are not of the same kind.
    #[must_use]
    pub fn merge(self, other: Turn) -> Option<Turn> {
        assert!(self.same_kind(other), "Cannot merge {self} with {other}");
        Movement::from_quarter_turns(self.movement.quarter_turns() + other.movement.quarter_turns())
            .map(|movement| self.with_movement(movement))
    }

    /// The whole-cube orientation change this turn causes, if it is a
    /// rotation.
    #[must_use]
    pub fn orientation(self) -> Option<Orientation> {
        self.is_rotation().then(|| {
            Orientation::quarter_turns(self.layer.direction(), self.movement.quarter_turns())
        })
    }

    /// Basic turns that reproduce this turn exactly, in order.
    #[must_use]
    pub fn equivalent_basic_turns(self) -> Vec<Turn> {
        let Some(face) = self.layer.face() else {
            return vec![self];
        };

        match (self.width, self.compound) {
            (Width::Single, None) => vec![self],
            (Width::Wide, _) => vec![
                Turn::new(self.layer, self.movement),
                Turn::following(Layer::slice(face.axis()), face, self.movement),
            ],
            (Width::Whole, _) => vec![Turn::following(
                Layer::rotation(face.axis()),
                face,
                self.movement,
            )],
            (Width::Single, Some(Compound::Slice)) => vec![
                Turn::new(self.layer, self.movement),
                Turn::new(face.opposite().into(), self.movement.inverse()),
            ],
            (Width::Single, Some(Compound::AntiSlice)) => vec![
                Turn::new(self.layer, self.movement),
                Turn::new(face.opposite().into(), self.movement),
            ],
        }
    }

    /// A single-layer turn of `layer` that turns the way `movement` turns
    /// `face`. `face` must lie on `layer`'s axis.
    fn following(layer: Layer, face: Face, movement: Movement) -> Turn {
        debug_assert_eq!(layer.axis(), face.axis());
        if layer.direction() == face {
            Turn::new(layer, movement)
        } else {
            Turn::new(layer, movement.inverse())
        }
    }

    /// Rename the turn into the frame described by `orientation`, which maps
    /// each direction of the turn's frame to the direction that plays its
    /// role.
    #[must_use]
    pub fn relabel(self, orientation: Orientation) -> Turn {
        let direction = orientation.relabel(self.layer.direction());

        if self.layer.face().is_some() {
            return Turn {
                layer: direction.into(),
                ..self
            };
        }

        let layer = if self.layer.is_slice() {
            Layer::slice(direction.axis())
        } else {
            Layer::rotation(direction.axis())
        };

        Turn::following(layer, direction, self.movement)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.layer.letter())?;
        match self.width {
            Width::Single => {}
            Width::Wide => write!(f, "w")?,
            Width::Whole => write!(f, "c")?,
        }
        match self.compound {
            None => {}
            Some(Compound::Slice) => write!(f, "s")?,
            Some(Compound::AntiSlice) => write!(f, "a")?,
        }
        write!(f, "{}", self.movement.suffix())
    }
}

impl Step {
    /// A group closer with the given repeat count, `1..=9`.
    #[must_use]
    pub fn close_group_with_repeat(repeat: u8) -> Option<Step> {
        Repeat::new(repeat).map(Step::CloseGroup)
    }

    #[must_use]
    pub fn is_turn(self) -> bool {
        matches!(self, Step::Turn(_))
    }

    #[must_use]
    pub fn is_structural(self) -> bool {
        !self.is_turn()
    }

    #[must_use]
    pub fn turn(self) -> Option<Turn> {
        match self {
            Step::Turn(turn) => Some(turn),
            _ => None,
        }
    }

    #[must_use]
    pub fn layer(self) -> Option<Layer> {
        self.turn().map(Turn::layer)
    }

    #[must_use]
    pub fn movement(self) -> Option<Movement> {
        self.turn().map(Turn::movement)
    }

    /// The inverse move. Grouping has no token-level inverse; reversing
    /// groups is a sequence operation.
    #[must_use]
    pub fn inverse(self) -> Option<Step> {
        self.turn().map(|turn| Step::Turn(turn.inverse()))
    }

    /// Basic steps reproducing this step. Structural steps expand to
    /// themselves.
    #[must_use]
    pub fn equivalent_basic_steps(self) -> Vec<Step> {
        match self {
            Step::Turn(turn) => turn
                .equivalent_basic_turns()
                .into_iter()
                .map(Step::Turn)
                .collect(),
            structural => vec![structural],
        }
    }
}

impl From<Turn> for Step {
    fn from(turn: Turn) -> Self {
        Step::Turn(turn)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Turn(turn) => write!(f, "{turn}"),
            Step::OpenGroup => write!(f, "("),
            Step::CloseGroup(Repeat::ONCE) => write!(f, ")"),
            Step::CloseGroup(repeat) => write!(f, "){repeat}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseStepError {
    #[error("{0:?} is not a single move token")]
    Unrecognized(String),
}

impl FromStr for Step {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_step(s).ok_or_else(|| ParseStepError::Unrecognized(s.to_owned()))
    }
}

impl FromStr for Turn {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Step>()?
            .turn()
            .ok_or_else(|| ParseStepError::Unrecognized(s.to_owned()))
    }
}
