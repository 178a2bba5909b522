#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines, clippy::cast_possible_truncation)]

pub mod cube;
pub mod geometry;
pub mod metrics;
pub mod move_table;
pub mod parser;
pub mod permutation;
pub mod sequence;
pub mod step;
pub mod sticker;
mod transforms;

pub use cube::{Color, CubeState, NeutralMask};
pub use geometry::{Axis, Face, Orientation};
pub use metrics::Metric;
pub use permutation::Permutation;
pub use sequence::{ScrambleSequence, SequenceError};
pub use step::{
    Compound, Layer, MAX_REPEAT, Movement, ParseStepError, Repeat, Step, Turn, Width,
};
pub use sticker::{Corner, Cubie, Edge, Sticker};
