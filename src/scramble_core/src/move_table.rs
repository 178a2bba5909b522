//! Sticker permutations of the basic turns.

use std::sync::LazyLock;

use log::trace;

use crate::{
    geometry::{Orientation, rotate_cw_times},
    permutation::Permutation,
    step::{Layer, Movement, Turn},
    sticker::Sticker,
};

/// Permutations of every single-layer turn, indexed by layer then movement.
static MOVE_TABLE: LazyLock<Vec<[Permutation; 3]>> = LazyLock::new(|| {
    let table = Layer::ALL
        .into_iter()
        .map(|layer| Movement::ALL.map(|movement| layer_permutation(layer, movement)))
        .collect::<Vec<_>>();
    trace!("Built move table for {} layers", table.len());
    table
});

fn layer_permutation(layer: Layer, movement: Movement) -> Permutation {
    let direction = layer.direction();
    let quarter_turns = movement.quarter_turns();

    Permutation::from_fn(|sticker| {
        let selected = if layer.is_rotation() {
            true
        } else if layer.is_slice() {
            sticker.in_layer(direction, 0)
        } else {
            sticker.in_layer(direction, 1)
        };

        if !selected {
            return sticker;
        }

        Sticker::at(
            rotate_cw_times(sticker.position(), direction, quarter_turns),
            rotate_cw_times(sticker.face().normal(), direction, quarter_turns),
        )
    })
}

/// The permutation of a basic turn, or `None` for turns that need expanding
/// first.
#[must_use]
pub fn basic_permutation(turn: Turn) -> Option<&'static Permutation> {
    if !turn.is_basic() {
        return None;
    }

    let layer = Layer::ALL
        .iter()
        .position(|&layer| layer == turn.layer())
        .expect("every layer is in the table");
    let movement = Movement::ALL
        .iter()
        .position(|&movement| movement == turn.movement())
        .expect("every movement is in the table");

    Some(&MOVE_TABLE[layer][movement])
}

/// The permutation of any turn, composing the basic turns it expands to.
#[must_use]
pub fn permutation_of(turn: Turn) -> Permutation {
    if let Some(permutation) = basic_permutation(turn) {
        return permutation.clone();
    }

    let mut permutation = Permutation::identity();
    for basic in turn.equivalent_basic_turns() {
        let table_entry = basic_permutation(basic).expect("expansions are basic");
        permutation.compose(table_entry);
    }
    permutation
}

/// The permutation of holding the whole cube in `orientation`.
#[must_use]
pub fn orientation_permutation(orientation: Orientation) -> Permutation {
    Permutation::from_fn(|sticker| {
        Sticker::at(
            orientation.apply(sticker.position()),
            orientation.apply(sticker.face().normal()),
        )
    })
}

#[cfg(test)]
mod tests {
    use crate::{
        geometry::Face,
        step::{Width, tests::all_turns},
    };

    use super::*;

    fn turn(s: &str) -> Turn {
        s.parse().unwrap()
    }

    #[test]
    fn quarter_turns_have_order_four() {
        for layer in Layer::ALL {
            let quarter = basic_permutation(Turn::new(layer, Movement::Cw)).unwrap();
            assert_eq!(quarter.order(), 4, "{layer:?}");

            let half = basic_permutation(Turn::new(layer, Movement::Half)).unwrap();
            assert_eq!(&quarter.composed(quarter), half, "{layer:?}");

            let ccw = basic_permutation(Turn::new(layer, Movement::Ccw)).unwrap();
            assert!(quarter.composed(ccw).is_identity(), "{layer:?}");
        }
    }

    #[test]
    fn moved_sticker_counts() {
        assert_eq!(permutation_of(turn("R")).moved().count(), 20);
        assert_eq!(permutation_of(turn("M")).moved().count(), 12);
        // Only the R and L centers stay put
        assert_eq!(permutation_of(turn("x")).moved().count(), 52);
    }

    #[test]
    fn r_carries_front_stickers_up() {
        let r = permutation_of(turn("R"));
        // The front-right column moves to the up-right column
        assert_eq!(r.image(Sticker::new(Face::F, 2)), Sticker::new(Face::U, 2));
        assert_eq!(r.image(Sticker::new(Face::F, 8)), Sticker::new(Face::U, 8));
        assert_eq!(r.image(Sticker::new(Face::U, 8)), Sticker::new(Face::B, 0));
        assert_eq!(r.image(Sticker::center(Face::R)), Sticker::center(Face::R));
    }

    #[test]
    fn compound_turns_match_their_pieces() {
        fn compose(texts: &[&str]) -> Permutation {
            texts.iter().fold(Permutation::identity(), |acc, text| {
                acc.composed(&permutation_of(turn(text)))
            })
        }

        assert_eq!(permutation_of(turn("Rw")), compose(&["R", "M'"]));
        assert_eq!(permutation_of(turn("Rc")), compose(&["x"]));
        assert_eq!(permutation_of(turn("Rc")), compose(&["R", "M'", "L'"]));
        assert_eq!(permutation_of(turn("Rs")), compose(&["R", "L'"]));
        assert_eq!(permutation_of(turn("Ua2")), compose(&["U2", "D2"]));
        assert_eq!(permutation_of(turn("Dw")), compose(&["y'", "U"]));
    }

    #[test]
    fn rotations_match_their_orientation() {
        for turn in all_turns().into_iter().filter(|turn| turn.is_rotation()) {
            let orientation = turn.orientation().unwrap();
            assert_eq!(orientation_permutation(orientation), permutation_of(turn), "{turn}");
        }
        assert!(orientation_permutation(Orientation::IDENTITY).is_identity());
    }

    #[test]
    fn only_basic_turns_are_tabled() {
        for turn in all_turns() {
            assert_eq!(basic_permutation(turn).is_some(), turn.is_basic(), "{turn}");
            let order = if turn.movement() == Movement::Half { 2 } else { 4 };
            assert_eq!(permutation_of(turn).order(), order, "{turn}");
        }
        assert!(basic_permutation(Turn::face(Face::L, Movement::Cw, Width::Wide)).is_none());
    }
}
