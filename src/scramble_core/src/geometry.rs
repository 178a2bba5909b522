//! Spatial vocabulary of the cube: faces, axes and whole-cube orientations.
//!
//! Coordinates are integer vectors with `x` pointing to R, `y` to U and `z` to
//! F. Every cubie sits at a point of `{-1, 0, 1}^3` and every sticker faces one
//! of the six unit vectors.

use std::{fmt, sync::LazyLock};

use itertools::Itertools;

/// A face of the cube, named by its solved position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    D,
    F,
    B,
    R,
    L,
}

/// One of the three rotation axes. `X` runs through R and L, `Y` through U
/// and D, `Z` through F and B.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

pub(crate) type Vec3 = [i8; 3];

impl Face {
    pub const ALL: [Face; 6] = {
        use Face::*;
        let v = [U, D, F, B, R, L];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
            Face::R => Face::L,
            Face::L => Face::R,
        }
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
            Face::R => 'R',
            Face::L => 'L',
        }
    }

    /// The outward unit normal of the face.
    pub(crate) fn normal(self) -> Vec3 {
        match self {
            Face::U => [0, 1, 0],
            Face::D => [0, -1, 0],
            Face::F => [0, 0, 1],
            Face::B => [0, 0, -1],
            Face::R => [1, 0, 0],
            Face::L => [-1, 0, 0],
        }
    }

    pub(crate) fn from_normal(normal: Vec3) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.normal() == normal)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The face whose clockwise turn defines the positive direction of this
    /// axis, matching the `x`, `y` and `z` rotations.
    #[must_use]
    pub fn positive_face(self) -> Face {
        match self {
            Axis::X => Face::R,
            Axis::Y => Face::U,
            Axis::Z => Face::F,
        }
    }
}

pub(crate) fn dot(a: Vec3, b: Vec3) -> i8 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Rotate `v` a quarter turn clockwise as seen looking at `face` from outside
/// the cube.
pub(crate) fn rotate_cw(v: Vec3, face: Face) -> Vec3 {
    let [x, y, z] = v;
    match face {
        Face::R => [x, z, -y],
        Face::U => [-z, y, x],
        Face::F => [y, -x, z],
        // A clockwise turn of a face is a counterclockwise turn of its opposite
        Face::L | Face::D | Face::B => {
            let opposite = face.opposite();
            rotate_cw(rotate_cw(rotate_cw(v, opposite), opposite), opposite)
        }
    }
}

pub(crate) fn rotate_cw_times(mut v: Vec3, face: Face, quarter_turns: u8) -> Vec3 {
    for _ in 0..quarter_turns {
        v = rotate_cw(v, face);
    }
    v
}

/// A whole-cube orientation: a proper rotation of space, stored as the image
/// of each face direction.
///
/// Used as a relabeling map. For a rotation `r`, `r.inverse().relabel(face)`
/// names the face that `r` carries into `face`'s position.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Orientation {
    images: [Face; 6],
}

/// All 24 orientations, generated from the `x` and `y` quarter turns. Index 0
/// is the identity.
static ORIENTATIONS: LazyLock<Vec<Orientation>> = LazyLock::new(|| {
    let generators = [
        Orientation::quarter_turns(Face::R, 1),
        Orientation::quarter_turns(Face::U, 1),
    ];

    let mut table = vec![Orientation::IDENTITY];
    let mut i = 0;
    while i < table.len() {
        let current = table[i];
        for generator in generators {
            let next = current.then(generator);
            if !table.contains(&next) {
                table.push(next);
            }
        }
        i += 1;
    }

    assert_eq!(table.len(), 24);
    table
});

impl Orientation {
    pub const IDENTITY: Orientation = Orientation { images: Face::ALL };

    /// The 24-entry table of every orientation of the cube.
    #[must_use]
    pub fn all() -> &'static [Orientation] {
        &ORIENTATIONS
    }

    /// The orientation reached by turning the whole cube `quarter_turns` times
    /// clockwise about `face`.
    #[must_use]
    pub fn quarter_turns(face: Face, quarter_turns: u8) -> Orientation {
        Orientation {
            images: Face::ALL.map(|other| {
                Face::from_normal(rotate_cw_times(other.normal(), face, quarter_turns))
                    .expect("a quarter turn maps unit normals to unit normals")
            }),
        }
    }

    /// Where this orientation sends the direction `face`.
    #[must_use]
    pub fn relabel(self, face: Face) -> Face {
        self.images[face as usize]
    }

    /// Apply `self`, then `other`.
    #[must_use]
    pub fn then(self, other: Orientation) -> Orientation {
        Orientation {
            images: self.images.map(|face| other.relabel(face)),
        }
    }

    #[must_use]
    pub fn inverse(self) -> Orientation {
        let mut images = Face::ALL;
        for face in Face::ALL {
            images[self.relabel(face) as usize] = face;
        }
        Orientation { images }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Orientation::IDENTITY
    }

    /// The orientation sending each face to `images(face)`, if that is a
    /// proper rotation.
    #[must_use]
    pub fn from_images(mut images: impl FnMut(Face) -> Face) -> Option<Orientation> {
        let images = Face::ALL.map(&mut images);
        ORIENTATIONS
            .iter()
            .copied()
            .find(|orientation| orientation.images == images)
    }

    /// Rotate a vector of cubie space.
    pub(crate) fn apply(self, v: Vec3) -> Vec3 {
        let columns = [Face::R, Face::U, Face::F].map(|face| self.relabel(face).normal());
        std::array::from_fn(|row| (0..3).map(|axis| v[axis] * columns[axis][row]).sum())
    }

    /// Position of this orientation in the 24-entry table.
    #[must_use]
    pub fn index(self) -> usize {
        ORIENTATIONS
            .iter()
            .position(|&orientation| orientation == self)
            .expect("every orientation is generated by x and y")
    }
}

impl fmt::Debug for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Orientation({})",
            Face::ALL
                .iter()
                .map(|&face| format!("{face}->{}", self.relabel(face)))
                .join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_has_order_four() {
        for face in Face::ALL {
            let mut v = [1, 1, 0];
            for _ in 0..4 {
                v = rotate_cw(v, face);
            }
            assert_eq!(v, [1, 1, 0]);
        }
    }

    #[test]
    fn r_turn_carries_front_to_up() {
        assert_eq!(rotate_cw(Face::F.normal(), Face::R), Face::U.normal());
        assert_eq!(rotate_cw(Face::F.normal(), Face::U), Face::L.normal());
        assert_eq!(rotate_cw(Face::U.normal(), Face::F), Face::R.normal());
        assert_eq!(rotate_cw(Face::U.normal(), Face::L), Face::F.normal());
    }

    #[test]
    fn table_is_a_group() {
        let all = Orientation::all();
        assert_eq!(all.len(), 24);
        assert!(all[0].is_identity());

        for &a in all {
            assert!(a.then(a.inverse()).is_identity());
            for &b in all {
                assert!(all.contains(&a.then(b)));
            }
        }
    }

    #[test]
    fn x_inverse_relabels_up_as_front() {
        let x = Orientation::quarter_turns(Face::R, 1);
        assert_eq!(x.relabel(Face::F), Face::U);
        assert_eq!(x.inverse().relabel(Face::U), Face::F);
        assert_eq!(x.inverse().relabel(Face::R), Face::R);
    }

    #[test]
    fn apply_matches_face_rotation() {
        for &orientation in Orientation::all() {
            for face in Face::ALL {
                assert_eq!(
                    orientation.apply(face.normal()),
                    orientation.relabel(face).normal()
                );
            }
            let found = Orientation::from_images(|face| orientation.relabel(face));
            assert_eq!(found, Some(orientation));
        }

        let y = Orientation::quarter_turns(Face::U, 1);
        assert_eq!(y.apply([1, 1, 1]), rotate_cw([1, 1, 1], Face::U));
        assert_eq!(Orientation::from_images(|_| Face::U), None);
    }
}
