//! Sticker and piece identities.
//!
//! A [`Sticker`] is a compact id in `0..54`. The same id space names both a
//! slot on the cube (a position in space) and a sticker identity (the slot the
//! sticker occupies when the cube is solved). Ids are face-major in `U R F D L
//! B` order, each face read row by row as it is seen from outside: U with B at
//! the top, D with F at the top and the four side faces with U at the top.

use std::{fmt, sync::LazyLock};

use crate::geometry::{Face, Vec3, dot};

pub const STICKER_COUNT: usize = 54;

/// Face order of the sticker id space.
pub const STICKER_FACE_ORDER: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sticker(u8);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

/// A physical cubie. Centers only move under slice turns and whole-cube
/// rotations and are named by their solved face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cubie {
    Center(Face),
    Corner(Corner),
    Edge(Edge),
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::URF,
        Corner::UFL,
        Corner::ULB,
        Corner::UBR,
        Corner::DFR,
        Corner::DLF,
        Corner::DBL,
        Corner::DRB,
    ];
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::UR,
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::DR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
    ];
}

impl Cubie {
    /// The 20 movable pieces followed by the 6 centers.
    #[must_use]
    pub fn all() -> impl Iterator<Item = Cubie> {
        Corner::ALL
            .into_iter()
            .map(Cubie::Corner)
            .chain(Edge::ALL.into_iter().map(Cubie::Edge))
            .chain(Face::ALL.into_iter().map(Cubie::Center))
    }

    /// The stickers of this cubie in their solved slots.
    #[must_use]
    pub fn stickers(self) -> Vec<Sticker> {
        Sticker::all().filter(|sticker| sticker.cubie() == self).collect()
    }

    fn at(position: Vec3) -> Cubie {
        use Corner::*;
        use Edge::*;

        match position {
            [1, 1, 1] => Cubie::Corner(URF),
            [-1, 1, 1] => Cubie::Corner(UFL),
            [-1, 1, -1] => Cubie::Corner(ULB),
            [1, 1, -1] => Cubie::Corner(UBR),
            [1, -1, 1] => Cubie::Corner(DFR),
            [-1, -1, 1] => Cubie::Corner(DLF),
            [-1, -1, -1] => Cubie::Corner(DBL),
            [1, -1, -1] => Cubie::Corner(DRB),
            [1, 1, 0] => Cubie::Edge(UR),
            [0, 1, 1] => Cubie::Edge(UF),
            [-1, 1, 0] => Cubie::Edge(UL),
            [0, 1, -1] => Cubie::Edge(UB),
            [1, -1, 0] => Cubie::Edge(DR),
            [0, -1, 1] => Cubie::Edge(DF),
            [-1, -1, 0] => Cubie::Edge(DL),
            [0, -1, -1] => Cubie::Edge(DB),
            [1, 0, 1] => Cubie::Edge(FR),
            [-1, 0, 1] => Cubie::Edge(FL),
            [-1, 0, -1] => Cubie::Edge(BL),
            [1, 0, -1] => Cubie::Edge(BR),
            other => {
                let face = Face::ALL
                    .into_iter()
                    .find(|face| face.normal() == other)
                    .unwrap_or_else(|| panic!("{other:?} is not a cubie position"));
                Cubie::Center(face)
            }
        }
    }
}

#[derive(Clone, Copy)]
struct StickerInfo {
    position: Vec3,
    face: Face,
    cubie: Cubie,
}

static STICKER_INFO: LazyLock<[StickerInfo; STICKER_COUNT]> = LazyLock::new(|| {
    std::array::from_fn(|id| {
        let face = STICKER_FACE_ORDER[id / 9];
        let position = facelet_position(face, id % 9);
        StickerInfo {
            position,
            face,
            cubie: Cubie::at(position),
        }
    })
});

/// Cubie position of the `index`th facelet of `face`, read row by row.
fn facelet_position(face: Face, index: usize) -> Vec3 {
    let row = (index / 3) as i8;
    let col = (index % 3) as i8;
    match face {
        Face::U => [col - 1, 1, row - 1],
        Face::R => [1, 1 - row, 1 - col],
        Face::F => [col - 1, 1 - row, 1],
        Face::D => [col - 1, -1, 1 - row],
        Face::L => [-1, 1 - row, col - 1],
        Face::B => [1 - col, 1 - row, -1],
    }
}

impl Sticker {
    /// The `index`th (0..9) facelet of `face`.
    #[must_use]
    pub fn new(face: Face, index: usize) -> Sticker {
        assert!(index < 9, "A face only has nine facelets");
        let face_slot = STICKER_FACE_ORDER
            .iter()
            .position(|&other| other == face)
            .expect("every face has a slot");
        Sticker((face_slot * 9 + index) as u8)
    }

    #[must_use]
    pub fn from_id(id: usize) -> Option<Sticker> {
        (id < STICKER_COUNT).then_some(Sticker(id as u8))
    }

    pub fn all() -> impl Iterator<Item = Sticker> {
        (0..STICKER_COUNT as u8).map(Sticker)
    }

    #[must_use]
    pub fn center(face: Face) -> Sticker {
        Sticker::new(face, 4)
    }

    /// The sticker of `cubie` that faces `face`, if the cubie has one there.
    #[must_use]
    pub fn of(cubie: Cubie, face: Face) -> Option<Sticker> {
        Sticker::all().find(|sticker| sticker.cubie() == cubie && sticker.face() == face)
    }

    #[must_use]
    pub fn id(self) -> usize {
        self.0 as usize
    }

    /// Index within its face, `0..9`.
    #[must_use]
    pub fn index(self) -> usize {
        self.id() % 9
    }

    /// The face this slot lies on.
    #[must_use]
    pub fn face(self) -> Face {
        STICKER_INFO[self.id()].face
    }

    /// The cubie this slot belongs to.
    #[must_use]
    pub fn cubie(self) -> Cubie {
        STICKER_INFO[self.id()].cubie
    }

    pub(crate) fn position(self) -> Vec3 {
        STICKER_INFO[self.id()].position
    }

    /// Whether the slot lies in the layer perpendicular to `face`'s axis at
    /// signed depth `depth` (1 = the face layer itself, 0 = the middle slice).
    pub(crate) fn in_layer(self, face: Face, depth: i8) -> bool {
        dot(self.position(), face.normal()) == depth
    }

    /// The slot holding the sticker with the given cubie position and normal.
    pub(crate) fn at(position: Vec3, normal: Vec3) -> Sticker {
        Sticker::all()
            .find(|sticker| sticker.position() == position && sticker.face().normal() == normal)
            .unwrap_or_else(|| panic!("No sticker at {position:?} facing {normal:?}"))
    }
}

impl fmt::Debug for Sticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face(), self.index())
    }
}

impl fmt::Display for Sticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_round_trip_through_face_and_index() {
        for sticker in Sticker::all() {
            assert_eq!(Sticker::new(sticker.face(), sticker.index()), sticker);
        }
    }

    #[test]
    fn every_cubie_has_the_right_sticker_count() {
        for cubie in Cubie::all() {
            let expected = match cubie {
                Cubie::Center(_) => 1,
                Cubie::Corner(_) => 3,
                Cubie::Edge(_) => 2,
            };
            assert_eq!(cubie.stickers().len(), expected, "{cubie:?}");
        }
        assert_eq!(Cubie::all().count(), 26);
    }

    #[test]
    fn positions_and_normals_are_unique() {
        let seen = Sticker::all()
            .map(|sticker| (sticker.position(), sticker.face()))
            .collect::<HashSet<_>>();
        assert_eq!(seen.len(), STICKER_COUNT);
    }

    #[test]
    fn named_stickers() {
        assert_eq!(Sticker::center(Face::F).cubie(), Cubie::Center(Face::F));
        assert_eq!(
            Sticker::new(Face::U, 8).cubie(),
            Cubie::Corner(Corner::URF)
        );
        assert_eq!(
            Sticker::of(Cubie::Edge(Edge::FR), Face::R),
            Some(Sticker::new(Face::R, 3))
        );
        assert_eq!(Sticker::of(Cubie::Edge(Edge::FR), Face::U), None);
    }
}
