use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

/// A coordinate axis of a face's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Dimension {
    X = 0,
    Y = 1,
    Z = 2,
}

/// One of the six sides of a face: four horizontal compass directions,
/// plus the vertical bottom and top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    West,
    East,
    South,
    North,
    Bottom,
    Top,
}

impl Side {
    /// Sides which connect a face to other faces of the cube.
    pub const HORIZONTAL: [Side; 4] = [Side::West, Side::East, Side::South, Side::North];

    pub const ALL: [Side; 6] = [
        Side::West,
        Side::East,
        Side::South,
        Side::North,
        Side::Bottom,
        Side::Top,
    ];

    /// The axis this side is normal to.
    pub fn dimension(self) -> Dimension {
        match self {
            Side::West | Side::East => Dimension::X,
            Side::South | Side::North => Dimension::Y,
            Side::Bottom | Side::Top => Dimension::Z,
        }
    }

    /// Index of the normal axis.
    pub fn axis(self) -> usize {
        self.dimension() as usize
    }

    /// Index of the horizontal axis running along this side. Only defined for
    /// horizontal sides.
    pub fn tangential_axis(self) -> usize {
        match self.dimension() {
            Dimension::X => 1,
            Dimension::Y => 0,
            Dimension::Z => panic!("vertical side {self} has no single tangential axis"),
        }
    }

    /// Whether this side lies at the upper end of its axis.
    pub fn is_positive(self) -> bool {
        matches!(self, Side::East | Side::North | Side::Top)
    }

    pub fn is_horizontal(self) -> bool {
        self.dimension() != Dimension::Z
    }

    /// Two sides are in the same dimension if they are normal to the same axis.
    pub fn same_dimension(self, other: Side) -> bool {
        self.dimension() == other.dimension()
    }

    /// The side at the other end of the same axis.
    pub fn reversed(self) -> Self {
        match self {
            Side::West => Side::East,
            Side::East => Side::West,
            Side::South => Side::North,
            Side::North => Side::South,
            Side::Bottom => Side::Top,
            Side::Top => Side::Bottom,
        }
    }

    /// Position of a horizontal side within `Side::HORIZONTAL`.
    pub fn horizontal_index(self) -> Option<usize> {
        match self {
            Side::West => Some(0),
            Side::East => Some(1),
            Side::South => Some(2),
            Side::North => Some(3),
            Side::Bottom | Side::Top => None,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::West => "west",
            Side::East => "east",
            Side::South => "south",
            Side::North => "north",
            Side::Bottom => "bottom",
            Side::Top => "top",
        };
        f.write_str(name)
    }
}

/// Stores a value for each horizontal side of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct SideArray<T>([T; 4]);

impl<T> SideArray<T> {
    pub fn from_fn<F: FnMut(Side) -> T>(mut f: F) -> Self {
        Self(std::array::from_fn(|i| f(Side::HORIZONTAL[i])))
    }

    pub fn get(&self, side: Side) -> Option<&T> {
        side.horizontal_index().map(|i| &self.0[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> + '_ {
        Side::HORIZONTAL.into_iter().zip(self.0.iter())
    }
}

impl<T> From<[T; 4]> for SideArray<T> {
    fn from(value: [T; 4]) -> Self {
        Self(value)
    }
}

impl<T> Index<Side> for SideArray<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        match side.horizontal_index() {
            Some(i) => &self.0[i],
            None => panic!("{side} is not a horizontal side"),
        }
    }
}

impl<T> IndexMut<Side> for SideArray<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        match side.horizontal_index() {
            Some(i) => &mut self.0[i],
            None => panic!("{side} is not a horizontal side"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_groups() {
        assert!(Side::West.same_dimension(Side::East));
        assert!(Side::North.same_dimension(Side::South));
        assert!(Side::Bottom.same_dimension(Side::Top));
        assert!(!Side::West.same_dimension(Side::North));
        assert!(!Side::East.same_dimension(Side::South));
        assert!(!Side::North.same_dimension(Side::Top));

        for side in Side::ALL {
            assert!(side.same_dimension(side.reversed()));
            assert_ne!(side.is_positive(), side.reversed().is_positive());
        }
    }

    #[test]
    fn side_array_indexing() {
        let array = SideArray::from_fn(|side| side.to_string());
        assert_eq!(array[Side::West], "west");
        assert_eq!(array[Side::North], "north");
        assert_eq!(array.get(Side::Top), None);
        assert_eq!(array.iter().count(), 4);
    }

    #[test]
    fn tangential_axes() {
        assert_eq!(Side::West.tangential_axis(), 1);
        assert_eq!(Side::East.tangential_axis(), 1);
        assert_eq!(Side::South.tangential_axis(), 0);
        assert_eq!(Side::North.tangential_axis(), 0);
    }
}
