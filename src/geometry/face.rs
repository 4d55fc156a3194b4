use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

/// Identifies one of the six faces of the cube by its number (1 through 6) in the
/// reference unfolding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct FaceId(u8);

impl FaceId {
    /// Number of faces on a cube.
    pub const COUNT: usize = 6;

    /// Constructs a face from its number, returning `None` if `number` is not in `1..=6`.
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number as usize <= Self::COUNT {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Constructor for static tables whose entries are known to be in range.
    pub(crate) const fn raw(number: u8) -> Self {
        debug_assert!(number >= 1 && number as usize <= Self::COUNT);
        Self(number)
    }

    /// Face number in `1..=6`.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero based index, suitable for indexing storage.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8 + 1))
        } else {
            None
        }
    }

    /// Iterates all six faces in order.
    pub fn all() -> impl Iterator<Item = FaceId> {
        (1..=Self::COUNT as u8).map(Self)
    }
}

impl TryFrom<u8> for FaceId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("face number {value} is not in 1..=6"))
    }
}

impl From<FaceId> for u8 {
    fn from(value: FaceId) -> Self {
        value.0
    }
}

impl Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stores one value per face of the cube.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct FaceArray<T>([T; 6]);

impl<T> FaceArray<T> {
    pub fn from_fn<F: FnMut(FaceId) -> T>(mut f: F) -> Self {
        Self(std::array::from_fn(|i| f(FaceId(i as u8 + 1))))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &T)> + '_ {
        FaceId::all().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FaceId, &mut T)> + '_ {
        FaceId::all().zip(self.0.iter_mut())
    }

    #[cfg(feature = "parallel")]
    pub fn par_iter_mut(
        &mut self,
    ) -> impl rayon::iter::IndexedParallelIterator<Item = (FaceId, &mut T)> + '_
    where
        T: Send,
    {
        use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

        self.0
            .as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .map(|(i, value)| (FaceId(i as u8 + 1), value))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<T> From<[T; 6]> for FaceArray<T> {
    fn from(value: [T; 6]) -> Self {
        Self(value)
    }
}

impl<T> Index<FaceId> for FaceArray<T> {
    type Output = T;

    fn index(&self, face: FaceId) -> &Self::Output {
        &self.0[face.index()]
    }
}

impl<T> IndexMut<FaceId> for FaceArray<T> {
    fn index_mut(&mut self, face: FaceId) -> &mut Self::Output {
        &mut self.0[face.index()]
    }
}
