#![allow(clippy::needless_range_loop)]

/// Describes a dense index space, allowing iteration over cartesian indices and
/// conversion to linear (x fastest) storage offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpace<const N: usize> {
    size: [usize; N],
}

impl<const N: usize> IndexSpace<N> {
    pub const fn new(size: [usize; N]) -> Self {
        Self { size }
    }

    /// Returns the number of indices in the index space.
    pub fn index_count(&self) -> usize {
        self.size.iter().product()
    }

    /// Returns the dimensions of the index space along each axis.
    pub fn size(self) -> [usize; N] {
        self.size
    }

    /// Converts a cartesian index into a linear index.
    pub fn linear_from_cartesian(self, cartesian: [usize; N]) -> usize {
        let mut result = 0;
        let mut stride = 1;

        for i in 0..N {
            debug_assert!(cartesian[i] < self.size[i]);
            result += stride * cartesian[i];
            stride *= self.size[i];
        }

        result
    }

    /// Iterates all cartesian indices in the index space.
    pub const fn iter(self) -> CartesianIter<N> {
        CartesianIter {
            size: self.size,
            cursor: [0; N],
        }
    }
}

/// An iterator over the cartesian indices of an `IndexSpace`, with the first
/// axis varying fastest.
#[derive(Debug, Clone)]
pub struct CartesianIter<const N: usize> {
    size: [usize; N],
    cursor: [usize; N],
}

impl<const N: usize> Iterator for CartesianIter<N> {
    type Item = [usize; N];

    fn next(&mut self) -> Option<Self::Item> {
        if N == 0 || self.size.contains(&0) || self.cursor[N - 1] >= self.size[N - 1] {
            return None;
        }

        let result = self.cursor;

        // Odometer increment. The final axis is allowed to run past its size,
        // which marks the end of iteration.
        for i in 0..N {
            self.cursor[i] += 1;

            if self.cursor[i] < self.size[i] || i == N - 1 {
                break;
            }

            self.cursor[i] = 0;
        }

        Some(result)
    }
}

/// A box of signed indices. Ghost cells lie at negative indices or beyond the
/// interior, so windows over halos need signed origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexWindow<const N: usize> {
    /// Lowest index along each axis.
    pub origin: [isize; N],
    /// Extent along each axis.
    pub size: [usize; N],
}

impl<const N: usize> IndexWindow<N> {
    pub const fn new(origin: [isize; N], size: [usize; N]) -> Self {
        Self { origin, size }
    }

    pub fn index_count(&self) -> usize {
        self.size.iter().product()
    }

    /// Iterates the window's indices, first axis fastest.
    pub fn iter(self) -> impl Iterator<Item = [isize; N]> {
        IndexSpace::new(self.size).iter().map(move |local| {
            let mut result = self.origin;
            for axis in 0..N {
                result[axis] += local[axis] as isize;
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_iteration() {
        let space = IndexSpace::new([3, 2]);
        let mut indices = space.iter();

        assert_eq!(indices.next(), Some([0, 0]));
        assert_eq!(indices.next(), Some([1, 0]));
        assert_eq!(indices.next(), Some([2, 0]));
        assert_eq!(indices.next(), Some([0, 1]));
        assert_eq!(indices.next(), Some([1, 1]));
        assert_eq!(indices.next(), Some([2, 1]));
        assert_eq!(indices.next(), None);

        assert_eq!(IndexSpace::new([4, 0, 2]).iter().next(), None);
    }

    #[test]
    fn linear_offsets() {
        let space = IndexSpace::new([2, 4, 3]);

        assert_eq!(space.index_count(), 24);
        assert_eq!(space.linear_from_cartesian([1, 0, 0]), 1);
        assert_eq!(space.linear_from_cartesian([0, 1, 0]), 2);
        assert_eq!(space.linear_from_cartesian([1, 1, 2]), 8 * 2 + 2 + 1);

        for (linear, index) in space.iter().enumerate() {
            assert_eq!(space.linear_from_cartesian(index), linear);
        }
    }

    #[test]
    fn signed_windows() {
        let window = IndexWindow::new([-2, 5], [2, 2]);
        let indices = window.iter().collect::<Vec<_>>();
        assert_eq!(indices, vec![[-2, 5], [-1, 5], [-2, 6], [-1, 6]]);
        assert_eq!(window.index_count(), 4);
    }
}
