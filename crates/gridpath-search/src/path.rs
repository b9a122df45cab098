use gridpath_core::Point;

/// An ordered route from Start to End, produced by a completed search.
///
/// Both algorithms return the same shape: Start is the first element and End
/// the last. An exhausted search yields the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    coords: Vec<Point>,
}

impl Path {
    pub(crate) fn new(coords: Vec<Point>) -> Self {
        Self { coords }
    }

    /// The empty path, reported when End cannot be reached.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every coordinate, Start first.
    #[inline]
    pub fn coords(&self) -> &[Point] {
        &self.coords
    }

    /// The coordinates after Start, ending with End.
    #[inline]
    pub fn steps(&self) -> &[Point] {
        self.coords.get(1..).unwrap_or(&[])
    }

    /// Number of coordinates, Start included.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of unit moves along the path.
    #[inline]
    pub fn cost(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.coords.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.coords.last().copied()
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.coords
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_skip_start() {
        let p = Path::new(vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]);
        assert_eq!(p.len(), 3);
        assert_eq!(p.cost(), 2);
        assert_eq!(p.first(), Some(Point::new(0, 0)));
        assert_eq!(p.last(), Some(Point::new(1, 1)));
        assert_eq!(p.steps(), &[Point::new(1, 0), Point::new(1, 1)]);
    }

    #[test]
    fn empty_path() {
        let p = Path::empty();
        assert!(p.is_empty());
        assert_eq!(p.cost(), 0);
        assert!(p.steps().is_empty());
        assert_eq!(p.last(), None);
    }
}
