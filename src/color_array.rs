//! An array of two-valued colors, indexed from `1`, that supports flipping the color of
//! every index from some point onwards in logarithmic time.
//!
//! The array is kept as two search trees keyed by index: the `primary` tree holds the
//! colors of the array, and the `mirror` tree holds their complements. Flipping the suffix
//! starting at `x` splits both trees before `x` and swaps their suffixes, which is two splits
//! and two merges regardless of how many colors change.
//!
//!```
//! use arbor::{Color, ColorArray};
//!
//! let mut array: ColorArray = ColorArray::new(7);
//! array.flip(4).unwrap();
//! assert_eq!(array.to_string(), "wwwbbbb");
//! array.flip_range(2, 5).unwrap();
//! assert_eq!(array.to_string(), "wbbwwbb");
//! assert_eq!(array.get(3), Ok(Color::Black));
//! assert_eq!(array.count(Color::White), 3);
//!```

use crate::trees::avl::AVLTree;
use crate::trees::SomeTree;
use crate::Error;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<Color> for char {
    fn from(color: Color) -> char {
        match color {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl TryFrom<char> for Color {
    type Error = Error;

    fn try_from(c: char) -> Result<Color, Error> {
        match c {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            _ => Err(Error::UnknownColor(c)),
        }
    }
}

/// An array of colors, backed by two search trees of type `T`.
/// Any balanced tree works: `ColorArray<SplayTree<usize, Color>>` has the same interface,
/// with amortized instead of worst case bounds.
pub struct ColorArray<T = AVLTree<usize, Color>> {
    len: usize,
    primary: T,
    mirror: T,
}

impl<T: SomeTree<usize, Color>> Default for ColorArray<T> {
    fn default() -> Self {
        ColorArray {
            len: 0,
            primary: T::new(),
            mirror: T::new(),
        }
    }
}

impl<T: SomeTree<usize, Color>> ColorArray<T> {
    /// Creates an array of `len` white elements.
    pub fn new(len: usize) -> Self {
        Self::with_color(len, Color::default())
    }

    /// Creates an array of `len` elements of the given color.
    pub fn with_color(len: usize, color: Color) -> Self {
        std::iter::repeat(color).take(len).collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index == 0 || index > self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Appends an element at index `len + 1`.
    pub fn push(&mut self, color: Color) {
        self.len += 1;
        self.primary
            .insert(self.len, color)
            .expect("indices above the length are absent");
        self.mirror
            .insert(self.len, !color)
            .expect("indices above the length are absent");
    }

    /// Removes the last element and returns its color.
    pub fn pop(&mut self) -> Option<Color> {
        if self.len == 0 {
            return None;
        }
        let (_, color) = self
            .primary
            .delete(&self.len)
            .expect("every index up to the length is present");
        self.mirror
            .delete(&self.len)
            .expect("every index up to the length is present");
        self.len -= 1;
        Some(color)
    }

    /// Returns the color at a `1`-based index.
    pub fn get(&mut self, index: usize) -> Result<Color, Error> {
        self.check_index(index)?;
        Ok(*self
            .primary
            .get(&index)
            .expect("every index up to the length is present"))
    }

    pub fn set_color(&mut self, index: usize, color: Color) -> Result<(), Error> {
        self.check_index(index)?;
        *self
            .primary
            .get_mut(&index)
            .expect("every index up to the length is present") = color;
        *self
            .mirror
            .get_mut(&index)
            .expect("every index up to the length is present") = !color;
        Ok(())
    }

    /// Changes the color at the index to the other color, and returns the new color.
    pub fn toggle(&mut self, index: usize) -> Result<Color, Error> {
        let color = !self.get(index)?;
        self.set_color(index, color)?;
        Ok(color)
    }

    /// Flips the color of every index `>= x`.
    /// `x` can be anything from `1` to `len + 1`, where `len + 1` doesn't change anything.
    ///
    /// Splits both trees after `x - 1`, and exchanges the right halves:
    /// the complement of the primary suffix is exactly the mirror suffix, and vice versa.
    pub fn flip(&mut self, x: usize) -> Result<(), Error> {
        if x == 0 || x > self.len + 1 {
            return Err(Error::IndexOutOfRange {
                index: x,
                len: self.len,
            });
        }
        log::debug!("flipping indices {}..={}", x, self.len);

        let (primary_low, primary_high) = std::mem::take(&mut self.primary).split(&(x - 1));
        let (mirror_low, mirror_high) = std::mem::take(&mut self.mirror).split(&(x - 1));
        log::trace!(
            "exchanging suffixes of {} elements after {} elements",
            primary_high.len(),
            primary_low.len()
        );
        self.primary = primary_low.merge(mirror_high);
        self.mirror = mirror_low.merge(primary_high);
        Ok(())
    }

    /// Flips the colors of the indices `lo..=hi`. Does nothing if `lo > hi`.
    pub fn flip_range(&mut self, lo: usize, hi: usize) -> Result<(), Error> {
        if lo > hi {
            return Ok(());
        }
        self.check_index(lo)?;
        self.check_index(hi)?;
        self.flip(lo)?;
        self.flip(hi + 1)
    }

    /// Iterates over the colors in index order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.primary.iter().map(|(_, color)| *color)
    }

    /// Counts the elements of the given color.
    pub fn count(&self, color: Color) -> usize {
        self.colors().filter(|&c| c == color).count()
    }

    /// Checks both trees, that their keys are exactly `1..=len`,
    /// and that the mirror is the complement of the primary.
    pub fn assert_correctness(&self) {
        self.primary.assert_correctness();
        self.mirror.assert_correctness();
        assert_eq!(self.primary.len(), self.len);
        assert_eq!(self.mirror.len(), self.len);
        for (expected, ((index, color), (mirror_index, mirror_color))) in
            (1..).zip(self.primary.iter().zip(self.mirror.iter()))
        {
            assert_eq!(*index, expected);
            assert_eq!(*mirror_index, expected);
            assert_eq!(*mirror_color, !*color, "mirror disagrees at index {}", expected);
        }
    }
}

impl<T: SomeTree<usize, Color>> std::iter::FromIterator<Color> for ColorArray<T> {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut array = ColorArray::default();
        for color in iter {
            array.push(color);
        }
        array
    }
}

impl<T: SomeTree<usize, Color>> std::str::FromStr for ColorArray<T> {
    type Err = Error;

    /// Parses a string of `'w'` and `'b'` characters.
    fn from_str(s: &str) -> Result<Self, Error> {
        s.chars().map(Color::try_from).collect()
    }
}

impl<T: SomeTree<usize, Color>> fmt::Display for ColorArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.colors() {
            write!(f, "{}", char::from(color))?;
        }
        Ok(())
    }
}

impl<T: SomeTree<usize, Color>> fmt::Debug for ColorArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColorArray({})", self)
    }
}
