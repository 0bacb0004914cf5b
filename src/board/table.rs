/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::ops::{Index, IndexMut};

use super::Square;

/// A generic container of 64 elements, indexed by [`Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Table<T>([T; Square::COUNT]);

impl<T> Table<T> {
    /// Create a new [`Table`] with every value set to `value`.
    #[inline(always)]
    pub const fn splat(value: T) -> Self
    where
        T: Copy,
    {
        Self([value; Square::COUNT])
    }

    /// Get the value of this [`Table`] at the index of `square`.
    #[inline(always)]
    pub const fn get(&self, square: Square) -> &T {
        &self.0[square.index()]
    }

    /// Set the value of this [`Table`] at the index of `square`, returning the previous value.
    #[inline(always)]
    pub fn replace(&mut self, square: Square, value: T) -> T {
        std::mem::replace(&mut self.0[square.index()], value)
    }

    /// Iterate over every `(square, value)` pair, starting at a8.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Square, &T)> {
        Square::iter().zip(self.0.iter())
    }
}

impl<T> Default for Table<T>
where
    T: Default + Copy,
{
    #[inline(always)]
    fn default() -> Self {
        Self::splat(T::default())
    }
}

impl<T> Index<Square> for Table<T> {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl<T> IndexMut<Square> for Table<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_table_indexing() {
        let mut table = Table::splat(0usize);
        let c3 = Square::from_coords_unchecked(5, 2);
        assert_eq!(table.replace(c3, 42), 0);
        assert_eq!(table[c3], 42);
        assert_eq!(*table.get(c3), 42);

        let old = table.replace(c3, 7);
        assert_eq!(old, 42);
        assert_eq!(table[c3], 7);

        table[c3] = 8;
        assert_eq!(table.iter().find(|(sq, _)| *sq == c3), Some((c3, &8)));
    }
}
