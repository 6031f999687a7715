/// A bounded 2D grid stored row-major (no wrapping at any edge).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Tilemap<T> {
    /// Build a map by evaluating `f` once per cell.
    ///
    /// Cells are visited column by column (x outer, y inner); callers that
    /// consume a random stream inside `f` rely on this order. Each column is
    /// buffered, then the columns are interleaved into row-major storage.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut columns: Vec<std::vec::IntoIter<T>> = (0..width)
            .map(|x| (0..height).map(|y| f(x, y)).collect::<Vec<T>>().into_iter())
            .collect();

        let mut data = Vec::with_capacity(width * height);
        for _ in 0..height {
            data.extend(columns.iter_mut().filter_map(Iterator::next));
        }
        Self { width, height, data }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) outside {}x{}", self.width, self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// True if signed coordinates fall inside the map.
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// True if the cell lies on the outermost ring.
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Row slices, bottom (y = 0) first.
    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        self.data.chunks(self.width.max(1))
    }

    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, T> {
        self.data.chunks_mut(self.width.max(1))
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_places_values_by_coordinate() {
        let map = Tilemap::from_fn(3, 2, |x, y| x * 10 + y);
        assert_eq!(*map.get(0, 0), 0);
        assert_eq!(*map.get(2, 0), 20);
        assert_eq!(*map.get(1, 1), 11);
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn test_from_fn_visits_columns_first() {
        let mut order = Vec::new();
        let _ = Tilemap::from_fn(2, 2, |x, y| order.push((x, y)));
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_fill_and_get_mut() {
        let mut map = Tilemap::new_with(3, 3, 0u8);
        map.fill(4);
        assert!(map.iter().all(|(_, _, &v)| v == 4));
        *map.get_mut(2, 1) += 1;
        assert_eq!(*map.get(2, 1), 5);
        assert_eq!(*map.get(1, 2), 4);
    }

    #[test]
    fn test_from_fn_handles_empty_axes() {
        assert!(Tilemap::from_fn(0, 4, |x, y| x + y).is_empty());
        assert!(Tilemap::from_fn(4, 0, |x, y| x + y).is_empty());
    }

    #[test]
    fn test_in_bounds_rejects_negative_and_overflow() {
        let map: Tilemap<u8> = Tilemap::new(4, 3);
        assert!(map.in_bounds(0, 0));
        assert!(map.in_bounds(3, 2));
        assert!(!map.in_bounds(-1, 0));
        assert!(!map.in_bounds(4, 0));
        assert!(!map.in_bounds(0, 3));
    }

    #[test]
    fn test_border_detection() {
        let map: Tilemap<u8> = Tilemap::new(4, 4);
        assert!(map.is_border(0, 2));
        assert!(map.is_border(3, 1));
        assert!(map.is_border(2, 3));
        assert!(!map.is_border(1, 1));
        assert!(!map.is_border(2, 2));
    }

    #[test]
    fn test_rows_are_width_long() {
        let mut map = Tilemap::new_with(5, 3, 1u8);
        assert!(map.rows().all(|row| row.len() == 5));
        for row in map.rows_mut() {
            row[0] = 7;
        }
        assert_eq!(*map.get(0, 2), 7);
        assert_eq!(*map.get(1, 2), 1);
    }
}
