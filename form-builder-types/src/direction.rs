/// Direction of an adjacent move within an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards index 0.
    Up,
    /// Towards the end of the list.
    Down,
}

impl Direction {
    /// The index of the neighbor of `index` in this direction, if it lies
    /// within a list of `len` elements.
    pub fn neighbor(self, index: usize, len: usize) -> Option<usize> {
        if index >= len {
            return None;
        }
        match self {
            Self::Up => index.checked_sub(1),
            Self::Down => Some(index + 1).filter(|&next| next < len),
        }
    }

    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Swap `items[index]` with its neighbor in `direction`.
///
/// Returns `false` and leaves the slice untouched when the neighbor is out of
/// bounds (the first element cannot move up, the last cannot move down).
pub fn swap_adjacent<T>(items: &mut [T], index: usize, direction: Direction) -> bool {
    match direction.neighbor(index, items.len()) {
        Some(other) => {
            items.swap(index, other);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors() {
        assert_eq!(Direction::Up.neighbor(0, 3), None);
        assert_eq!(Direction::Up.neighbor(2, 3), Some(1));
        assert_eq!(Direction::Down.neighbor(2, 3), None);
        assert_eq!(Direction::Down.neighbor(0, 3), Some(1));
        assert_eq!(Direction::Down.neighbor(5, 3), None);
        assert_eq!(Direction::Up.neighbor(0, 0), None);
    }

    #[test]
    fn swap_at_bounds_is_noop() {
        let mut items = vec!['a', 'b', 'c'];
        assert!(!swap_adjacent(&mut items, 0, Direction::Up));
        assert!(!swap_adjacent(&mut items, 2, Direction::Down));
        assert!(!swap_adjacent(&mut items, 9, Direction::Up));
        assert_eq!(items, ['a', 'b', 'c']);
    }

    #[test]
    fn swap_is_its_own_inverse() {
        let mut items = vec![1, 2, 3, 4];
        assert!(swap_adjacent(&mut items, 2, Direction::Up));
        assert_eq!(items, [1, 3, 2, 4]);
        assert!(swap_adjacent(&mut items, 1, Direction::Down));
        assert_eq!(items, [1, 2, 3, 4]);
    }
}
