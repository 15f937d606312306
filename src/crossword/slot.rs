//! Slots: the runs of white cells that each take one word

use super::Structure;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Across,
    Down,
}

/// One placement opportunity in the grid.
///
/// Ordering is by origin row, then column, then direction, then length, which
/// gives every collection of slots a stable iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub i: usize,
    pub j: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Slot {
    pub fn new(i: usize, j: usize, direction: Direction, length: usize) -> Self {
        Self { i, j, direction, length }
    }

    /// Grid coordinates of the `k`th letter of this slot
    pub fn cell(&self, k: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.i, self.j + k),
            Direction::Down => (self.i + k, self.j),
        }
    }

    /// All cells covered by this slot, in word order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |k| self.cell(k))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} [{}]", self.i, self.j, direction, self.length)
    }
}

/// Find every maximal run of at least two white cells, across then down
pub fn find_slots(structure: &Structure) -> Vec<Slot> {
    let mut slots = Vec::new();

    for row in 0..structure.height() {
        for col in 0..structure.width() {
            if !structure.is_white(row, col) {
                continue;
            }

            let starts_across = col == 0 || !structure.is_white(row, col - 1);
            if starts_across {
                let length = run_length(structure, row, col, Direction::Across);
                if length > 1 {
                    slots.push(Slot::new(row, col, Direction::Across, length));
                }
            }

            let starts_down = row == 0 || !structure.is_white(row - 1, col);
            if starts_down {
                let length = run_length(structure, row, col, Direction::Down);
                if length > 1 {
                    slots.push(Slot::new(row, col, Direction::Down, length));
                }
            }
        }
    }

    slots.sort();
    slots
}

fn run_length(structure: &Structure, row: usize, col: usize, direction: Direction) -> usize {
    let mut length = 0;
    loop {
        let (r, c) = match direction {
            Direction::Across => (row, col + length),
            Direction::Down => (row + length, col),
        };
        if !structure.is_white(r, c) {
            return length;
        }
        length += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_square_slots() {
        let slots = find_slots(&Structure::open(2, 2));
        assert_eq!(
            slots,
            vec![
                Slot::new(0, 0, Direction::Across, 2),
                Slot::new(0, 0, Direction::Down, 2),
                Slot::new(0, 1, Direction::Down, 2),
                Slot::new(1, 0, Direction::Across, 2),
            ]
        );
    }

    #[test]
    fn test_single_cells_are_not_slots() {
        let structure = Structure::from_rows(&["_#_", "#_#"]).unwrap();
        assert!(find_slots(&structure).is_empty());
    }

    #[test]
    fn test_runs_split_by_black_cells() {
        let structure = Structure::from_rows(&["__#___"]).unwrap();
        let slots = find_slots(&structure);
        assert_eq!(
            slots,
            vec![
                Slot::new(0, 0, Direction::Across, 2),
                Slot::new(0, 3, Direction::Across, 3),
            ]
        );
    }

    #[test]
    fn test_slot_cells() {
        let slot = Slot::new(1, 2, Direction::Down, 3);
        let cells: Vec<_> = slot.cells().collect();
        assert_eq!(cells, vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(slot.to_string(), "(1, 2) down [3]");
    }
}
