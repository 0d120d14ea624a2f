use std::fs;
use std::path::Path;

use crate::error::MapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
}

/// Immutable binary occupancy grid, stored row-major.
///
/// Coordinates outside the grid are treated as walls by `is_wall`, so rays
/// and movement never need to index past the edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

const DEFAULT_LEVEL: [[u8; 8]; 7] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 0, 1],
    [1, 0, 1, 0, 0, 1, 0, 1],
    [1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
];

impl GridMap {
    /// Builds a grid from literal rows of 0 (open) and 1 (wall).
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MapError> {
        let width = match rows.first() {
            Some(row) if !row.as_ref().is_empty() => row.as_ref().len(),
            _ => return Err(MapError::Empty),
        };

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MapError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                cells.push(match value {
                    0 => Cell::Open,
                    1 => Cell::Wall,
                    other => {
                        return Err(MapError::InvalidValue {
                            row: y,
                            column: x,
                            value: other,
                        });
                    }
                });
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Parses the text map format: one row per line, `1`/`#` for walls and
    /// `0`/`.`/space for open cells. Blank lines and `;` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for line in text.lines() {
            let line = line.trim_end();
            if line.trim().is_empty() || line.trim_start().starts_with(';') {
                continue;
            }
            let y = rows.len();
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                row.push(match ch {
                    '0' | '.' | ' ' => 0,
                    '1' | '#' => 1,
                    other => {
                        return Err(MapError::InvalidCell {
                            row: y,
                            column: x,
                            value: other,
                        });
                    }
                });
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The 8x7 corridor level.
    pub fn default_level() -> Self {
        Self::from_rows(&DEFAULT_LEVEL).expect("built-in level is rectangular")
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Checked lookup; `None` outside the grid.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if self.contains(x, y) {
            Some(self.cells[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_none_or(|c| c == Cell::Wall)
    }

    /// Wall test for a continuous point, floor-truncated to its cell.
    #[inline]
    pub fn is_wall_at(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return true;
        }
        self.is_wall(x.floor() as i32, y.floor() as i32)
    }

    pub fn diagonal(&self) -> f32 {
        (self.width as f32).hypot(self.height as f32)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_dimensions() {
        let grid = GridMap::default_level();
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 7);
        assert!(grid.is_wall(0, 0));
        assert!(!grid.is_wall(1, 1));
        assert!(grid.is_wall(5, 3));
        assert!(!grid.is_wall(3, 3));
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let grid = GridMap::default_level();
        assert!(grid.is_wall(-1, 3));
        assert!(grid.is_wall(3, -1));
        assert!(grid.is_wall(8, 3));
        assert!(grid.is_wall(3, 7));
        assert!(grid.is_wall(i32::MAX, i32::MIN));
        assert_eq!(grid.cell(8, 0), None);
        assert!(grid.is_wall_at(f32::NAN, 1.5));
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows: [&[u8]; 2] = [&[1, 1, 1], &[1, 0]];
        match GridMap::from_rows(&rows) {
            Err(MapError::Ragged {
                row: 1,
                expected: 3,
                found: 2,
            }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_non_binary_values() {
        let rows: [&[u8]; 2] = [&[1, 2], &[1, 1]];
        assert!(matches!(
            GridMap::from_rows(&rows),
            Err(MapError::InvalidValue {
                row: 0,
                column: 1,
                value: 2
            })
        ));
        let rows: [&[u8]; 1] = [&[0, 1, 200]];
        assert!(matches!(
            GridMap::from_rows(&rows),
            Err(MapError::InvalidValue {
                row: 0,
                column: 2,
                value: 200
            })
        ));
    }

    #[test]
    fn rejects_empty() {
        let rows: [&[u8]; 0] = [];
        assert!(matches!(GridMap::from_rows(&rows), Err(MapError::Empty)));
        assert!(matches!(GridMap::parse("; only a comment\n\n"), Err(MapError::Empty)));
    }

    #[test]
    fn parses_text_rows() {
        let text = "; tiny room\n####\n#..#\n#01#\n1111\n";
        let grid = GridMap::parse(text).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 4));
        assert!(!grid.is_wall(1, 1));
        assert!(!grid.is_wall(1, 2));
        assert!(grid.is_wall(2, 2));
    }

    #[test]
    fn bundled_map_matches_default_level() {
        let grid = GridMap::parse(include_str!("../maps/corridor.txt")).unwrap();
        assert_eq!(grid, GridMap::default_level());
    }

    #[test]
    fn parse_reports_bad_character() {
        let err = GridMap::parse("111\n1x1\n111").unwrap_err();
        assert!(matches!(
            err,
            MapError::InvalidCell {
                row: 1,
                column: 1,
                value: 'x'
            }
        ));
    }
}
