//! The 3x3 destiny matrix.

use serde::{Deserialize, Serialize};

/// One of the nine cells, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixPosition {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl MatrixPosition {
    pub const ALL: [MatrixPosition; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::Center,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Key used in serialized output and by renderers.
    pub fn key(&self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::TopCenter => "top_center",
            Self::TopRight => "top_right",
            Self::MiddleLeft => "middle_left",
            Self::Center => "center",
            Self::MiddleRight => "middle_right",
            Self::BottomLeft => "bottom_left",
            Self::BottomCenter => "bottom_center",
            Self::BottomRight => "bottom_right",
        }
    }

    /// (column, row), both in 0..3.
    pub fn cell(&self) -> (usize, usize) {
        let idx = *self as usize;
        (idx % 3, idx / 3)
    }
}

/// Nine derived numbers laid out for display. `center` holds the destiny number.
///
/// Serializes as a flat map with exactly the nine position keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinyMatrix {
    pub top_left: u32,
    pub top_center: u32,
    pub top_right: u32,
    pub middle_left: u32,
    pub center: u32,
    pub middle_right: u32,
    pub bottom_left: u32,
    pub bottom_center: u32,
    pub bottom_right: u32,
}

impl DestinyMatrix {
    pub fn get(&self, pos: MatrixPosition) -> u32 {
        match pos {
            MatrixPosition::TopLeft => self.top_left,
            MatrixPosition::TopCenter => self.top_center,
            MatrixPosition::TopRight => self.top_right,
            MatrixPosition::MiddleLeft => self.middle_left,
            MatrixPosition::Center => self.center,
            MatrixPosition::MiddleRight => self.middle_right,
            MatrixPosition::BottomLeft => self.bottom_left,
            MatrixPosition::BottomCenter => self.bottom_center,
            MatrixPosition::BottomRight => self.bottom_right,
        }
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (MatrixPosition, u32)> + '_ {
        MatrixPosition::ALL.iter().map(move |p| (*p, self.get(*p)))
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> [[u32; 3]; 3] {
        let mut rows = [[0; 3]; 3];
        for (pos, value) in self.iter() {
            let (col, row) = pos.cell();
            rows[row][col] = value;
        }
        rows
    }
}
