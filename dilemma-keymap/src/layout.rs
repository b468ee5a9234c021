//! Matrix shape of the Dilemma 3x5_3.
//!
//! Each half is wired as 4 rows by 5 columns. The left half takes rows 0..4,
//! the right half rows 4..8. The right half is mirrored: its outermost
//! physical column is matrix column 0. Two of the five positions on each
//! thumb row are not populated.

/// Number of matrix rows, both halves
pub const ROW: usize = 8;
/// Number of matrix columns
pub const COL: usize = 5;
/// Number of physical keys
pub const NUM_KEYS: usize = 36;
/// Number of rotary encoders, one per half
pub const NUM_ENCODER: usize = 2;

/// Matrix `(row, col)` of every physical key, in `layout_split_3x5_3!` order:
/// three rows of ten keys left to right, then the six thumb keys left to right.
pub const MATRIX_MAP: [(u8, u8); NUM_KEYS] = [
    (0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (4, 4), (4, 3), (4, 2), (4, 1), (4, 0),
    (1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (5, 4), (5, 3), (5, 2), (5, 1), (5, 0),
    (2, 0), (2, 1), (2, 2), (2, 3), (2, 4), (6, 4), (6, 3), (6, 2), (6, 1), (6, 0),
                    (3, 2), (3, 3), (3, 4), (7, 4), (7, 3), (7, 2),
];

/// Physical index in [`MATRIX_MAP`] order of a matrix position, `None` for unpopulated positions
pub fn physical_index(row: u8, col: u8) -> Option<usize> {
    MATRIX_MAP.iter().position(|&(r, c)| r == row && c == col)
}

/// Whether the matrix position belongs to the right half
pub fn is_right_half(row: u8) -> bool {
    row as usize >= ROW / 2
}

/// Build one layer from the 36 physical keys.
///
/// ```ignore
/// layout_split_3x5_3!(
///     k!(Q), k!(W), k!(F), k!(P), k!(B),   k!(J), k!(L), k!(U), k!(Y), k!(Quote),
///     ...
///                   k!(Tab), k!(Space), k!(Escape),   k!(Enter), k!(Backspace), k!(Delete)
/// )
/// ```
#[macro_export]
macro_rules! layout_split_3x5_3 {
    (
        $l00:expr, $l01:expr, $l02:expr, $l03:expr, $l04:expr, $r00:expr, $r01:expr, $r02:expr, $r03:expr, $r04:expr,
        $l10:expr, $l11:expr, $l12:expr, $l13:expr, $l14:expr, $r10:expr, $r11:expr, $r12:expr, $r13:expr, $r14:expr,
        $l20:expr, $l21:expr, $l22:expr, $l23:expr, $l24:expr, $r20:expr, $r21:expr, $r22:expr, $r23:expr, $r24:expr,
        $lt0:expr, $lt1:expr, $lt2:expr, $rt0:expr, $rt1:expr, $rt2:expr $(,)?
    ) => {
        [
            [$l00, $l01, $l02, $l03, $l04],
            [$l10, $l11, $l12, $l13, $l14],
            [$l20, $l21, $l22, $l23, $l24],
            [$crate::a!(No), $crate::a!(No), $lt0, $lt1, $lt2],
            [$r04, $r03, $r02, $r01, $r00],
            [$r14, $r13, $r12, $r11, $r10],
            [$r24, $r23, $r22, $r21, $r20],
            [$crate::a!(No), $crate::a!(No), $rt2, $rt1, $rt0],
        ]
    };
}
