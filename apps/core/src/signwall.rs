//! Sign wall layout.
//!
//! Signs arrive with sparse world coordinates that may be negative or leave
//! whole rows empty. [`SignGrid::normalize`] packs them into the smallest
//! dense rectangle that holds every sign:
//!
//! - columns are shifted so the leftmost sign sits in column 0, keeping the
//!   horizontal gaps between signs;
//! - rows are compacted: only rows that hold a sign are kept, and the lowest
//!   source row becomes the bottom display row.
//!
//! Two signs on the same source coordinate share one cell and the later one
//! in input order is shown. Such collisions are kept on the grid so tools can
//! report them.

use std::collections::{BTreeMap, HashMap};

use crate::model::Sign;

pub const MAX_SIGN_LINES: usize = 4;
pub const DEFAULT_CELL_SIZE: f64 = 80.0;
pub const SIGN_STAGGER_SECONDS: f64 = 0.006;
const FALLBACK_COLOR: &str = "#000000";

/// A position in the dense display grid. Row 0 is the top of the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub col: usize,
    pub row: usize,
}

/// Two signs landed on the same source coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub pos: CellPos,
    pub source_col: i64,
    pub source_row: i64,
    /// Index of the sign that was hidden.
    pub hidden: usize,
    /// Index of the sign that occupies the cell.
    pub shown: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignGrid {
    cols: usize,
    min_col: i64,
    row_mapping: BTreeMap<i64, usize>,
    cells: HashMap<CellPos, usize>,
    collisions: Vec<Collision>,
}

impl SignGrid {
    pub fn normalize(signs: &[Sign]) -> Self {
        if signs.is_empty() {
            return Self::default();
        }

        let mut row_groups: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        let mut min_col = i64::MAX;
        let mut max_col = i64::MIN;
        for (index, sign) in signs.iter().enumerate() {
            row_groups.entry(sign.row()).or_default().push(index);
            min_col = min_col.min(sign.col());
            max_col = max_col.max(sign.col());
        }

        let cols = usize::try_from(max_col.abs_diff(min_col))
            .map_or(usize::MAX, |span| span.saturating_add(1));

        // BTreeMap keys are already ascending; the lowest row goes to the bottom.
        let row_count = row_groups.len();
        let row_mapping: BTreeMap<i64, usize> = row_groups
            .keys()
            .enumerate()
            .map(|(position, &source_row)| (source_row, row_count - 1 - position))
            .collect();

        let mut cells = HashMap::new();
        let mut collisions = Vec::new();
        for (source_row, group) in &row_groups {
            let row = row_mapping[source_row];
            for &index in group {
                let sign = &signs[index];
                let pos = CellPos {
                    col: display_offset(sign.col(), min_col),
                    row,
                };
                if let Some(hidden) = cells.insert(pos, index) {
                    collisions.push(Collision {
                        pos,
                        source_col: sign.col(),
                        source_row: *source_row,
                        hidden,
                        shown: index,
                    });
                }
            }
        }

        Self {
            cols,
            min_col,
            row_mapping,
            cells,
            collisions,
        }
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.row_mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_mapping.is_empty()
    }

    /// Display column for a source column inside the bounding box.
    pub fn display_col(&self, source_col: i64) -> Option<usize> {
        if self.is_empty() || source_col < self.min_col {
            return None;
        }
        let col = display_offset(source_col, self.min_col);
        (col < self.cols).then_some(col)
    }

    /// Display row for a source row that holds at least one sign.
    pub fn display_row(&self, source_row: i64) -> Option<usize> {
        self.row_mapping.get(&source_row).copied()
    }

    pub fn sign_at(&self, pos: CellPos) -> Option<usize> {
        self.cells.get(&pos).copied()
    }

    pub fn occupied(&self) -> usize {
        self.cells.len()
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Every cell of the rectangle in row-major order, with the index of the
    /// sign shown there.
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, Option<usize>)> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.cols).map(move |col| {
                let pos = CellPos { col, row };
                (pos, self.sign_at(pos))
            })
        })
    }
}

fn display_offset(col: i64, min_col: i64) -> usize {
    usize::try_from(col.abs_diff(min_col)).unwrap_or(usize::MAX)
}

/// At most [`MAX_SIGN_LINES`] lines of sign text.
pub fn sign_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').take(MAX_SIGN_LINES)
}

/// Converts the game's `#AARRGGBB` colours to CSS `#RRGGBB`; other values
/// pass through unchanged.
pub fn css_color(color: Option<&str>) -> String {
    let Some(color) = color.filter(|c| !c.is_empty()) else {
        return FALLBACK_COLOR.to_string();
    };

    let hex = color.replacen('#', "", 1);
    if hex.len() == 8 && hex.is_ascii() {
        format!("#{}", &hex[2..])
    } else {
        color.to_string()
    }
}

/// Entrance delay for the `index`-th rendered sign.
pub fn sign_animation_delay(index: usize) -> String {
    format!("{:.3}s", index as f64 * SIGN_STAGGER_SECONDS)
}

/// Per-cell colour variation of the copper background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellJitter {
    /// Degrees, in `[-4, 4)`.
    pub hue_shift: f64,
    /// Percent, in `[-2.5, 2.5)`.
    pub light_shift: f64,
}

impl CellJitter {
    /// Draws two samples in `[0, 1)` from `random`.
    pub fn sample(mut random: impl FnMut() -> f64) -> Self {
        let hue = random();
        let light = random();
        Self {
            hue_shift: (hue - 0.5) * 8.0,
            light_shift: (light - 0.5) * 5.0,
        }
    }

    pub fn css_filter(&self) -> String {
        format!(
            "hue-rotate({:.3}deg) brightness({:.4})",
            self.hue_shift,
            1.0 + self.light_shift / 100.0
        )
    }
}

/// CSS grid sizing for a wall `cols` wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridStyle {
    pub template_columns: String,
    pub auto_rows: String,
    pub min_width: String,
}

impl GridStyle {
    pub fn new(cols: usize, cell_size: f64) -> Self {
        Self {
            template_columns: format!("repeat({cols}, {cell_size}px)"),
            auto_rows: format!("{cell_size}px"),
            min_width: format!("{}px", cols as f64 * cell_size),
        }
    }
}

/// Reads the `--sign-cell-size` custom property value, e.g. `" 64px"`.
pub fn parse_cell_size(value: &str) -> f64 {
    let value = value.trim();
    let numeric = value.strip_suffix("px").unwrap_or(value).trim();
    numeric
        .parse::<f64>()
        .ok()
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(DEFAULT_CELL_SIZE)
}

#[cfg(test)]
mod tests {
    use super::{
        css_color, parse_cell_size, sign_animation_delay, sign_lines, CellJitter, CellPos,
        GridStyle, SignGrid,
    };
    use crate::model::Sign;

    fn sign(col: i64, row: i64, text: &str) -> Sign {
        Sign {
            col: Some(col),
            row: Some(row),
            text: text.to_string(),
            ..Sign::default()
        }
    }

    fn assert_grid_properties(signs: &[Sign]) {
        let grid = SignGrid::normalize(signs);
        let min = signs.iter().map(Sign::col).min().unwrap();
        let max = signs.iter().map(Sign::col).max().unwrap();
        assert_eq!(grid.cols() as i64, max - min + 1);

        let mut seen = std::collections::HashSet::new();
        for sign in signs {
            let row = grid.display_row(sign.row()).unwrap();
            assert!(row < grid.rows(), "row {row} outside 0..{}", grid.rows());
            seen.insert((sign.row(), row));
            assert!(grid.display_col(sign.col()).unwrap() < grid.cols());
        }

        let display_rows: std::collections::HashSet<_> = seen.iter().map(|(_, d)| *d).collect();
        let source_rows: std::collections::HashSet<_> = seen.iter().map(|(s, _)| *s).collect();
        assert_eq!(display_rows.len(), source_rows.len());

        let lowest = signs.iter().map(Sign::row).min().unwrap();
        assert_eq!(grid.display_row(lowest), Some(grid.rows() - 1));
    }

    #[test]
    fn two_rows_stack_bottom_up() {
        let grid = SignGrid::normalize(&[sign(0, 0, "a"), sign(0, 2, "b")]);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.display_row(0), Some(1));
        assert_eq!(grid.display_row(2), Some(0));
        assert_eq!(grid.display_row(1), None);
    }

    #[test]
    fn sparse_rows_compress_without_gaps() {
        let signs = [sign(3, 0, "a"), sign(4, 2, "b"), sign(5, 5, "c")];
        let grid = SignGrid::normalize(&signs);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.display_row(5), Some(0));
        assert_eq!(grid.display_row(2), Some(1));
        assert_eq!(grid.display_row(0), Some(2));
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.sign_at(CellPos { col: 0, row: 2 }), Some(0));
        assert_eq!(grid.sign_at(CellPos { col: 2, row: 0 }), Some(2));
    }

    #[test]
    fn negative_columns_shift_to_zero_and_keep_gaps() {
        let signs = [sign(-4, 1, "left"), sign(2, 1, "right")];
        let grid = SignGrid::normalize(&signs);
        assert_eq!(grid.cols(), 7);
        assert_eq!(grid.display_col(-4), Some(0));
        assert_eq!(grid.display_col(2), Some(6));
        assert_eq!(grid.display_col(3), None);
        assert_eq!(grid.display_col(-5), None);
        assert_eq!(grid.occupied(), 2);
    }

    #[test]
    fn grid_properties_hold_for_mixed_inputs() {
        assert_grid_properties(&[sign(0, 0, "x")]);
        assert_grid_properties(&[sign(-3, -7, "a"), sign(9, 4, "b"), sign(0, 0, "c")]);
        assert_grid_properties(&[sign(5, 10, "a"), sign(5, 20, "b"), sign(5, 30, "c")]);
        assert_grid_properties(&[
            sign(1, -1, "a"),
            sign(-1, 1, "b"),
            sign(0, 0, "c"),
            sign(2, -1, "d"),
        ]);
    }

    #[test]
    fn cells_cover_the_whole_rectangle_row_major() {
        let signs = [sign(0, 0, "bottom"), sign(1, 1, "top")];
        let grid = SignGrid::normalize(&signs);
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], (CellPos { col: 0, row: 0 }, None));
        assert_eq!(cells[1], (CellPos { col: 1, row: 0 }, Some(1)));
        assert_eq!(cells[2], (CellPos { col: 0, row: 1 }, Some(0)));
        assert_eq!(cells[3], (CellPos { col: 1, row: 1 }, None));
    }

    #[test]
    fn missing_coordinates_default_to_origin() {
        let signs = [Sign {
            text: "origin".to_string(),
            ..Sign::default()
        }];
        let grid = SignGrid::normalize(&signs);
        assert_eq!((grid.cols(), grid.rows()), (1, 1));
        assert_eq!(grid.sign_at(CellPos { col: 0, row: 0 }), Some(0));
    }

    #[test]
    fn later_sign_wins_a_shared_cell() {
        let signs = [sign(1, 1, "first"), sign(1, 1, "second")];
        let grid = SignGrid::normalize(&signs);
        assert_eq!(grid.sign_at(CellPos { col: 0, row: 0 }), Some(1));
        assert_eq!(grid.collisions().len(), 1);
        assert_eq!(grid.collisions()[0].hidden, 0);
        assert_eq!(grid.collisions()[0].source_col, 1);
    }

    #[test]
    fn empty_input_gives_empty_grid() {
        let grid = SignGrid::normalize(&[]);
        assert!(grid.is_empty());
        assert_eq!((grid.cols(), grid.rows()), (0, 0));
        assert_eq!(grid.cells().count(), 0);
        assert_eq!(grid.display_col(0), None);
    }

    #[test]
    fn sign_text_keeps_four_lines() {
        let lines: Vec<_> = sign_lines("one\ntwo\nthree\nfour\nfive").collect();
        assert_eq!(lines, ["one", "two", "three", "four"]);
        assert_eq!(sign_lines("").collect::<Vec<_>>(), [""]);
    }

    #[test]
    fn colors_drop_alpha_byte() {
        assert_eq!(css_color(Some("#ff12ab34")), "#12ab34");
        assert_eq!(css_color(Some("ff12ab34")), "#12ab34");
        assert_eq!(css_color(Some("#12ab34")), "#12ab34");
        assert_eq!(css_color(Some("red")), "red");
        assert_eq!(css_color(None), "#000000");
        assert_eq!(css_color(Some("")), "#000000");
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let low = CellJitter::sample(|| 0.0);
        assert!((low.hue_shift + 4.0).abs() < 1e-9);
        assert!((low.light_shift + 2.5).abs() < 1e-9);

        let mut samples = [0.75, 0.25].into_iter();
        let mixed = CellJitter::sample(|| samples.next().unwrap_or(0.5));
        assert!((mixed.hue_shift - 2.0).abs() < 1e-9);
        assert!((mixed.light_shift + 1.25).abs() < 1e-9);
        assert_eq!(mixed.css_filter(), "hue-rotate(2.000deg) brightness(0.9875)");
    }

    #[test]
    fn grid_style_and_cell_size() {
        let style = GridStyle::new(12, 64.0);
        assert_eq!(style.template_columns, "repeat(12, 64px)");
        assert_eq!(style.auto_rows, "64px");
        assert_eq!(style.min_width, "768px");

        assert!((parse_cell_size(" 64px") - 64.0).abs() < f64::EPSILON);
        assert!((parse_cell_size("") - 80.0).abs() < f64::EPSILON);
        assert!((parse_cell_size("-3px") - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn entrance_delay_staggers() {
        assert_eq!(sign_animation_delay(0), "0.000s");
        assert_eq!(sign_animation_delay(10), "0.060s");
    }
}
