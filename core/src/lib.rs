#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use engine::*;
pub use error::*;
pub use mark::*;
pub use text::canonical;
pub use types::*;

mod engine;
mod error;
mod mark;
mod text;
mod types;

/// Cells making up one word placement, in reading order.
pub type WordPath = SmallVec<[Coord2; 20]>;

/// Immutable letter grid. Letters are single uppercase characters, accented
/// letters permitted; matching always goes through the canonical fold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    letters: Array2<char>,
}

impl Grid {
    pub fn from_rows<'a, I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut flat = Vec::new();
        let mut row_count: usize = 0;
        let mut col_count = None;

        for row in rows {
            let start = flat.len();
            flat.extend(row.chars());
            let width = flat.len() - start;
            match col_count {
                None => col_count = Some(width),
                Some(expected) if expected != width => return Err(PuzzleError::InvalidGridShape),
                Some(_) => {}
            }
            row_count += 1;
        }

        let col_count = col_count.unwrap_or(0);
        if row_count == 0
            || col_count == 0
            || Coord::try_from(row_count).is_err()
            || Coord::try_from(col_count).is_err()
        {
            return Err(PuzzleError::InvalidGridShape);
        }

        let letters = Array2::from_shape_vec((row_count, col_count), flat)
            .map_err(|_| PuzzleError::InvalidGridShape)?;
        Ok(Self { letters })
    }

    /// Grid dimensions as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        let dim = self.letters.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(PuzzleError::InvalidCoords)
        }
    }

    /// Reads `len` cells from `start` along `direction`, or nothing when the
    /// run leaves the grid before reaching `len`.
    fn read_run(&self, start: Coord2, direction: Direction, len: usize) -> Option<(String, WordPath)> {
        let mut run = String::new();
        let mut path = WordPath::new();
        for coords in RunIter::new(start, direction, self.size(), len) {
            run.push(self[coords]);
            path.push(coords);
        }
        (path.len() == len).then_some((run, path))
    }

    /// Locates a canonical word in the grid: starts in row-major order, axis
    /// directions probed right, left, down, up. Returns the first placement
    /// in that order; diagonals are never attempted.
    pub fn locate(&self, word: &str) -> Option<WordPath> {
        let len = word.chars().count();
        if len == 0 {
            return None;
        }

        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                for direction in SCAN_DIRECTIONS {
                    let Some((run, path)) = self.read_run((row, col), direction, len) else {
                        continue;
                    };
                    if text::canonical(&run) == word {
                        log::trace!("located {word:?} at {:?} going {direction:?}", (row, col));
                        return Some(path);
                    }
                }
            }
        }
        None
    }
}

impl Index<Coord2> for Grid {
    type Output = char;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.letters[(row as usize, col as usize)]
    }
}

/// One target word: the canonical form used for matching plus an optional
/// display alias used only for presentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetWord {
    canonical: String,
    display: Option<String>,
}

impl TargetWord {
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn display(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.canonical)
    }
}

/// The fixed set of words to find. Entries are stored in canonical form;
/// duplicates by canonical form collapse to the first occurrence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordList {
    entries: Vec<TargetWord>,
}

impl WordList {
    pub fn new<'a, I>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries: Vec<TargetWord> = Vec::new();
        for word in words {
            let canonical = text::canonical(word);
            if !text::is_plain_letters(&canonical) {
                return Err(PuzzleError::InvalidWord);
            }
            if entries.iter().any(|entry| entry.canonical == canonical) {
                continue;
            }
            entries.push(TargetWord {
                canonical,
                display: None,
            });
        }

        if entries.is_empty() {
            return Err(PuzzleError::EmptyWordList);
        }
        Ok(Self { entries })
    }

    /// Attaches a display alias to an existing target word.
    pub fn with_alias(mut self, word: &str, alias: &str) -> Result<Self> {
        let canonical = text::canonical(word);
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.canonical == canonical)
            .ok_or(PuzzleError::UnknownWord)?;
        entry.display = Some(String::from(alias));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.iter().any(|entry| entry.canonical == canonical)
    }

    pub fn display_name(&self, canonical: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.canonical == canonical)
            .map(TargetWord::display)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetWord> {
        self.entries.iter()
    }

    /// A selection matches when either reading of it equals a target word.
    pub(crate) fn match_either(&self, forward: &str, reverse: &str) -> Option<&str> {
        self.entries
            .iter()
            .map(TargetWord::canonical)
            .find(|&word| word == forward || word == reverse)
    }
}

/// Outcome of toggling a cell in or out of the in-progress selection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    NoChange,
    Selected,
    Deselected,
}

impl SelectOutcome {
    /// Whether this outcome could have caused an update to observable state.
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            NoChange => false,
            Selected => true,
            Deselected => true,
        }
    }
}

/// Outcome of evaluating a finished selection gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MatchOutcome {
    /// Below the minimum selection length, no match was attempted.
    TooShort,
    NoMatch,
    /// The selection spelled a word that had already been found.
    AlreadyFound,
    Matched,
}

impl MatchOutcome {
    /// Whether this outcome could have caused an update to observable state.
    pub const fn has_update(self) -> bool {
        use MatchOutcome::*;
        match self {
            TooShort => false,
            NoMatch => false,
            AlreadyFound => false,
            Matched => true,
        }
    }
}

/// Outcome of mark-only operations such as highlight expiry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows.iter().copied()).unwrap()
    }

    #[test]
    fn from_rows_rejects_ragged_and_empty_input() {
        assert_eq!(
            Grid::from_rows(["AB", "ABC"]),
            Err(PuzzleError::InvalidGridShape)
        );
        assert_eq!(Grid::from_rows([]), Err(PuzzleError::InvalidGridShape));
        assert_eq!(Grid::from_rows([""]), Err(PuzzleError::InvalidGridShape));
    }

    #[test]
    fn grid_indexes_by_row_then_col() {
        let grid = grid(&["AB", "CD"]);
        assert_eq!(grid.size(), (2, 2));
        assert_eq!(grid.total_cells(), 4);
        assert_eq!(grid[(0, 1)], 'B');
        assert_eq!(grid[(1, 0)], 'C');
        assert_eq!(grid.validate_coords((2, 0)), Err(PuzzleError::InvalidCoords));
    }

    #[test]
    fn locate_reads_leftward_placements() {
        let grid = grid(&["LOS", "OXX", "SXX"]);
        let path = grid.locate("SOL").unwrap();
        assert_eq!(path.as_slice(), [(0, 2), (0, 1), (0, 0)]);
    }

    #[test]
    fn locate_prefers_the_first_direction_in_scan_order() {
        // "ABC" is placed both rightward and downward from (0, 0).
        let grid = grid(&["ABC", "BXX", "CXX"]);
        let path = grid.locate("ABC").unwrap();
        assert_eq!(path.as_slice(), [(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn locate_prefers_the_earliest_row_major_start() {
        let grid = grid(&["XSOL", "SOLX"]);
        let path = grid.locate("SOL").unwrap();
        assert_eq!(path.as_slice(), [(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn locate_never_reports_diagonals() {
        let grid = grid(&["AXX", "XBX", "XXC"]);
        assert_eq!(grid.locate("ABC"), None);
    }

    #[test]
    fn locate_folds_accented_grid_letters() {
        let grid = grid(&["SÍ", "XX"]);
        let path = grid.locate("SI").unwrap();
        assert_eq!(path.as_slice(), [(0, 0), (0, 1)]);
    }

    #[test]
    fn locate_aborts_runs_that_leave_the_grid() {
        let grid = grid(&["SO", "LX"]);
        assert_eq!(grid.locate("SOL"), None);
    }

    #[test]
    fn word_list_folds_and_collapses_duplicates() {
        let words = WordList::new(["Seguridad", "SEGURIDAD", "economía"]).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.contains("SEGURIDAD"));
        assert!(words.contains("ECONOMIA"));
    }

    #[test]
    fn word_list_rejects_bad_entries() {
        assert_eq!(WordList::new([]), Err(PuzzleError::EmptyWordList));
        assert_eq!(WordList::new([""]), Err(PuzzleError::InvalidWord));
        assert_eq!(
            WordList::new(["GEST. CONFIGURACIÓN"]),
            Err(PuzzleError::InvalidWord)
        );
    }

    #[test]
    fn aliases_are_presentation_only() {
        let words = WordList::new(["GESTIONCONFIGURACION", "PRUEBAS"])
            .unwrap()
            .with_alias("GESTIONCONFIGURACION", "GEST. CONFIGURACIÓN")
            .unwrap();

        assert_eq!(
            words.display_name("GESTIONCONFIGURACION"),
            Some("GEST. CONFIGURACIÓN")
        );
        assert_eq!(words.display_name("PRUEBAS"), Some("PRUEBAS"));
        assert_eq!(words.display_name("NADA"), None);
        // matching still goes through the canonical form
        assert!(words.contains("GESTIONCONFIGURACION"));
        assert!(!words.contains("GEST. CONFIGURACIÓN"));
    }

    #[test]
    fn alias_for_unknown_word_is_an_error() {
        let words = WordList::new(["PRUEBAS"]).unwrap();
        assert_eq!(
            words.with_alias("NADA", "N."),
            Err(PuzzleError::UnknownWord)
        );
    }

    #[test]
    fn match_either_accepts_both_readings() {
        let words = WordList::new(["SOL"]).unwrap();
        assert_eq!(words.match_either("SOL", "LOS"), Some("SOL"));
        assert_eq!(words.match_either("LOS", "SOL"), Some("SOL"));
        assert_eq!(words.match_either("LOS", "XSOL"), None);
    }

    #[test]
    fn outcome_updates() {
        assert!(!SelectOutcome::NoChange.has_update());
        assert!(SelectOutcome::Deselected.has_update());
        assert!(!MatchOutcome::AlreadyFound.has_update());
        assert!(MatchOutcome::Matched.has_update());
        assert!(MarkOutcome::Changed.has_update());
    }

    #[test]
    fn grid_serde_round_trip() {
        let grid = grid(&["SÍ", "NO"]);
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
