use alloc::string::String;
use core::time::Duration;
use hashbrown::HashMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Selections shorter than this never attempt a match.
pub const MIN_SELECTION_LEN: usize = 3;

/// How long a word-list highlight stays visible. The engine itself is
/// clock-free; callers schedule [`PuzzleEngine::expire_highlight`] after
/// this delay.
pub const HIGHLIGHT_TTL: Duration = Duration::from_millis(2000);

/// One grid cell captured into the in-progress selection. The letter is the
/// grid's raw, possibly accented character.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub coords: Coord2,
    pub letter: char,
}

type Selection = SmallVec<[Cell; 20]>;

/// Handle for one transient highlight request. Each new request supersedes
/// the previous one; expiring with a stale ticket is a no-op, which is what
/// makes the caller-side timer cancellable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightTicket(u64);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct TransientHighlight {
    word: String,
    path: WordPath,
    ticket: HighlightTicket,
}

/// Word-search puzzle engine. Owns the immutable grid and word list, the
/// in-progress selection, and the set of found words; returns pure data for
/// a UI adapter to render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleEngine {
    grid: Grid,
    words: WordList,
    marks: Array2<CellMark>,
    selection: Selection,
    found: HashMap<String, WordPath>,
    highlight: Option<TransientHighlight>,
    highlight_seq: u64,
}

impl PuzzleEngine {
    pub fn new(grid: Grid, words: WordList) -> Self {
        let size = grid.size();
        Self {
            grid,
            words,
            marks: Array2::default(size.to_nd_index()),
            selection: SmallVec::new(),
            found: HashMap::new(),
            highlight: None,
            highlight_seq: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn word_list(&self) -> &WordList {
        &self.words
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn is_solved(&self) -> bool {
        self.found.len() == self.words.len()
    }

    pub fn mark_at(&self, coords: Coord2) -> CellMark {
        self.marks[coords.to_nd_index()]
    }

    /// Cells of the in-progress selection, in the order they were toggled in.
    pub fn selected_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.selection.iter().map(|cell| cell.coords)
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.contains_key(word)
    }

    /// Highlighted placement of a found word: the first one in scan order,
    /// empty when the word matched without an axis placement.
    pub fn path_of(&self, word: &str) -> Option<&WordPath> {
        self.found.get(word)
    }

    pub fn found_words(&self) -> impl Iterator<Item = (&str, &WordPath)> {
        self.found.iter().map(|(word, path)| (word.as_str(), path))
    }

    pub fn display_name(&self, word: &str) -> Option<&str> {
        self.words.display_name(word)
    }

    pub fn active_highlight(&self) -> Option<(&str, &WordPath)> {
        self.highlight
            .as_ref()
            .map(|current| (current.word.as_str(), &current.path))
    }

    /// Starts a gesture: drops any leftover selection, then toggles the
    /// pressed cell in.
    pub fn begin_selection(&mut self, coords: Coord2) -> Result<SelectOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.clear_selection();
        Ok(self.toggle_cell(coords))
    }

    /// Pointer-move while the gesture is active: toggles the entered cell,
    /// so dragging back over a cell deselects it.
    pub fn extend_selection(&mut self, coords: Coord2) -> Result<SelectOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.toggle_cell(coords))
    }

    /// Ends the gesture: evaluates the selection, then clears it regardless
    /// of the outcome.
    pub fn end_selection(&mut self) -> MatchOutcome {
        let outcome = self.evaluate_selection();
        self.clear_selection();
        outcome
    }

    /// Word-list click: re-locate a target word and hold it as the single
    /// transient highlight until the returned ticket expires or something
    /// supersedes it. Does not consult or mutate the found set.
    pub fn highlight_word(&mut self, word: &str) -> Result<Option<HighlightTicket>> {
        let word = text::canonical(word);
        if !self.words.contains(&word) {
            return Err(PuzzleError::UnknownWord);
        }

        self.clear_selection();

        let Some(path) = self.grid.locate(&word) else {
            log::warn!("highlight requested for {word:?} but it has no axis placement");
            return Ok(None);
        };

        self.highlight_seq += 1;
        let ticket = HighlightTicket(self.highlight_seq);
        self.highlight = Some(TransientHighlight { word, path, ticket });
        Ok(Some(ticket))
    }

    /// Caller-side timer callback, scheduled [`HIGHLIGHT_TTL`] after the
    /// matching [`Self::highlight_word`]. Stale tickets change nothing.
    pub fn expire_highlight(&mut self, ticket: HighlightTicket) -> MarkOutcome {
        match &self.highlight {
            Some(current) if current.ticket == ticket => {
                self.highlight = None;
                MarkOutcome::Changed
            }
            _ => MarkOutcome::NoChange,
        }
    }

    /// Full puzzle reset: selection, found words, marks, and highlight all
    /// cleared; grid and word list untouched.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.found.clear();
        self.highlight = None;
        self.marks.fill(CellMark::Plain);
        log::debug!("puzzle reset, 0 of {} found", self.words.len());
    }

    fn toggle_cell(&mut self, coords: Coord2) -> SelectOutcome {
        use SelectOutcome::*;

        if !self.mark_at(coords).is_selectable() {
            return NoChange;
        }

        if let Some(pos) = self.selection.iter().position(|cell| cell.coords == coords) {
            self.selection.remove(pos);
            self.marks[coords.to_nd_index()] = CellMark::Plain;
            Deselected
        } else {
            self.selection.push(Cell {
                coords,
                letter: self.grid[coords],
            });
            self.marks[coords.to_nd_index()] = CellMark::Selected;
            Selected
        }
    }

    fn evaluate_selection(&mut self) -> MatchOutcome {
        use MatchOutcome::*;

        if self.selection.len() < MIN_SELECTION_LEN {
            return TooShort;
        }

        // The (row, col) sort, not the gesture order, decides the read
        // direction. Selections that are not a contiguous straight line can
        // still spell a target after sorting; that legacy behavior is kept.
        let mut cells = self.selection.clone();
        cells.sort_unstable_by_key(|cell| cell.coords);

        let forward_raw: String = cells.iter().map(|cell| cell.letter).collect();
        let reverse_raw: String = cells.iter().rev().map(|cell| cell.letter).collect();
        let forward = text::canonical(&forward_raw);
        let reverse = text::canonical(&reverse_raw);

        let Some(word) = self.words.match_either(&forward, &reverse) else {
            return NoMatch;
        };
        let word = String::from(word);

        if self.found.contains_key(&word) {
            return AlreadyFound;
        }
        self.record_found(word)
    }

    fn record_found(&mut self, word: String) -> MatchOutcome {
        // The highlighted path is the grid's first placement in scan order,
        // not the cells of the gesture.
        let path = match self.grid.locate(&word) {
            Some(path) => path,
            None => {
                log::warn!("{word:?} matched by selection but has no axis placement");
                WordPath::new()
            }
        };

        for &coords in &path {
            self.marks[coords.to_nd_index()] = CellMark::Found;
        }

        // Permanent marks supersede a pending transient highlight.
        if self
            .highlight
            .as_ref()
            .is_some_and(|current| current.word == word)
        {
            self.highlight = None;
        }

        log::debug!(
            "found {word:?}, {} of {}",
            self.found.len() + 1,
            self.words.len()
        );
        self.found.insert(word, path);
        MatchOutcome::Matched
    }

    fn clear_selection(&mut self) {
        for cell in self.selection.drain(..) {
            let mark = &mut self.marks[cell.coords.to_nd_index()];
            if *mark == CellMark::Selected {
                *mark = CellMark::Plain;
            }
        }
    }
}
