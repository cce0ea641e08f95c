//! Character assignment for a solved row

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::linkage::{ColumnState, RowLinkage};
use crate::io::configuration::{DEFAULT_PALETTE, MAX_RESAMPLE_ATTEMPTS};
use crate::io::error::{Result, computation_error, config_error};

/// Non-empty sequence of candidate characters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    chars: Vec<char>,
}

impl Palette {
    /// Create a palette from characters in order
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty or contains a control
    /// character (which would break line-oriented output)
    pub fn new(chars: Vec<char>) -> Result<Self> {
        if chars.is_empty() {
            return Err(config_error("palette", &"", &"must not be empty"));
        }
        if let Some(control) = chars.iter().find(|c| c.is_control()) {
            return Err(config_error(
                "palette",
                &control.escape_default(),
                &"control characters cannot be rendered",
            ));
        }
        Ok(Self { chars })
    }

    /// Create a palette from the characters of a string
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Self::new`]
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(text.chars().collect())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false: palettes are validated non-empty
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Entry at `index`, wrapping around the palette
    pub fn cyclic(&self, index: usize) -> char {
        self.chars
            .get(index % self.chars.len().max(1))
            .copied()
            .unwrap_or(' ')
    }

    /// All entries in order
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            chars: DEFAULT_PALETTE.chars().collect(),
        }
    }
}

/// Where each row takes its palette from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaletteSource {
    /// One palette for every row
    Shared(Palette),
    /// Row `r` uses entry `r % len` (e.g. lines of a pattern file)
    PerRow(Vec<Palette>),
}

impl Default for PaletteSource {
    fn default() -> Self {
        Self::Shared(Palette::default())
    }
}

impl PaletteSource {
    /// Palette for a row, if any palette is configured
    pub fn palette_for_row(&self, row: usize) -> Option<&Palette> {
        match self {
            Self::Shared(palette) => Some(palette),
            Self::PerRow(palettes) => palettes.get(row % palettes.len().max(1)),
        }
    }

    /// First palette index used by cyclic assignment in a row
    ///
    /// Shared palettes rotate per row so rows don't start identically;
    /// pattern lines are read from their first character.
    pub fn cyclic_start(&self, row: usize) -> usize {
        match self {
            Self::Shared(palette) => row % palette.len().max(1),
            Self::PerRow(_) => 0,
        }
    }

    /// Check that at least one palette exists
    ///
    /// # Errors
    ///
    /// Returns an error for a per-row source without any palettes
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::PerRow(palettes) if palettes.is_empty() => Err(config_error(
                "pattern",
                &0,
                &"at least one pattern line is required",
            )),
            _ => Ok(()),
        }
    }
}

/// How root columns draw their character
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FreshCharacters {
    /// Uniform random draw from the palette
    #[default]
    Random,
    /// Palette entries in order
    Cyclic,
}

/// Deterministic per-row seed so rows can be generated in any order
pub const fn row_seed(base_seed: u64, row: usize) -> u64 {
    base_seed ^ row as u64
}

/// Assigns characters to one solved row
pub struct PatternAssigner<'a> {
    palette: &'a Palette,
    strategy: FreshCharacters,
    rng: StdRng,
    cursor: usize,
}

impl<'a> PatternAssigner<'a> {
    /// Create an assigner for a row with its own seeded generator
    pub fn for_row(
        palette: &'a Palette,
        strategy: FreshCharacters,
        base_seed: u64,
        row: usize,
        cyclic_start: usize,
    ) -> Self {
        Self {
            palette,
            strategy,
            rng: StdRng::seed_from_u64(row_seed(base_seed, row)),
            cursor: cyclic_start,
        }
    }

    /// Write the row's characters into `out`
    ///
    /// Roots draw fresh characters that avoid repeating their left
    /// neighbour; linked columns copy their root.
    ///
    /// # Errors
    ///
    /// Returns an error if the linkage is incomplete or a link points at a
    /// column that has no character yet
    pub fn assign(&mut self, linkage: &RowLinkage, out: &mut Vec<char>) -> Result<()> {
        out.clear();
        for col in 0..linkage.width() {
            let ch = match linkage.state(col) {
                Some(ColumnState::Root) => self.fresh(out.last().copied()),
                Some(ColumnState::Linked(root)) => out.get(root).copied().ok_or_else(|| {
                    computation_error(
                        "pattern assignment",
                        &format!("column {col} links to unassigned column {root}"),
                    )
                })?,
                Some(ColumnState::Unvisited) | None => {
                    return Err(computation_error(
                        "pattern assignment",
                        &format!("column {col} was never resolved"),
                    ));
                }
            };
            out.push(ch);
        }
        Ok(())
    }

    // With a single distinct character the neighbour constraint cannot be met
    // and that character is returned unchanged.
    fn fresh(&mut self, previous: Option<char>) -> char {
        match self.strategy {
            FreshCharacters::Random => self.fresh_random(previous),
            FreshCharacters::Cyclic => self.fresh_cyclic(previous),
        }
    }

    fn fresh_random(&mut self, previous: Option<char>) -> char {
        let len = self.palette.len();
        let mut candidate = self.palette.cyclic(self.rng.random_range(0..len));
        for _ in 0..MAX_RESAMPLE_ATTEMPTS {
            if Some(candidate) != previous {
                return candidate;
            }
            candidate = self.palette.cyclic(self.rng.random_range(0..len));
        }
        if Some(candidate) != previous {
            return candidate;
        }

        let start = self.rng.random_range(0..len);
        (0..len)
            .map(|offset| self.palette.cyclic(start + offset))
            .find(|&c| Some(c) != previous)
            .unwrap_or(candidate)
    }

    fn fresh_cyclic(&mut self, previous: Option<char>) -> char {
        let candidate = self.palette.cyclic(self.cursor);
        self.cursor += 1;
        if Some(candidate) != previous || self.palette.len() < 2 {
            return candidate;
        }
        let next = self.palette.cyclic(self.cursor);
        self.cursor += 1;
        next
    }
}
