/// Suits in a standard deck, also the number of foundations.
pub const SUIT_COUNT: usize = 4;

/// Ranks per suit, also the height of a complete foundation.
pub const RANK_COUNT: usize = 13;

pub const DECK_SIZE: usize = SUIT_COUNT * RANK_COUNT;

pub const TABLEAU_COLUMNS: usize = 7;

/// Cards left in the stock after the tableau has been dealt (1 + 2 + ... + 7 dealt).
pub const STOCK_SIZE: usize = DECK_SIZE - TABLEAU_COLUMNS * (TABLEAU_COLUMNS + 1) / 2;

pub const DEFAULT_HISTORY_DEPTH: usize = 10;

pub const MAX_HISTORY_DEPTH: usize = 1024;

/// Index of a tableau column, `0..TABLEAU_COLUMNS`.
pub type Column = usize;
