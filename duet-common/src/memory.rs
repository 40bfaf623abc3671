//! Memory-match card game
//!
//! A shuffled deck holds every symbol twice. Players flip two cards per
//! move; a matching pair stays face up, a mismatched pair stays visible until
//! the next flip and is then turned face down again. The game is won when all
//! pairs are matched.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Symbols available for the deck
pub const SYMBOLS: &[&str] = &[
    "heart", "rose", "ring", "kiss", "star", "moon", "cake", "gift", "music", "sun", "coffee",
    "plane",
];

/// Default number of pairs on a board
pub const DEFAULT_PAIRS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    FaceDown,
    FaceUp,
    Matched,
}

#[derive(Debug, Clone)]
struct Card {
    symbol: &'static str,
    state: CardState,
}

/// What the player sees of one card; the symbol is hidden while face down
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub index: usize,
    pub state: CardState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<&'static str>,
}

/// Result of one flip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FlipOutcome {
    /// First card of a move
    FirstCard { index: usize, symbol: &'static str },
    /// Second card matched the first
    Match {
        first: usize,
        second: usize,
        symbol: &'static str,
    },
    /// Second card differs; both turn face down on the next flip
    Mismatch { first: usize, second: usize },
    /// Last pair matched
    Won { moves: u32 },
}

/// One memory-match board
#[derive(Debug, Clone)]
pub struct MemoryGame {
    cards: Vec<Card>,
    pairs: usize,
    matched_pairs: usize,
    moves: u32,
    first: Option<usize>,
    pending_mismatch: Option<(usize, usize)>,
}

impl MemoryGame {
    /// Deal a shuffled board of `pairs` pairs
    ///
    /// # Errors
    /// [`Error::InvalidInput`] unless `1 <= pairs <= SYMBOLS.len()`.
    pub fn new<R: Rng + ?Sized>(pairs: usize, rng: &mut R) -> Result<Self> {
        if pairs == 0 || pairs > SYMBOLS.len() {
            return Err(Error::InvalidInput(format!(
                "pairs must be between 1 and {}, got {}",
                SYMBOLS.len(),
                pairs
            )));
        }

        let mut symbols: Vec<&'static str> = SYMBOLS.choose_multiple(rng, pairs).copied().collect();
        symbols.extend_from_within(..);
        symbols.shuffle(rng);

        Ok(Self {
            cards: symbols
                .into_iter()
                .map(|symbol| Card {
                    symbol,
                    state: CardState::FaceDown,
                })
                .collect(),
            pairs,
            matched_pairs: 0,
            moves: 0,
            first: None,
            pending_mismatch: None,
        })
    }

    pub fn pairs(&self) -> usize {
        self.pairs
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Completed moves (two flips each)
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_won(&self) -> bool {
        self.matched_pairs == self.pairs
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Board as seen by the player
    pub fn cards(&self) -> Vec<CardView> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| CardView {
                index,
                state: card.state,
                symbol: match card.state {
                    CardState::FaceDown => None,
                    CardState::FaceUp | CardState::Matched => Some(card.symbol),
                },
            })
            .collect()
    }

    /// Flip the card at `index`
    ///
    /// # Errors
    /// - [`Error::InvalidInput`] if `index` is off the board
    /// - [`Error::InvalidState`] if the game is won, or the card is matched
    ///   or already face up in the current move
    pub fn flip(&mut self, index: usize) -> Result<FlipOutcome> {
        if self.is_won() {
            return Err(Error::InvalidState("game already won".to_string()));
        }
        let state = self
            .cards
            .get(index)
            .map(|c| c.state)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "card {} is off the board (0..{})",
                    index,
                    self.cards.len()
                ))
            })?;

        let hidden_next = matches!(self.pending_mismatch, Some((a, b)) if a == index || b == index);
        match state {
            CardState::Matched => {
                return Err(Error::InvalidState(format!("card {} is already matched", index)));
            }
            CardState::FaceUp if !hidden_next => {
                return Err(Error::InvalidState(format!("card {} is already face up", index)));
            }
            _ => {}
        }

        if let Some((a, b)) = self.pending_mismatch.take() {
            self.cards[a].state = CardState::FaceDown;
            self.cards[b].state = CardState::FaceDown;
        }
        self.cards[index].state = CardState::FaceUp;

        let Some(first) = self.first.take() else {
            self.first = Some(index);
            return Ok(FlipOutcome::FirstCard {
                index,
                symbol: self.cards[index].symbol,
            });
        };

        self.moves += 1;
        let symbol = self.cards[index].symbol;
        if self.cards[first].symbol == symbol {
            self.cards[first].state = CardState::Matched;
            self.cards[index].state = CardState::Matched;
            self.matched_pairs += 1;
            if self.is_won() {
                return Ok(FlipOutcome::Won { moves: self.moves });
            }
            Ok(FlipOutcome::Match {
                first,
                second: index,
                symbol,
            })
        } else {
            self.pending_mismatch = Some((first, index));
            Ok(FlipOutcome::Mismatch {
                first,
                second: index,
            })
        }
    }

    /// Index of the card carrying the same symbol as `index`
    #[cfg(test)]
    fn partner_of(&self, index: usize) -> usize {
        let symbol = self.cards[index].symbol;
        self.cards
            .iter()
            .enumerate()
            .position(|(i, c)| i != index && c.symbol == symbol)
            .unwrap()
    }
}
