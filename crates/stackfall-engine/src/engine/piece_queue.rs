use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Policy deciding which piece kinds come next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Randomizer {
    /// Shuffled bags holding each of the seven kinds once.
    ///
    /// Never more than twelve pieces between two of the same kind.
    #[default]
    SevenBag,
    /// Every kind drawn independently with equal probability.
    Uniform,
    /// Repeats the given sequence forever.
    Scripted(Vec<PieceKind>),
}

/// Upcoming pieces.
///
/// The queue always holds at least one piece, so the next-piece preview and the
/// spawn after a lock never see a gap.
///
/// # Example
///
/// ```
/// use stackfall_engine::{PieceKind, PieceQueue};
///
/// let mut queue = PieceQueue::scripted(vec![PieceKind::T, PieceKind::I]);
/// assert_eq!(queue.peek_next(), PieceKind::T);
/// assert_eq!(queue.pop_next(), PieceKind::T);
/// assert_eq!(queue.pop_next(), PieceKind::I);
/// assert_eq!(queue.pop_next(), PieceKind::T);
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    randomizer: Randomizer,
    queue: VecDeque<PieceKind>,
    script_cursor: usize,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceQueue {
    /// Creates a 7-bag queue with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random(), Randomizer::SevenBag)
    }

    /// Creates a queue whose sequence is fully determined by `seed` and `randomizer`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed, randomizer: Randomizer) -> Self {
        if let Randomizer::Scripted(sequence) = &randomizer {
            assert!(!sequence.is_empty(), "scripted sequence must not be empty");
        }
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            randomizer,
            queue: VecDeque::with_capacity(PieceKind::LEN * 2),
            script_cursor: 0,
        };
        this.refill();
        this
    }

    /// Creates a queue that cycles through `sequence`.
    ///
    /// # Panics
    ///
    /// Panics if `sequence` is empty.
    #[must_use]
    pub fn scripted(sequence: Vec<PieceKind>) -> Self {
        Self::with_seed(PieceSeed::default(), Randomizer::Scripted(sequence))
    }

    #[must_use]
    pub fn randomizer(&self) -> &Randomizer {
        &self.randomizer
    }

    fn refill(&mut self) {
        while self.queue.is_empty() {
            match &self.randomizer {
                Randomizer::SevenBag => {
                    let mut bag = PieceKind::ALL;
                    bag.shuffle(&mut self.rng);
                    self.queue.extend(bag);
                }
                Randomizer::Uniform => {
                    let kind: PieceKind = self.rng.random();
                    self.queue.push_back(kind);
                }
                Randomizer::Scripted(sequence) => {
                    self.queue.push_back(sequence[self.script_cursor]);
                    self.script_cursor = (self.script_cursor + 1) % sequence.len();
                }
            }
        }
    }

    /// Returns the kind that the next [`Self::pop_next`] will produce.
    #[must_use]
    pub fn peek_next(&self) -> PieceKind {
        *self
            .queue
            .front()
            .expect("piece queue should never be empty")
    }

    /// Takes the next piece kind and refills the queue if needed.
    pub fn pop_next(&mut self) -> PieceKind {
        let kind = self
            .queue
            .pop_front()
            .expect("piece queue should never be empty");
        self.refill();
        kind
    }

    /// Returns the pieces already generated, in order. Always non-empty.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }
}

/// 128-bit seed for deterministic piece generation.
///
/// Serialized (and displayed) as 32 hex digits so it can be printed at startup
/// and passed back on the command line to replay the same piece sequence.
///
/// ```
/// use stackfall_engine::{PieceQueue, PieceSeed, Randomizer};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let mut a = PieceQueue::with_seed(seed, Randomizer::SevenBag);
/// let mut b = PieceQueue::with_seed(seed, Randomizer::SevenBag);
/// for _ in 0..20 {
///     assert_eq!(a.pop_next(), b.pop_next());
/// }
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

/// Error returned when a seed string is not exactly 32 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {text:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    text: String,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError { text: s.to_owned() };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
