/// Identifier of a single card, unique within one dealt deck.
pub type CardId = u8;

/// Count type used for matched pairs and pool sizes.
pub type PairCount = u8;

/// Whole seconds elapsed in a round.
pub type Seconds = u32;

/// Remaining attempts stored in half units, one unit per flip.
pub type HalfAttempts = u16;

/// Points awarded per matched pair at a multiplier of one.
pub const POINTS_PER_PAIR: u32 = 125;

pub const fn halves(attempts: u8) -> HalfAttempts {
    (attempts as HalfAttempts) * 2
}
