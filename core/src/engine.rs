use core::mem;
use serde::{Deserialize, Serialize};

use crate::*;

/// A shown mismatch waiting to be turned back down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lockout {
    /// Round the mismatch belongs to.
    pub generation: u32,
}

/// One dealt deck plus the counters that go with it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    deck: Deck,
    max_attempts: u8,
    attempts_left: HalfAttempts,
    timer: Seconds,
    matched: PairCount,
    score: u32,
    generation: u32,
    lockout: Option<Lockout>,
}

impl Round {
    fn new(deck: Deck, config: &GameConfig, generation: u32) -> Self {
        Self {
            deck: Deck::default().reduce(DeckAction::Reset(deck)),
            max_attempts: config.max_attempts,
            attempts_left: config.start_halves(),
            timer: 0,
            matched: 0,
            score: 0,
            generation,
            lockout: None,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn matched(&self) -> PairCount {
        self.matched
    }

    pub fn total_pairs(&self) -> PairCount {
        (self.deck.len() / 2).try_into().unwrap_or(PairCount::MAX)
    }

    pub fn timer(&self) -> Seconds {
        self.timer
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    pub fn attempts_left_halves(&self) -> HalfAttempts {
        self.attempts_left
    }

    /// Remaining attempts rounded half-up, as shown to the player.
    pub fn attempts_rounded(&self) -> u8 {
        (self.attempts_left.div_ceil(2)).try_into().unwrap_or(u8::MAX)
    }

    /// Whole attempts left, halved: the factor applied to each matched pair.
    pub fn multiplier(&self) -> u32 {
        u32::from(self.attempts_left / 4)
    }

    pub fn progress_percent(&self) -> f32 {
        match self.total_pairs() {
            0 => 0.0,
            total => f32::from(self.matched) / f32::from(total) * 100.0,
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn lockout(&self) -> Option<Lockout> {
        self.lockout
    }

    pub fn is_locked(&self) -> bool {
        self.lockout.is_some()
    }

    fn apply(&mut self, action: DeckAction) {
        self.deck = mem::take(&mut self.deck).reduce(action);
    }

    fn recompute_score(&mut self) {
        self.score = u32::from(self.matched) * self.multiplier() * POINTS_PER_PAIR;
    }

    fn flip(&mut self, id: CardId) -> FlipOutcome {
        use FlipOutcome::*;

        if self.lockout.is_some() {
            log::trace!("flip {} ignored during lockout", id);
            return NoChange;
        }

        let Some(card) = self.deck.get(id).copied() else {
            return NoChange;
        };
        if card.is_face_up() || self.attempts_left == 0 {
            return NoChange;
        }

        let other = {
            let mut candidates = self.deck.candidates();
            match (candidates.next(), candidates.next()) {
                (Some(other), None) => Some(*other),
                _ => None,
            }
        };

        self.apply(DeckAction::Flip(id));
        self.attempts_left = self.attempts_left.saturating_sub(1);

        match other {
            None => Flipped,
            Some(other) if other.face == card.face => {
                self.apply(DeckAction::Compare);
                self.matched = self.matched.saturating_add(1).min(self.total_pairs());
                self.recompute_score();
                log::debug!("matched {:?} ({}/{})", card.face, self.matched, self.total_pairs());
                Matched
            }
            Some(other) => {
                self.lockout = Some(Lockout {
                    generation: self.generation,
                });
                log::debug!("mismatch {:?} / {:?}", other.face, card.face);
                Mismatched
            }
        }
    }

    fn unlock(&mut self, generation: u32) -> bool {
        match self.lockout {
            Some(lockout) if lockout.generation == generation => {
                self.apply(DeckAction::Compare);
                self.lockout = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for a deck to be dealt.
    #[default]
    Loading,
    Playing(Round),
    Completed { round: Round, result: GameResult },
}

/// Owns the lifecycle of consecutive rounds and the high score across them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: GameConfig,
    state: SessionState,
    high_score: u32,
    generation: u32,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            state: SessionState::Loading,
            high_score: 0,
            generation: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, SessionState::Playing(_))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, SessionState::Completed { .. })
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.state {
            SessionState::Loading => None,
            SessionState::Playing(round) => Some(round),
            SessionState::Completed { round, .. } => Some(round),
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.state {
            SessionState::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Incremented on every new game; used to tell stale timer callbacks apart.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_locked(&self) -> bool {
        self.round().is_some_and(Round::is_locked)
    }

    pub fn deal(&mut self, deck: Deck) -> Result<()> {
        match self.state {
            SessionState::Loading => {
                log::debug!("round {} dealt", self.generation);
                self.state = SessionState::Playing(Round::new(deck, &self.config, self.generation));
                self.check_completion();
                Ok(())
            }
            SessionState::Playing(_) => Err(GameError::StillPlaying),
            SessionState::Completed { .. } => Err(GameError::AlreadyEnded),
        }
    }

    pub fn flip(&mut self, id: CardId) -> Result<FlipOutcome> {
        let outcome = self.playing_mut()?.flip(id);
        if outcome.has_update() {
            self.check_completion();
        }
        Ok(outcome)
    }

    /// Turns a shown mismatch back down and lifts the lockout.
    pub fn resolve_mismatch(&mut self, generation: u32) -> bool {
        if generation != self.generation {
            log::trace!("stale mismatch resolution for round {} ignored", generation);
            return false;
        }
        match &mut self.state {
            SessionState::Playing(round) => round.unlock(generation),
            _ => false,
        }
    }

    /// Advances the round timer by one second.
    pub fn tick(&mut self) -> bool {
        let SessionState::Playing(round) = &mut self.state else {
            return false;
        };
        round.timer = round.timer.saturating_add(1);
        self.check_completion();
        true
    }

    pub fn new_game(&mut self) -> Result<()> {
        match self.state {
            SessionState::Completed { .. } => {
                self.generation = self.generation.wrapping_add(1);
                self.state = SessionState::Loading;
                log::debug!("new game, round {}", self.generation);
                Ok(())
            }
            SessionState::Playing(_) => Err(GameError::StillPlaying),
            SessionState::Loading => Err(GameError::NotDealt),
        }
    }

    fn playing_mut(&mut self) -> Result<&mut Round> {
        match &mut self.state {
            SessionState::Playing(round) => Ok(round),
            SessionState::Loading => Err(GameError::NotDealt),
            SessionState::Completed { .. } => Err(GameError::AlreadyEnded),
        }
    }

    fn check_completion(&mut self) {
        let SessionState::Playing(round) = &self.state else {
            return;
        };

        let all_guessed = round.deck.all_guessed();
        let out_of_attempts = round.attempts_left == 0;
        if !out_of_attempts && !(all_guessed && round.timer > self.config.min_win_secs) {
            return;
        }

        let SessionState::Playing(mut round) = mem::take(&mut self.state) else {
            return;
        };
        // The last pair stays on display; nothing can be flipped once completed.
        round.lockout = None;

        let result = if all_guessed {
            GameResult::Won
        } else {
            GameResult::Lost
        };
        if round.score > self.high_score {
            self.high_score = round.score;
        }
        log::debug!(
            "round {} completed: {:?}, score {}",
            self.generation,
            result,
            round.score
        );
        self.state = SessionState::Completed { round, result };
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pairs laid out side by side: ids `2n` and `2n + 1` share a face.
    fn ordered_deck() -> Deck {
        Deck::from_cards(
            CardFace::ALL
                .iter()
                .flat_map(|&face| [face, face])
                .enumerate()
                .map(|(id, face)| Card::new(id as CardId, face))
                .collect(),
        )
    }

    fn playing(config: GameConfig) -> Session {
        let mut session = Session::new(config);
        session.deal(ordered_deck()).unwrap();
        session
    }

    fn match_pair(session: &mut Session, pair: CardId) {
        assert_eq!(session.flip(pair * 2).unwrap(), FlipOutcome::Flipped);
        assert_eq!(session.flip(pair * 2 + 1).unwrap(), FlipOutcome::Matched);
    }

    #[test]
    fn starts_loading_and_plays_after_deal() {
        assert_eq!(SessionState::default(), SessionState::Loading);
        let mut session = Session::default();
        assert!(session.is_loading());
        assert_eq!(session.flip(0), Err(GameError::NotDealt));

        session.deal(ordered_deck()).unwrap();

        assert!(session.is_playing());
        assert_eq!(session.deal(ordered_deck()), Err(GameError::StillPlaying));
    }

    #[test]
    fn matching_pair_scores_with_remaining_attempts() {
        let mut session = playing(GameConfig::default());

        match_pair(&mut session, 0);

        let round = session.round().unwrap();
        assert_eq!(round.matched(), 1);
        assert_eq!(round.attempts_left_halves(), 38);
        assert_eq!(round.attempts_rounded(), 19);
        assert_eq!(round.multiplier(), 9);
        assert_eq!(round.score(), 1125);
        assert_eq!(round.progress_percent(), 12.5);
    }

    #[test]
    fn single_flip_rounds_attempts_half_up() {
        let mut session = playing(GameConfig::default());

        session.flip(0).unwrap();

        assert_eq!(session.round().unwrap().attempts_rounded(), 20);
    }

    #[test]
    fn score_is_fixed_at_match_time() {
        let mut session = playing(GameConfig::default());
        match_pair(&mut session, 0);

        assert_eq!(session.flip(2).unwrap(), FlipOutcome::Flipped);
        assert_eq!(session.flip(4).unwrap(), FlipOutcome::Mismatched);

        assert_eq!(session.round().unwrap().score(), 1125);
    }

    #[test]
    fn mismatch_locks_until_resolved() {
        let mut session = playing(GameConfig::default());

        assert_eq!(session.flip(0).unwrap(), FlipOutcome::Flipped);
        assert_eq!(session.flip(2).unwrap(), FlipOutcome::Mismatched);
        assert!(session.is_locked());
        assert_eq!(
            session.round().unwrap().lockout(),
            Some(Lockout { generation: 0 })
        );

        assert_eq!(session.flip(4).unwrap(), FlipOutcome::NoChange);
        let round = session.round().unwrap();
        assert_eq!(round.attempts_left_halves(), 38);
        assert_eq!(round.deck().candidate_count(), 2);

        assert!(session.resolve_mismatch(session.generation()));
        assert!(!session.is_locked());
        assert_eq!(session.round().unwrap().deck().candidate_count(), 0);
        assert!(!session.resolve_mismatch(session.generation()));
    }

    #[test]
    fn face_up_cards_cannot_be_flipped_again() {
        let mut session = playing(GameConfig::default());

        session.flip(0).unwrap();
        assert_eq!(session.flip(0).unwrap(), FlipOutcome::NoChange);
        session.flip(1).unwrap();
        assert_eq!(session.flip(1).unwrap(), FlipOutcome::NoChange);

        assert_eq!(session.round().unwrap().attempts_left_halves(), 38);
    }

    #[test]
    fn unknown_card_is_ignored() {
        let mut session = playing(GameConfig::default());
        assert_eq!(session.flip(200).unwrap(), FlipOutcome::NoChange);
    }

    #[test]
    fn running_out_of_attempts_loses() {
        let mut session = playing(GameConfig::new(1));

        session.flip(0).unwrap();
        assert_eq!(session.flip(2).unwrap(), FlipOutcome::Mismatched);

        assert_eq!(session.result(), Some(GameResult::Lost));
        assert_eq!(session.result().map(GameResult::message), Some("You Lost!"));
        let round = session.round().unwrap();
        assert!(!round.is_locked());
        assert_eq!(round.deck().candidate_count(), 2);
        assert!(round.deck().get(2).is_some_and(|card| card.flipped));
        assert_eq!(session.flip(4), Err(GameError::AlreadyEnded));
        assert!(!session.resolve_mismatch(session.generation()));
    }

    #[test]
    fn clearing_the_board_wins_only_after_two_seconds() {
        let mut session = playing(GameConfig::default());
        session.tick();
        session.tick();

        for pair in 0..8 {
            match_pair(&mut session, pair);
        }

        assert_eq!(session.round().unwrap().timer(), 2);
        assert!(session.is_playing());

        assert!(session.tick());

        assert_eq!(session.round().unwrap().timer(), 3);
        assert_eq!(session.result(), Some(GameResult::Won));
        assert_eq!(session.result().map(GameResult::message), Some("You Won!"));
        assert!(!session.tick());
    }

    #[test]
    fn clearing_the_board_late_wins_immediately() {
        let mut session = playing(GameConfig::default());
        for _ in 0..3 {
            session.tick();
        }

        for pair in 0..8 {
            match_pair(&mut session, pair);
        }

        assert_eq!(session.result(), Some(GameResult::Won));
        assert_eq!(session.round().unwrap().matched(), 8);
    }

    #[test]
    fn last_attempt_match_still_wins() {
        let mut session = playing(GameConfig::new(8));

        for pair in 0..8 {
            match_pair(&mut session, pair);
        }

        assert_eq!(session.round().unwrap().attempts_left_halves(), 0);
        assert_eq!(session.result(), Some(GameResult::Won));
    }

    #[test]
    fn high_score_updates_only_when_beaten() {
        let mut session = playing(GameConfig::default());
        for _ in 0..3 {
            session.tick();
        }
        for pair in 0..8 {
            match_pair(&mut session, pair);
        }
        let best = session.round().unwrap().score();
        assert_eq!(session.high_score(), best);

        session.new_game().unwrap();
        session.deal(ordered_deck()).unwrap();
        match_pair(&mut session, 0);
        for _ in 0..19 {
            let first = session.flip(2).unwrap();
            assert_eq!(first, FlipOutcome::Flipped);
            session.flip(4).unwrap();
            session.resolve_mismatch(session.generation());
        }

        assert_eq!(session.result(), Some(GameResult::Lost));
        assert!(session.round().unwrap().score() < best);
        assert_eq!(session.high_score(), best);
    }

    #[test]
    fn new_game_resets_round_and_invalidates_pending_reveal() {
        let mut session = playing(GameConfig::new(1));
        let old_generation = session.generation();
        assert_eq!(session.new_game(), Err(GameError::StillPlaying));

        session.flip(0).unwrap();
        session.flip(2).unwrap();
        assert!(session.is_completed());

        session.new_game().unwrap();
        assert!(session.is_loading());
        assert_eq!(session.new_game(), Err(GameError::NotDealt));
        session.deal(ordered_deck()).unwrap();

        let round = session.round().unwrap();
        assert_eq!(round.matched(), 0);
        assert_eq!(round.timer(), 0);
        assert_eq!(round.score(), 0);
        assert_eq!(round.attempts_rounded(), 1);

        session.flip(0).unwrap();
        assert!(!session.resolve_mismatch(old_generation));
    }

    #[test]
    fn timer_only_runs_while_playing() {
        let mut session = Session::default();
        assert!(!session.tick());

        session.deal(ordered_deck()).unwrap();
        assert!(session.tick());
        assert_eq!(session.round().unwrap().timer(), 1);
    }

    #[test]
    fn never_more_than_two_candidates() {
        let mut session = playing(GameConfig::default());
        for id in [0, 2, 4, 6] {
            session.flip(id).unwrap();
            assert!(session.round().unwrap().deck().candidate_count() <= 2);
        }

        session.resolve_mismatch(session.generation());
        for id in [4, 5, 6, 8, 10] {
            session.flip(id).unwrap();
            assert!(session.round().unwrap().deck().candidate_count() <= 2);
        }
    }

    #[test]
    fn lockout_carries_the_round_generation() {
        let mut session = playing(GameConfig::default());
        for _ in 0..3 {
            session.tick();
        }
        for pair in 0..8 {
            match_pair(&mut session, pair);
        }
        session.new_game().unwrap();
        session.deal(ordered_deck()).unwrap();

        session.flip(0).unwrap();
        assert_eq!(session.flip(2).unwrap(), FlipOutcome::Mismatched);

        let round = session.round().unwrap();
        assert_eq!(round.generation(), 1);
        assert_eq!(round.lockout(), Some(Lockout { generation: 1 }));
        assert!(!session.resolve_mismatch(0));
        assert!(session.resolve_mismatch(1));
    }
}
