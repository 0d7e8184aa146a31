use pokematch_core as game;
use game::DeckGenerator;

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::FlipOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::FlipOutcome| outcome.has_update())
    }
}

impl<E> HasUpdate for Result<(), E> {
    fn has_update(self) -> bool {
        self.is_ok()
    }
}

/// Mismatch timeout that should be armed for the current lockout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RevealTimer {
    pub lockout: game::Lockout,
    pub delay_ms: u32,
}

/// Timers the view has to hold for the current session state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TimerPlan {
    pub tick: bool,
    pub reveal: Option<RevealTimer>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct DealRequest {
    pub generation: u32,
    pub seed: u64,
}

impl DealRequest {
    pub fn deal(self) -> game::Deck {
        game::RandomDeckGenerator::new(self.seed).generate(&game::CardFace::ALL)
    }
}

/// Session plus the browser-independent decisions around it: which deals to accept and which timers to keep.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameBoard {
    session: game::Session,
    forced_seed: Option<u64>,
}

impl GameBoard {
    pub fn new(config: game::GameConfig, forced_seed: Option<u64>) -> Self {
        Self {
            session: game::Session::new(config),
            forced_seed,
        }
    }

    pub fn session(&self) -> &game::Session {
        &self.session
    }

    /// A forced seed makes round `n` deal from `seed + n`.
    pub fn deal_request(&self, random_seed: impl FnOnce() -> u64) -> DealRequest {
        let generation = self.session.generation();
        let seed = match self.forced_seed {
            Some(seed) => seed.wrapping_add(u64::from(generation)),
            None => random_seed(),
        };
        DealRequest { generation, seed }
    }

    pub fn accept_deal(&mut self, generation: u32, deck: game::Deck) -> bool {
        if generation != self.session.generation() {
            log::debug!("discarding deal for stale round {}", generation);
            return false;
        }
        self.session.deal(deck).has_update()
    }

    pub fn flip(&mut self, id: game::CardId) -> bool {
        let outcome = self.session.flip(id);
        log::debug!("flip {}: {:?}", id, outcome);
        outcome.has_update()
    }

    pub fn tick(&mut self) -> bool {
        self.session.tick()
    }

    pub fn reveal(&mut self, generation: u32) -> bool {
        self.session.resolve_mismatch(generation)
    }

    pub fn new_game(&mut self) -> bool {
        self.session.new_game().has_update()
    }

    pub fn timer_plan(&self) -> TimerPlan {
        let playing = self.session.is_playing();
        let reveal = self
            .session
            .round()
            .and_then(|round| round.lockout())
            .filter(|_| playing)
            .map(|lockout| RevealTimer {
                lockout,
                delay_ms: self.session.config().mismatch_delay_ms,
            });

        TimerPlan {
            tick: playing,
            reveal,
        }
    }
}
