use serde::{Deserialize, Serialize};

use crate::CardId;

/// The fixed pool of card faces, one per Pokémon.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardFace {
    Bulbasaur,
    Charmander,
    Squirtle,
    Pikachu,
    Jigglypuff,
    Meowth,
    Psyduck,
    Eevee,
}

impl CardFace {
    pub const ALL: [CardFace; 8] = [
        CardFace::Bulbasaur,
        CardFace::Charmander,
        CardFace::Squirtle,
        CardFace::Pikachu,
        CardFace::Jigglypuff,
        CardFace::Meowth,
        CardFace::Psyduck,
        CardFace::Eevee,
    ];

    pub const fn name(self) -> &'static str {
        use CardFace::*;
        match self {
            Bulbasaur => "Bulbasaur",
            Charmander => "Charmander",
            Squirtle => "Squirtle",
            Pikachu => "Pikachu",
            Jigglypuff => "Jigglypuff",
            Meowth => "Meowth",
            Psyduck => "Psyduck",
            Eevee => "Eevee",
        }
    }

    /// National Pokédex number.
    pub const fn dex_number(self) -> u16 {
        use CardFace::*;
        match self {
            Bulbasaur => 1,
            Charmander => 4,
            Squirtle => 7,
            Pikachu => 25,
            Jigglypuff => 39,
            Meowth => 52,
            Psyduck => 54,
            Eevee => 133,
        }
    }

    /// Path of the bundled card art, relative to the page.
    pub const fn image_path(self) -> &'static str {
        use CardFace::*;
        match self {
            Bulbasaur => "assets/cards/1.svg",
            Charmander => "assets/cards/4.svg",
            Squirtle => "assets/cards/7.svg",
            Pikachu => "assets/cards/25.svg",
            Jigglypuff => "assets/cards/39.svg",
            Meowth => "assets/cards/52.svg",
            Psyduck => "assets/cards/54.svg",
            Eevee => "assets/cards/133.svg",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub face: CardFace,
    pub flipped: bool,
    pub guessed: bool,
}

impl Card {
    pub const fn new(id: CardId, face: CardFace) -> Self {
        Self {
            id,
            face,
            flipped: false,
            guessed: false,
        }
    }

    /// Face-up but not yet paired, i.e. still up for comparison.
    pub const fn is_candidate(&self) -> bool {
        self.flipped && !self.guessed
    }

    pub const fn is_face_up(&self) -> bool {
        self.flipped || self.guessed
    }
}
