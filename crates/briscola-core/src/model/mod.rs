pub mod card;
pub mod deck;
pub mod element;
pub mod hand;
pub mod modifiers;
pub mod player;
pub mod points;
pub mod rank;
pub mod round;
pub mod score;
pub mod suit;
pub mod trick;
