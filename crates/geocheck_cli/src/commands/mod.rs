pub mod cad;
pub mod checkers;
pub mod detect;
pub mod layers;
pub mod rules;
pub mod validate;
