pub mod scramble;
pub mod score;
pub mod solve;
