pub mod cli;
pub mod render;
pub mod saved_board;
pub mod sportradar;
