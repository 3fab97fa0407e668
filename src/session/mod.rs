pub mod nav;
pub mod score;
pub mod state;
