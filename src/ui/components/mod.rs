pub mod drill_card;
pub mod file_list;
pub mod menu;
pub mod progress_bar;
