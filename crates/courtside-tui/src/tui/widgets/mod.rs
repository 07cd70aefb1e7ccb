// TUI widget modules for each dashboard panel.

pub mod header;
pub mod player_card;
pub mod search_form;
pub mod stats_chart;
pub mod status_bar;
