//! Terminal UI: a game view for playing Hex against an agent.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
