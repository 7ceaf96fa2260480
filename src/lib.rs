//! Snake played inside a modal dialog.
//!
//! [`engine::GameEngine`] holds the whole game: it owns the [`game::GameState`],
//! the repeating [`scheduler::TickHandle`] and a [`renderer::Render`]
//! collaborator it reports to. Everything under [`ui`] and [`app`] is the
//! terminal page and dialog that drive it through `reset`, `start`, `stop`
//! and `set_direction`.

pub mod app;
pub mod canvas;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
