pub mod actions;
pub mod board;
pub mod config;
pub mod error;
pub mod message;
pub mod model;
pub mod service;
pub mod state;
pub mod view;

pub use board::{ActivityBoard, BoardProps};
pub use config::BoardConfig;
