pub mod assets;
pub mod clock;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod frame;
pub mod input;
pub mod render;
pub mod scene;
pub mod session;
