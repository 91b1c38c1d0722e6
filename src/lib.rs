//! A small real-time arcade shooter.
//!
//! The library holds every rule of the game: entity motion, collision
//! resolution, scoring and the frame loop. Terminal I/O lives in the binary
//! and plugs in through the collaborator traits of [`game_loop`].

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game_loop;
pub mod geometry;
pub mod input;
pub mod score;
