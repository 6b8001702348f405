//! Simulation core of a single-screen boss rush.
//!
//! `entities` holds pure data, `compute` advances it one fixed tick at a
//! time, and `render` / `status` read it back out for a front end.

pub mod bosses;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod patterns;
pub mod projectile;
pub mod render;
pub mod status;
pub mod time_scale;
