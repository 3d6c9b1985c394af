//! Lazy Kittens VS Brave Mouse.
//!
//! A small animated scene built on one primitive: the time-driven
//! [`Animation`](components::animation::Animation), whose start and end
//! callbacks are wired together to make screen shake, look-direction and
//! walk cycles, and a music fade-out. Exposed as a library for the binary and
//! for integration tests.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod math;
pub mod resources;
pub mod systems;
