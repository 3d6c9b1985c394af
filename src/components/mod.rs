//! Scene objects and the animation primitive they are built from.
//!
//! Submodules overview:
//! - [`animation`] – progress timer with start/end callbacks and deferred triggering
//! - [`dialogue`] – scripted conversation cursor over the textboxes
//! - [`kittens`] – chained left/right look cycle selecting the background frame
//! - [`mouse`] – walk and hop cycle of the mouse sprite
//! - [`musicplayer`] – background track with a fade-out
//! - [`shaker`] – decaying random jitter
//! - [`textbox`] – speech bubble with shake and sound

pub mod animation;
pub mod dialogue;
pub mod kittens;
pub mod mouse;
pub mod musicplayer;
pub mod shaker;
pub mod textbox;
