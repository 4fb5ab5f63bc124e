// src/core/mod.rs

pub mod first_of;
pub mod html;
pub mod net;
pub mod sanitize;

pub use first_of::first_of;
