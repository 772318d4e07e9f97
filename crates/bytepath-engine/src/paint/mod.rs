//! Paint primitives.
//!
//! Colors are stored premultiplied; every batch and shader assumes
//! `One / OneMinusSrcAlpha` blending.

mod color;

pub use color::Color;
