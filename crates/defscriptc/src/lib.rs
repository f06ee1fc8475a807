#![doc = include_str!("../README.md")]

mod compiler;
pub mod emitter;

pub use compiler::*;
