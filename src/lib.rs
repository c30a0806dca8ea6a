//! transform3d - Library for promoting 2D CSS transforms to 3D
//!
//! This library provides functionality to:
//! - Parse CSS leniently into a small mutable stylesheet tree
//! - Rewrite legacy 2D transform functions into their 3D equivalents
//! - Inject compositing hints (will-change and friends) without duplicates
//! - Honor selector exclusions, propagated to referenced keyframe blocks

pub mod animations;
pub mod cli;
pub mod config;
pub mod engine;
pub mod exclude;
pub mod rewrite;
pub mod stylesheet;
pub mod tokenizer;
pub mod util;
