pub mod bucket;
pub mod config;
pub mod create;
pub mod diff;
pub mod extract;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod rename;
pub mod render;
pub mod runtime;
pub mod sources;
mod translit;
pub mod visible;
