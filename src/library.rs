//! Music library: discovers audio files and reads their basic tag fields.

mod model;
mod scan;

pub use model::Track;
pub use scan::scan;

#[cfg(test)]
mod tests;
