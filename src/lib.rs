pub mod chord;
pub mod document;
pub mod duration;
pub mod error;
pub mod interval;
pub mod lyric;
pub mod pitch;
pub mod volume;

pub use chord::*;
pub use document::{load_file, parse_document, to_yaml, ChordDocument};
pub use duration::*;
pub use error::*;
pub use interval::*;
pub use lyric::*;
pub use pitch::*;
pub use volume::Volume;

/// Load a chord document and return the resulting chord as YAML.
/// This is the entry point used by the command line tool.
pub fn process(source: &str) -> Result<String, ChordError> {
    let chord = parse_document(source)?;
    to_yaml(&chord)
}
