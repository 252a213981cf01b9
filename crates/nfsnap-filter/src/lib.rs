pub mod channel;
pub mod normalize;
pub mod verify;

pub use normalize::{
    Diagnostic, Normalized, Normalizer, RawOutput, compile_pattern, normalize, normalize_lines,
    normalize_text,
};
