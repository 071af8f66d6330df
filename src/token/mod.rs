mod decode;
mod header;

pub use decode::{DecodeOptions, decode, decode_as, decode_header, decode_payload};
pub use header::TokenHeader;
