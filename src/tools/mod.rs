mod encoder;
mod fingerprint;
mod probe;
mod scanner;
mod timestamp;

pub use encoder::Encoder;
pub use fingerprint::fingerprint_file;
pub use probe::frame_count;
pub use scanner::collect_inputs;
pub use timestamp::{format_timestamp, frame_to_seconds};
