pub mod cache;
pub mod compose;
pub mod scheduler;
pub mod script;

pub use cache::{NormalizedVideo, SourceVideo, convert_all, ensure_normalized};
pub use compose::compose;
pub use scheduler::{Segment, schedule};
pub use script::{render_script, write_edit_script};
