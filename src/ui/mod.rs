pub mod pipe;
pub mod placeholder;
pub mod scroll;
pub mod util;

pub use placeholder::Placeholder;
pub use scroll::{DisplayMode, Geometry, ScrollOffset, compute_offset};
pub use util::{ReloadTrigger, SourceKey, source_key};
