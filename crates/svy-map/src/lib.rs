pub mod draft;
pub mod error;
pub mod infer;

pub use draft::{MappingDraft, RoleCounts};
pub use error::{MapError, Result};
pub use infer::infer_mappings;
