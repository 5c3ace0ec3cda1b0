pub mod cms;
pub mod manifest;

pub use manifest::{BACKEND_NAME, CmsManifest};
