//! Request extractors shared by the domain routers.

pub mod multipart_form;
pub mod uuid_path;

pub use multipart_form::{MultipartForm, UploadedFile};
pub use uuid_path::UuidPath;
