pub mod local_upload_store;
pub mod traits;
