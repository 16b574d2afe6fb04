pub mod file;
pub mod host;
pub mod on_update;
pub mod transfer;
pub mod uploader;
pub mod view;
