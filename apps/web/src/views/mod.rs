pub mod downloads;
pub mod gallery;
pub mod signwall;
pub mod tabs;
pub mod timeline;
