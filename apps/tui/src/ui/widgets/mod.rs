pub mod popup;
pub mod status;
pub mod tables;
pub mod tabs;
