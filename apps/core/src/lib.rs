// Shared data model and pure transforms used by the web front-end and the
// terminal previewer. Nothing in here touches the DOM or the filesystem.
pub mod dates;
pub mod gallery;
pub mod loader;
pub mod model;
pub mod pan;
pub mod signwall;
pub mod tabs;
pub mod timeline;
pub mod versions;

pub use loader::{LoadError, Resource};
pub use model::{HistoryDocument, HistoryEvent, MemoryImage, Sign, ThanksEntry, Version};
pub use signwall::SignGrid;
pub use tabs::{Tab, TabController, ViewLifecycle};
