pub mod assets;
pub mod natural_sort;
pub mod pages;
pub mod reader;

pub use assets::{Asset, AssetSource, DirectoryAssets, DiscoveryError};
pub use natural_sort::natural_cmp;
pub use pages::{resolve_pages, ComicPage, ComicPages, FALLBACK_PAGES};
pub use reader::{ReaderInput, ReaderState, ViewMode};
