use super::assets::{Asset, AssetSource};
use super::natural_sort::natural_cmp;
use crate::models::ViewState;
use log::{debug, warn};
use std::cmp::Ordering;

/// Shown, in this order, when the asset location cannot be listed.
pub const FALLBACK_PAGES: [&str; 4] = [
    "coverpage.png",
    "chapter1.png",
    "chapter2.png",
    "finalchapter.png",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicPage {
    pub filename: String,
    pub url: String,
    pub index: usize,
}

impl ComicPage {
    /// Display label: the file stem with a space before each capital letter.
    pub fn title(&self) -> String {
        let stem = match self.filename.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => self.filename.as_str(),
        };
        let mut title = String::with_capacity(stem.len() + 4);
        for c in stem.chars() {
            if c.is_uppercase() {
                title.push(' ');
            }
            title.push(c);
        }
        title.trim().to_string()
    }
}

/// Outcome of resolving the comic's pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComicPages {
    /// The location was listed but holds no pages yet.
    Empty,
    Discovered(Vec<ComicPage>),
    /// Listing failed; the fixed page list is used instead.
    Fallback(Vec<ComicPage>),
}

impl ComicPages {
    pub fn pages(&self) -> &[ComicPage] {
        match self {
            ComicPages::Empty => &[],
            ComicPages::Discovered(pages) | ComicPages::Fallback(pages) => pages,
        }
    }

    pub fn into_view(self) -> ViewState<Vec<ComicPage>> {
        match self {
            ComicPages::Empty => ViewState::Empty,
            ComicPages::Discovered(pages) | ComicPages::Fallback(pages) => ViewState::Ready(pages),
        }
    }
}

fn is_cover(filename: &str) -> bool {
    filename
        .get(..5)
        .map(|p| p.eq_ignore_ascii_case("cover"))
        .unwrap_or(false)
}

/// Reading order: the cover first, then everything else in natural order.
pub fn page_order(a: &str, b: &str) -> Ordering {
    is_cover(b)
        .cmp(&is_cover(a))
        .then_with(|| natural_cmp(a, b))
}

/// Sorts discovered assets into reading order and numbers them from zero.
pub fn index_pages(mut assets: Vec<Asset>) -> Vec<ComicPage> {
    assets.sort_by(|a, b| page_order(&a.filename, &b.filename));
    assets.dedup_by(|a, b| a.filename == b.filename);
    assets
        .into_iter()
        .enumerate()
        .map(|(index, asset)| ComicPage {
            filename: asset.filename,
            url: asset.url,
            index,
        })
        .collect()
}

/// The fixed page list, in its declared order.
pub fn fallback_pages<S: AssetSource + ?Sized>(source: &S) -> Vec<ComicPage> {
    FALLBACK_PAGES
        .iter()
        .enumerate()
        .map(|(index, filename)| ComicPage {
            filename: filename.to_string(),
            url: source.locate(filename),
            index,
        })
        .collect()
}

pub fn resolve_pages<S: AssetSource + ?Sized>(source: &S) -> ComicPages {
    match source.discover() {
        Ok(assets) if assets.is_empty() => {
            debug!("No comic pages found");
            ComicPages::Empty
        }
        Ok(assets) => {
            let pages = index_pages(assets);
            debug!("Found {} comic pages", pages.len());
            ComicPages::Discovered(pages)
        }
        Err(e) => {
            warn!("Comic page discovery failed, using fixed page list: {}", e);
            ComicPages::Fallback(fallback_pages(source))
        }
    }
}
