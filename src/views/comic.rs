use super::{heading, render_state};
use crate::comic::{ComicPage, ReaderState, ViewMode};
use crate::models::ViewState;

const TITLE: &str = "The Comic: Golden Girl";
const EMPTY: &str =
    "Comic Pages Coming Soon\nThe beautiful story of Golden Girl is being crafted with love.";

pub fn render_grid(state: &ViewState<Vec<ComicPage>>) -> String {
    let mut out = heading(
        TITLE,
        "A visual celebration of friendship, adventure, and golden moments",
    );
    out.push_str(&render_state(state, "Loading pages...", EMPTY, |pages| {
        pages
            .iter()
            .map(|page| format!("{:>3}. {:<24} {}\n", page.index + 1, page.title(), page.url))
            .collect()
    }));
    out
}

/// The reader, or the grid when the state is not reading.
pub fn render(pages: &[ComicPage], reader: &ReaderState) -> String {
    let page = match reader.mode() {
        ViewMode::Reader => pages.get(reader.current()),
        ViewMode::Grid => None,
    };
    let Some(page) = page else {
        return render_grid(&ViewState::from_list(pages.to_vec()));
    };

    let previous = if reader.has_previous() { "← Previous" } else { "          " };
    let next = if reader.has_next() { "Next →" } else { "" };
    let dots: String = (0..pages.len())
        .map(|i| if i == reader.current() { '●' } else { '○' })
        .collect();

    format!(
        "{}   {}   {}\n\n[{}]\n{}\n\n{}\n",
        previous,
        reader.position_label(),
        next,
        page.url,
        page.title(),
        dots
    )
}

pub const READER_HELP: &str =
    "n: next  p: previous  <number>: go to page  r: reader  q: back to grid  Ctrl-D: leave";

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<ComicPage> {
        ["coverpage.png", "chapter1.png", "chapter2.png"]
            .iter()
            .enumerate()
            .map(|(index, f)| ComicPage {
                filename: f.to_string(),
                url: format!("/comicpages/{}", f),
                index,
            })
            .collect()
    }

    #[test]
    fn grid_lists_pages_in_order() {
        let page = render_grid(&ViewState::Ready(pages()));
        let cover = page.find("/comicpages/coverpage.png").unwrap();
        let last = page.find("/comicpages/chapter2.png").unwrap();
        assert!(cover < last);
        assert!(page.contains("  1. coverpage"));
    }

    #[test]
    fn empty_comic() {
        assert!(render_grid(&ViewState::Empty).contains("Comic Pages Coming Soon"));
    }

    #[test]
    fn reader_shows_current_page() {
        let pages = pages();
        let mut reader = ReaderState::new(pages.len());
        reader.select(1);
        let screen = render(&pages, &reader);
        assert!(screen.contains("Page 2 of 3"));
        assert!(screen.contains("[/comicpages/chapter1.png]"));
        assert!(screen.contains("← Previous"));
        assert!(screen.contains("Next →"));
        assert!(screen.contains("○●○"));
    }

    #[test]
    fn buttons_disappear_at_the_ends() {
        let pages = pages();
        let mut reader = ReaderState::new(pages.len());
        reader.select(2);
        let screen = render(&pages, &reader);
        assert!(!screen.contains("Next →"));
        reader.handle(crate::comic::ReaderInput::Select(0));
        assert!(!render(&pages, &reader).contains("← Previous"));
    }

    #[test]
    fn grid_mode_renders_grid() {
        let pages = pages();
        let reader = ReaderState::new(pages.len());
        assert!(render(&pages, &reader).contains(TITLE));
    }
}
