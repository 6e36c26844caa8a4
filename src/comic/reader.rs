#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    Reader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderInput {
    Next,
    Previous,
    /// Back to the grid.
    Cancel,
    /// Open the reader on the current page.
    Open,
    /// Choose a page by index: from the grid this opens it, in the reader it jumps.
    Select(usize),
}

impl ReaderInput {
    /// Maps a line typed by the user. Page numbers are 1-based.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "n" | "next" | "right" => Some(Self::Next),
            "p" | "prev" | "previous" | "left" => Some(Self::Previous),
            "q" | "esc" | "escape" | "grid" => Some(Self::Cancel),
            "r" | "read" | "reader" => Some(Self::Open),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Self::Select),
        }
    }
}

/// Grid/reader navigation over `page_count` pages.
///
/// The current index never leaves `[0, page_count - 1]`; with no pages the
/// state stays in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderState {
    mode: ViewMode,
    current: usize,
    page_count: usize,
}

impl ReaderState {
    pub fn new(page_count: usize) -> Self {
        Self {
            mode: ViewMode::Grid,
            current: 0,
            page_count,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Opens the reader on `index`. Ignored when `index` is not a page.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.page_count {
            return false;
        }
        self.current = index;
        self.mode = ViewMode::Reader;
        true
    }

    pub fn open(&mut self) -> bool {
        self.select(self.current)
    }

    pub fn next(&mut self) {
        if self.mode == ViewMode::Reader && self.has_next() {
            self.current += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.mode == ViewMode::Reader && self.has_previous() {
            self.current -= 1;
        }
    }

    /// Jumps within the reader, clamped to the last page.
    pub fn jump(&mut self, index: usize) {
        if self.mode == ViewMode::Reader {
            self.current = index.min(self.page_count.saturating_sub(1));
        }
    }

    pub fn close(&mut self) {
        self.mode = ViewMode::Grid;
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn position_label(&self) -> String {
        format!("Page {} of {}", self.current + 1, self.page_count)
    }

    pub fn handle(&mut self, input: ReaderInput) {
        match (self.mode, input) {
            (ViewMode::Reader, ReaderInput::Next) => self.next(),
            (ViewMode::Reader, ReaderInput::Previous) => self.previous(),
            (ViewMode::Reader, ReaderInput::Cancel) => self.close(),
            (ViewMode::Reader, ReaderInput::Select(i)) => self.jump(i),
            (ViewMode::Grid, ReaderInput::Select(i)) => {
                self.select(i);
            }
            (_, ReaderInput::Open) => {
                self.open();
            }
            (ViewMode::Grid, _) => {}
        }
    }
}
