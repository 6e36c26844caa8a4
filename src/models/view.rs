/// What a page currently has to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Empty,
    Error(String),
    Ready(T),
}

impl<T> ViewState<Vec<T>> {
    /// `Empty` for an empty list, `Ready` otherwise.
    pub fn from_list(items: Vec<T>) -> Self {
        if items.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Ready(items)
        }
    }

    /// Turns a loaded but empty list into `Empty`.
    pub fn non_empty(self) -> Self {
        match self {
            ViewState::Ready(items) => Self::from_list(items),
            other => other,
        }
    }
}

impl<T> ViewState<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => ViewState::Error(e.to_string()),
        }
    }
}
