//! Envelope payload shapes shared by the endpoints.

use serde::Deserialize;

/// `data` of endpoints answering with a bare item list.
#[derive(Debug, Deserialize)]
pub(crate) struct Items<T> {
    #[serde(default)]
    items: Option<Vec<T>>,
}

impl<T> Default for Items<T> {
    fn default() -> Self {
        Self { items: None }
    }
}

impl<T> Items<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

/// `data` of paginated endpoints: items plus the server-side total.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(default)]
    items: Option<Vec<T>>,
    #[serde(default)]
    total: usize,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { items: None, total: 0 }
    }
}

impl<T> Page<T> {
    pub fn into_parts(self) -> (Vec<T>, usize) {
        (self.items.unwrap_or_default(), self.total)
    }
}
