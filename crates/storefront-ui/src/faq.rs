//! FAQ accordion: at most one answer open.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// Click on question `index`: open it and close the rest, or close it
    /// if it was the open one. Out-of-range indexes are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    /// `active` flags for every item, in order.
    pub fn states(&self) -> Vec<bool> {
        (0..self.len).map(|i| self.is_open(i)).collect()
    }
}
