// src/integrations/selector.rs

/// Picks one entry out of a list of candidates, usually by asking the user.
#[cfg_attr(test, mockall::automock)]
pub trait Selector {
    /// Index into `labels`, or `None` when the choice was cancelled
    fn choose(&self, labels: &[String]) -> Option<usize>;
}

/// Non-interactive selector: always answers with a fixed position.
/// A position past the end of the list counts as a cancelled choice.
#[derive(Debug, Clone, Copy)]
pub struct IndexSelector {
    pub index: usize,
}

impl IndexSelector {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Selector for IndexSelector {
    fn choose(&self, labels: &[String]) -> Option<usize> {
        (self.index < labels.len()).then_some(self.index)
    }
}
