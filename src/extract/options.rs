/// Knobs for [`dendro_data`](crate::dendro_data) and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Decimal places kept in numeric leaf labels.
    pub digits: u8,
    /// Smallest number of nodes handed to a single rayon task.
    pub min_parallel_len: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { digits: 2, min_parallel_len: 512 }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn digits(mut self, digits: u8) -> Self {
        self.digits = digits;
        self
    }

    pub fn min_parallel_len(mut self, min_parallel_len: usize) -> Self {
        self.min_parallel_len = min_parallel_len.max(1);
        self
    }
}
