use crate::constants::views::DETAIL_SAMPLE_ROWS;

/// Top-level dashboard configuration.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    /// Upper bound on rows shown in the home detail-table sample.
    pub detail_sample_rows: usize,
    /// When `true`, the detail table shows every row instead of a sample.
    ///
    /// Mirrors the full-dataset export variant, which renders the whole
    /// table rather than a bounded sample.
    pub full_detail_table: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            detail_sample_rows: DETAIL_SAMPLE_ROWS,
            full_detail_table: false,
        }
    }
}
