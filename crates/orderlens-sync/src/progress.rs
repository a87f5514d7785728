//! Progress notifications emitted during a sync.

/// Percentage reported while pages are still being fetched never exceeds this.
pub const PAGE_PROGRESS_CAP: u8 = 90;

const CONNECTING_PERCENT: u8 = 5;
const NORMALIZING_PERCENT: u8 = 95;

/// One progress notification: a short stage label and a 0–100 percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub stage: String,
    pub percent: u8,
}

impl ProgressUpdate {
    #[must_use]
    pub fn new(stage: impl Into<String>, percent: u8) -> Self {
        Self {
            stage: stage.into(),
            percent: percent.min(100),
        }
    }

    #[must_use]
    pub fn connecting() -> Self {
        Self::new("connecting", CONNECTING_PERCENT)
    }

    /// Update sent before requesting `page`; carries the percentage of the
    /// previous page so the bar never moves backwards.
    #[must_use]
    pub fn fetching(page: u32) -> Self {
        let previous = Self::page_complete(page.saturating_sub(1)).percent;
        Self::new(
            format!("fetching page {page}"),
            previous.max(CONNECTING_PERCENT),
        )
    }

    #[must_use]
    pub fn normalizing() -> Self {
        Self::new("normalizing", NORMALIZING_PERCENT)
    }

    #[must_use]
    pub fn complete() -> Self {
        Self::new("complete", 100)
    }

    /// Update sent after `page` has been fetched and extracted.
    ///
    /// Grows by 5 points per page and stops at [`PAGE_PROGRESS_CAP`], so
    /// 100% is only ever reported once the whole sync completes.
    #[must_use]
    pub fn page_complete(page: u32) -> Self {
        let percent = page.saturating_mul(5).min(u32::from(PAGE_PROGRESS_CAP));
        Self::new(
            format!("fetched page {page}"),
            u8::try_from(percent).unwrap_or(PAGE_PROGRESS_CAP),
        )
    }
}

/// Receives progress updates; implemented for any `Fn(ProgressUpdate)`.
pub trait ProgressSink {
    fn report(&self, update: ProgressUpdate);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressUpdate),
{
    fn report(&self, update: ProgressUpdate) {
        self(update);
    }
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _update: ProgressUpdate) {}
}
