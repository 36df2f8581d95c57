/// Walk state definitions for the pagination state machine
///
/// A walk starts in `FetchingList` and ends in `Done`. Each listing page moves
/// through item extraction and detail enrichment before the walk either follows
/// the page's "next" link or halts.
use std::fmt;

/// Represents the current stage of a catalog walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkState {
    /// Fetching a listing page
    FetchingList,

    /// Extracting partial records from the listing page's cards
    ExtractingItems,

    /// Fetching the detail pages of the current listing page
    FetchingDetail,

    /// Merging detail fields into partial records and appending them
    Enriching,

    /// No "next" link remained; the result set is complete
    Done,
}

impl WalkState {
    /// Returns true if the walk has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if a transition from `self` to `next` is allowed
    ///
    /// Detail fetching and enrichment each happen once per listing page, for all
    /// of its items together. A listing page with no items skips straight from
    /// extraction to the pagination check.
    pub fn can_transition_to(&self, next: WalkState) -> bool {
        use WalkState::*;

        matches!(
            (self, next),
            (FetchingList, ExtractingItems)
                | (ExtractingItems, FetchingDetail)
                | (ExtractingItems, FetchingList)
                | (ExtractingItems, Done)
                | (FetchingDetail, Enriching)
                | (Enriching, FetchingList)
                | (Enriching, Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchingList => "fetching_list",
            Self::ExtractingItems => "extracting_items",
            Self::FetchingDetail => "fetching_detail",
            Self::Enriching => "enriching",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
