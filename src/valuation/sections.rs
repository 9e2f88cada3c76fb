//! Container sections
//!
//! The bank is one flat slot array split into consecutive tabs. A tab's
//! window starts after every slot of the tabs before it.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Number of named sections a container can be split into
pub const SECTION_COUNT: usize = 9;

/// Per-section slot counts, section 1 first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCounts(pub [u32; SECTION_COUNT]);

impl SectionCounts {
    /// Slot window for `section` within a container of `len` slots.
    ///
    /// Section 0 selects the whole container. Sections past the table are
    /// clamped to the last section; windows are clamped to `len`.
    pub fn window(&self, section: usize, len: usize) -> Range<usize> {
        if section == 0 {
            return 0..len;
        }
        let section = section.min(SECTION_COUNT);

        let start: usize = self.0[..section - 1].iter().map(|count| *count as usize).sum();
        let end = start + self.0[section - 1] as usize;

        start.min(len)..end.min(len)
    }
}

impl From<[u32; SECTION_COUNT]> for SectionCounts {
    fn from(counts: [u32; SECTION_COUNT]) -> Self {
        Self(counts)
    }
}
