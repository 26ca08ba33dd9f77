use core::ops::Range;

use crate::bram::{Bram, BramSelect};

/// A logical write position in a table made of power-of-two sized segments.
///
/// `page` mirrors the value last written to the segment offset register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct StreamCounter {
    cycle: u32,
    page: u32,
    offset_reg: u16,
    length_reg: u16,
}

impl StreamCounter {
    pub(crate) const fn new(offset_reg: u16, length_reg: u16) -> Self {
        Self {
            cycle: 0,
            page: 0,
            offset_reg,
            length_reg,
        }
    }

    pub(crate) const fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Sets the counter without touching the device. The offset register must already be 0.
    pub(crate) fn reset(&mut self, cycle: u32) {
        self.cycle = cycle;
        self.page = 0;
    }

    /// Restarts the stream at the head of the first segment.
    pub(crate) fn begin<B: Bram>(&mut self, bram: &mut B) {
        self.reset(0);
        bram.write(BramSelect::Controller, self.offset_reg, 0);
    }

    /// Writes the offset register if it does not point at the segment of the current cycle.
    pub(crate) fn sync_page<B: Bram>(&mut self, bram: &mut B, width: u32) {
        let page = self.cycle >> width;
        if page != self.page {
            tracing::debug!(
                "segment offset {:#05X}: {} -> {}",
                self.offset_reg,
                self.page,
                page
            );
            bram.write(BramSelect::Controller, self.offset_reg, page as u16);
            self.page = page;
        }
    }

    /// Appends `n` units to a table with segments of `1 << width` units.
    ///
    /// The run is cut at every segment boundary. Before each block the offset register is
    /// brought to the block's segment, then `f` receives the in-segment position of the first
    /// unit and the range of the units in the run.
    pub(crate) fn write<B: Bram>(
        &mut self,
        bram: &mut B,
        width: u32,
        n: usize,
        mut f: impl FnMut(&mut B, u32, Range<usize>),
    ) {
        let size = 1u32 << width;
        let mut done = 0;
        while done < n {
            self.sync_page(bram, width);
            let offset = self.cycle & (size - 1);
            let len = (n - done).min((size - offset) as usize);
            f(bram, offset, done..done + len);
            self.cycle = self.cycle.wrapping_add(len as u32);
            done += len;
        }
    }

    /// Advances one unit and moves the offset register as soon as a segment is filled.
    pub(crate) fn advance<B: Bram>(&mut self, bram: &mut B, width: u32) {
        self.cycle = self.cycle.wrapping_add(1);
        self.sync_page(bram, width);
    }

    /// Writes the table length register as `max(1, cycle) - 1`.
    pub(crate) fn finish<B: Bram>(&self, bram: &mut B) {
        bram.write(
            BramSelect::Controller,
            self.length_reg,
            (self.cycle.max(1) - 1) as u16,
        );
    }
}
