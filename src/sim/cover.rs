/// A slot brighter than this counts as full and deposits look elsewhere.
pub const SATURATION_THRESHOLD: u8 = 200;

/// Accumulated snow along the bottom of the screen.
///
/// Each column holds `depth` slots. Slot `depth - 1` is the deepest one and
/// sits on the bottom screen row; slot `0` is the top of the band. Cells
/// only grow through [`SnowCover::deposit`] and only shrink through
/// [`SnowCover::melt`], and both touch a single column (plus one neighbour
/// for a redirected deposit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnowCover {
    width: usize,
    depth: usize,
    cells: Vec<u8>,
}

impl SnowCover {
    #[must_use]
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            width,
            depth,
            cells: vec![0; width * depth],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn deepest_slot(&self) -> usize {
        self.depth.saturating_sub(1)
    }

    #[must_use]
    pub fn get(&self, column: usize, slot: usize) -> Option<u8> {
        self.index(column, slot).map(|idx| self.cells[idx])
    }

    /// Overwrites one cell. Returns `false` when the cell does not exist.
    pub fn set(&mut self, column: usize, slot: usize, value: u8) -> bool {
        match self.index(column, slot) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// `(column, slot, value)` for every cell, row by row from slot 0.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().map(|(idx, &value)| {
            let slot = idx / self.width.max(1);
            (idx % self.width.max(1), slot, value)
        })
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.cells.iter().map(|&value| u32::from(value)).sum()
    }

    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|&value| value == 0)
    }

    /// Adds a landed flake's brightness to the column it hit and returns the
    /// `(column, slot)` that took it, or `None` when `column` is off-screen.
    ///
    /// The flake settles in the deepest slot that is not yet full. If that
    /// leaves it above the bottom and the downwind neighbour still has room
    /// one slot deeper, it slides over there instead and keeps sinking while
    /// the slots below stay unsaturated. That keeps single columns from
    /// growing into spikes.
    pub fn deposit(
        &mut self,
        column: i32,
        brightness: u8,
        wind_sign: i32,
    ) -> Option<(usize, usize)> {
        let mut x = usize::try_from(column).ok().filter(|&x| x < self.width)?;
        if self.depth == 0 {
            return None;
        }

        let mut slot = self.depth - 1;
        while self.value(x, slot) > SATURATION_THRESHOLD && slot > 0 {
            slot -= 1;
        }

        let step = if wind_sign < 0 { -1 } else { 1 };
        if slot + 1 < self.depth
            && let Some(nx) = x.checked_add_signed(step).filter(|&nx| nx < self.width)
            && self.value(nx, slot + 1) <= SATURATION_THRESHOLD
        {
            x = nx;
            slot += 1;
            while slot + 1 < self.depth && self.value(x, slot + 1) <= SATURATION_THRESHOLD {
                slot += 1;
            }
        }

        let idx = slot * self.width + x;
        self.cells[idx] = self.cells[idx].saturating_add(brightness);
        Some((x, slot))
    }

    /// Takes one unit off the first non-empty slot of every column, scanning
    /// from slot 0. A column loses at most one unit per call.
    pub fn melt(&mut self) {
        for x in 0..self.width {
            for slot in 0..self.depth {
                let cell = &mut self.cells[slot * self.width + x];
                if *cell > 0 {
                    *cell -= 1;
                    break;
                }
            }
        }
    }

    fn value(&self, column: usize, slot: usize) -> u8 {
        self.cells[slot * self.width + column]
    }

    fn index(&self, column: usize, slot: usize) -> Option<usize> {
        (column < self.width && slot < self.depth).then(|| slot * self.width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_columns_off_screen() {
        let mut cover = SnowCover::new(8, 2);
        assert_eq!(cover.deposit(-1, 100, 1), None);
        assert_eq!(cover.deposit(8, 100, 1), None);
        assert!(cover.is_clear());
    }

    #[test]
    fn first_flake_lands_in_deepest_slot() {
        let mut cover = SnowCover::new(8, 4);
        assert_eq!(cover.deposit(3, 90, 1), Some((3, 3)));
        assert_eq!(cover.get(3, 3), Some(90));
        assert_eq!(cover.total(), 90);
    }

    #[test]
    fn unsaturated_slot_keeps_absorbing() {
        let mut cover = SnowCover::new(8, 4);
        cover.deposit(3, 150, 1);
        assert_eq!(cover.deposit(3, 50, 1), Some((3, 3)));
        assert_eq!(cover.get(3, 3), Some(200));
    }

    #[test]
    fn brightness_saturates_at_full() {
        let mut cover = SnowCover::new(4, 1);
        cover.deposit(1, 180, 1);
        cover.deposit(1, 180, 1);
        assert_eq!(cover.get(1, 0), Some(255));
    }

    #[test]
    fn full_slot_with_open_neighbour_slides_downwind() {
        let mut cover = SnowCover::new(8, 4);
        cover.set(3, 3, 230);
        // slot 2 above the full cell is chosen, then the downwind
        // neighbour's slot 3 is still open so the flake slides there
        assert_eq!(cover.deposit(3, 40, 1), Some((4, 3)));
        assert_eq!(cover.get(4, 3), Some(40));
        assert_eq!(cover.get(3, 2), Some(0));

        assert_eq!(cover.deposit(3, 40, -1), Some((2, 3)));
        assert_eq!(cover.get(2, 3), Some(40));
    }

    #[test]
    fn slid_flake_sinks_through_open_slots() {
        let mut cover = SnowCover::new(4, 4);
        for slot in 1..4 {
            cover.set(1, slot, 250);
        }
        assert_eq!(cover.deposit(1, 10, 1), Some((2, 3)));
        assert_eq!(cover.get(2, 3), Some(10));
    }

    #[test]
    fn spike_builds_when_neighbour_is_full() {
        let mut cover = SnowCover::new(4, 4);
        cover.set(1, 3, 250);
        cover.set(2, 3, 250);
        assert_eq!(cover.deposit(1, 10, 1), Some((1, 2)));
    }

    #[test]
    fn edge_column_has_no_neighbour_to_slide_to() {
        let mut cover = SnowCover::new(4, 2);
        cover.set(3, 1, 250);
        assert_eq!(cover.deposit(3, 10, 1), Some((3, 0)));

        cover.set(0, 1, 250);
        assert_eq!(cover.deposit(0, 10, -1), Some((0, 0)));
    }

    #[test]
    fn fully_saturated_column_still_takes_the_flake() {
        let mut cover = SnowCover::new(3, 3);
        for column in 0..3 {
            for slot in 0..3 {
                cover.set(column, slot, 210);
            }
        }
        let before = cover.total();
        let (column, slot) = cover.deposit(1, 20, 1).expect("column is on screen");
        assert_eq!((column, slot), (1, 0));
        assert!(cover.total() > before);
    }

    #[test]
    fn melt_on_clear_field_is_noop() {
        let mut cover = SnowCover::new(8, 4);
        cover.melt();
        assert!(cover.is_clear());
    }

    #[test]
    fn melt_takes_one_unit_per_column() {
        let mut cover = SnowCover::new(2, 3);
        cover.set(0, 1, 10);
        cover.set(0, 2, 10);
        cover.set(1, 2, 1);
        cover.melt();
        assert_eq!(cover.get(0, 1), Some(9));
        assert_eq!(cover.get(0, 2), Some(10));
        assert_eq!(cover.get(1, 2), Some(0));
    }

    #[test]
    fn melt_reaches_zero_and_stays_there() {
        let mut cover = SnowCover::new(4, 2);
        cover.deposit(0, 5, 1);
        assert_eq!(cover.get(0, 1), Some(5));
        for expected in (0..5).rev() {
            cover.melt();
            assert_eq!(cover.get(0, 1), Some(expected));
        }
        cover.melt();
        assert!(cover.is_clear());
    }

    #[test]
    fn cells_iterates_row_major() {
        let mut cover = SnowCover::new(2, 2);
        cover.set(1, 1, 7);
        let cells: Vec<_> = cover.cells().collect();
        assert_eq!(cells, vec![(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 1, 7)]);
    }
}
