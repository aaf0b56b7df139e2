//! In-memory map of which sectors are in use

use tracing::trace;

use crate::types::HEADER_SECTORS;

/// Tracks used and free sectors of a region file
///
/// The header sectors are always in use. The map only grows, freed sectors at the end
/// of the file stay in it as free space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorMap {
    used: Vec<bool>,
}

impl SectorMap {
    /// A map of `sectors` sectors where only the header is in use
    pub fn new(sectors: usize) -> Self {
        let mut used = vec![false; sectors.max(HEADER_SECTORS)];
        used[..HEADER_SECTORS].fill(true);
        Self { used }
    }

    /// Number of sectors in the file
    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn is_free(&self, sector: usize) -> bool {
        !self.used.get(sector).copied().unwrap_or(true)
    }

    /// Whether every sector of the run exists and is free
    pub fn is_run_free(&self, start: usize, count: usize) -> bool {
        match self.used.get(start..start.saturating_add(count)) {
            Some(run) => run.iter().all(|used| !used),
            None => false,
        }
    }

    pub fn free_sectors(&self) -> impl Iterator<Item = usize> + '_ {
        self.used
            .iter()
            .enumerate()
            .filter(|(_, used)| !**used)
            .map(|(sector, _)| sector)
    }

    pub fn reserve(&mut self, start: usize, count: usize) {
        trace!(start, count, "reserving sectors");
        self.mark(start, count, true);
    }

    pub fn release(&mut self, start: usize, count: usize) {
        trace!(start, count, "releasing sectors");
        self.mark(start, count, false);
    }

    /// Start of the first free run of at least `count` sectors
    pub fn find_run(&self, count: usize) -> Option<usize> {
        let mut run_start = 0;
        let mut run_len = 0;

        for (sector, used) in self.used.iter().enumerate() {
            if *used {
                run_len = 0;
                continue;
            }

            if run_len == 0 {
                run_start = sector;
            }
            run_len += 1;

            if run_len >= count {
                return Some(run_start);
            }
        }

        None
    }

    /// Append `count` used sectors, returning the first of them
    pub fn grow(&mut self, count: usize) -> usize {
        let start = self.used.len();
        trace!(start, count, "growing sector map");
        self.used.resize(start + count, true);
        start
    }

    fn mark(&mut self, start: usize, count: usize, used: bool) {
        let end = (start + count).min(self.used.len());
        if let Some(run) = self.used.get_mut(start..end) {
            run.fill(used);
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::sectors::SectorMap;

    #[test]
    fn header_is_reserved() {
        let map = SectorMap::new(0);

        assert_eq!(map.len(), 2);
        assert!(!map.is_free(0));
        assert!(!map.is_free(1));
        assert_eq!(map.free_sectors().count(), 0);
    }

    #[test]
    fn first_fit_skips_short_runs() {
        let mut map = SectorMap::new(8);
        map.reserve(3, 1);
        map.reserve(6, 1);

        assert_eq!(map.find_run(1), Some(2));
        assert_eq!(map.find_run(2), Some(4));
        assert_eq!(map.find_run(3), None);
        assert!(map.is_run_free(4, 2));
        assert!(!map.is_run_free(4, 3));
        assert!(!map.is_run_free(7, 2));
    }

    #[test]
    fn grow_and_release() {
        let mut map = SectorMap::new(3);

        assert_eq!(map.grow(2), 3);
        assert_eq!(map.len(), 5);
        assert_eq!(map.free_sectors().collect::<Vec<_>>(), vec![2]);

        map.release(3, 2);
        assert_eq!(map.free_sectors().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(map.find_run(3), Some(2));
    }
}
