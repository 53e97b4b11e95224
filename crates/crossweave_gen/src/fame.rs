/// Ordered collection of the top-n scored values
///
/// Insertion keeps the entries sorted best-first and truncates past the
/// capacity. The annealing director parks the best grids seen here so the
/// turn cap can still hand something decent back.
#[derive(Debug, Clone)]
pub struct HallOfFame<T> {
    size: usize,
    entries: Vec<(f64, T)>,
}

impl<T> HallOfFame<T> {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            entries: Vec::with_capacity(size + 1),
        }
    }

    pub fn add(&mut self, score: f64, value: T) {
        let at = self.entries.partition_point(|(found, _)| *found > score);
        if at >= self.size {
            return;
        }

        self.entries.insert(at, (score, value));
        self.entries.truncate(self.size);
    }

    pub fn best(&self) -> Option<&T> {
        self.entries.first().map(|(_, value)| value)
    }

    pub fn into_best(mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }

        Some(self.entries.swap_remove(0).1)
    }

    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(score, _)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(f64, T)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_top_entries_sorted() {
        let mut fame = HallOfFame::new(3);
        for (score, value) in [(0.5, "b"), (0.9, "a"), (0.1, "d"), (0.3, "c")] {
            fame.add(score, value);
        }

        assert_eq!(fame.len(), 3);
        assert_eq!(fame.best(), Some(&"a"));

        let scores: Vec<f64> = fame.scores().collect();
        assert_eq!(scores, vec![0.9, 0.5, 0.3]);
    }

    #[test]
    fn empty_hall_has_no_best() {
        let fame: HallOfFame<&str> = HallOfFame::new(2);

        assert!(fame.is_empty());
        assert_eq!(fame.best(), None);
        assert_eq!(fame.into_best(), None);
    }

    #[test]
    fn into_best_returns_the_highest_score() {
        let mut fame = HallOfFame::new(2);
        fame.add(1.0, "low");
        fame.add(2.0, "high");

        assert_eq!(fame.into_best(), Some("high"));
    }
}
