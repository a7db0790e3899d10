/// Accumulates per-user overlap counts for a single source user. A dense
/// sums array is paired with an intrusive linked list of the touched
/// slots, so draining the row costs only as much as the number of users
/// actually encountered, and the accumulator can be reused across rows.
pub(crate) struct RowAccumulator {
    counts: Vec<u32>,
    non_zeros: Vec<isize>,
    head: isize,
}

const EMPTY: u32 = 0;
const NOT_OCCUPIED: isize = -1;
const NO_HEAD: isize = -2;

impl RowAccumulator {
    pub(crate) fn new(num_users: usize) -> Self {
        RowAccumulator {
            counts: vec![EMPTY; num_users],
            non_zeros: vec![NOT_OCCUPIED; num_users],
            head: NO_HEAD,
        }
    }

    pub(crate) fn add_to(&mut self, user: usize, count: u32) {
        self.counts[user] += count;

        if self.non_zeros[user] == NOT_OCCUPIED {
            self.non_zeros[user] = self.head;
            self.head = user as isize;
        }
    }

    /// Returns every touched `(user, count)` pair and resets the
    /// accumulator for the next row. Order follows the linked list, not
    /// the user indices.
    pub(crate) fn counts_and_clear(&mut self) -> Vec<(usize, u32)> {
        let mut touched = Vec::new();

        while self.head != NO_HEAD {
            let user = self.head as usize;
            touched.push((user, self.counts[user]));

            self.head = self.non_zeros[user];
            self.counts[user] = EMPTY;
            self.non_zeros[user] = NOT_OCCUPIED;
        }

        touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_repeated_slots_once() {
        let mut accumulator = RowAccumulator::new(4);

        accumulator.add_to(2, 1);
        accumulator.add_to(2, 3);
        accumulator.add_to(0, 2);

        let mut touched = accumulator.counts_and_clear();
        touched.sort();

        assert_eq!(touched, vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_clear_resets_for_reuse() {
        let mut accumulator = RowAccumulator::new(3);

        accumulator.add_to(1, 5);
        assert_eq!(accumulator.counts_and_clear(), vec![(1, 5)]);
        assert!(accumulator.counts_and_clear().is_empty());

        accumulator.add_to(1, 1);
        accumulator.add_to(0, 1);

        let mut touched = accumulator.counts_and_clear();
        touched.sort();

        assert_eq!(touched, vec![(0, 1), (1, 1)]);
    }
}
