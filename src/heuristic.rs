use crate::position::Position;

/// Manhattan distance to a goal fixed at construction. Admissible and consistent on a
/// 4-connected grid where every move costs [STEP_COST](crate::STEP_COST).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManhattanHeuristic {
    goal: Position,
}

impl ManhattanHeuristic {
    pub fn new(goal: Position) -> ManhattanHeuristic {
        ManhattanHeuristic { goal }
    }
    pub fn goal(&self) -> Position {
        self.goal
    }
    pub fn estimate(&self, pos: &Position) -> usize {
        pos.manhattan_distance(&self.goal) * crate::STEP_COST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exactly_at_goal() {
        let h = ManhattanHeuristic::new(Position::new(7, 7));
        assert_eq!(h.estimate(&Position::new(7, 7)), 0);
        assert_eq!(h.estimate(&Position::new(1, 1)), 12);
        assert_eq!(h.estimate(&Position::new(8, 7)), 1);
    }

    #[test]
    fn consistent_across_unit_moves() {
        let h = ManhattanHeuristic::new(Position::new(2, 3));
        for row in 0..5 {
            for col in 0..5 {
                let p = Position::new(row, col);
                for n in p.neumann_neighborhood() {
                    assert!(h.estimate(&p) <= h.estimate(&n) + crate::STEP_COST);
                }
            }
        }
    }
}
