use crate::dto::Division;

/// Fantasy points for a finishing place. MPO pays down to 16th, FPO to 12th.
pub fn placement_points(place: u16, division: Division) -> u8 {
    match (place, division) {
        (1, _) => 7,
        (2..=3, _) => 4,
        (4..=7, _) => 2,
        (8..=12, _) => 1,
        (13..=16, Division::MPO) => 1,
        _ => 0,
    }
}

impl Division {
    /// Last place that still earns placement points.
    pub fn last_scoring_place(self) -> u16 {
        match self {
            Division::MPO => 16,
            Division::FPO => 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table() {
        let mpo = (1..=18).map(|p| placement_points(p, Division::MPO)).collect::<Vec<_>>();
        assert_eq!(mpo, vec![7, 4, 4, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0]);
        let fpo = (1..=14).map(|p| placement_points(p, Division::FPO)).collect::<Vec<_>>();
        assert_eq!(fpo, vec![7, 4, 4, 2, 2, 2, 2, 1, 1, 1, 1, 1, 0, 0]);
    }

    #[test]
    fn non_increasing_and_zero_past_cutoff() {
        for division in Division::ALL {
            let mut previous = u8::MAX;
            for place in 1..=200 {
                let points = placement_points(place, division);
                assert!(points <= previous, "{division} place {place}");
                if place > division.last_scoring_place() {
                    assert_eq!(points, 0);
                } else {
                    assert!(points > 0);
                }
                previous = points;
            }
        }
    }

    #[test]
    fn unplaced_is_zero() {
        assert_eq!(placement_points(0, Division::MPO), 0);
    }
}
