use super::AnalysisRegion;
use crate::clustering::RepresentativeSegment;
use serde::Serialize;

/// Crossing of a representative segment with the reference row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intercept {
    pub x: i32,
    pub y: i32,
    /// Endpoint of the owning representative the overlay is drawn from.
    pub anchor: [i32; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneSide {
    Left,
    Right,
}

impl LaneSide {
    /// Side of `x` relative to `midpoint`; `None` exactly on it.
    pub fn classify(x: i32, midpoint: i32) -> Option<Self> {
        match x.cmp(&midpoint) {
            std::cmp::Ordering::Less => Some(LaneSide::Left),
            std::cmp::Ordering::Greater => Some(LaneSide::Right),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Overlay anchor on this side: left lanes are drawn from the upper mean
    /// endpoint, right lanes from the lower one.
    pub fn anchor(self, rep: &RepresentativeSegment) -> [i32; 2] {
        match self {
            LaneSide::Left => rep.upper,
            LaneSide::Right => rep.lower,
        }
    }
}

/// Innermost intercept found so far on each side, for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LaneCandidates {
    pub left: Option<Intercept>,
    pub right: Option<Intercept>,
}

impl LaneCandidates {
    pub fn get(&self, side: LaneSide) -> Option<Intercept> {
        match side {
            LaneSide::Left => self.left,
            LaneSide::Right => self.right,
        }
    }

    pub fn left_x(&self) -> Option<i32> {
        self.left.map(|i| i.x)
    }

    pub fn right_x(&self) -> Option<i32> {
        self.right.map(|i| i.x)
    }

    /// Offers one representative; returns the side it improved, if any.
    pub fn offer(
        &mut self,
        rep: &RepresentativeSegment,
        region: &AnalysisRegion,
    ) -> Option<LaneSide> {
        let mut hit = region.intercept(rep)?;
        let midpoint = region.midpoint_x();
        hit.anchor = LaneSide::classify(hit.x, midpoint)?.anchor(rep);
        self.consider(hit, midpoint)
    }

    /// Keeps `hit` if it is strictly closer to `midpoint` than the current
    /// candidate on its side.
    pub fn consider(&mut self, hit: Intercept, midpoint: i32) -> Option<LaneSide> {
        let side = LaneSide::classify(hit.x, midpoint)?;
        let slot = match side {
            LaneSide::Left => &mut self.left,
            LaneSide::Right => &mut self.right,
        };
        let improves = match (side, slot.as_ref()) {
            (_, None) => true,
            (LaneSide::Left, Some(best)) => hit.x > best.x,
            (LaneSide::Right, Some(best)) => hit.x < best.x,
        };
        if improves {
            *slot = Some(hit);
            Some(side)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(x: i32) -> Intercept {
        Intercept {
            x,
            y: 300,
            anchor: [x, 0],
        }
    }

    #[test]
    fn classify_uses_strict_inequalities() {
        assert_eq!(LaneSide::classify(99, 100), Some(LaneSide::Left));
        assert_eq!(LaneSide::classify(101, 100), Some(LaneSide::Right));
        assert_eq!(LaneSide::classify(100, 100), None);
    }

    #[test]
    fn innermost_candidate_wins() {
        let mut lanes = LaneCandidates::default();
        assert_eq!(lanes.consider(hit(20), 100), Some(LaneSide::Left));
        assert_eq!(lanes.consider(hit(60), 100), Some(LaneSide::Left));
        assert_eq!(lanes.consider(hit(40), 100), None);
        assert_eq!(lanes.consider(hit(180), 100), Some(LaneSide::Right));
        assert_eq!(lanes.consider(hit(150), 100), Some(LaneSide::Right));
        assert_eq!(lanes.consider(hit(170), 100), None);
        assert_eq!(lanes.left_x(), Some(60));
        assert_eq!(lanes.right_x(), Some(150));
    }

    #[test]
    fn ties_keep_the_first_candidate() {
        let mut lanes = LaneCandidates::default();
        lanes.consider(hit(150), 100);
        let second = Intercept {
            anchor: [1, 1],
            ..hit(150)
        };
        assert_eq!(lanes.consider(second, 100), None);
        assert_eq!(lanes.right.map(|i| i.anchor), Some([150, 0]));
    }

    #[test]
    fn candidates_only_move_towards_the_midpoint() {
        let xs = [
            250, -40, 130, 100, 12, 199, 87, 340, 101, 99, 120, 5, 100, 150,
        ];
        let mut lanes = LaneCandidates::default();
        let mut prev = lanes;
        for x in xs {
            lanes.consider(hit(x), 100);
            if let (Some(before), Some(after)) = (prev.right_x(), lanes.right_x()) {
                assert!(after <= before, "right moved outward {before} -> {after}");
            }
            if let (Some(before), Some(after)) = (prev.left_x(), lanes.left_x()) {
                assert!(after >= before, "left moved outward {before} -> {after}");
            }
            if prev.left.is_some() {
                assert!(lanes.left.is_some());
            }
            if prev.right.is_some() {
                assert!(lanes.right.is_some());
            }
            prev = lanes;
        }
        assert_eq!(lanes.left_x(), Some(99));
        assert_eq!(lanes.right_x(), Some(101));
    }

    #[test]
    fn get_returns_the_requested_side() {
        let mut lanes = LaneCandidates::default();
        lanes.consider(hit(10), 100);
        assert_eq!(lanes.get(LaneSide::Left).map(|i| i.x), Some(10));
        assert_eq!(lanes.get(LaneSide::Right), None);
    }
}
