use serde::{Deserialize, Serialize};

use super::world::{Dino, Obstacle, DINO_X};

/// Discretized observation of the runner.
///
/// Distance is fine-grained close to the dino (10px buckets up to 300px) and
/// saturates beyond that, so the table stays small while jump timing is still
/// learnable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunnerState {
    pub dist_bin: u8,
    pub height_bin: u8,
    pub width_bin: u8,
    pub on_ground: bool,
    pub y_bin: u8,
    pub vy_bin: u8,
}

pub const FAR_DISTANCE_BIN: u8 = 31;

impl RunnerState {
    pub fn observe(dino: &Dino, next: &Obstacle) -> Self {
        let dist = (next.x - DINO_X).max(0.0);
        RunnerState {
            dist_bin: bin_distance(dist),
            height_bin: bin_height(next.h),
            width_bin: bin_width(next.w),
            on_ground: dino.on_ground,
            y_bin: bin_y(dino.height_above_ground()),
            vy_bin: bin_vy(dino.on_ground, dino.vy),
        }
    }
}

pub fn bin_distance(dist: f32) -> u8 {
    if dist > 300.0 {
        return FAR_DISTANCE_BIN;
    }
    (dist / 10.0).floor().clamp(0.0, 30.0) as u8
}

pub fn bin_height(h: i32) -> u8 {
    match h {
        h if h < 30 => 0,
        h if h < 45 => 1,
        _ => 2,
    }
}

pub fn bin_width(w: i32) -> u8 {
    match w {
        w if w < 28 => 0,
        w if w < 42 => 1,
        _ => 2,
    }
}

pub fn bin_y(above_ground: f32) -> u8 {
    if above_ground < 5.0 {
        0
    } else if above_ground < 25.0 {
        1
    } else if above_ground < 55.0 {
        2
    } else {
        3
    }
}

// 0 grounded, 1 rising, 2 falling
pub fn bin_vy(on_ground: bool, vy: f32) -> u8 {
    if on_ground {
        0
    } else if vy < 0.0 {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dino::world::GROUND_Y;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(9.99, 0)]
    #[case(10.0, 1)]
    #[case(155.0, 15)]
    #[case(299.0, 29)]
    #[case(300.0, 30)]
    #[case(300.5, 31)]
    #[case(5000.0, 31)]
    fn distance_bins(#[case] dist: f32, #[case] expected: u8) {
        assert_eq!(bin_distance(dist), expected);
    }

    #[rstest]
    #[case(20, 0)]
    #[case(29, 0)]
    #[case(30, 1)]
    #[case(44, 1)]
    #[case(45, 2)]
    #[case(55, 2)]
    fn height_bins(#[case] h: i32, #[case] expected: u8) {
        assert_eq!(bin_height(h), expected);
    }

    #[rstest]
    #[case(18, 0)]
    #[case(27, 0)]
    #[case(28, 1)]
    #[case(41, 1)]
    #[case(42, 2)]
    fn width_bins(#[case] w: i32, #[case] expected: u8) {
        assert_eq!(bin_width(w), expected);
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(4.9, 0)]
    #[case(5.0, 1)]
    #[case(24.9, 1)]
    #[case(25.0, 2)]
    #[case(54.9, 2)]
    #[case(55.0, 3)]
    #[case(140.0, 3)]
    fn vertical_position_bins(#[case] above: f32, #[case] expected: u8) {
        assert_eq!(bin_y(above), expected);
    }

    #[test]
    fn velocity_sign_bins() {
        assert_eq!(bin_vy(true, 0.0), 0);
        assert_eq!(bin_vy(false, -3.0), 1);
        assert_eq!(bin_vy(false, 0.0), 2);
        assert_eq!(bin_vy(false, 4.0), 2);
    }

    #[test]
    fn observe_combines_dino_and_obstacle() {
        let dino = Dino {
            y: GROUND_Y - 30.0,
            vy: -5.0,
            on_ground: false,
        };
        let obstacle = Obstacle {
            x: DINO_X + 47.0,
            w: 50,
            h: 22,
            passed: false,
        };
        assert_eq!(
            RunnerState::observe(&dino, &obstacle),
            RunnerState {
                dist_bin: 4,
                height_bin: 0,
                width_bin: 2,
                on_ground: false,
                y_bin: 2,
                vy_bin: 1,
            }
        );
    }

    #[test]
    fn obstacle_overlapping_the_dino_counts_as_distance_zero() {
        let obstacle = Obstacle {
            x: DINO_X - 10.0,
            w: 30,
            h: 40,
            passed: false,
        };
        assert_eq!(RunnerState::observe(&Dino::default(), &obstacle).dist_bin, 0);
    }
}
