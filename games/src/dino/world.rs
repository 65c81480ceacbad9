use env::rand::Rng;

pub const WIDTH: f32 = 900.0;
pub const HEIGHT: f32 = 300.0;
pub const GROUND_Y: f32 = 235.0;
pub const DINO_X: f32 = 120.0;
pub const DINO_W: i32 = 42;
pub const DINO_H: i32 = 44;

pub const GRAVITY: f32 = 1.15;
pub const JUMP_VEL: f32 = -18.0;
pub const SPEED: f32 = 9.0;

pub const MIN_GAP: i32 = 280;
pub const MAX_GAP: i32 = 460;
pub const MIN_W: i32 = 18;
pub const MAX_W: i32 = 55;
pub const MIN_H: i32 = 20;
pub const MAX_H: i32 = 55;
pub const EASY_W: i32 = 30;
pub const EASY_H: i32 = 40;

pub const FIRST_OBSTACLE_X: f32 = WIDTH + 300.0;
// obstacles whose right edge is left of this are dropped
pub const DESPAWN_X: f32 = -80.0;
pub const OBSTACLE_COUNT: usize = 2;

/// Integer screen rectangle, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub w: i32,
    pub h: i32,
    pub passed: bool,
}

impl Obstacle {
    pub fn right(&self) -> f32 {
        self.x + self.w as f32
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x as i32,
            y: (GROUND_Y - self.h as f32) as i32,
            w: self.w,
            h: self.h,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dino {
    pub y: f32,
    pub vy: f32,
    pub on_ground: bool,
}

impl Default for Dino {
    fn default() -> Self {
        Self {
            y: GROUND_Y,
            vy: 0.0,
            on_ground: true,
        }
    }
}

impl Dino {
    pub fn rect(&self) -> Rect {
        Rect {
            x: DINO_X as i32,
            y: (self.y - DINO_H as f32) as i32,
            w: DINO_W,
            h: DINO_H,
        }
    }

    /// Height of the feet above the ground line, 0 when standing.
    pub fn height_above_ground(&self) -> f32 {
        GROUND_Y - self.y
    }

    /// Starts a jump; does nothing while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = JUMP_VEL;
        self.on_ground = false;
        true
    }

    pub fn apply_physics(&mut self) {
        self.vy += GRAVITY;
        self.y += self.vy;
        if self.y >= GROUND_Y {
            self.y = GROUND_Y;
            self.vy = 0.0;
            self.on_ground = true;
        }
    }
}

/// Two scrolling obstacles ahead of the dino.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub obstacles: Vec<Obstacle>,
}

impl Track {
    pub fn new(rng: &mut impl Rng, easy: bool) -> Self {
        let mut track = Track {
            obstacles: Vec::with_capacity(OBSTACLE_COUNT),
        };
        track.spawn(rng, easy, Some(FIRST_OBSTACLE_X));
        track.spawn(rng, easy, None);
        track
    }

    /// Appends an obstacle at `x`, or a random gap behind the last one.
    pub fn spawn(&mut self, rng: &mut impl Rng, easy: bool, x: Option<f32>) {
        let (w, h) = if easy {
            (EASY_W, EASY_H)
        } else {
            (rng.random_range(MIN_W..=MAX_W), rng.random_range(MIN_H..=MAX_H))
        };
        let x = x.unwrap_or_else(|| {
            let last_x = self.obstacles.last().map_or(WIDTH, |o| o.x);
            last_x + rng.random_range(MIN_GAP..=MAX_GAP) as f32
        });
        self.obstacles.push(Obstacle {
            x,
            w,
            h,
            passed: false,
        });
    }

    /// Scrolls everything left, drops what left the screen and refills.
    pub fn advance(&mut self, rng: &mut impl Rng, easy: bool) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= SPEED;
        }
        self.obstacles.retain(|o| o.right() > DESPAWN_X);
        while self.obstacles.len() < OBSTACLE_COUNT {
            self.spawn(rng, easy, None);
        }
    }

    /// Closest obstacle whose right edge has not yet gone past the dino.
    pub fn next_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.right() >= DINO_X)
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .or_else(|| self.obstacles.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use env::rand::rngs::StdRng;
    use env::rand::SeedableRng;

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect { x: 0, y: 0, w: 10, h: 10 };
        let b = Rect { x: 10, y: 0, w: 5, h: 10 };
        let c = Rect { x: 9, y: 9, w: 5, h: 5 };
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn new_track_spaces_two_obstacles() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let track = Track::new(&mut rng, false);
            assert_eq!(track.obstacles.len(), 2);
            let first = track.obstacles[0];
            let second = track.obstacles[1];
            assert_eq!(first.x, FIRST_OBSTACLE_X);
            let gap = second.x - first.x;
            assert!((MIN_GAP as f32..=MAX_GAP as f32).contains(&gap));
            for o in &track.obstacles {
                assert!((MIN_W..=MAX_W).contains(&o.w));
                assert!((MIN_H..=MAX_H).contains(&o.h));
            }
        }
    }

    #[test]
    fn easy_track_uses_fixed_sizes() {
        let mut rng = StdRng::seed_from_u64(4);
        let track = Track::new(&mut rng, true);
        assert!(track
            .obstacles
            .iter()
            .all(|o| o.w == EASY_W && o.h == EASY_H));
    }

    #[test]
    fn advance_refills_after_despawn() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut track = Track {
            obstacles: vec![
                Obstacle { x: -100.0, w: 25, h: 30, passed: true },
                Obstacle { x: 400.0, w: 25, h: 30, passed: false },
            ],
        };
        track.advance(&mut rng, true);
        assert_eq!(track.obstacles.len(), 2);
        assert_eq!(track.obstacles[0].x, 391.0);
        assert!(track.obstacles[1].x >= 391.0 + MIN_GAP as f32);
    }

    #[test]
    fn next_obstacle_skips_ones_behind_the_dino() {
        let track = Track {
            obstacles: vec![
                Obstacle { x: 60.0, w: 20, h: 30, passed: true },
                Obstacle { x: 500.0, w: 20, h: 30, passed: false },
            ],
        };
        assert_eq!(track.next_obstacle().map(|o| o.x), Some(500.0));
    }

    #[test]
    fn jump_arc_returns_to_the_ground() {
        let mut dino = Dino::default();
        assert!(dino.jump());
        assert!(!dino.jump());
        let mut frames = 0;
        loop {
            dino.apply_physics();
            frames += 1;
            if dino.on_ground {
                break;
            }
            assert!(dino.y < GROUND_Y);
        }
        assert_eq!(dino.y, GROUND_Y);
        assert_eq!(dino.vy, 0.0);
        assert!((25..40).contains(&frames));
    }
}
