//! Heading model: the four directions the turtle may face.
//!
//! Values are clockwise degrees from "up".  All arithmetic goes through
//! [`Heading::rotate`], which normalizes with a Euclidean remainder so the
//! intermediate never leaves `[0, 360)`.

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// Heading
// ════════════════════════════════════════════════════════════════════════════

/// Direction in which the turtle is facing (clockwise degrees).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Heading {
    Up    = 0,
    Right = 90,
    Down  = 180,
    Left  = 270,
}

/// Rotation applied by a LEFT command.  Expressed as a positive quarter
/// turn count so the sum stays non-negative.
pub const TURN_LEFT: i32 = 270;

/// Rotation applied by a RIGHT command.
pub const TURN_RIGHT: i32 = 90;

/// Unit displacement for one step in a given heading (screen coordinates,
/// y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    pub fn degrees(self) -> u16 { self as u16 }

    /// Angle in degrees as a float, for renderers that rotate a sprite.
    pub fn angle(self) -> f64 { f64::from(self.degrees()) }

    /// Checked conversion from a degree value.  Only the four canonical
    /// values map to a heading.
    pub fn from_degrees(degrees: u16) -> Option<Heading> {
        match degrees {
            0   => Some(Heading::Up),
            90  => Some(Heading::Right),
            180 => Some(Heading::Down),
            270 => Some(Heading::Left),
            _   => None,
        }
    }

    /// Rotate clockwise by `delta` degrees.
    ///
    /// # Panics
    ///
    /// If `delta` is not a multiple of 90.  That can only come from a caller
    /// bug; the turtle itself only ever passes [`TURN_LEFT`] or [`TURN_RIGHT`].
    pub fn rotate(self, delta: i32) -> Heading {
        let sum = (i32::from(self.degrees()) + delta).rem_euclid(360);
        match u16::try_from(sum).ok().and_then(Heading::from_degrees) {
            Some(h) => h,
            None => panic!("rotation by {delta} degrees from {self} is not a quarter turn"),
        }
    }

    pub fn displacement(self) -> Displacement {
        match self {
            Heading::Up    => Displacement { dx:  0.0, dy: -1.0 },
            Heading::Right => Displacement { dx:  1.0, dy:  0.0 },
            Heading::Down  => Displacement { dx:  0.0, dy:  1.0 },
            Heading::Left  => Displacement { dx: -1.0, dy:  0.0 },
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::Up    => "up",
            Heading::Right => "right",
            Heading::Down  => "down",
            Heading::Left  => "left",
        };
        write!(f, "{} ({}°)", name, self.degrees())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_from_up_is_left() {
        assert_eq!(Heading::Up.rotate(TURN_LEFT), Heading::Left);
        assert_eq!(Heading::Up.rotate(TURN_LEFT).degrees(), 270);
    }

    #[test]
    fn right_from_left_is_up() {
        assert_eq!(Heading::Left.rotate(TURN_RIGHT), Heading::Up);
    }

    #[test]
    fn four_turns_return_home() {
        for h in Heading::ALL {
            let mut cur = h;
            for _ in 0..4 { cur = cur.rotate(TURN_LEFT); }
            assert_eq!(cur, h);
            for _ in 0..4 { cur = cur.rotate(TURN_RIGHT); }
            assert_eq!(cur, h);
        }
    }

    #[test]
    fn rotation_always_canonical() {
        for h in Heading::ALL {
            for k in -8..=8 {
                let r = h.rotate(k * 90);
                assert!(Heading::ALL.contains(&r), "{} rotated by {} gave {:?}", h, k * 90, r);
            }
        }
    }

    #[test]
    fn negative_delta_matches_positive_complement() {
        for h in Heading::ALL {
            assert_eq!(h.rotate(-90), h.rotate(TURN_LEFT));
        }
    }

    #[test]
    #[should_panic(expected = "not a quarter turn")]
    fn non_quarter_turn_panics() {
        Heading::Up.rotate(45);
    }

    #[test]
    fn from_degrees_rejects_off_axis() {
        assert_eq!(Heading::from_degrees(180), Some(Heading::Down));
        assert_eq!(Heading::from_degrees(360), None);
        assert_eq!(Heading::from_degrees(45), None);
    }

    #[test]
    fn displacement_units() {
        assert_eq!(Heading::Up.displacement(),    Displacement { dx:  0.0, dy: -1.0 });
        assert_eq!(Heading::Right.displacement(), Displacement { dx:  1.0, dy:  0.0 });
        assert_eq!(Heading::Down.displacement(),  Displacement { dx:  0.0, dy:  1.0 });
        assert_eq!(Heading::Left.displacement(),  Displacement { dx: -1.0, dy:  0.0 });
    }
}
