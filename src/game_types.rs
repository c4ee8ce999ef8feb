//! Value types that describe the board game's maneuvers.
//!
//! A maneuver name encodes its own movement: `"11L2"` is maneuver number 11,
//! turning left, flown at speed 2. Tolerances are the three difficulty bands
//! (climbing / level / diving) written as `"climb/level/dive"`.

use std::fmt;

use itertools::Itertools;
use variantly::Variantly;

use crate::recognized::Recognized;

/// Highest value a single tolerance band may take.
pub const MAX_TOLERANCE: u8 = 9;

/// Separator between the bands of a serialized tolerance triple.
pub const TOLERANCE_SEPARATOR: char = '/';

// =============================================================================
// Direction
// =============================================================================

#[derive(Clone, Copy, Debug, Variantly, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Left,
    Straight,
    Right,
}

impl Direction {
    pub const ALL: &[Direction] = &[Self::Left, Self::Straight, Self::Right];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(Self::Left),
            'S' => Some(Self::Straight),
            'R' => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Straight => 'S',
            Self::Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// =============================================================================
// Maneuver names
// =============================================================================

/// The name of a maneuver, also the key joining model rows to board graphics.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManeuverName(String);

impl ManeuverName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Speed is the trailing digit.
    pub fn speed(&self) -> Recognized<u8> {
        let last = self.0.chars().last();
        match last.and_then(|c| c.to_digit(10)) {
            Some(speed) => Recognized::Known(speed as u8),
            None => Recognized::Unknown(last.map(String::from).unwrap_or_default()),
        }
    }

    /// Direction is the character right before the speed digit.
    pub fn direction(&self) -> Recognized<Direction> {
        let c = self.0.chars().rev().nth(1);
        match c.and_then(Direction::from_char) {
            Some(direction) => Recognized::Known(direction),
            None => Recognized::Unknown(c.map(String::from).unwrap_or_default()),
        }
    }

    /// The leading maneuver number, `11` for `"11L2"`.
    pub fn number(&self) -> Option<u16> {
        let count = self.0.chars().count();
        if count < 3 {
            return None;
        }
        let prefix: String = self.0.chars().take(count - 2).collect();
        prefix.parse().ok()
    }

    /// Whether the name follows `<digits><L|S|R><digit>`.
    pub fn is_well_formed(&self) -> bool {
        self.number().is_some()
            && self.0.chars().all(|c| c.is_ascii_alphanumeric())
            && self.direction().is_known()
            && self.speed().is_known()
    }
}

impl fmt::Display for ManeuverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ManeuverName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ManeuverName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ManeuverName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Tolerances
// =============================================================================

/// One tolerance band. Unparseable text is kept verbatim.
pub type Tolerance = Recognized<u8>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tolerances {
    pub climb: Tolerance,
    pub level: Tolerance,
    pub dive: Tolerance,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Parses one band. Only text that prints back identically (`"2"`, not
/// `"02"` or `" 2"`) is taken as a number; anything else is kept verbatim.
pub fn parse_tolerance(raw: &str) -> Tolerance {
    match raw.parse::<u8>() {
        Ok(v) if v.to_string() == raw => Recognized::Known(v),
        _ => Recognized::Unknown(raw.to_string()),
    }
}

impl Tolerances {
    pub const fn new(climb: u8, level: u8, dive: u8) -> Self {
        Self {
            climb: Recognized::Known(climb),
            level: Recognized::Known(level),
            dive: Recognized::Known(dive),
        }
    }

    /// Splits `"climb/level/dive"`. Missing bands come back as empty unknowns
    /// and anything past a third separator stays in the dive band, so the
    /// text always joins back to what was parsed.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(3, TOLERANCE_SEPARATOR);
        let mut next = || {
            parts
                .next()
                .map(parse_tolerance)
                .unwrap_or_else(|| Recognized::Unknown(String::new()))
        };
        let climb = next();
        let level = next();
        let dive = next();
        Self {
            climb,
            level,
            dive,
        }
    }

    /// Like [`Tolerances::parse`], but only accepts exactly three numeric bands.
    pub fn parse_strict(raw: &str) -> Option<Self> {
        let (climb, level, dive) = raw
            .split(TOLERANCE_SEPARATOR)
            .map(|part| part.trim().parse::<u8>().ok())
            .collect_tuple()?;
        Some(Self::new(climb?, level?, dive?))
    }

    pub fn bands(&self) -> [&Tolerance; 3] {
        [&self.climb, &self.level, &self.dive]
    }

    /// Rejoins the bands with `/`.
    pub fn joined(&self) -> String {
        self.bands().iter().join(&TOLERANCE_SEPARATOR.to_string())
    }

    /// Known bands larger than [`MAX_TOLERANCE`].
    pub fn out_of_range(&self) -> impl Iterator<Item = u8> + '_ {
        self.bands()
            .into_iter()
            .filter_map(|band| band.get())
            .filter(|v| *v > MAX_TOLERANCE)
    }
}

impl fmt::Display for Tolerances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn turning_name() {
        let name = ManeuverName::from("11L2");
        assert_eq!(name.speed(), Recognized::Known(2));
        assert_eq!(name.direction(), Recognized::Known(Direction::Left));
        assert_eq!(name.number(), Some(11));
        assert!(name.is_well_formed());
    }

    #[test]
    fn spin_name() {
        let name = ManeuverName::from("0S1");
        assert_eq!(name.speed(), Recognized::Known(1));
        assert!(name.direction().known().unwrap().is_straight());
        assert_eq!(name.number(), Some(0));
    }

    #[test]
    fn malformed_names() {
        let no_direction = ManeuverName::from("12");
        assert_eq!(no_direction.direction(), Recognized::Unknown("1".to_string()));
        assert!(!no_direction.is_well_formed());

        let no_speed = ManeuverName::from("4SX");
        assert_eq!(no_speed.speed(), Recognized::Unknown("X".to_string()));
        assert!(!no_speed.is_well_formed());

        let empty = ManeuverName::default();
        assert_eq!(empty.speed(), Recognized::Unknown(String::new()));
        assert!(!empty.is_well_formed());
    }

    #[test]
    fn tolerance_split_and_join() {
        let t = Tolerances::parse("2/0/1");
        assert_eq!(t, Tolerances::new(2, 0, 1));
        assert_eq!(t.joined(), "2/0/1");
        assert_eq!(Tolerances::parse_strict("2/0/1"), Some(t));
    }

    #[test]
    fn lenient_tolerances_keep_raw_text() {
        let t = Tolerances::parse("2/-/1");
        assert_eq!(t.level, Recognized::Unknown("-".to_string()));
        assert_eq!(t.joined(), "2/-/1");
        assert_eq!(Tolerances::parse_strict("2/-/1"), None);
    }

    #[test]
    fn short_tolerances() {
        let t = Tolerances::parse("3");
        assert_eq!(t.climb, Recognized::Known(3));
        assert_eq!(t.dive, Recognized::Unknown(String::new()));
        assert_eq!(t.joined(), "3//");
        assert_eq!(Tolerances::parse_strict("3/1"), None);
        assert_eq!(Tolerances::parse_strict("3/1/1/1"), None);
    }

    #[test]
    fn non_canonical_bands_are_kept_verbatim() {
        let t = Tolerances::parse("02/ 1/+1");
        assert_eq!(t.climb, Recognized::Unknown("02".to_string()));
        assert_eq!(t.level, Recognized::Unknown(" 1".to_string()));
        assert_eq!(t.dive, Recognized::Unknown("+1".to_string()));
        assert_eq!(t.joined(), "02/ 1/+1");

        let extra = Tolerances::parse("2/0/1/4");
        assert_eq!(extra.dive, Recognized::Unknown("1/4".to_string()));
        assert_eq!(extra.joined(), "2/0/1/4");
    }

    #[test]
    fn tolerance_range() {
        let t = Tolerances::parse("12/0/1");
        assert_eq!(t.out_of_range().collect::<Vec<_>>(), vec![12]);
    }
}
