//! The master maneuver catalog: every board maneuver the rules define,
//! independent of what any one plane has scheduled.

use std::collections::HashMap;

use tracing::warn;

use crate::game_types::{Direction, ManeuverName, Tolerances};

/// A maneuver as the rules define it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogManeuver {
    pub name: &'static str,
    pub climb: u8,
    pub level: u8,
    pub dive: u8,
    pub is_restricted: bool,
    pub is_climb_restricted: bool,
    pub causes_spin_check: bool,
}

impl CatalogManeuver {
    pub fn tolerances(&self) -> Tolerances {
        Tolerances::new(self.climb, self.level, self.dive)
    }

    pub fn maneuver_name(&self) -> ManeuverName {
        ManeuverName::from(self.name)
    }

    pub fn speed(&self) -> Option<u8> {
        self.maneuver_name().speed().get()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.maneuver_name().direction().get()
    }
}

const fn basic(name: &'static str, climb: u8, level: u8, dive: u8) -> CatalogManeuver {
    CatalogManeuver {
        name,
        climb,
        level,
        dive,
        is_restricted: false,
        is_climb_restricted: false,
        causes_spin_check: false,
    }
}

const fn restricted(name: &'static str, climb: u8, level: u8, dive: u8) -> CatalogManeuver {
    CatalogManeuver {
        is_restricted: true,
        ..basic(name, climb, level, dive)
    }
}

const fn climb_restricted(name: &'static str, climb: u8, level: u8, dive: u8) -> CatalogManeuver {
    CatalogManeuver {
        is_climb_restricted: true,
        ..basic(name, climb, level, dive)
    }
}

const fn spin_check(name: &'static str, climb: u8, level: u8, dive: u8) -> CatalogManeuver {
    CatalogManeuver {
        is_restricted: true,
        causes_spin_check: true,
        ..basic(name, climb, level, dive)
    }
}

/// Every maneuver on the board, grouped by speed row.
pub const MASTER_MANEUVERS: &[CatalogManeuver] = &[
    // Stalls
    spin_check("1L0", 0, 0, 2),
    spin_check("1S0", 0, 0, 1),
    spin_check("1R0", 0, 0, 2),
    spin_check("0S1", 0, 0, 0),
    // Speed 1
    climb_restricted("10L1", 1, 2, 3),
    basic("8L1", 1, 1, 2),
    basic("6S1", 1, 0, 1),
    basic("2S1", 0, 0, 0),
    basic("7S1", 1, 0, 1),
    basic("8R1", 1, 1, 2),
    climb_restricted("10R1", 1, 2, 3),
    restricted("28L1", 2, 2, 3),
    restricted("28R1", 2, 2, 3),
    // Speed 2
    restricted("9L2", 3, 3, 4),
    climb_restricted("17L2", 2, 2, 3),
    basic("16L2", 2, 1, 2),
    basic("15L2", 1, 1, 2),
    basic("14L2", 1, 0, 1),
    restricted("11L2", 2, 0, 1),
    basic("12S2", 1, 0, 1),
    basic("3S2", 0, 0, 0),
    basic("13S2", 1, 0, 1),
    restricted("9R2", 3, 3, 4),
    climb_restricted("17R2", 2, 2, 3),
    basic("16R2", 2, 1, 2),
    basic("15R2", 1, 1, 2),
    basic("14R2", 1, 0, 1),
    restricted("11R2", 2, 0, 1),
    // Speed 3
    restricted("24L3", 4, 3, 3),
    climb_restricted("23L3", 3, 3, 2),
    basic("22L3", 3, 2, 2),
    basic("21L3", 2, 1, 1),
    basic("20L3", 1, 1, 0),
    basic("18S3", 1, 0, 0),
    basic("4S3", 1, 0, 0),
    basic("19S3", 1, 0, 0),
    basic("20R3", 1, 1, 0),
    basic("21R3", 2, 1, 1),
    basic("22R3", 3, 2, 2),
    climb_restricted("23R3", 3, 3, 2),
    restricted("24R3", 4, 3, 3),
    // Speed 4
    climb_restricted("25S4", 3, 1, 0),
    climb_restricted("5S4", 2, 0, 0),
    climb_restricted("26S4", 3, 1, 0),
    // Sideslips and rolls
    restricted("30L2", 3, 2, 2),
    basic("31L2", 2, 1, 1),
    basic("29S2", 2, 1, 1),
    basic("31R2", 2, 1, 1),
    restricted("30R2", 3, 2, 2),
    // Aerobatics
    spin_check("36L3", 5, 4, 3),
    restricted("34S3", 4, 3, 2),
    restricted("32S3", 5, 4, 2),
    restricted("33S3", 5, 4, 2),
    restricted("35S3", 4, 3, 2),
    spin_check("36R3", 5, 4, 3),
];

/// An indexed set of catalog maneuvers.
#[derive(Debug, Clone)]
pub struct Catalog {
    maneuvers: Vec<CatalogManeuver>,
    by_name: HashMap<&'static str, usize>,
}

impl Catalog {
    /// The catalog defined by the game rules.
    pub fn master() -> Self {
        Self::from(MASTER_MANEUVERS.iter().copied())
    }

    pub fn maneuvers(&self) -> &[CatalogManeuver] {
        self.maneuvers.as_slice()
    }

    pub fn by_name(&self, name: &str) -> Option<&CatalogManeuver> {
        self.by_name.get(name).map(|idx| &self.maneuvers[*idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.maneuvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maneuvers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogManeuver> {
        self.maneuvers.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::master()
    }
}

impl<I> From<I> for Catalog
where
    I: IntoIterator<Item = CatalogManeuver>,
{
    /// Later entries reusing a name are dropped; names are the join key and
    /// must stay unique.
    fn from(value: I) -> Self {
        let mut maneuvers = Vec::new();
        let mut by_name = HashMap::new();
        for maneuver in value {
            if by_name.contains_key(maneuver.name) {
                warn!("duplicate catalog maneuver {}", maneuver.name);
                continue;
            }
            by_name.insert(maneuver.name, maneuvers.len());
            maneuvers.push(maneuver);
        }

        Self { maneuvers, by_name }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn master_names_are_unique_and_well_formed() {
        let mut seen = HashSet::new();
        for maneuver in MASTER_MANEUVERS {
            assert!(seen.insert(maneuver.name), "{} repeated", maneuver.name);
            assert!(
                maneuver.maneuver_name().is_well_formed(),
                "{} malformed",
                maneuver.name
            );
            assert_eq!(maneuver.tolerances().out_of_range().count(), 0);
        }
        assert_eq!(Catalog::master().len(), MASTER_MANEUVERS.len());
    }

    #[test]
    fn lookup_by_name() {
        let catalog = Catalog::master();
        let spin = catalog.by_name("0S1").unwrap();
        assert!(spin.causes_spin_check);
        assert_eq!(spin.speed(), Some(1));
        assert_eq!(spin.direction(), Some(Direction::Straight));
        assert!(catalog.by_name("99X9").is_none());
    }

    #[test]
    fn duplicates_are_dropped() {
        let catalog = Catalog::from([basic("2S1", 0, 0, 0), basic("2S1", 1, 1, 1)]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.by_name("2S1").unwrap().climb, 0);
    }
}
