use variantly::Variantly;

use crate::game_types::{Direction, ManeuverName, Tolerance, Tolerances};
use crate::recognized::Recognized;

// =============================================================================
// Plane
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plane {
    pub name: String,
    pub era: String,
    pub fuel: i32,
    pub engine_hp: i32,
    pub engine_critical: i32,
    pub wing_hp: i32,
    pub wing_critical: i32,
    pub fuselage_hp: i32,
    pub fuselage_critical: i32,
    pub tail_hp: i32,
    pub tail_critical: i32,
    pub rated_dive: i32,
    pub rated_climb: i32,
    pub max_altitude: String,
    pub stability: String,
    pub is_gliding: bool,
    pub is_on_fire: bool,
    /// Maneuver rows always precede crew rows.
    children: Vec<PlaneChild>,
    /// Number of leading maneuver rows in `children`.
    maneuver_count: usize,
}

/// A row under a plane.
#[derive(Debug, Clone, PartialEq, Variantly)]
pub enum PlaneChild {
    Maneuver(Maneuver),
    Crew(Crew),
}

impl From<Maneuver> for PlaneChild {
    fn from(value: Maneuver) -> Self {
        PlaneChild::Maneuver(value)
    }
}

impl From<Crew> for PlaneChild {
    fn from(value: Crew) -> Self {
        PlaneChild::Crew(value)
    }
}

impl PlaneChild {
    pub fn as_maneuver(&self) -> Option<&Maneuver> {
        match self {
            PlaneChild::Maneuver(m) => Some(m),
            PlaneChild::Crew(_) => None,
        }
    }

    pub fn as_maneuver_mut(&mut self) -> Option<&mut Maneuver> {
        match self {
            PlaneChild::Maneuver(m) => Some(m),
            PlaneChild::Crew(_) => None,
        }
    }

    pub fn as_crew(&self) -> Option<&Crew> {
        match self {
            PlaneChild::Maneuver(_) => None,
            PlaneChild::Crew(c) => Some(c),
        }
    }

    pub fn as_crew_mut(&mut self) -> Option<&mut Crew> {
        match self {
            PlaneChild::Maneuver(_) => None,
            PlaneChild::Crew(c) => Some(c),
        }
    }
}

impl Plane {
    /// Appends a row to its group. Crew rows go at the end; a maneuver goes
    /// after the last maneuver, ahead of any crew, so it is a plain append
    /// until the first crew member is added.
    pub fn add_child(&mut self, child: impl Into<PlaneChild>) {
        match child.into() {
            child @ PlaneChild::Maneuver(_) => {
                if self.maneuver_count == self.children.len() {
                    self.children.push(child);
                } else {
                    self.children.insert(self.maneuver_count, child);
                }
                self.maneuver_count += 1;
            }
            child @ PlaneChild::Crew(_) => self.children.push(child),
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child_at(&self, row: usize) -> Option<&PlaneChild> {
        self.children.get(row)
    }

    pub fn maneuver_at_mut(&mut self, row: usize) -> Option<&mut Maneuver> {
        self.children.get_mut(row)?.as_maneuver_mut()
    }

    pub fn crew_at_mut(&mut self, row: usize) -> Option<&mut Crew> {
        self.children.get_mut(row)?.as_crew_mut()
    }

    pub fn children(&self) -> &[PlaneChild] {
        self.children.as_slice()
    }

    pub fn maneuvers(&self) -> impl Iterator<Item = &Maneuver> {
        self.children.iter().filter_map(PlaneChild::as_maneuver)
    }

    pub fn maneuvers_mut(&mut self) -> impl Iterator<Item = &mut Maneuver> {
        self.children.iter_mut().filter_map(PlaneChild::as_maneuver_mut)
    }

    pub fn crew(&self) -> impl Iterator<Item = &Crew> {
        self.children.iter().filter_map(PlaneChild::as_crew)
    }

    pub fn maneuver_count(&self) -> usize {
        self.maneuver_count
    }

    /// Row of the maneuver called `name`.
    pub fn maneuver_row(&self, name: &str) -> Option<usize> {
        self.maneuvers().position(|m| m.name.as_str() == name)
    }

    pub fn maneuver_by_name(&self, name: &str) -> Option<&Maneuver> {
        self.maneuvers().find(|m| m.name.as_str() == name)
    }

    /// Maneuvers the player has put on the schedule.
    pub fn scheduled(&self) -> impl Iterator<Item = &Maneuver> {
        self.maneuvers().filter(|m| m.added_to_schedule)
    }
}

// =============================================================================
// Maneuver
// =============================================================================

/// Capability flags persisted with each maneuver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ManeuverFlags {
    pub can_be_repeated: bool,
    pub can_reload: bool,
    pub can_put_out_fires: bool,
    pub observer_can_reload: bool,
    pub is_restricted: bool,
    pub is_weight_restricted: bool,
    pub is_climb_restricted: bool,
    pub causes_spin_check: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Maneuver {
    pub name: ManeuverName,
    pub tolerances: Tolerances,
    pub flags: ManeuverFlags,
    /// Session state, never written to documents.
    pub is_enabled: bool,
    pub can_be_used: bool,
    pub added_to_schedule: bool,
}

impl Maneuver {
    pub fn speed(&self) -> Recognized<u8> {
        self.name.speed()
    }

    pub fn direction(&self) -> Recognized<Direction> {
        self.name.direction()
    }

    pub fn climb(&self) -> &Tolerance {
        &self.tolerances.climb
    }

    pub fn level(&self) -> &Tolerance {
        &self.tolerances.level
    }

    pub fn dive(&self) -> &Tolerance {
        &self.tolerances.dive
    }
}

// =============================================================================
// Crew and guns
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Crew {
    pub role: String,
    pub wounds: u32,
    gun: Option<Gun>,
}

impl Crew {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            wounds: 0,
            gun: None,
        }
    }

    /// A crew member mans at most one gun; adding another replaces it.
    pub fn add_child(&mut self, gun: Gun) -> Option<Gun> {
        self.gun.replace(gun)
    }

    pub fn child_count(&self) -> usize {
        usize::from(self.gun.is_some())
    }

    pub fn child_at(&self, row: usize) -> Option<&Gun> {
        if row == 0 { self.gun.as_ref() } else { None }
    }

    pub fn gun(&self) -> Option<&Gun> {
        self.gun.as_ref()
    }

    pub fn gun_mut(&mut self) -> Option<&mut Gun> {
        self.gun.as_mut()
    }

    pub fn take_gun(&mut self) -> Option<Gun> {
        self.gun.take()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gun {
    pub name: String,
    pub fire_template: i32,
    /// To-hit base values indexed by range band.
    pub fire_base: [i32; 4],
    pub ammo_box_capacity: i32,
    pub ammo_box_count: i32,
    pub is_destroyed: bool,
}

// =============================================================================
// Generic node view
// =============================================================================

#[derive(Clone, Copy, Debug, Variantly, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Plane,
    Maneuver,
    Crew,
    Gun,
}

/// A borrowed node of any type, for walking a plane tree without knowing the
/// shape up front.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeRef<'a> {
    Plane(&'a Plane),
    Maneuver(&'a Maneuver),
    Crew(&'a Crew),
    Gun(&'a Gun),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Plane(_) => NodeKind::Plane,
            NodeRef::Maneuver(_) => NodeKind::Maneuver,
            NodeRef::Crew(_) => NodeKind::Crew,
            NodeRef::Gun(_) => NodeKind::Gun,
        }
    }

    pub fn child_count(&self) -> usize {
        match self {
            NodeRef::Plane(p) => p.child_count(),
            NodeRef::Crew(c) => c.child_count(),
            NodeRef::Maneuver(_) | NodeRef::Gun(_) => 0,
        }
    }

    pub fn child_at(&self, row: usize) -> Option<NodeRef<'a>> {
        match *self {
            NodeRef::Plane(p) => p.child_at(row).map(NodeRef::from),
            NodeRef::Crew(c) => c.child_at(row).map(NodeRef::Gun),
            NodeRef::Maneuver(_) | NodeRef::Gun(_) => None,
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + (0..self.child_count())
            .filter_map(|row| self.child_at(row))
            .map(|child| child.subtree_len())
            .sum::<usize>()
    }
}

impl<'a> From<&'a PlaneChild> for NodeRef<'a> {
    fn from(value: &'a PlaneChild) -> Self {
        match value {
            PlaneChild::Maneuver(m) => NodeRef::Maneuver(m),
            PlaneChild::Crew(c) => NodeRef::Crew(c),
        }
    }
}

impl<'a> From<&'a Plane> for NodeRef<'a> {
    fn from(value: &'a Plane) -> Self {
        NodeRef::Plane(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn maneuver(name: &str) -> Maneuver {
        Maneuver {
            name: ManeuverName::from(name),
            ..Default::default()
        }
    }

    #[test]
    fn maneuvers_stay_ahead_of_crew() {
        let mut plane = Plane::default();
        plane.add_child(maneuver("2S1"));
        plane.add_child(Crew::new("Pilot"));
        plane.add_child(maneuver("3S2"));

        assert_eq!(plane.child_count(), 3);
        assert!(plane.child_at(0).unwrap().is_maneuver());
        assert_eq!(plane.child_at(1).unwrap().as_maneuver().unwrap().name.as_str(), "3S2");
        assert!(plane.child_at(2).unwrap().is_crew());
        assert!(plane.child_at(3).is_none());
        assert_eq!(plane.maneuver_row("3S2"), Some(1));
        assert_eq!(plane.maneuver_count(), 2);

        plane.add_child(Crew::new("Observer"));
        plane.add_child(maneuver("4S3"));
        assert_eq!(plane.maneuver_count(), 3);
        assert_eq!(plane.maneuver_row("4S3"), Some(2));
        assert_eq!(plane.crew().map(|c| c.role.as_str()).collect::<Vec<_>>(), ["Pilot", "Observer"]);

        assert!(plane.maneuver_at_mut(3).is_none());
        plane.crew_at_mut(3).unwrap().wounds = 1;
        assert!(plane.crew_at_mut(0).is_none());
        plane.maneuver_at_mut(0).unwrap().is_enabled = false;
        assert!(!plane.maneuvers().next().unwrap().is_enabled);
    }

    #[test]
    fn crew_holds_one_gun() {
        let mut crew = Crew::new("Observer");
        assert_eq!(crew.child_count(), 0);
        assert!(crew.add_child(Gun::default()).is_none());
        let replaced = crew.add_child(Gun {
            name: "Lewis".to_string(),
            ..Default::default()
        });
        assert!(replaced.is_some());
        assert_eq!(crew.child_count(), 1);
        assert_eq!(crew.child_at(0).unwrap().name, "Lewis");
        assert!(crew.child_at(1).is_none());
    }

    #[test]
    fn node_walk() {
        let mut crew = Crew::new("Pilot");
        crew.add_child(Gun::default());
        let mut plane = Plane::default();
        plane.add_child(maneuver("2S1"));
        plane.add_child(crew);

        let root = NodeRef::from(&plane);
        assert!(root.kind().is_plane());
        assert_eq!(root.child_count(), 2);
        let crew = root.child_at(1).unwrap();
        assert_eq!(crew.kind(), NodeKind::Crew);
        assert_eq!(crew.child_at(0).unwrap().kind(), NodeKind::Gun);
        assert_eq!(root.subtree_len(), 4);
    }
}
