//! The maneuver board: one graphic slot per catalog maneuver, each bound (or
//! not) to a maneuver row in a [`PlaneModel`].
//!
//! Slots are keyed by maneuver name. A renderer draws them at their
//! `position` and styles them by `state`; this module only keeps the binding
//! and layout current.

use std::collections::HashMap;

use tracing::debug;
use variantly::Variantly;

use crate::catalog::Catalog;
use crate::document::{Maneuver, ManeuverIndex, ModelEvent, PlaneModel};
use crate::game_types::ManeuverName;

/// Which way a slot's label is nudged so it doesn't overlap its neighbours.
#[derive(Clone, Copy, Debug, Default, Variantly, PartialEq, Eq, Hash)]
pub enum ShiftText {
    #[default]
    None,
    Left,
    Right,
}

/// The hex a maneuver ends on.
#[derive(Clone, Copy, Debug, Variantly, PartialEq, Eq, Hash)]
pub enum TileKind {
    Destination,
    Spin,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, Variantly, PartialEq, Eq, Hash)]
pub enum GraphicState {
    /// No maneuver row is bound to the slot.
    #[default]
    Unbound,
    Available,
    /// Bound, but not flyable this turn.
    Unavailable,
    Disabled,
    Scheduled,
}

impl GraphicState {
    pub fn of(maneuver: Option<&Maneuver>) -> Self {
        match maneuver {
            None => GraphicState::Unbound,
            Some(m) if !m.is_enabled => GraphicState::Disabled,
            Some(m) if m.added_to_schedule => GraphicState::Scheduled,
            Some(m) if !m.can_be_used => GraphicState::Unavailable,
            Some(_) => GraphicState::Available,
        }
    }
}

const SHIFT_LEFT: &[&str] = &["1L0", "9L2", "11L2", "28R1"];
const SHIFT_RIGHT: &[&str] = &["1S0", "1R0", "0S1", "9R2", "11R2", "28L1"];
const SPIN_TILE: &str = "0S1";

/// Board placement of each maneuver slot, in pixels from the board origin.
pub const LAYOUT: &[(&str, Offset)] = &[
    ("1L0", Offset::new(175, 35)),
    ("1S0", Offset::new(275, 35)),
    ("1R0", Offset::new(395, 35)),
    ("0S1", Offset::new(388, 529)),
    ("10L1", Offset::new(130, 148)),
    ("8L1", Offset::new(180, 135)),
    ("6S1", Offset::new(247, 130)),
    ("2S1", Offset::new(292, 130)),
    ("7S1", Offset::new(338, 130)),
    ("8R1", Offset::new(385, 133)),
    ("10R1", Offset::new(435, 148)),
    ("9L2", Offset::new(30, 370)),
    ("17L2", Offset::new(65, 320)),
    ("16L2", Offset::new(100, 285)),
    ("15L2", Offset::new(135, 270)),
    ("14L2", Offset::new(180, 250)),
    ("11L2", Offset::new(35, 220)),
    ("12S2", Offset::new(247, 245)),
    ("3S2", Offset::new(292, 245)),
    ("13S2", Offset::new(338, 245)),
    ("9R2", Offset::new(540, 370)),
    ("17R2", Offset::new(510, 320)),
    ("16R2", Offset::new(475, 285)),
    ("15R2", Offset::new(435, 270)),
    ("14R2", Offset::new(390, 250)),
    ("11R2", Offset::new(540, 220)),
    ("24L3", Offset::new(55, 530)),
    ("23L3", Offset::new(85, 475)),
    ("22L3", Offset::new(115, 440)),
    ("21L3", Offset::new(150, 410)),
    ("20L3", Offset::new(185, 385)),
    ("18S3", Offset::new(247, 377)),
    ("4S3", Offset::new(292, 377)),
    ("19S3", Offset::new(338, 377)),
    ("20R3", Offset::new(387, 385)),
    ("21R3", Offset::new(422, 410)),
    ("22R3", Offset::new(452, 440)),
    ("23R3", Offset::new(482, 475)),
    ("24R3", Offset::new(515, 530)),
    ("25S4", Offset::new(247, 531)),
    ("5S4", Offset::new(292, 531)),
    ("26S4", Offset::new(338, 531)),
    ("30L2", Offset::new(125, 650)),
    ("31L2", Offset::new(180, 630)),
    ("29S2", Offset::new(291, 650)),
    ("31R2", Offset::new(390, 630)),
    ("30R2", Offset::new(445, 650)),
    ("36L3", Offset::new(140, 770)),
    ("34S3", Offset::new(230, 780)),
    ("32S3", Offset::new(270, 780)),
    ("33S3", Offset::new(310, 780)),
    ("35S3", Offset::new(350, 780)),
    ("36R3", Offset::new(430, 770)),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ManeuverGraphic {
    name: ManeuverName,
    shift: ShiftText,
    terminal: TileKind,
    position: Offset,
    index: Option<ManeuverIndex>,
    state: GraphicState,
}

impl ManeuverGraphic {
    pub fn new(name: ManeuverName, shift: ShiftText, terminal: TileKind) -> Self {
        Self {
            name,
            shift,
            terminal,
            position: Offset::default(),
            index: None,
            state: GraphicState::Unbound,
        }
    }

    pub fn name(&self) -> &ManeuverName {
        &self.name
    }

    pub fn shift(&self) -> ShiftText {
        self.shift
    }

    pub fn terminal(&self) -> TileKind {
        self.terminal
    }

    pub fn position(&self) -> Offset {
        self.position
    }

    pub fn model_index(&self) -> Option<ManeuverIndex> {
        self.index
    }

    pub fn state(&self) -> GraphicState {
        self.state
    }

    /// Binds (or with `None`, clears) the row this slot displays.
    pub fn set_model_index(&mut self, index: Option<ManeuverIndex>, model: &PlaneModel) {
        self.index = index;
        self.update_state(model);
    }

    pub fn update_state(&mut self, model: &PlaneModel) {
        self.state = GraphicState::of(self.index.and_then(|index| model.maneuver(index)));
    }
}

/// Name-keyed registry of board slots.
#[derive(Debug, Clone)]
pub struct ManeuverBoard {
    graphics: Vec<ManeuverGraphic>,
    by_name: HashMap<String, usize>,
}

impl ManeuverBoard {
    pub fn new(catalog: &Catalog) -> Self {
        let mut graphics = Vec::with_capacity(catalog.len());
        let mut by_name = HashMap::with_capacity(catalog.len());
        for maneuver in catalog.iter() {
            let shift = if SHIFT_LEFT.contains(&maneuver.name) {
                ShiftText::Left
            } else if SHIFT_RIGHT.contains(&maneuver.name) {
                ShiftText::Right
            } else {
                ShiftText::None
            };
            let terminal = if maneuver.name == SPIN_TILE {
                TileKind::Spin
            } else {
                TileKind::Destination
            };

            by_name.insert(maneuver.name.to_string(), graphics.len());
            graphics.push(ManeuverGraphic::new(
                maneuver.maneuver_name(),
                shift,
                terminal,
            ));
        }

        Self { graphics, by_name }
    }

    pub fn graphics(&self) -> &[ManeuverGraphic] {
        self.graphics.as_slice()
    }

    pub fn get_maneuver(&self, name: &str) -> Option<&ManeuverGraphic> {
        self.by_name.get(name).map(|idx| &self.graphics[*idx])
    }

    fn get_maneuver_mut(&mut self, name: &str) -> Option<&mut ManeuverGraphic> {
        self.by_name.get(name).map(|idx| &mut self.graphics[*idx])
    }

    /// Places every slot found in [`LAYOUT`]. Placement is absolute, so
    /// calling this again is harmless. Returns how many slots were placed.
    pub fn position_maneuvers(&mut self) -> usize {
        let mut placed = 0;
        for (name, offset) in LAYOUT {
            if let Some(graphic) = self.get_maneuver_mut(name) {
                graphic.position = *offset;
                placed += 1;
            }
        }
        if placed < self.graphics.len() {
            debug!(
                "{} board slots have no layout entry",
                self.graphics.len() - placed
            );
        }
        placed
    }

    /// Binds the slot named by the row at `index`.
    pub fn add_maneuver(&mut self, index: ManeuverIndex, model: &PlaneModel) -> bool {
        let Some(name) = model.maneuver_name(index) else {
            return false;
        };
        match self.get_maneuver_mut(&name) {
            Some(graphic) => {
                graphic.set_model_index(Some(index), model);
                true
            }
            None => {
                debug!("no board slot for maneuver {name}");
                false
            }
        }
    }

    /// Clears the slot named by the row at `index`.
    pub fn remove_maneuver(&mut self, index: ManeuverIndex, model: &PlaneModel) -> bool {
        let Some(name) = model.maneuver_name(index) else {
            return false;
        };
        match self.get_maneuver_mut(&name) {
            Some(graphic) => {
                graphic.set_model_index(None, model);
                true
            }
            None => false,
        }
    }

    /// Binds only the slot for `index`, clearing all others.
    pub fn set_maneuver(&mut self, index: ManeuverIndex, model: &PlaneModel) {
        let name = model.maneuver_name(index);
        for graphic in &mut self.graphics {
            let bound = (name.as_deref() == Some(graphic.name.as_str())).then_some(index);
            graphic.set_model_index(bound, model);
        }
    }

    /// Binds every slot to the same-named maneuver of `plane`; slots the plane
    /// has no maneuver for are cleared.
    pub fn set_maneuvers(&mut self, plane: usize, model: &PlaneModel) {
        let indices: HashMap<String, ManeuverIndex> = model
            .maneuver_indices(plane)
            .into_iter()
            .filter_map(|index| model.maneuver_name(index).map(|name| (name, index)))
            .collect();

        for graphic in &mut self.graphics {
            let bound = indices.get(graphic.name.as_str()).copied();
            graphic.set_model_index(bound, model);
        }
        debug!("bound {} board slots to plane {plane}", indices.len());
    }

    /// Drops bindings into a removed plane and renumbers bindings into the
    /// planes that moved down after it.
    pub fn plane_removed(&mut self, plane: usize, model: &PlaneModel) {
        for graphic in &mut self.graphics {
            let Some(index) = graphic.index else {
                continue;
            };
            if index.plane == plane {
                graphic.set_model_index(None, model);
            } else if index.plane > plane {
                let moved = ManeuverIndex::new(index.plane - 1, index.row);
                graphic.set_model_index(Some(moved), model);
            }
        }
    }

    /// Refreshes a slot's state after its maneuver changed.
    pub fn update_maneuver(&mut self, name: &str, model: &PlaneModel) -> bool {
        match self.get_maneuver_mut(name) {
            Some(graphic) => {
                graphic.update_state(model);
                true
            }
            None => false,
        }
    }

    pub fn handle(&mut self, event: &ModelEvent, model: &PlaneModel) {
        match *event {
            ModelEvent::ManeuverAdded(index) => {
                self.add_maneuver(index, model);
            }
            ModelEvent::ManeuverRemoved(index) => {
                self.remove_maneuver(index, model);
            }
            ModelEvent::ManeuverChanged(index) => {
                if let Some(name) = model.maneuver_name(index) {
                    self.update_maneuver(&name, model);
                }
            }
            ModelEvent::ManeuverSelected(index) => self.set_maneuver(index, model),
            ModelEvent::PlaneSelected(plane) => self.set_maneuvers(plane, model),
            ModelEvent::PlaneRemoved(plane) => self.plane_removed(plane, model),
        }
    }

    /// Names of the slots currently bound to a row.
    pub fn bound_names(&self) -> impl Iterator<Item = &str> {
        self.graphics
            .iter()
            .filter(|g| g.index.is_some())
            .map(|g| g.name.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::{ManeuverDocument, Plane, PlaneDocument};

    fn scheduled_plane(names: &[&str]) -> Plane {
        Plane::from_document(&PlaneDocument {
            maneuvers: names
                .iter()
                .map(|name| ManeuverDocument {
                    name: name.to_string(),
                    tolerances: "0/0/0".to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        })
    }

    #[test]
    fn one_slot_per_catalog_maneuver() {
        let catalog = Catalog::master();
        let board = ManeuverBoard::new(&catalog);
        assert_eq!(board.graphics().len(), catalog.len());
        for maneuver in catalog.iter() {
            assert!(board.get_maneuver(maneuver.name).is_some());
        }
        assert!(board.get_maneuver("11L2").unwrap().shift().is_left());
        assert!(board.get_maneuver("0S1").unwrap().shift().is_right());
        assert!(board.get_maneuver("0S1").unwrap().terminal().is_spin());
        assert!(board.get_maneuver("3S2").unwrap().shift().is_none());
        assert!(board.get_maneuver("28R1").unwrap().shift().is_left());
        assert!(board.get_maneuver("28L1").unwrap().shift().is_right());
    }

    #[test]
    fn layout_places_every_slot() {
        let catalog = Catalog::master();
        let mut board = ManeuverBoard::new(&catalog);
        // 28L1 and 28R1 have no layout entry
        assert_eq!(board.position_maneuvers(), catalog.len() - 2);
        assert_eq!(board.position_maneuvers(), catalog.len() - 2);
        assert_eq!(board.get_maneuver("28L1").unwrap().position(), Offset::default());
        assert_eq!(board.get_maneuver("1L0").unwrap().position(), Offset::new(175, 35));
        assert_eq!(board.get_maneuver("36R3").unwrap().position(), Offset::new(430, 770));
    }

    #[test]
    fn set_maneuvers_binds_plane_names() {
        let mut model = PlaneModel::new();
        let plane = model.push_plane(scheduled_plane(&["11L2", "3S2"]));
        let mut board = ManeuverBoard::new(&Catalog::master());

        board.handle(&ModelEvent::PlaneSelected(plane), &model);
        let mut bound: Vec<_> = board.bound_names().collect();
        bound.sort();
        assert_eq!(bound, vec!["11L2", "3S2"]);
        assert_eq!(
            board.get_maneuver("3S2").unwrap().model_index(),
            Some(ManeuverIndex::new(plane, 1))
        );
        assert!(board.get_maneuver("3S2").unwrap().state().is_scheduled());
        assert!(board.get_maneuver("2S1").unwrap().state().is_unbound());
    }

    #[test]
    fn set_maneuver_binds_one() {
        let mut model = PlaneModel::new();
        let plane = model.push_plane(Plane::blank(&Catalog::master()));
        let mut board = ManeuverBoard::new(&Catalog::master());
        board.set_maneuvers(plane, &model);
        assert_eq!(board.bound_names().count(), Catalog::master().len());

        let index = model.find_maneuver(plane, "14R2").unwrap();
        let event = model.select(index).unwrap();
        board.handle(&event, &model);
        assert_eq!(board.bound_names().collect::<Vec<_>>(), vec!["14R2"]);
        assert!(board.get_maneuver("14R2").unwrap().state().is_available());
    }

    #[test]
    fn schedule_events_update_slots() {
        let mut model = PlaneModel::new();
        let plane = model.push_plane(Plane::blank(&Catalog::master()));
        let mut board = ManeuverBoard::new(&Catalog::master());
        let index = model.find_maneuver(plane, "2S1").unwrap();

        let event = model.schedule(index).unwrap();
        board.handle(&event, &model);
        assert!(board.get_maneuver("2S1").unwrap().state().is_scheduled());

        let event = model.set_enabled(index, false).unwrap();
        board.handle(&event, &model);
        assert!(board.get_maneuver("2S1").unwrap().state().is_disabled());

        let event = model.unschedule(index).unwrap();
        board.handle(&event, &model);
        let graphic = board.get_maneuver("2S1").unwrap();
        assert_eq!(graphic.model_index(), None);
        assert!(graphic.state().is_unbound());
    }

    #[test]
    fn removing_a_plane_keeps_bindings_on_the_right_plane() {
        let mut model = PlaneModel::new();
        for name in ["Albatros", "Camel", "Spad"] {
            let mut plane = scheduled_plane(&["2S1"]);
            plane.name = name.to_string();
            model.push_plane(plane);
        }
        let mut board = ManeuverBoard::new(&Catalog::master());
        board.handle(&ModelEvent::PlaneSelected(1), &model);

        let (_, event) = model.remove_plane(0).unwrap();
        board.handle(&event, &model);
        let index = board.get_maneuver("2S1").unwrap().model_index().unwrap();
        assert_eq!(index, ManeuverIndex::new(0, 0));
        assert_eq!(model.plane(index.plane).unwrap().name, "Camel");
        assert!(board.get_maneuver("2S1").unwrap().state().is_scheduled());

        let (_, event) = model.remove_plane(0).unwrap();
        board.handle(&event, &model);
        assert_eq!(board.bound_names().count(), 0);
        assert!(board.get_maneuver("2S1").unwrap().state().is_unbound());
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut model = PlaneModel::new();
        let plane = model.push_plane(scheduled_plane(&["99L9"]));
        let mut board = ManeuverBoard::new(&Catalog::master());
        let index = model.find_maneuver(plane, "99L9").unwrap();
        assert!(!board.add_maneuver(index, &model));
        assert!(!board.update_maneuver("99L9", &model));
        assert_eq!(board.bound_names().count(), 0);
    }
}
