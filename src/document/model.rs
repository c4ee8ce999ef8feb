use tracing::debug;

use super::columns::{AttrValue, Column};
use super::types::{Maneuver, Plane, PlaneChild};

/// Address of a row under a plane: `(plane, row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManeuverIndex {
    pub plane: usize,
    pub row: usize,
}

impl ManeuverIndex {
    pub fn new(plane: usize, row: usize) -> Self {
        Self { plane, row }
    }
}

/// Change notifications raised by [`PlaneModel`] mutations. The board (or
/// any other view) is handed these explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    ManeuverAdded(ManeuverIndex),
    ManeuverRemoved(ManeuverIndex),
    ManeuverChanged(ManeuverIndex),
    ManeuverSelected(ManeuverIndex),
    PlaneSelected(usize),
    /// The plane was removed and every later plane moved down one place.
    PlaneRemoved(usize),
}

/// The loaded planes.
#[derive(Debug, Clone, Default)]
pub struct PlaneModel {
    planes: Vec<Plane>,
}

impl PlaneModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plane and returns its index.
    pub fn push_plane(&mut self, plane: Plane) -> usize {
        self.planes.push(plane);
        self.planes.len() - 1
    }

    pub fn plane(&self, plane: usize) -> Option<&Plane> {
        self.planes.get(plane)
    }

    pub fn plane_mut(&mut self, plane: usize) -> Option<&mut Plane> {
        self.planes.get_mut(plane)
    }

    pub fn planes(&self) -> &[Plane] {
        self.planes.as_slice()
    }

    /// Removes a plane. Indices into later planes shift down by one, which the
    /// returned event tells views about.
    pub fn remove_plane(&mut self, plane: usize) -> Option<(Plane, ModelEvent)> {
        if plane >= self.planes.len() {
            return None;
        }
        let removed = self.planes.remove(plane);
        debug!("removed plane {plane} ({:?})", removed.name);
        Some((removed, ModelEvent::PlaneRemoved(plane)))
    }

    /// The maneuver at `index`, or `None` for crew rows and bad indices.
    pub fn maneuver(&self, index: ManeuverIndex) -> Option<&Maneuver> {
        self.plane(index.plane)?.child_at(index.row)?.as_maneuver()
    }

    fn maneuver_mut(&mut self, index: ManeuverIndex) -> Option<&mut Maneuver> {
        self.plane_mut(index.plane)?.maneuver_at_mut(index.row)
    }

    /// Resolves the name column of a row.
    pub fn maneuver_name(&self, index: ManeuverIndex) -> Option<String> {
        self.maneuver(index)
            .map(|m| m.data(Column::ManeuverName))
            .and_then(|value| value.as_str().map(str::to_string))
    }

    /// Index of every maneuver row under `plane`.
    pub fn maneuver_indices(&self, plane: usize) -> Vec<ManeuverIndex> {
        self.plane(plane)
            .map(|p| {
                p.children()
                    .iter()
                    .enumerate()
                    .filter(|(_, child)| child.is_maneuver())
                    .map(|(row, _)| ManeuverIndex::new(plane, row))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn find_maneuver(&self, plane: usize, name: &str) -> Option<ManeuverIndex> {
        self.plane(plane)?
            .maneuver_row(name)
            .map(|row| ManeuverIndex::new(plane, row))
    }

    pub fn schedule(&mut self, index: ManeuverIndex) -> Option<ModelEvent> {
        let maneuver = self.maneuver_mut(index)?;
        maneuver.added_to_schedule = true;
        debug!("scheduled {} at {:?}", maneuver.name, index);
        Some(ModelEvent::ManeuverAdded(index))
    }

    pub fn unschedule(&mut self, index: ManeuverIndex) -> Option<ModelEvent> {
        let maneuver = self.maneuver_mut(index)?;
        maneuver.added_to_schedule = false;
        debug!("unscheduled {} at {:?}", maneuver.name, index);
        Some(ModelEvent::ManeuverRemoved(index))
    }

    pub fn set_enabled(&mut self, index: ManeuverIndex, enabled: bool) -> Option<ModelEvent> {
        self.maneuver_mut(index)?.is_enabled = enabled;
        Some(ModelEvent::ManeuverChanged(index))
    }

    /// Writes one column of a maneuver row.
    pub fn set_data(
        &mut self,
        index: ManeuverIndex,
        column: Column,
        value: AttrValue,
    ) -> Option<ModelEvent> {
        self.maneuver_mut(index)?
            .set_data(column, value)
            .then_some(ModelEvent::ManeuverChanged(index))
    }

    pub fn select(&self, index: ManeuverIndex) -> Option<ModelEvent> {
        self.maneuver(index)?;
        Some(ModelEvent::ManeuverSelected(index))
    }

    pub fn select_plane(&self, plane: usize) -> Option<ModelEvent> {
        self.plane(plane)?;
        Some(ModelEvent::PlaneSelected(plane))
    }

    /// Crew rows follow the maneuvers, so the first crew row is the maneuver
    /// count.
    pub fn crew_row(&self, plane: usize, crew: usize) -> Option<ManeuverIndex> {
        let p = self.plane(plane)?;
        let row = p.maneuver_count() + crew;
        matches!(p.child_at(row), Some(PlaneChild::Crew(_))).then(|| ManeuverIndex::new(plane, row))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::Catalog;
    use crate::document::types::Crew;

    fn model() -> PlaneModel {
        let mut plane = Plane::blank(&Catalog::master());
        plane.add_child(Crew::new("Pilot"));
        let mut model = PlaneModel::new();
        model.push_plane(plane);
        model
    }

    #[test]
    fn resolve_names() {
        let model = model();
        let index = model.find_maneuver(0, "11L2").unwrap();
        assert_eq!(model.maneuver_name(index).as_deref(), Some("11L2"));

        let crew = model.crew_row(0, 0).unwrap();
        assert!(model.maneuver_name(crew).is_none());
        assert!(model.crew_row(0, 1).is_none());
        assert!(model.maneuver_name(ManeuverIndex::new(3, 0)).is_none());
        assert_eq!(
            model.maneuver_indices(0).len(),
            Catalog::master().len()
        );
    }

    #[test]
    fn schedule_raises_events() {
        let mut model = model();
        let index = model.find_maneuver(0, "3S2").unwrap();
        assert_eq!(model.schedule(index), Some(ModelEvent::ManeuverAdded(index)));
        assert!(model.maneuver(index).unwrap().added_to_schedule);
        assert_eq!(model.unschedule(index), Some(ModelEvent::ManeuverRemoved(index)));
        assert!(!model.maneuver(index).unwrap().added_to_schedule);

        let crew = model.crew_row(0, 0).unwrap();
        assert_eq!(model.schedule(crew), None);
    }

    #[test]
    fn remove_plane_raises_event() {
        let mut model = model();
        model.push_plane(Plane::default());
        let (removed, event) = model.remove_plane(0).unwrap();
        assert_eq!(removed.child_count(), Catalog::master().len() + 1);
        assert_eq!(event, ModelEvent::PlaneRemoved(0));
        assert_eq!(model.planes().len(), 1);
        assert!(model.remove_plane(1).is_none());
    }

    #[test]
    fn set_data_reports_changes() {
        let mut model = model();
        let index = model.find_maneuver(0, "2S1").unwrap();
        assert_eq!(
            model.set_data(index, Column::CanReload, true.into()),
            Some(ModelEvent::ManeuverChanged(index))
        );
        assert!(model.maneuver(index).unwrap().flags.can_reload);
        assert_eq!(model.set_data(index, Column::Fuel, 3.into()), None);
        assert_eq!(model.set_data(index, Column::ManeuverName, "3S2".into()), None);
        assert_eq!(model.maneuver_name(index).as_deref(), Some("2S1"));
    }
}
