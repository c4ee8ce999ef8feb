use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogManeuver};
use crate::error::{ErrorKind, IResult, failure_from_kind};
use crate::game_types::{ManeuverName, Tolerances};

use super::ImportOptions;
use super::keys;
use super::types::{Crew, Gun, Maneuver, ManeuverFlags, Plane};

// =============================================================================
// Document records
// =============================================================================

/// The persisted form of a plane. Absent fields deserialize to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneDocument {
    pub name: String,
    pub plane_era: String,
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
    pub max_alt: String,
    pub stability: String,
    pub maneuvers: Vec<ManeuverDocument>,
    pub crew: Vec<CrewDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManeuverDocument {
    pub name: String,
    pub tolerances: String,
    pub can_be_repeated: bool,
    pub can_reload: bool,
    pub can_put_out_fires: bool,
    pub observer_can_reload: bool,
    pub is_restricted: bool,
    pub is_weight_restricted: bool,
    pub is_climb_restricted: bool,
    pub causes_spin_check: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewDocument {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gun: Option<GunDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunDocument {
    pub name: String,
    pub fire_template: i32,
    pub fire_base_0: i32,
    pub fire_base_1: i32,
    pub fire_base_2: i32,
    pub fire_base_3: i32,
    pub ammo_box_capacity: i32,
    pub ammo_box_count: i32,
}

// =============================================================================
// Lenient field extraction
// =============================================================================

fn lenient_int(value: Option<&Value>, key: &str) -> i32 {
    let parsed = match value {
        None | Some(Value::Null) => return 0,
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|v| i32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        Some(_) => None,
    };
    parsed.unwrap_or_else(|| {
        warn!("{key}: expected an integer, using 0");
        0
    })
}

fn lenient_string(value: Option<&Value>, key: &str) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            warn!("{key}: expected a string, using an empty one");
            String::new()
        }
    }
}

fn lenient_bool(value: Option<&Value>, key: &str) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            warn!("{key}: expected a boolean, using false");
            false
        }
    }
}

fn lenient_array<'a>(obj: Option<&'a Map<String, Value>>, key: &str) -> &'a [Value] {
    match obj.and_then(|o| o.get(key)) {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            warn!("{key}: expected an array, ignoring it");
            &[]
        }
    }
}

macro_rules! lenient_field {
    ($obj:ident, $key:expr, String) => {
        lenient_string($obj.and_then(|o| o.get($key)), $key)
    };
    ($obj:ident, $key:expr, i32) => {
        lenient_int($obj.and_then(|o| o.get($key)), $key)
    };
    ($obj:ident, $key:expr, bool) => {
        lenient_bool($obj.and_then(|o| o.get($key)), $key)
    };
}

impl PlaneDocument {
    /// Reads a plane document out of arbitrary JSON.
    ///
    /// In strict mode the value must be an object whose fields have the right
    /// types. Otherwise anything is accepted: wrong-typed or absent fields
    /// fall back to zero, empty or false.
    pub fn from_value(value: &Value, options: &ImportOptions) -> IResult<Self> {
        if options.strict() {
            if !value.is_object() {
                return Err(failure_from_kind(ErrorKind::NotAPlane));
            }
            return Ok(Self::deserialize(value)?);
        }

        Ok(Self::from_value_lenient(value))
    }

    pub fn from_value_lenient(value: &Value) -> Self {
        let plane = value.as_object();
        if plane.is_none() {
            warn!("plane document is not an object, reading it as empty");
        }

        Self {
            name: lenient_field!(plane, keys::PLANE_NAME, String),
            plane_era: lenient_field!(plane, keys::PLANE_ERA, String),
            fuel: lenient_field!(plane, keys::FUEL, i32),
            engine_hp: lenient_field!(plane, keys::ENGINE_HP, i32),
            engine_critical: lenient_field!(plane, keys::ENGINE_CRITICAL, i32),
            wing_hp: lenient_field!(plane, keys::WING_HP, i32),
            wing_critical: lenient_field!(plane, keys::WING_CRITICAL, i32),
            fuselage_hp: lenient_field!(plane, keys::FUSELAGE_HP, i32),
            fuselage_critical: lenient_field!(plane, keys::FUSELAGE_CRITICAL, i32),
            tail_hp: lenient_field!(plane, keys::TAIL_HP, i32),
            tail_critical: lenient_field!(plane, keys::TAIL_CRITICAL, i32),
            rated_dive: lenient_field!(plane, keys::RATED_DIVE, i32),
            rated_climb: lenient_field!(plane, keys::RATED_CLIMB, i32),
            max_alt: lenient_field!(plane, keys::MAX_ALT, String),
            stability: lenient_field!(plane, keys::STABILITY, String),
            maneuvers: lenient_array(plane, keys::MANEUVERS)
                .iter()
                .map(ManeuverDocument::from_value_lenient)
                .collect(),
            crew: lenient_array(plane, keys::CREW)
                .iter()
                .map(CrewDocument::from_value_lenient)
                .collect(),
        }
    }
}

impl ManeuverDocument {
    pub fn from_value_lenient(value: &Value) -> Self {
        let maneuver = value.as_object();
        Self {
            name: lenient_field!(maneuver, keys::MANEUVER_NAME, String),
            tolerances: lenient_field!(maneuver, keys::TOLERANCES, String),
            can_be_repeated: lenient_field!(maneuver, keys::CAN_BE_REPEATED, bool),
            can_reload: lenient_field!(maneuver, keys::CAN_RELOAD, bool),
            can_put_out_fires: lenient_field!(maneuver, keys::CAN_PUT_OUT_FIRES, bool),
            observer_can_reload: lenient_field!(maneuver, keys::OBSERVER_CAN_RELOAD, bool),
            is_restricted: lenient_field!(maneuver, keys::IS_RESTRICTED, bool),
            is_weight_restricted: lenient_field!(maneuver, keys::IS_WEIGHT_RESTRICTED, bool),
            is_climb_restricted: lenient_field!(maneuver, keys::IS_CLIMB_RESTRICTED, bool),
            causes_spin_check: lenient_field!(maneuver, keys::CAUSES_SPIN_CHECK, bool),
        }
    }
}

impl CrewDocument {
    pub fn from_value_lenient(value: &Value) -> Self {
        let crew = value.as_object();
        let gun = match crew.and_then(|c| c.get(keys::GUN)) {
            None | Some(Value::Null) => None,
            Some(gun @ Value::Object(_)) => Some(GunDocument::from_value_lenient(gun)),
            Some(_) => {
                warn!("{}: expected an object, ignoring it", keys::GUN);
                None
            }
        };

        Self {
            role: lenient_field!(crew, keys::ROLE, String),
            gun,
        }
    }
}

impl GunDocument {
    pub fn from_value_lenient(value: &Value) -> Self {
        let gun = value.as_object();
        Self {
            name: lenient_field!(gun, keys::GUN_NAME, String),
            fire_template: lenient_field!(gun, keys::FIRE_TEMPLATE, i32),
            fire_base_0: lenient_field!(gun, keys::FIRE_BASE[0], i32),
            fire_base_1: lenient_field!(gun, keys::FIRE_BASE[1], i32),
            fire_base_2: lenient_field!(gun, keys::FIRE_BASE[2], i32),
            fire_base_3: lenient_field!(gun, keys::FIRE_BASE[3], i32),
            ammo_box_capacity: lenient_field!(gun, keys::AMMO_BOX_CAPACITY, i32),
            ammo_box_count: lenient_field!(gun, keys::AMMO_BOX_COUNT, i32),
        }
    }
}

// =============================================================================
// Plane
// =============================================================================

impl Plane {
    /// Builds a plane from its document. Every persisted maneuver was on the
    /// schedule when it was saved, so it comes back scheduled.
    pub fn from_document(document: &PlaneDocument) -> Plane {
        let mut plane = Plane::default();
        plane.name = document.name.clone();
        plane.era = document.plane_era.clone();
        plane.fuel = document.fuel;
        plane.engine_hp = document.engine_hp;
        plane.engine_critical = document.engine_critical;
        plane.wing_hp = document.wing_hp;
        plane.wing_critical = document.wing_critical;
        plane.fuselage_hp = document.fuselage_hp;
        plane.fuselage_critical = document.fuselage_critical;
        plane.tail_hp = document.tail_hp;
        plane.tail_critical = document.tail_critical;
        plane.rated_dive = document.rated_dive;
        plane.rated_climb = document.rated_climb;
        plane.max_altitude = document.max_alt.clone();
        plane.stability = document.stability.clone();
        plane.is_gliding = false;
        plane.is_on_fire = false;

        for maneuver in &document.maneuvers {
            plane.add_child(Maneuver::from_document(maneuver));
        }
        for crew in &document.crew {
            plane.add_child(Crew::from_document(crew));
        }

        debug!(
            "loaded plane {:?}: {} maneuvers, {} crew",
            plane.name,
            document.maneuvers.len(),
            document.crew.len()
        );

        plane
    }

    /// A plane carrying every catalog maneuver, none of them scheduled.
    pub fn blank(catalog: &Catalog) -> Plane {
        let mut plane = Plane::default();
        for maneuver in catalog.iter() {
            plane.add_child(Maneuver::from_catalog(maneuver));
        }
        plane
    }

    /// Adds an unscheduled row for each catalog maneuver the plane lacks and
    /// returns how many were added.
    pub fn fill_from_catalog(&mut self, catalog: &Catalog) -> usize {
        let missing: Vec<&CatalogManeuver> = catalog
            .iter()
            .filter(|m| self.maneuver_row(m.name).is_none())
            .collect();
        for maneuver in &missing {
            self.add_child(Maneuver::from_catalog(maneuver));
        }
        missing.len()
    }

    /// Only scheduled maneuvers are written; catalog rows are regenerated on
    /// load.
    pub fn to_document(&self) -> PlaneDocument {
        PlaneDocument {
            name: self.name.clone(),
            plane_era: self.era.clone(),
            fuel: self.fuel,
            engine_hp: self.engine_hp,
            engine_critical: self.engine_critical,
            wing_hp: self.wing_hp,
            wing_critical: self.wing_critical,
            fuselage_hp: self.fuselage_hp,
            fuselage_critical: self.fuselage_critical,
            tail_hp: self.tail_hp,
            tail_critical: self.tail_critical,
            rated_dive: self.rated_dive,
            rated_climb: self.rated_climb,
            max_alt: self.max_altitude.clone(),
            stability: self.stability.clone(),
            maneuvers: self.scheduled().map(Maneuver::to_document).collect(),
            crew: self.crew().map(Crew::to_document).collect(),
        }
    }
}

// =============================================================================
// Maneuvers
// =============================================================================

impl Maneuver {
    pub fn from_document(document: &ManeuverDocument) -> Maneuver {
        Maneuver {
            name: ManeuverName::from(document.name.as_str()),
            tolerances: Tolerances::parse(&document.tolerances),
            flags: ManeuverFlags {
                can_be_repeated: document.can_be_repeated,
                can_reload: document.can_reload,
                can_put_out_fires: document.can_put_out_fires,
                observer_can_reload: document.observer_can_reload,
                is_restricted: document.is_restricted,
                is_weight_restricted: document.is_weight_restricted,
                is_climb_restricted: document.is_climb_restricted,
                causes_spin_check: document.causes_spin_check,
            },
            is_enabled: true,
            can_be_used: true,
            added_to_schedule: true,
        }
    }

    pub fn from_catalog(maneuver: &CatalogManeuver) -> Maneuver {
        Maneuver {
            name: maneuver.maneuver_name(),
            tolerances: maneuver.tolerances(),
            flags: ManeuverFlags {
                can_be_repeated: true,
                is_restricted: maneuver.is_restricted,
                is_climb_restricted: maneuver.is_climb_restricted,
                causes_spin_check: maneuver.causes_spin_check,
                ..Default::default()
            },
            is_enabled: true,
            can_be_used: true,
            added_to_schedule: false,
        }
    }

    pub fn to_document(&self) -> ManeuverDocument {
        ManeuverDocument {
            name: self.name.to_string(),
            tolerances: self.tolerances.joined(),
            can_be_repeated: self.flags.can_be_repeated,
            can_reload: self.flags.can_reload,
            can_put_out_fires: self.flags.can_put_out_fires,
            observer_can_reload: self.flags.observer_can_reload,
            is_restricted: self.flags.is_restricted,
            is_weight_restricted: self.flags.is_weight_restricted,
            is_climb_restricted: self.flags.is_climb_restricted,
            causes_spin_check: self.flags.causes_spin_check,
        }
    }
}

// =============================================================================
// Crew and guns
// =============================================================================

impl Crew {
    /// Wounds are session state and always start at zero.
    pub fn from_document(document: &CrewDocument) -> Crew {
        let mut crew = Crew::new(document.role.as_str());
        if let Some(gun) = &document.gun {
            crew.add_child(Gun::from_document(gun));
        }
        crew
    }

    pub fn to_document(&self) -> CrewDocument {
        CrewDocument {
            role: self.role.clone(),
            gun: self.gun().map(Gun::to_document),
        }
    }
}

impl Gun {
    pub fn from_document(document: &GunDocument) -> Gun {
        Gun {
            name: document.name.clone(),
            fire_template: document.fire_template,
            fire_base: [
                document.fire_base_0,
                document.fire_base_1,
                document.fire_base_2,
                document.fire_base_3,
            ],
            ammo_box_capacity: document.ammo_box_capacity,
            ammo_box_count: document.ammo_box_count,
            is_destroyed: false,
        }
    }

    pub fn to_document(&self) -> GunDocument {
        let [fire_base_0, fire_base_1, fire_base_2, fire_base_3] = self.fire_base;
        GunDocument {
            name: self.name.clone(),
            fire_template: self.fire_template,
            fire_base_0,
            fire_base_1,
            fire_base_2,
            fire_base_3,
            ammo_box_capacity: self.ammo_box_capacity,
            ammo_box_count: self.ammo_box_count,
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::recognized::Recognized;

    fn maneuver_json(name: &str, tolerances: &str) -> Value {
        json!({
            "name": name,
            "tolerances": tolerances,
            "can_be_repeated": true,
            "can_reload": false,
            "can_put_out_fires": true,
            "observer_can_reload": false,
            "is_restricted": false,
            "is_weight_restricted": true,
            "is_climb_restricted": false,
            "causes_spin_check": false,
        })
    }

    #[test]
    fn maneuver_from_document() {
        let document = ManeuverDocument::from_value_lenient(&maneuver_json("11L2", "2/0/1"));
        let maneuver = Maneuver::from_document(&document);
        assert_eq!(maneuver.speed(), Recognized::Known(2));
        assert_eq!(maneuver.direction().to_string(), "L");
        assert_eq!(maneuver.tolerances, Tolerances::new(2, 0, 1));
        assert!(maneuver.flags.can_put_out_fires);
        assert!(maneuver.flags.is_weight_restricted);
        assert!(maneuver.is_enabled && maneuver.can_be_used && maneuver.added_to_schedule);
        assert_eq!(maneuver.to_document(), document);
    }

    #[test]
    fn maneuver_from_catalog() {
        let catalog = Catalog::master();
        let maneuver = Maneuver::from_catalog(catalog.by_name("0S1").unwrap());
        assert_eq!(maneuver.speed(), Recognized::Known(1));
        assert!(maneuver.flags.can_be_repeated);
        assert!(maneuver.flags.causes_spin_check);
        assert!(!maneuver.added_to_schedule);
    }

    #[test]
    fn lenient_fields_default() {
        let document = PlaneDocument::from_value_lenient(&json!({
            "name": "Spad",
            "fuel": "12",
            "wing_hp": 3.0,
            "tail_hp": "lots",
            "max_alt": 14,
            "maneuvers": {"not": "an array"},
            "crew": [ 7, { "role": "Pilot", "gun": 3 } ],
        }));
        assert_eq!(document.name, "Spad");
        assert_eq!(document.fuel, 12);
        assert_eq!(document.wing_hp, 3);
        assert_eq!(document.tail_hp, 0);
        assert_eq!(document.max_alt, "14");
        assert!(document.stability.is_empty());
        assert!(document.maneuvers.is_empty());
        assert_eq!(document.crew.len(), 2);
        assert_eq!(document.crew[0], CrewDocument::default());
        assert!(document.crew[1].gun.is_none());
    }

    #[test]
    fn lenient_accepts_non_objects() {
        let document = PlaneDocument::from_value_lenient(&json!([1, 2, 3]));
        assert_eq!(document, PlaneDocument::default());
    }

    #[test]
    fn strict_rejects_wrong_types() {
        let options = ImportOptions::builder().strict(true).build();
        let err = PlaneDocument::from_value(&json!({"fuel": "12"}), &options).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::SerdeJson { .. }));

        let err = PlaneDocument::from_value(&json!("plane"), &options).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NotAPlane));

        let document = PlaneDocument::from_value(&json!({"fuel": 12}), &options).unwrap();
        assert_eq!(document.fuel, 12);
        assert!(document.crew.is_empty());
    }

    #[test]
    fn crew_gun_nesting() {
        let without = Crew::new("Observer").to_document();
        let value = serde_json::to_value(&without).unwrap();
        assert!(value.get("gun").is_none());

        let mut crew = Crew::new("Pilot");
        crew.wounds = 2;
        crew.add_child(Gun {
            name: "Vickers".to_string(),
            fire_template: 1,
            fire_base: [6, 5, 4, 3],
            ammo_box_capacity: 4,
            ammo_box_count: 3,
            is_destroyed: true,
        });
        let value = serde_json::to_value(crew.to_document()).unwrap();
        assert_eq!(value["gun"]["fire_base_0"], 6);
        assert_eq!(value["gun"]["fire_base_3"], 3);
        assert!(value["gun"].get("is_destroyed").is_none());
        assert!(value.get("wounds").is_none());

        let back = Crew::from_document(&CrewDocument::from_value_lenient(&value));
        assert_eq!(back.wounds, 0);
        let gun = back.gun().unwrap();
        assert!(!gun.is_destroyed);
        assert_eq!(gun.fire_base, [6, 5, 4, 3]);
        assert_eq!(gun.ammo_box_count, 3);
    }

    #[test]
    fn unscheduled_maneuvers_are_not_exported() {
        let catalog = Catalog::master();
        let mut plane = Plane::blank(&catalog);
        assert!(plane.to_document().maneuvers.is_empty());

        let row = plane.maneuver_row("3S2").unwrap();
        plane.maneuver_at_mut(row).unwrap().added_to_schedule = true;
        let names: Vec<_> = plane
            .to_document()
            .maneuvers
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["3S2".to_string()]);
    }

    #[test]
    fn fill_from_catalog_adds_missing_rows() {
        let catalog = Catalog::master();
        let document = PlaneDocument {
            maneuvers: vec![ManeuverDocument::from_value_lenient(&maneuver_json("2S1", "0/0/0"))],
            crew: vec![CrewDocument {
                role: "Pilot".to_string(),
                gun: None,
            }],
            ..Default::default()
        };
        let mut plane = Plane::from_document(&document);
        let added = plane.fill_from_catalog(&catalog);
        assert_eq!(added, catalog.len() - 1);
        assert_eq!(plane.maneuver_count(), catalog.len());
        assert!(plane.child_at(plane.child_count() - 1).unwrap().is_crew());
        assert_eq!(plane.scheduled().count(), 1);
        assert_eq!(plane.fill_from_catalog(&catalog), 0);
    }
}
