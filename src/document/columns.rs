//! Column-addressed access to node attributes.
//!
//! Typed fields are the primary API. This view exists for consumers that only
//! hold a row and a column, such as a table widget or the maneuver board.
//! Reading a column a node does not carry yields [`AttrValue::Empty`];
//! writing one is ignored.

use std::fmt;

use crate::game_types::{Tolerance, parse_tolerance};
use crate::recognized::Recognized;

use super::types::{Crew, Gun, Maneuver, NodeRef, Plane};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AttrValue {
    #[default]
    Empty,
    Str(String),
    Int(i64),
    Bool(bool),
}

impl AttrValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, AttrValue::Empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn as_i32(&self) -> Option<i32> {
        self.as_int().and_then(|v| i32::try_from(v).ok())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Empty => Ok(()),
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<&Tolerance> for AttrValue {
    fn from(value: &Tolerance) -> Self {
        match value {
            Recognized::Known(v) => AttrValue::Int((*v).into()),
            Recognized::Unknown(raw) => AttrValue::Str(raw.clone()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    // Plane
    PlaneName,
    PlaneEra,
    Fuel,
    EngineHp,
    EngineCritical,
    WingHp,
    WingCritical,
    FuselageHp,
    FuselageCritical,
    TailHp,
    TailCritical,
    RatedDive,
    RatedClimb,
    MaxAltitude,
    Stability,
    IsGliding,
    IsOnFire,
    // Maneuver
    ManeuverName,
    Speed,
    Direction,
    ClimbValue,
    LevelValue,
    DiveValue,
    CanBeRepeated,
    CanReload,
    CanPutOutFires,
    ObserverCanReload,
    IsRestricted,
    IsWeightRestricted,
    IsClimbRestricted,
    CausesSpinCheck,
    IsEnabled,
    CanBeUsed,
    AddedToSchedule,
    // Crew
    CrewRole,
    Wounds,
    // Gun
    GunName,
    FireTemplate,
    FireBase0,
    FireBase1,
    FireBase2,
    FireBase3,
    AmmoBoxCapacity,
    AmmoBoxCount,
    GunDestroyed,
}

fn set_i32(slot: &mut i32, value: &AttrValue) -> bool {
    match value.as_i32() {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

fn set_bool(slot: &mut bool, value: &AttrValue) -> bool {
    match value.as_bool() {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

fn set_string(slot: &mut String, value: &AttrValue) -> bool {
    match value.as_str() {
        Some(v) => {
            *slot = v.to_string();
            true
        }
        None => false,
    }
}

fn set_tolerance(slot: &mut Tolerance, value: &AttrValue) -> bool {
    match value {
        AttrValue::Int(v) => match u8::try_from(*v) {
            Ok(v) => {
                *slot = Recognized::Known(v);
                true
            }
            Err(_) => false,
        },
        AttrValue::Str(s) => {
            *slot = parse_tolerance(s);
            true
        }
        _ => false,
    }
}

impl Plane {
    pub fn data(&self, column: Column) -> AttrValue {
        match column {
            Column::PlaneName => self.name.as_str().into(),
            Column::PlaneEra => self.era.as_str().into(),
            Column::Fuel => self.fuel.into(),
            Column::EngineHp => self.engine_hp.into(),
            Column::EngineCritical => self.engine_critical.into(),
            Column::WingHp => self.wing_hp.into(),
            Column::WingCritical => self.wing_critical.into(),
            Column::FuselageHp => self.fuselage_hp.into(),
            Column::FuselageCritical => self.fuselage_critical.into(),
            Column::TailHp => self.tail_hp.into(),
            Column::TailCritical => self.tail_critical.into(),
            Column::RatedDive => self.rated_dive.into(),
            Column::RatedClimb => self.rated_climb.into(),
            Column::MaxAltitude => self.max_altitude.as_str().into(),
            Column::Stability => self.stability.as_str().into(),
            Column::IsGliding => self.is_gliding.into(),
            Column::IsOnFire => self.is_on_fire.into(),
            _ => AttrValue::Empty,
        }
    }

    pub fn set_data(&mut self, column: Column, value: AttrValue) -> bool {
        match column {
            Column::PlaneName => set_string(&mut self.name, &value),
            Column::PlaneEra => set_string(&mut self.era, &value),
            Column::Fuel => set_i32(&mut self.fuel, &value),
            Column::EngineHp => set_i32(&mut self.engine_hp, &value),
            Column::EngineCritical => set_i32(&mut self.engine_critical, &value),
            Column::WingHp => set_i32(&mut self.wing_hp, &value),
            Column::WingCritical => set_i32(&mut self.wing_critical, &value),
            Column::FuselageHp => set_i32(&mut self.fuselage_hp, &value),
            Column::FuselageCritical => set_i32(&mut self.fuselage_critical, &value),
            Column::TailHp => set_i32(&mut self.tail_hp, &value),
            Column::TailCritical => set_i32(&mut self.tail_critical, &value),
            Column::RatedDive => set_i32(&mut self.rated_dive, &value),
            Column::RatedClimb => set_i32(&mut self.rated_climb, &value),
            Column::MaxAltitude => set_string(&mut self.max_altitude, &value),
            Column::Stability => set_string(&mut self.stability, &value),
            Column::IsGliding => set_bool(&mut self.is_gliding, &value),
            Column::IsOnFire => set_bool(&mut self.is_on_fire, &value),
            _ => false,
        }
    }
}

impl Maneuver {
    pub fn data(&self, column: Column) -> AttrValue {
        match column {
            Column::ManeuverName => self.name.as_str().into(),
            Column::Speed => match self.speed().get() {
                Some(speed) => i32::from(speed).into(),
                None => AttrValue::Empty,
            },
            Column::Direction => self.direction().to_string().into(),
            Column::ClimbValue => self.climb().into(),
            Column::LevelValue => self.level().into(),
            Column::DiveValue => self.dive().into(),
            Column::CanBeRepeated => self.flags.can_be_repeated.into(),
            Column::CanReload => self.flags.can_reload.into(),
            Column::CanPutOutFires => self.flags.can_put_out_fires.into(),
            Column::ObserverCanReload => self.flags.observer_can_reload.into(),
            Column::IsRestricted => self.flags.is_restricted.into(),
            Column::IsWeightRestricted => self.flags.is_weight_restricted.into(),
            Column::IsClimbRestricted => self.flags.is_climb_restricted.into(),
            Column::CausesSpinCheck => self.flags.causes_spin_check.into(),
            Column::IsEnabled => self.is_enabled.into(),
            Column::CanBeUsed => self.can_be_used.into(),
            Column::AddedToSchedule => self.added_to_schedule.into(),
            _ => AttrValue::Empty,
        }
    }

    /// The name keys the maneuver's board slot, so it is read-only here, as
    /// are the speed and direction derived from it.
    pub fn set_data(&mut self, column: Column, value: AttrValue) -> bool {
        match column {
            Column::ClimbValue => set_tolerance(&mut self.tolerances.climb, &value),
            Column::LevelValue => set_tolerance(&mut self.tolerances.level, &value),
            Column::DiveValue => set_tolerance(&mut self.tolerances.dive, &value),
            Column::CanBeRepeated => set_bool(&mut self.flags.can_be_repeated, &value),
            Column::CanReload => set_bool(&mut self.flags.can_reload, &value),
            Column::CanPutOutFires => set_bool(&mut self.flags.can_put_out_fires, &value),
            Column::ObserverCanReload => set_bool(&mut self.flags.observer_can_reload, &value),
            Column::IsRestricted => set_bool(&mut self.flags.is_restricted, &value),
            Column::IsWeightRestricted => set_bool(&mut self.flags.is_weight_restricted, &value),
            Column::IsClimbRestricted => set_bool(&mut self.flags.is_climb_restricted, &value),
            Column::CausesSpinCheck => set_bool(&mut self.flags.causes_spin_check, &value),
            Column::IsEnabled => set_bool(&mut self.is_enabled, &value),
            Column::CanBeUsed => set_bool(&mut self.can_be_used, &value),
            Column::AddedToSchedule => set_bool(&mut self.added_to_schedule, &value),
            _ => false,
        }
    }
}

impl Crew {
    pub fn data(&self, column: Column) -> AttrValue {
        match column {
            Column::CrewRole => self.role.as_str().into(),
            Column::Wounds => AttrValue::Int(self.wounds.into()),
            _ => AttrValue::Empty,
        }
    }

    pub fn set_data(&mut self, column: Column, value: AttrValue) -> bool {
        match column {
            Column::CrewRole => set_string(&mut self.role, &value),
            Column::Wounds => match value.as_int().and_then(|v| u32::try_from(v).ok()) {
                Some(wounds) => {
                    self.wounds = wounds;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

impl Gun {
    pub fn data(&self, column: Column) -> AttrValue {
        match column {
            Column::GunName => self.name.as_str().into(),
            Column::FireTemplate => self.fire_template.into(),
            Column::FireBase0 => self.fire_base[0].into(),
            Column::FireBase1 => self.fire_base[1].into(),
            Column::FireBase2 => self.fire_base[2].into(),
            Column::FireBase3 => self.fire_base[3].into(),
            Column::AmmoBoxCapacity => self.ammo_box_capacity.into(),
            Column::AmmoBoxCount => self.ammo_box_count.into(),
            Column::GunDestroyed => self.is_destroyed.into(),
            _ => AttrValue::Empty,
        }
    }

    pub fn set_data(&mut self, column: Column, value: AttrValue) -> bool {
        match column {
            Column::GunName => set_string(&mut self.name, &value),
            Column::FireTemplate => set_i32(&mut self.fire_template, &value),
            Column::FireBase0 => set_i32(&mut self.fire_base[0], &value),
            Column::FireBase1 => set_i32(&mut self.fire_base[1], &value),
            Column::FireBase2 => set_i32(&mut self.fire_base[2], &value),
            Column::FireBase3 => set_i32(&mut self.fire_base[3], &value),
            Column::AmmoBoxCapacity => set_i32(&mut self.ammo_box_capacity, &value),
            Column::AmmoBoxCount => set_i32(&mut self.ammo_box_count, &value),
            Column::GunDestroyed => set_bool(&mut self.is_destroyed, &value),
            _ => false,
        }
    }
}

impl NodeRef<'_> {
    pub fn data(&self, column: Column) -> AttrValue {
        match self {
            NodeRef::Plane(p) => p.data(column),
            NodeRef::Maneuver(m) => m.data(column),
            NodeRef::Crew(c) => c.data(column),
            NodeRef::Gun(g) => g.data(column),
        }
    }
}
