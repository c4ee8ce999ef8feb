//! JSON keys used by plane documents.

// Plane keys
pub const PLANE_NAME: &str = "name";
pub const PLANE_ERA: &str = "plane_era";
pub const FUEL: &str = "fuel";
pub const ENGINE_HP: &str = "engine_hp";
pub const ENGINE_CRITICAL: &str = "engine_critical";
pub const WING_HP: &str = "wing_hp";
pub const WING_CRITICAL: &str = "wing_critical";
pub const FUSELAGE_HP: &str = "fuselage_hp";
pub const FUSELAGE_CRITICAL: &str = "fuselage_critical";
pub const TAIL_HP: &str = "tail_hp";
pub const TAIL_CRITICAL: &str = "tail_critical";
pub const RATED_DIVE: &str = "rated_dive";
pub const RATED_CLIMB: &str = "rated_climb";
pub const MAX_ALT: &str = "max_alt";
pub const STABILITY: &str = "stability";
pub const MANEUVERS: &str = "maneuvers";
pub const CREW: &str = "crew";

// Maneuver keys
pub const MANEUVER_NAME: &str = "name";
pub const TOLERANCES: &str = "tolerances";
pub const CAN_BE_REPEATED: &str = "can_be_repeated";
pub const CAN_RELOAD: &str = "can_reload";
pub const CAN_PUT_OUT_FIRES: &str = "can_put_out_fires";
pub const OBSERVER_CAN_RELOAD: &str = "observer_can_reload";
pub const IS_RESTRICTED: &str = "is_restricted";
pub const IS_WEIGHT_RESTRICTED: &str = "is_weight_restricted";
pub const IS_CLIMB_RESTRICTED: &str = "is_climb_restricted";
pub const CAUSES_SPIN_CHECK: &str = "causes_spin_check";

// Crew keys
pub const ROLE: &str = "role";
pub const GUN: &str = "gun";

// Gun keys
pub const GUN_NAME: &str = "name";
pub const FIRE_TEMPLATE: &str = "fire_template";
pub const FIRE_BASE: [&str; 4] = ["fire_base_0", "fire_base_1", "fire_base_2", "fire_base_3"];
pub const AMMO_BOX_CAPACITY: &str = "ammo_box_capacity";
pub const AMMO_BOX_COUNT: &str = "ammo_box_count";
