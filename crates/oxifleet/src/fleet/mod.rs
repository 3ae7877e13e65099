//! Fleet domain records.
//!
//! Defines the vehicle and driver record shapes, their draft (raw input)
//! forms, and the trim/default normalization policy: every draft string
//! field is trimmed, and any field still blank afterwards receives a
//! documented placeholder. Blank ids are generated fresh; blank statuses
//! default to `Active`. Non-blank enum text is parsed case-insensitively
//! and falls back to the field default when unrecognized; that coercion is
//! logged at warn level.

pub mod registry;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use registry::{Registry, RegistryState};

/// Characters used in generated record ids.
const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random id suffix.
const ID_SUFFIX_LEN: usize = 3;

/// Generate a record id of the form `<PREFIX>-<3 random chars>`.
///
/// The 36^3 space carries no uniqueness guarantee; this is a demo-grade
/// generator and callers store whatever comes out.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
        .collect();
    format!("{prefix}-{suffix}")
}

/// Trim an optional draft field, treating absence as empty.
fn trimmed(field: Option<&String>) -> &str {
    field.map_or("", |value| value.trim())
}

/// Apply the defaulting policy: keep trimmed non-blank text, else the
/// placeholder.
fn or_default(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Parse enum-like draft text, falling back to the field default.
///
/// Blank text is the normal defaulting path; non-blank text that fails to
/// parse is coerced to the same default, and that coercion is logged so the
/// dropped input is visible.
fn parse_or_default<T: Default>(text: &str, field: &str, parse: fn(&str) -> Option<T>) -> T {
    match parse(text) {
        Some(value) => value,
        None => {
            if !text.is_empty() {
                warn!(field, text, "unrecognized value, using default");
            }
            T::default()
        }
    }
}

/// A record that can live in a [`Registry`].
pub trait FleetRecord: Clone + Serialize + DeserializeOwned + Send + 'static {
    /// Raw, unnormalized input accepted by `Registry::add`.
    type Draft;

    /// Backing key the registry persists its records under.
    const STORAGE_KEY: &'static str;

    /// Pre-existing fleet size not present in the persisted list.
    const BASE_COUNT: usize;

    /// Build a fully-defaulted record from a draft, stamping `created_at`.
    fn from_draft(draft: Self::Draft) -> Self;

    /// The record's id.
    fn id(&self) -> &str;
}

/// Kind of vehicle in the fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    /// Heavy truck.
    #[default]
    Truck,
    /// Delivery van.
    Van,
    /// Towed trailer.
    Trailer,
    /// Utility vehicle.
    Utility,
}

impl VehicleType {
    /// Parse user text case-insensitively; `None` when unrecognized.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "truck" => Some(Self::Truck),
            "van" => Some(Self::Van),
            "trailer" => Some(Self::Trailer),
            "utility" => Some(Self::Utility),
            _ => None,
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truck => write!(f, "Truck"),
            Self::Van => write!(f, "Van"),
            Self::Trailer => write!(f, "Trailer"),
            Self::Utility => write!(f, "Utility"),
        }
    }
}

/// Operational status of a vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleStatus {
    /// In active use.
    #[default]
    Active,
    /// In the shop.
    #[serde(rename = "In service")]
    InService,
    /// Parked, not in use.
    Inactive,
}

impl VehicleStatus {
    /// Parse user text case-insensitively; `None` when unrecognized.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "in service" => Some(Self::InService),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::InService => write!(f, "In service"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Employment status of a driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverStatus {
    /// Actively driving.
    #[default]
    Active,
    /// Temporarily away.
    #[serde(rename = "On leave")]
    OnLeave,
    /// No longer driving.
    Inactive,
}

impl DriverStatus {
    /// Parse user text case-insensitively; `None` when unrecognized.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "on leave" => Some(Self::OnLeave),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::OnLeave => write!(f, "On leave"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

/// A vehicle in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Registry id, e.g. `VH-7QX`.
    pub id: String,
    /// Make and model.
    pub model: String,
    /// License plate.
    pub plate: String,
    /// Kind of vehicle.
    #[serde(rename = "type")]
    pub kind: VehicleType,
    /// Operational status.
    pub status: VehicleStatus,
    /// Free-form notes.
    pub notes: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Raw vehicle input, before trimming and defaulting.
#[derive(Debug, Clone, Default)]
pub struct VehicleDraft {
    /// Caller-supplied id, generated when blank.
    pub id: Option<String>,
    /// Make and model.
    pub model: Option<String>,
    /// License plate.
    pub plate: Option<String>,
    /// Kind of vehicle, as text.
    pub kind: Option<String>,
    /// Operational status, as text.
    pub status: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl FleetRecord for Vehicle {
    type Draft = VehicleDraft;

    const STORAGE_KEY: &'static str = "oxifleet:vehicles";
    const BASE_COUNT: usize = 24;

    fn from_draft(draft: VehicleDraft) -> Self {
        let id = trimmed(draft.id.as_ref());
        let kind = trimmed(draft.kind.as_ref());
        let status = trimmed(draft.status.as_ref());

        Self {
            id: if id.is_empty() {
                generate_id("VH")
            } else {
                id.to_string()
            },
            model: or_default(trimmed(draft.model.as_ref()), "Unknown model"),
            plate: or_default(trimmed(draft.plate.as_ref()), "N/A"),
            kind: parse_or_default(kind, "type", VehicleType::from_text),
            status: parse_or_default(status, "status", VehicleStatus::from_text),
            notes: trimmed(draft.notes.as_ref()).to_string(),
            created_at: Utc::now(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// A driver in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// Registry id, e.g. `DR-2KF`.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Driving license number.
    pub license: String,
    /// Employment status.
    pub status: DriverStatus,
    /// Free-form notes.
    pub notes: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Raw driver input, before trimming and defaulting.
#[derive(Debug, Clone, Default)]
pub struct DriverDraft {
    /// Caller-supplied id, generated when blank.
    pub id: Option<String>,
    /// Full name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Driving license number.
    pub license: Option<String>,
    /// Employment status, as text.
    pub status: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl FleetRecord for Driver {
    type Draft = DriverDraft;

    const STORAGE_KEY: &'static str = "oxifleet:drivers";
    const BASE_COUNT: usize = 10;

    fn from_draft(draft: DriverDraft) -> Self {
        let id = trimmed(draft.id.as_ref());
        let status = trimmed(draft.status.as_ref());

        Self {
            id: if id.is_empty() {
                generate_id("DR")
            } else {
                id.to_string()
            },
            name: or_default(trimmed(draft.name.as_ref()), "Unnamed driver"),
            email: or_default(trimmed(draft.email.as_ref()), "unknown@oxifleet.com"),
            phone: or_default(trimmed(draft.phone.as_ref()), "N/A"),
            license: or_default(trimmed(draft.license.as_ref()), "N/A"),
            status: parse_or_default(status, "status", DriverStatus::from_text),
            notes: trimmed(draft.notes.as_ref()).to_string(),
            created_at: Utc::now(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let re = regex::Regex::new(r"^VH-[A-Z0-9]{3}$").unwrap();
        for _ in 0..100 {
            let id = generate_id("VH");
            assert!(re.is_match(&id), "bad id: {id}");
        }
    }

    #[test]
    fn test_generate_id_collisions_are_rare_not_impossible() {
        // 36^3 space: 200 draws should mostly be distinct, and the
        // generator makes no promise beyond that.
        let ids: std::collections::HashSet<String> =
            (0..200).map(|_| generate_id("DR")).collect();
        assert!(ids.len() > 190);
    }

    #[test]
    fn test_vehicle_defaulting_for_blank_fields() {
        let vehicle = Vehicle::from_draft(VehicleDraft {
            id: None,
            model: Some(String::new()),
            plate: Some("TX-1".to_string()),
            kind: Some(String::new()),
            status: Some(String::new()),
            notes: Some(String::new()),
        });

        assert_eq!(vehicle.model, "Unknown model");
        assert_eq!(vehicle.plate, "TX-1");
        assert_eq!(vehicle.kind, VehicleType::Truck);
        assert_eq!(vehicle.status, VehicleStatus::Active);
        assert_eq!(vehicle.notes, "");
        let re = regex::Regex::new(r"^VH-[A-Z0-9]{3}$").unwrap();
        assert!(re.is_match(&vehicle.id), "bad id: {}", vehicle.id);
    }

    #[test]
    fn test_vehicle_whitespace_only_counts_as_blank() {
        let vehicle = Vehicle::from_draft(VehicleDraft {
            model: Some("   ".to_string()),
            plate: Some(" \t".to_string()),
            ..VehicleDraft::default()
        });

        assert_eq!(vehicle.model, "Unknown model");
        assert_eq!(vehicle.plate, "N/A");
    }

    #[test]
    fn test_vehicle_non_blank_fields_kept_trimmed() {
        let vehicle = Vehicle::from_draft(VehicleDraft {
            id: Some("  VH-OWN ".to_string()),
            model: Some(" Volvo VNL 760 ".to_string()),
            kind: Some("van".to_string()),
            status: Some("in service".to_string()),
            notes: Some("  inspection due ".to_string()),
            ..VehicleDraft::default()
        });

        assert_eq!(vehicle.id, "VH-OWN");
        assert_eq!(vehicle.model, "Volvo VNL 760");
        assert_eq!(vehicle.kind, VehicleType::Van);
        assert_eq!(vehicle.status, VehicleStatus::InService);
        assert_eq!(vehicle.notes, "inspection due");
    }

    #[test]
    fn test_vehicle_unrecognized_enum_text_falls_back() {
        let vehicle = Vehicle::from_draft(VehicleDraft {
            kind: Some("hovercraft".to_string()),
            status: Some("lost".to_string()),
            ..VehicleDraft::default()
        });

        assert_eq!(vehicle.kind, VehicleType::Truck);
        assert_eq!(vehicle.status, VehicleStatus::Active);
    }

    #[test]
    fn test_driver_unrecognized_status_falls_back() {
        let driver = Driver::from_draft(DriverDraft {
            status: Some("gone".to_string()),
            ..DriverDraft::default()
        });

        assert_eq!(driver.status, DriverStatus::Active);
    }

    #[test]
    fn test_blank_enum_text_defaults_without_coercion() {
        // Blank input takes the quiet defaulting path, not the logged one.
        assert_eq!(
            parse_or_default("", "status", VehicleStatus::from_text),
            VehicleStatus::Active
        );
        assert_eq!(
            parse_or_default("in service", "status", VehicleStatus::from_text),
            VehicleStatus::InService
        );
    }

    #[test]
    fn test_driver_defaulting_for_blank_fields() {
        let driver = Driver::from_draft(DriverDraft::default());

        assert_eq!(driver.name, "Unnamed driver");
        assert_eq!(driver.email, "unknown@oxifleet.com");
        assert_eq!(driver.phone, "N/A");
        assert_eq!(driver.license, "N/A");
        assert_eq!(driver.status, DriverStatus::Active);
        assert_eq!(driver.notes, "");
        let re = regex::Regex::new(r"^DR-[A-Z0-9]{3}$").unwrap();
        assert!(re.is_match(&driver.id), "bad id: {}", driver.id);
    }

    #[test]
    fn test_driver_status_parsing() {
        assert_eq!(DriverStatus::from_text("ON LEAVE"), Some(DriverStatus::OnLeave));
        assert_eq!(DriverStatus::from_text("inactive"), Some(DriverStatus::Inactive));
        assert_eq!(DriverStatus::from_text("gone"), None);
    }

    #[test]
    fn test_status_serializes_with_display_text() {
        let json = serde_json::to_string(&VehicleStatus::InService).unwrap();
        assert_eq!(json, "\"In service\"");

        let json = serde_json::to_string(&DriverStatus::OnLeave).unwrap();
        assert_eq!(json, "\"On leave\"");
    }

    #[test]
    fn test_vehicle_json_shape() {
        let vehicle = Vehicle::from_draft(VehicleDraft {
            id: Some("VH-1AB".to_string()),
            kind: Some("trailer".to_string()),
            ..VehicleDraft::default()
        });

        let value = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(value["id"], "VH-1AB");
        assert_eq!(value["type"], "Trailer");
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_vehicle_round_trips_through_json() {
        let vehicle = Vehicle::from_draft(VehicleDraft::default());
        let json = serde_json::to_string(&vehicle).unwrap();
        let back: Vehicle = serde_json::from_str(&json).unwrap();
        assert_eq!(vehicle, back);
    }

    #[test]
    fn test_display_matches_serialized_text() {
        assert_eq!(VehicleStatus::InService.to_string(), "In service");
        assert_eq!(VehicleType::Utility.to_string(), "Utility");
        assert_eq!(DriverStatus::OnLeave.to_string(), "On leave");
    }
}
