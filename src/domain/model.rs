use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One purchasable trade in the service catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCode {
    WallPainting,
    SkimCoating,
    Wallpapering,
    Varnishing,
    MoldRemediation,
    ResilientFlooring,
    EpoxyFlooring,
    /// Codes this build does not know about. They set no profile flags.
    #[serde(other)]
    Other,
}

impl ServiceCode {
    pub const CATALOG: [ServiceCode; 7] = [
        ServiceCode::WallPainting,
        ServiceCode::SkimCoating,
        ServiceCode::Wallpapering,
        ServiceCode::Varnishing,
        ServiceCode::MoldRemediation,
        ServiceCode::ResilientFlooring,
        ServiceCode::EpoxyFlooring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCode::WallPainting => "wall-painting",
            ServiceCode::SkimCoating => "skim-coating",
            ServiceCode::Wallpapering => "wallpapering",
            ServiceCode::Varnishing => "varnishing",
            ServiceCode::MoldRemediation => "mold-remediation",
            ServiceCode::ResilientFlooring => "resilient-flooring",
            ServiceCode::EpoxyFlooring => "epoxy-flooring",
            ServiceCode::Other => "other",
        }
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Apartment,
    House,
    Commercial,
}

/// Which size answer is authoritative. The other one is ignored even if populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeMode {
    #[default]
    RoomCount,
    WallArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinishTier {
    Standard,
    Colored,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkimGrade {
    Standard,
    Fine,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallpaperType {
    BaseLiner,
    SmoothFleece,
    Patterned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    Doors,
    Radiators,
    WindowFrames,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildingCondition {
    Standard,
    OldBuilding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddOn {
    Masking,
    FurnitureMoving,
    RemoveOldCovering,
    LevelSubstrate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub callback_window: Option<String>,
}

/// Reference to a photo uploaded out of band. The engine never reads its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: Option<u64>,
}

/// Opaque result of the postal-code distance lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceAnnotation {
    pub postal_code: String,
    pub distance_km: u32,
    pub outside_service_area: bool,
    #[serde(default)]
    pub is_estimate: bool,
}

/// Every answer given in the quote wizard.
///
/// Area and count fields are `None` when absent; a present value is never negative.
/// Detail fields are only read when their owning service is selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub postal_code: String,
    pub property_type: Option<PropertyType>,
    pub selected_services: BTreeSet<ServiceCode>,
    pub size_mode: SizeMode,
    pub room_count: Option<u32>,
    pub wall_area_sqm: Option<f64>,
    pub mold_area_sqm: Option<f64>,
    pub epoxy_area_sqm: Option<f64>,
    pub floor_area_sqm: Option<f64>,
    pub element_type: Option<ElementType>,
    pub element_count: Option<u32>,
    pub finish_tier: Option<FinishTier>,
    pub wallpaper_type: Option<WallpaperType>,
    pub skim_grade: Option<SkimGrade>,
    pub building_condition: Option<BuildingCondition>,
    pub add_ons: BTreeSet<AddOn>,
    pub contact: ContactDetails,
    pub attachment: Option<Attachment>,
    pub distance: Option<DistanceAnnotation>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_service(&self, service: ServiceCode) -> bool {
        self.selected_services.contains(&service)
    }

    pub fn has_add_on(&self, add_on: AddOn) -> bool {
        self.add_ons.contains(&add_on)
    }

    pub fn is_old_building(&self) -> bool {
        self.building_condition == Some(BuildingCondition::OldBuilding)
    }
}

/// Parse free text from a numeric field. Anything that is not a finite,
/// non-negative number is treated as absent.
pub fn coerce_amount(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// Like [`coerce_amount`] but for counts; fractions are truncated.
pub fn coerce_count(raw: &str) -> Option<u32> {
    // Already finite and non-negative; counts beyond u32 clamp to the maximum.
    coerce_amount(raw).map(|value| value.trunc().min(f64::from(u32::MAX)) as u32)
}
