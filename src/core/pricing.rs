use crate::config::pricing::PricingConfig;
use crate::domain::model::{AddOn, ElementType, FinishTier, FormState, SizeMode, SkimGrade, WallpaperType};
use crate::domain::quote::{Component, Estimate, PriceBreakdown};
use crate::domain::services::{classify, ServiceProfile};

/// Turns a form snapshot into a price breakdown and a rounded estimate range.
///
/// Every operation is a pure function of the snapshot and the injected
/// [`PricingConfig`]. Missing or non-positive inputs price at zero instead of
/// failing; blocking incomplete answers is the gate's job.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Wall area in m² according to the active size mode.
    pub fn wall_area(&self, state: &FormState) -> f64 {
        match state.size_mode {
            SizeMode::RoomCount => state
                .room_count
                .map(|rooms| f64::from(rooms) * self.config.size.sqm_per_room)
                .unwrap_or(0.0),
            SizeMode::WallArea => state.wall_area_sqm.unwrap_or(0.0),
        }
    }

    /// Per-component amounts before the old-building surcharge and the minimum order.
    pub fn breakdown(&self, state: &FormState) -> PriceBreakdown {
        let profile = classify(&state.selected_services);
        self.breakdown_for(state, &profile)
    }

    fn breakdown_for(&self, state: &FormState, profile: &ServiceProfile) -> PriceBreakdown {
        let area = self.wall_area(state);
        let mut breakdown = PriceBreakdown::default();

        breakdown.set(Component::WallsAndCeilings, self.walls_and_ceilings(state, profile, area));
        breakdown.set(Component::SkimCoating, self.skim_coating(state, profile, area));
        breakdown.set(Component::Wallpapering, self.wallpapering(state, profile, area));
        breakdown.set(Component::Varnishing, self.varnishing(state, profile));
        breakdown.set(Component::MoldRemediation, self.mold_remediation(state, profile, area));
        breakdown.set(Component::ResilientFlooring, self.resilient_flooring(state, profile));
        breakdown.set(Component::EpoxyFlooring, self.epoxy_flooring(state, profile));
        breakdown.set(Component::AddOns, self.flat_add_ons(state));

        breakdown
    }

    /// `None` when nothing is selected; a zero-priced selection still yields an estimate.
    pub fn estimate(&self, state: &FormState) -> Option<Estimate> {
        if state.selected_services.is_empty() {
            return None;
        }

        let profile = classify(&state.selected_services);
        let mut breakdown = self.breakdown_for(state, &profile);
        let adjustments = &self.config.adjustments;

        let mut subtotal = breakdown.total();

        let mut surcharge = 0.0;
        if state.is_old_building() {
            surcharge = subtotal * (adjustments.old_building_factor - 1.0);
            breakdown.set(Component::OldBuildingSurcharge, surcharge);
            subtotal *= adjustments.old_building_factor;
        }

        let minimum_order_applied = subtotal < adjustments.minimum_order;
        if minimum_order_applied {
            subtotal = adjustments.minimum_order;
        }

        let min = round_to_ten(subtotal * adjustments.range_lower);
        let max = round_to_ten(subtotal * adjustments.range_upper);

        tracing::trace!(subtotal, surcharge, min, max, "estimate computed");

        Some(Estimate {
            min,
            max,
            subtotal,
            surcharge,
            minimum_order_applied,
            breakdown,
        })
    }

    fn walls_and_ceilings(&self, state: &FormState, profile: &ServiceProfile, area: f64) -> f64 {
        if !profile.has_wall_painting || area <= 0.0 {
            return 0.0;
        }
        let wall = &self.config.wall;
        let unit_rate = wall.base
            + match state.finish_tier {
                Some(FinishTier::Colored) => wall.colored_surcharge,
                Some(FinishTier::Premium) => wall.premium_surcharge,
                Some(FinishTier::Standard) | None => 0.0,
            };
        let ceiling_area = area * wall.ceiling_ratio;
        area * unit_rate + ceiling_area * wall.ceiling
    }

    fn skim_coating(&self, state: &FormState, profile: &ServiceProfile, area: f64) -> f64 {
        if area <= 0.0 {
            return 0.0;
        }
        if profile.has_skim_coating {
            let grade = state.skim_grade.unwrap_or(SkimGrade::Standard);
            return area * self.skim_rate(grade);
        }
        // A grade chosen alongside other wall work is priced as an add-on.
        match state.skim_grade {
            Some(grade) if profile.has_standard_wall_work => area * self.skim_rate(grade),
            _ => 0.0,
        }
    }

    fn skim_rate(&self, grade: SkimGrade) -> f64 {
        let skim = &self.config.skim;
        match grade {
            SkimGrade::Standard => skim.standard,
            SkimGrade::Fine => skim.fine,
            SkimGrade::Premium => skim.premium,
        }
    }

    fn wallpapering(&self, state: &FormState, profile: &ServiceProfile, area: f64) -> f64 {
        if !profile.has_wallpapering || area <= 0.0 {
            return 0.0;
        }
        let rates = &self.config.wallpaper;
        let rate = match state.wallpaper_type.unwrap_or(WallpaperType::BaseLiner) {
            WallpaperType::BaseLiner => rates.base_liner,
            WallpaperType::SmoothFleece => rates.smooth_fleece,
            WallpaperType::Patterned => rates.patterned,
        };
        area * rate
    }

    fn varnishing(&self, state: &FormState, profile: &ServiceProfile) -> f64 {
        if !profile.has_varnishing {
            return 0.0;
        }
        let count = state.element_count.unwrap_or(0);
        let rates = &self.config.elements;
        let per_element = match state.element_type.unwrap_or(ElementType::Doors) {
            ElementType::Doors => rates.door,
            ElementType::Radiators => rates.radiator,
            ElementType::WindowFrames => rates.window_frame,
            ElementType::Other => rates.other,
        };
        f64::from(count) * per_element
    }

    fn mold_remediation(&self, state: &FormState, profile: &ServiceProfile, area: f64) -> f64 {
        if !profile.has_mold_remediation {
            return 0.0;
        }
        let mold = &self.config.mold;
        let affected = match state.mold_area_sqm {
            Some(entered) if entered > 0.0 => entered,
            _ if area > 0.0 => area * mold.default_ratio,
            _ => mold.default_area_sqm,
        };
        mold.base_fee + affected * mold.per_sqm
    }

    fn resilient_flooring(&self, state: &FormState, profile: &ServiceProfile) -> f64 {
        let floor_area = state.floor_area_sqm.unwrap_or(0.0);
        if !profile.has_resilient_flooring || floor_area <= 0.0 {
            return 0.0;
        }
        let rates = &self.config.flooring;
        let mut rate = rates.resilient_base;
        if state.has_add_on(AddOn::RemoveOldCovering) {
            rate += rates.remove_old_covering;
        }
        if state.has_add_on(AddOn::LevelSubstrate) {
            rate += rates.level_substrate;
        }
        floor_area * rate
    }

    fn epoxy_flooring(&self, state: &FormState, profile: &ServiceProfile) -> f64 {
        let epoxy_area = state.epoxy_area_sqm.unwrap_or(0.0);
        if !profile.has_epoxy_flooring || epoxy_area <= 0.0 {
            return 0.0;
        }
        epoxy_area * self.config.flooring.epoxy
    }

    fn flat_add_ons(&self, state: &FormState) -> f64 {
        let fees = &self.config.add_ons;
        let mut total = 0.0;
        if state.has_add_on(AddOn::Masking) {
            total += fees.masking;
        }
        if state.has_add_on(AddOn::FurnitureMoving) {
            total += fees.furniture_moving;
        }
        total
    }
}

/// Nearest multiple of ten, halves away from zero. Negative input clamps to zero.
fn round_to_ten(amount: f64) -> u64 {
    ((amount / 10.0).round() * 10.0).max(0.0) as u64
}
