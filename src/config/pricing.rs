//! Every rate, factor and floor the pricing engine uses.
//!
//! Defaults are the net prices (excluding VAT) of the published calculator.
//! A TOML `[pricing]` table may override any subset of them; missing keys keep
//! their default.

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_negative, validate_range, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub wall: WallRates,
    pub skim: SkimRates,
    pub wallpaper: WallpaperRates,
    pub elements: ElementRates,
    pub mold: MoldRates,
    pub flooring: FlooringRates,
    pub add_ons: AddOnFees,
    pub adjustments: Adjustments,
    pub size: SizeAssumptions,
}

/// Per m² of wall area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallRates {
    pub base: f64,
    pub colored_surcharge: f64,
    pub premium_surcharge: f64,
    pub ceiling: f64,
    /// Ceiling area as a share of wall area.
    pub ceiling_ratio: f64,
}

impl Default for WallRates {
    fn default() -> Self {
        Self {
            base: 8.10,
            colored_surcharge: 2.50,
            premium_surcharge: 4.00,
            ceiling: 8.50,
            ceiling_ratio: 0.30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkimRates {
    pub standard: f64,
    pub fine: f64,
    pub premium: f64,
}

impl Default for SkimRates {
    fn default() -> Self {
        Self {
            standard: 6.0,
            fine: 10.0,
            premium: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallpaperRates {
    pub base_liner: f64,
    pub smooth_fleece: f64,
    pub patterned: f64,
}

impl Default for WallpaperRates {
    fn default() -> Self {
        Self {
            base_liner: 14.0,
            smooth_fleece: 18.0,
            patterned: 22.0,
        }
    }
}

/// Per piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementRates {
    pub door: f64,
    pub radiator: f64,
    pub window_frame: f64,
    /// Zero means "on request".
    pub other: f64,
}

impl Default for ElementRates {
    fn default() -> Self {
        Self {
            door: 120.0,
            radiator: 150.0,
            window_frame: 150.0,
            other: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoldRates {
    pub base_fee: f64,
    pub per_sqm: f64,
    /// Affected area assumed as a share of wall area when none was entered.
    pub default_ratio: f64,
    /// Affected area assumed when neither mold nor wall area is known.
    pub default_area_sqm: f64,
}

impl Default for MoldRates {
    fn default() -> Self {
        Self {
            base_fee: 150.0,
            per_sqm: 35.0,
            default_ratio: 0.20,
            default_area_sqm: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlooringRates {
    pub resilient_base: f64,
    pub remove_old_covering: f64,
    pub level_substrate: f64,
    pub epoxy: f64,
}

impl Default for FlooringRates {
    fn default() -> Self {
        Self {
            resilient_base: 25.0,
            remove_old_covering: 6.0,
            level_substrate: 8.0,
            epoxy: 150.0,
        }
    }
}

/// Flat fees, independent of area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOnFees {
    pub masking: f64,
    pub furniture_moving: f64,
}

impl Default for AddOnFees {
    fn default() -> Self {
        Self {
            masking: 120.0,
            furniture_moving: 120.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub old_building_factor: f64,
    pub minimum_order: f64,
    pub range_lower: f64,
    pub range_upper: f64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            old_building_factor: 1.20,
            minimum_order: 150.0,
            range_lower: 0.90,
            range_upper: 1.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeAssumptions {
    /// Average wall area of one room.
    pub sqm_per_room: f64,
}

impl Default for SizeAssumptions {
    fn default() -> Self {
        Self { sqm_per_room: 25.0 }
    }
}

impl PricingConfig {
    pub fn validate_config(&self) -> Result<()> {
        let rates = [
            ("pricing.wall.base", self.wall.base),
            ("pricing.wall.colored_surcharge", self.wall.colored_surcharge),
            ("pricing.wall.premium_surcharge", self.wall.premium_surcharge),
            ("pricing.wall.ceiling", self.wall.ceiling),
            ("pricing.skim.standard", self.skim.standard),
            ("pricing.skim.fine", self.skim.fine),
            ("pricing.skim.premium", self.skim.premium),
            ("pricing.wallpaper.base_liner", self.wallpaper.base_liner),
            ("pricing.wallpaper.smooth_fleece", self.wallpaper.smooth_fleece),
            ("pricing.wallpaper.patterned", self.wallpaper.patterned),
            ("pricing.elements.door", self.elements.door),
            ("pricing.elements.radiator", self.elements.radiator),
            ("pricing.elements.window_frame", self.elements.window_frame),
            ("pricing.elements.other", self.elements.other),
            ("pricing.mold.base_fee", self.mold.base_fee),
            ("pricing.mold.per_sqm", self.mold.per_sqm),
            ("pricing.mold.default_area_sqm", self.mold.default_area_sqm),
            ("pricing.flooring.resilient_base", self.flooring.resilient_base),
            ("pricing.flooring.remove_old_covering", self.flooring.remove_old_covering),
            ("pricing.flooring.level_substrate", self.flooring.level_substrate),
            ("pricing.flooring.epoxy", self.flooring.epoxy),
            ("pricing.add_ons.masking", self.add_ons.masking),
            ("pricing.add_ons.furniture_moving", self.add_ons.furniture_moving),
            ("pricing.adjustments.minimum_order", self.adjustments.minimum_order),
            ("pricing.adjustments.old_building_factor", self.adjustments.old_building_factor),
            ("pricing.adjustments.range_lower", self.adjustments.range_lower),
            ("pricing.adjustments.range_upper", self.adjustments.range_upper),
            ("pricing.size.sqm_per_room", self.size.sqm_per_room),
        ];
        for (field, value) in rates {
            validate_non_negative(field, value)?;
        }

        validate_range("pricing.wall.ceiling_ratio", self.wall.ceiling_ratio, 0.0, 1.0)?;
        validate_range("pricing.mold.default_ratio", self.mold.default_ratio, 0.0, 1.0)?;
        validate_range(
            "pricing.adjustments.old_building_factor",
            self.adjustments.old_building_factor,
            1.0,
            f64::MAX,
        )?;
        validate_range(
            "pricing.adjustments.range_lower",
            self.adjustments.range_lower,
            f64::MIN_POSITIVE,
            1.0,
        )?;
        validate_range(
            "pricing.adjustments.range_upper",
            self.adjustments.range_upper,
            1.0,
            f64::MAX,
        )?;

        Ok(())
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PricingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: PricingConfig = toml::from_str(
            r#"
[wall]
base = 9.0

[adjustments]
minimum_order = 300.0
"#,
        )
        .unwrap();

        assert_eq!(config.wall.base, 9.0);
        assert_eq!(config.wall.ceiling, 8.50);
        assert_eq!(config.adjustments.minimum_order, 300.0);
        assert_eq!(config.adjustments.range_upper, 1.15);
        assert_eq!(config.flooring.epoxy, 150.0);
    }

    #[test]
    fn test_rejects_discounting_surcharge() {
        let mut config = PricingConfig::default();
        config.adjustments.old_building_factor = 0.8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_range_factors() {
        let mut config = PricingConfig::default();
        config.adjustments.range_lower = 1.1;
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.adjustments.range_upper = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_rate() {
        let mut config = PricingConfig::default();
        config.skim.fine = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pricing.skim.fine"));
    }
}
