//! Classification of a service selection into the facts the rest of the
//! engine branches on. Nothing else in the crate inspects service codes
//! to decide which questions apply.

use crate::domain::model::ServiceCode;
use serde::Serialize;
use std::collections::BTreeSet;

/// Derived facts about a service selection. Never stored; recomputed on every change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceProfile {
    pub has_wall_painting: bool,
    pub has_skim_coating: bool,
    pub has_wallpapering: bool,
    pub has_varnishing: bool,
    pub has_mold_remediation: bool,
    pub has_resilient_flooring: bool,
    pub has_epoxy_flooring: bool,
    pub has_flooring: bool,
    pub has_standard_wall_work: bool,
    pub has_only_special_trades: bool,
    pub needs_size_question: bool,
    pub needs_color_question: bool,
    pub needs_skim_question: bool,
    pub needs_wallpaper_question: bool,
    pub needs_element_question: bool,
}

impl ServiceProfile {
    pub fn is_empty(&self) -> bool {
        *self == ServiceProfile::default()
    }
}

fn is_standard_wall_work(service: ServiceCode) -> bool {
    matches!(
        service,
        ServiceCode::WallPainting | ServiceCode::SkimCoating | ServiceCode::Wallpapering
    )
}

fn is_special_trade(service: ServiceCode) -> bool {
    matches!(
        service,
        ServiceCode::Varnishing
            | ServiceCode::MoldRemediation
            | ServiceCode::ResilientFlooring
            | ServiceCode::EpoxyFlooring
    )
}

pub fn classify(selected: &BTreeSet<ServiceCode>) -> ServiceProfile {
    let has = |service| selected.contains(&service);
    let has_standard_wall_work = selected.iter().copied().any(is_standard_wall_work);

    ServiceProfile {
        has_wall_painting: has(ServiceCode::WallPainting),
        has_skim_coating: has(ServiceCode::SkimCoating),
        has_wallpapering: has(ServiceCode::Wallpapering),
        has_varnishing: has(ServiceCode::Varnishing),
        has_mold_remediation: has(ServiceCode::MoldRemediation),
        has_resilient_flooring: has(ServiceCode::ResilientFlooring),
        has_epoxy_flooring: has(ServiceCode::EpoxyFlooring),
        has_flooring: has(ServiceCode::ResilientFlooring) || has(ServiceCode::EpoxyFlooring),
        has_standard_wall_work,
        has_only_special_trades: !selected.is_empty()
            && selected.iter().copied().all(is_special_trade),
        needs_size_question: has_standard_wall_work,
        needs_color_question: has(ServiceCode::WallPainting) || has(ServiceCode::Wallpapering),
        needs_skim_question: has_standard_wall_work,
        needs_wallpaper_question: has(ServiceCode::Wallpapering),
        needs_element_question: has(ServiceCode::Varnishing),
    }
}
