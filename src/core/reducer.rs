use crate::domain::model::{
    coerce_amount, coerce_count, AddOn, Attachment, BuildingCondition, DistanceAnnotation,
    ElementType, FinishTier, FormState, PropertyType, ServiceCode, SizeMode, SkimGrade,
    WallpaperType,
};
use serde::{Deserialize, Serialize};

/// Numeric inputs the wizard collects as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumericField {
    RoomCount,
    WallArea,
    MoldArea,
    EpoxyArea,
    FloorArea,
    ElementCount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "action", content = "value")]
pub enum FormAction {
    SetPostalCode(String),
    SetPropertyType(PropertyType),
    ToggleService(ServiceCode),
    SelectService(ServiceCode),
    DeselectService(ServiceCode),
    SetSizeMode(SizeMode),
    SetNumber { field: NumericField, raw: String },
    SetElementType(ElementType),
    SetFinishTier(FinishTier),
    SetWallpaperType(WallpaperType),
    SetSkimGrade(Option<SkimGrade>),
    SetBuildingCondition(BuildingCondition),
    ToggleAddOn(AddOn),
    SetContactName(String),
    SetContactPhone(String),
    SetContactEmail(String),
    SetCallbackWindow(Option<String>),
    Attach(Attachment),
    ClearAttachment,
    AnnotateDistance(DistanceAnnotation),
    ClearDistance,
    Reset,
}

pub const POSTAL_CODE_LEN: usize = 5;

/// Apply one action to a snapshot, returning the next snapshot.
pub fn reduce(state: &FormState, action: FormAction) -> FormState {
    let mut next = state.clone();
    match action {
        FormAction::SetPostalCode(raw) => {
            let digits: String = raw
                .chars()
                .filter(char::is_ascii_digit)
                .take(POSTAL_CODE_LEN)
                .collect();
            if next.distance.as_ref().is_some_and(|d| d.postal_code != digits) {
                next.distance = None;
            }
            next.postal_code = digits;
        }
        FormAction::SetPropertyType(property_type) => next.property_type = Some(property_type),
        FormAction::ToggleService(service) => {
            if !next.selected_services.remove(&service) {
                next.selected_services.insert(service);
            }
        }
        FormAction::SelectService(service) => {
            next.selected_services.insert(service);
        }
        FormAction::DeselectService(service) => {
            next.selected_services.remove(&service);
        }
        FormAction::SetSizeMode(mode) => next.size_mode = mode,
        FormAction::SetNumber { field, raw } => match field {
            NumericField::RoomCount => next.room_count = coerce_count(&raw),
            NumericField::WallArea => next.wall_area_sqm = coerce_amount(&raw),
            NumericField::MoldArea => next.mold_area_sqm = coerce_amount(&raw),
            NumericField::EpoxyArea => next.epoxy_area_sqm = coerce_amount(&raw),
            NumericField::FloorArea => next.floor_area_sqm = coerce_amount(&raw),
            NumericField::ElementCount => next.element_count = coerce_count(&raw),
        },
        FormAction::SetElementType(element_type) => next.element_type = Some(element_type),
        FormAction::SetFinishTier(tier) => next.finish_tier = Some(tier),
        FormAction::SetWallpaperType(wallpaper) => next.wallpaper_type = Some(wallpaper),
        FormAction::SetSkimGrade(grade) => next.skim_grade = grade,
        FormAction::SetBuildingCondition(condition) => next.building_condition = Some(condition),
        FormAction::ToggleAddOn(add_on) => {
            if !next.add_ons.remove(&add_on) {
                next.add_ons.insert(add_on);
            }
        }
        FormAction::SetContactName(name) => next.contact.name = name,
        FormAction::SetContactPhone(phone) => next.contact.phone = phone,
        FormAction::SetContactEmail(email) => next.contact.email = email.trim().to_string(),
        FormAction::SetCallbackWindow(window) => next.contact.callback_window = window,
        FormAction::Attach(attachment) => next.attachment = Some(attachment),
        FormAction::ClearAttachment => next.attachment = None,
        FormAction::AnnotateDistance(annotation) => {
            // Late results for a postal code the user already changed are dropped.
            if annotation.postal_code == next.postal_code {
                next.distance = Some(annotation);
            }
        }
        FormAction::ClearDistance => next.distance = None,
        FormAction::Reset => next = FormState::default(),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let state = FormState::default();
        let next = reduce(&state, FormAction::ToggleService(ServiceCode::WallPainting));
        assert!(state.selected_services.is_empty());
        assert!(next.has_service(ServiceCode::WallPainting));
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let state = FormState::default();
        let toggled = reduce(&state, FormAction::ToggleService(ServiceCode::Varnishing));
        let restored = reduce(&toggled, FormAction::ToggleService(ServiceCode::Varnishing));
        assert_eq!(restored, state);
    }

    #[test]
    fn test_postal_code_keeps_five_digits() {
        let state = reduce(
            &FormState::default(),
            FormAction::SetPostalCode("D-20 0951".to_string()),
        );
        assert_eq!(state.postal_code, "20095");
    }

    #[test]
    fn test_numeric_input_is_coerced() {
        let state = reduce(
            &FormState::default(),
            FormAction::SetNumber {
                field: NumericField::EpoxyArea,
                raw: "50".to_string(),
            },
        );
        assert_eq!(state.epoxy_area_sqm, Some(50.0));

        let state = reduce(
            &state,
            FormAction::SetNumber {
                field: NumericField::EpoxyArea,
                raw: "fünfzig".to_string(),
            },
        );
        assert_eq!(state.epoxy_area_sqm, None);
    }

    #[test]
    fn test_stale_distance_is_dropped() {
        let state = reduce(
            &FormState::default(),
            FormAction::SetPostalCode("20095".to_string()),
        );
        let annotation = DistanceAnnotation {
            postal_code: "20095".to_string(),
            distance_km: 0,
            outside_service_area: false,
            is_estimate: false,
        };
        let state = reduce(&state, FormAction::AnnotateDistance(annotation.clone()));
        assert_eq!(state.distance.as_ref(), Some(&annotation));

        let state = reduce(&state, FormAction::SetPostalCode("80331".to_string()));
        assert!(state.distance.is_none());

        let state = reduce(&state, FormAction::AnnotateDistance(annotation));
        assert!(state.distance.is_none());
    }

    #[test]
    fn test_action_json_shape() {
        let action: FormAction = serde_json::from_str(
            r#"{"action": "set-number", "value": {"field": "room-count", "raw": "3"}}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            FormAction::SetNumber {
                field: NumericField::RoomCount,
                raw: "3".to_string()
            }
        );

        let action: FormAction =
            serde_json::from_str(r#"{"action": "toggle-service", "value": "epoxy-flooring"}"#)
                .unwrap();
        assert_eq!(action, FormAction::ToggleService(ServiceCode::EpoxyFlooring));
    }
}
