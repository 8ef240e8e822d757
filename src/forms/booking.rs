//! Booking page form.
//!
//! The page posts its whole state on every button press: the scalar fields,
//! the current selection as parallel `act_*` arrays, and the service picked
//! in either list. Repeated keys require `serde_html_form` to decode.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::booking::{AppointmentDraft, BookingSelection, SelectedAct};
use crate::domain::service::CatalogService;
use crate::domain::types::{DentistId, ServiceId};
use crate::forms::{FieldErrors, FormError, date_format, parse_amount, parse_date, trim_in_place};

/// Button pressed on the booking page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingAction {
    /// Move the service picked in the available list to the selection.
    Add,
    /// Move the service picked in the selection back to the available list.
    Remove,
    Submit,
    /// Re-render with the posted values (e.g. after editing a billed price).
    Refresh,
}

impl BookingAction {
    pub fn parse(value: &str) -> Self {
        match value {
            "add" => Self::Add,
            "remove" => Self::Remove,
            "submit" => Self::Submit,
            _ => Self::Refresh,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct BookingForm {
    pub action: String,
    #[validate(length(min = 1, message = "Veuillez sélectionner un dentiste"))]
    pub dentist_id: String,
    #[validate(
        length(min = 1, message = "Veuillez choisir une date"),
        custom(function = "date_format")
    )]
    pub date: String,
    #[validate(length(min = 1, message = "Veuillez choisir une heure"))]
    pub time: String,
    #[validate(length(
        min = 1,
        message = "Veuillez décrire le motif de votre rendez-vous"
    ))]
    pub details: String,
    pub act_service_id: Vec<String>,
    pub act_billed_price: Vec<String>,
    pub act_note: Vec<String>,
    /// Service picked in the available list.
    pub pick_available: String,
    /// Service picked in the selected list.
    pub pick_selected: String,
}

impl BookingForm {
    /// Decodes an `application/x-www-form-urlencoded` body.
    pub fn from_urlencoded(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| FormError::Malformed(err.to_string()))
    }

    pub fn action(&self) -> BookingAction {
        BookingAction::parse(self.action.trim())
    }

    /// Acts carried by the posted `act_*` arrays, in posted order.
    ///
    /// Billed prices that do not parse are kept as `NaN` so the submit check
    /// can report them.
    pub fn posted_acts(&self) -> Vec<SelectedAct> {
        self.act_service_id
            .iter()
            .enumerate()
            .filter_map(|(index, raw_id)| {
                let service_id = ServiceId::parse(raw_id).ok()?;
                let billed_price = self
                    .act_billed_price
                    .get(index)
                    .and_then(|raw| parse_amount(raw))
                    .unwrap_or(f64::NAN);
                let note = self
                    .act_note
                    .get(index)
                    .map(|note| note.trim().to_string())
                    .unwrap_or_default();
                Some(SelectedAct {
                    service_id,
                    billed_price,
                    note,
                })
            })
            .collect()
    }

    /// Posted selection restricted to services of `catalog`.
    pub fn posted_selection(&self, catalog: &[CatalogService]) -> BookingSelection {
        BookingSelection::from_acts(catalog, self.posted_acts())
    }

    /// Selection after applying the pressed button.
    pub fn apply_action(&self, catalog: &[CatalogService]) -> BookingSelection {
        let selection = self.posted_selection(catalog);
        match self.action() {
            BookingAction::Add => match ServiceId::parse(&self.pick_available) {
                Ok(service_id) => selection.add(catalog, service_id),
                Err(_) => selection,
            },
            BookingAction::Remove => match ServiceId::parse(&self.pick_selected) {
                Ok(service_id) => selection.remove(service_id),
                Err(_) => selection,
            },
            BookingAction::Submit | BookingAction::Refresh => selection,
        }
    }

    /// Trims the scalar fields and validates them along with the posted
    /// billed prices. Needs no catalog, so it runs before any request.
    pub fn check(&mut self) -> Result<(), FieldErrors> {
        for field in [
            &mut self.dentist_id,
            &mut self.date,
            &mut self.time,
            &mut self.details,
        ] {
            trim_in_place(field);
        }

        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => FieldErrors::from(&errors),
        };

        if DentistId::parse(&self.dentist_id).is_err() {
            errors.insert("dentist_id", DENTIST_REQUIRED);
        }

        if has_invalid_price(&self.posted_acts()) {
            errors.insert("acts", INVALID_PRICES);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates the form into a draft carrying `selection`.
    ///
    /// An empty selection is valid.
    pub fn into_draft(mut self, selection: BookingSelection) -> Result<AppointmentDraft, FieldErrors> {
        self.check()?;

        let mut errors = FieldErrors::new();
        if has_invalid_price(selection.acts()) {
            errors.insert("acts", INVALID_PRICES);
        }

        match (DentistId::parse(&self.dentist_id), parse_date(&self.date)) {
            (Ok(dentist_id), Some(date)) if errors.is_empty() => Ok(AppointmentDraft {
                dentist_id,
                date,
                time: self.time,
                details: self.details,
                selection,
            }),
            _ => Err(errors),
        }
    }
}

const DENTIST_REQUIRED: &str = "Veuillez sélectionner un dentiste";
const INVALID_PRICES: &str = "Les tarifs facturés doivent être des montants positifs";

fn has_invalid_price(acts: &[SelectedAct]) -> bool {
    acts.iter()
        .any(|act| !act.billed_price.is_finite() || act.billed_price < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogService> {
        [(1, 35.0), (2, 60.0), (3, 80.0)]
            .into_iter()
            .map(|(id, price)| CatalogService {
                id: ServiceId::new(id).unwrap(),
                name: format!("Service #{id}"),
                service_type: String::new(),
                description: String::new(),
                price,
            })
            .collect()
    }

    #[test]
    fn decodes_repeated_act_fields() {
        let body = b"action=add&dentist_id=2&date=2025-03-14&time=10%3A30&details=Contr%C3%B4le\
&act_service_id=1&act_billed_price=30&act_note=remise\
&act_service_id=3&act_billed_price=80&act_note=\
&pick_available=2&pick_selected=";

        let form = BookingForm::from_urlencoded(body).unwrap();

        assert_eq!(form.action(), BookingAction::Add);
        assert_eq!(form.act_service_id, vec!["1", "3"]);
        assert_eq!(form.time, "10:30");

        let selection = form.apply_action(&catalog());
        let ids = selection
            .acts()
            .iter()
            .map(|act| act.service_id.get())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 3, 2]);
        assert_eq!(selection.acts()[0].billed_price, 30.0);
        assert_eq!(selection.acts()[2].billed_price, 60.0);
    }

    #[test]
    fn remove_action_returns_service_to_available() {
        let form = BookingForm {
            action: "remove".into(),
            act_service_id: vec!["1".into(), "2".into()],
            act_billed_price: vec!["35".into(), "60".into()],
            act_note: vec![String::new(), String::new()],
            pick_selected: "1".into(),
            ..BookingForm::default()
        };

        let catalog = catalog();
        let selection = form.apply_action(&catalog);
        let available = selection
            .available(&catalog)
            .iter()
            .map(|s| s.id.get())
            .collect::<Vec<_>>();

        assert_eq!(available, vec![1, 3]);
    }

    #[test]
    fn missing_dentist_is_reported() {
        let form = BookingForm {
            action: "submit".into(),
            date: "2025-03-14".into(),
            time: "09:00".into(),
            details: "Douleur".into(),
            ..BookingForm::default()
        };

        let errors = form.into_draft(BookingSelection::new()).unwrap_err();

        assert_eq!(errors.get("dentist_id"), Some("Veuillez sélectionner un dentiste"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn blank_details_and_time_are_reported() {
        let form = BookingForm {
            dentist_id: "2".into(),
            date: "2025-03-14".into(),
            details: "   ".into(),
            ..BookingForm::default()
        };

        let errors = form.into_draft(BookingSelection::new()).unwrap_err();

        assert_eq!(errors.get("time"), Some("Veuillez choisir une heure"));
        assert_eq!(
            errors.get("details"),
            Some("Veuillez décrire le motif de votre rendez-vous")
        );
    }

    #[test]
    fn unparsable_billed_price_blocks_submit() {
        let catalog = catalog();
        let form = BookingForm {
            action: "submit".into(),
            dentist_id: "2".into(),
            date: "2025-03-14".into(),
            time: "09:00".into(),
            details: "Douleur".into(),
            act_service_id: vec!["1".into()],
            act_billed_price: vec!["abc".into()],
            act_note: vec![String::new()],
            ..BookingForm::default()
        };

        let selection = form.apply_action(&catalog);
        let errors = form.into_draft(selection).unwrap_err();

        assert!(errors.contains("acts"));
    }

    #[test]
    fn empty_selection_is_a_valid_booking() {
        let form = BookingForm {
            action: "submit".into(),
            dentist_id: "4".into(),
            date: "2025-03-14".into(),
            time: "14:30".into(),
            details: "Contrôle".into(),
            ..BookingForm::default()
        };

        let draft = form.into_draft(BookingSelection::new()).unwrap();

        assert_eq!(draft.dentist_id.get(), 4);
        assert!(draft.selection.is_empty());
    }
}
