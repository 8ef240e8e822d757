//! DTOs shaped for the booking page template.

use serde::Serialize;

use crate::booking::{BookingSelection, SelectedAct};
use crate::constants::TIME_SLOTS;
use crate::domain::dentist::Dentist;
use crate::domain::service::CatalogService;
use crate::forms::FieldErrors;
use crate::forms::booking::BookingForm;

/// Selected act joined with its catalog entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectedActRow {
    pub service_id: i64,
    pub name: String,
    pub catalog_price: f64,
    /// Billed price as typed back into the input; empty when unparsable.
    pub billed_price: String,
    pub note: String,
}

impl SelectedActRow {
    fn new(act: &SelectedAct, catalog: &[CatalogService]) -> Self {
        let service = catalog.iter().find(|service| service.id == act.service_id);
        Self {
            service_id: act.service_id.get(),
            name: service.map(|s| s.name.clone()).unwrap_or_default(),
            catalog_price: service.map(|s| s.price).unwrap_or_default(),
            billed_price: if act.billed_price.is_finite() {
                act.billed_price.to_string()
            } else {
                String::new()
            },
            note: act.note.clone(),
        }
    }
}

/// Everything the booking page renders while the form is being filled.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub dentists: Vec<Dentist>,
    pub available: Vec<CatalogService>,
    pub selected: Vec<SelectedActRow>,
    pub total: f64,
    pub time_slots: &'static [&'static str],
    pub dentist_id: String,
    pub date: String,
    pub time: String,
    pub details: String,
    pub errors: FieldErrors,
}

impl BookingView {
    pub fn new(
        dentists: Vec<Dentist>,
        catalog: &[CatalogService],
        selection: &BookingSelection,
        form: &BookingForm,
        errors: FieldErrors,
    ) -> Self {
        Self {
            dentists,
            available: selection.available(catalog).into_iter().cloned().collect(),
            selected: selection
                .acts()
                .iter()
                .map(|act| SelectedActRow::new(act, catalog))
                .collect(),
            total: selection
                .acts()
                .iter()
                .map(|act| act.billed_price)
                .filter(|price| price.is_finite())
                .sum(),
            time_slots: TIME_SLOTS,
            dentist_id: form.dentist_id.trim().to_string(),
            date: form.date.trim().to_string(),
            time: form.time.trim().to_string(),
            details: form.details.clone(),
            errors,
        }
    }
}

/// Confirmation shown once the appointment was sent.
#[derive(Debug, Clone, Serialize)]
pub struct BookingSummary {
    pub dentist_name: String,
    pub date: String,
    pub time: String,
    pub details: String,
    pub acts: Vec<SelectedActRow>,
    pub total: f64,
}

impl BookingSummary {
    pub fn new(
        dentist_name: String,
        date: String,
        time: String,
        details: String,
        selection: &BookingSelection,
        catalog: &[CatalogService],
    ) -> Self {
        Self {
            dentist_name,
            date,
            time,
            details,
            acts: selection
                .acts()
                .iter()
                .map(|act| SelectedActRow::new(act, catalog))
                .collect(),
            total: selection.total(),
        }
    }
}
