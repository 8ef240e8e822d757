//! Service selection and payload assembly for the booking page.
//!
//! Only the selection is stored. The list of services still available is
//! always derived as `catalog − selection`, so a service cannot end up in both
//! lists or in neither.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::appointment::{AppointmentStatus, IdRef, NewAct, NewAppointment};
use crate::domain::service::CatalogService;
use crate::domain::types::{DentistId, PatientId, ServiceId};

/// Catalog service chosen for the appointment, with its billing line.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SelectedAct {
    pub service_id: ServiceId,
    pub billed_price: f64,
    pub note: String,
}

impl SelectedAct {
    /// New act billed at the catalog price, without a note.
    pub fn from_service(service: &CatalogService) -> Self {
        Self {
            service_id: service.id,
            billed_price: service.price,
            note: String::new(),
        }
    }
}

/// Ordered set of selected acts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingSelection {
    acts: Vec<SelectedAct>,
}

impl BookingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a selection posted back by the browser.
    ///
    /// Acts referring to services missing from the catalog are dropped, as
    /// are repeated ids (the first occurrence wins).
    pub fn from_acts<I>(catalog: &[CatalogService], acts: I) -> Self
    where
        I: IntoIterator<Item = SelectedAct>,
    {
        let mut selection = Self::new();
        for act in acts {
            let known = catalog.iter().any(|service| service.id == act.service_id);
            if known && !selection.contains(act.service_id) {
                selection.acts.push(act);
            }
        }
        selection
    }

    pub fn acts(&self) -> &[SelectedAct] {
        &self.acts
    }

    pub fn is_empty(&self) -> bool {
        self.acts.is_empty()
    }

    pub fn contains(&self, service_id: ServiceId) -> bool {
        self.acts.iter().any(|act| act.service_id == service_id)
    }

    /// Moves a catalog service into the selection.
    ///
    /// No-op when the service is already selected or unknown to the catalog.
    #[must_use]
    pub fn add(mut self, catalog: &[CatalogService], service_id: ServiceId) -> Self {
        if self.contains(service_id) {
            return self;
        }
        if let Some(service) = catalog.iter().find(|service| service.id == service_id) {
            self.acts.push(SelectedAct::from_service(service));
        }
        self
    }

    /// Moves a service back to the available list; no-op when not selected.
    #[must_use]
    pub fn remove(mut self, service_id: ServiceId) -> Self {
        self.acts.retain(|act| act.service_id != service_id);
        self
    }

    /// Replaces the billing line of a selected act in place.
    #[must_use]
    pub fn update_act(mut self, service_id: ServiceId, billed_price: f64, note: &str) -> Self {
        if let Some(act) = self.acts.iter_mut().find(|act| act.service_id == service_id) {
            act.billed_price = billed_price;
            act.note = note.to_string();
        }
        self
    }

    /// Catalog services not selected, sorted by id.
    pub fn available<'a>(&self, catalog: &'a [CatalogService]) -> Vec<&'a CatalogService> {
        let mut available = catalog
            .iter()
            .filter(|service| !self.contains(service.id))
            .collect::<Vec<_>>();
        available.sort_by_key(|service| service.id);
        available
    }

    pub fn total(&self) -> f64 {
        self.acts.iter().map(|act| act.billed_price).sum()
    }

    pub fn to_new_acts(&self) -> Vec<NewAct> {
        self.acts
            .iter()
            .map(|act| NewAct {
                service: IdRef { id: act.service_id },
                billed_price: act.billed_price,
                note: act.note.clone(),
            })
            .collect()
    }
}

/// Validated booking, ready to be sent once.
#[derive(Clone, Debug, PartialEq)]
pub struct AppointmentDraft {
    pub dentist_id: DentistId,
    pub date: NaiveDate,
    pub time: String,
    pub details: String,
    pub selection: BookingSelection,
}

impl AppointmentDraft {
    /// Nested payload expected by `POST /rendezvous`.
    pub fn into_payload(self, patient_id: PatientId) -> NewAppointment {
        NewAppointment {
            date: self.date.format("%Y-%m-%d").to_string(),
            time: self.time,
            status: AppointmentStatus::INITIAL,
            details: self.details,
            patient: IdRef { id: patient_id },
            dentist: IdRef { id: self.dentist_id },
            acts: self.selection.to_new_acts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn service(id: i64, price: f64) -> CatalogService {
        CatalogService {
            id: ServiceId::new(id).unwrap(),
            name: format!("Service #{id}"),
            service_type: "Dentisterie générale".into(),
            description: String::new(),
            price,
        }
    }

    fn catalog() -> Vec<CatalogService> {
        vec![service(3, 80.0), service(1, 35.0), service(2, 60.0)]
    }

    fn id(value: i64) -> ServiceId {
        ServiceId::new(value).unwrap()
    }

    #[derive(Clone, Copy, Debug)]
    enum Op {
        Add(i64),
        Remove(i64),
    }

    fn all_sequences(len: usize) -> Vec<Vec<Op>> {
        let ops = (1..=4)
            .flat_map(|i| [Op::Add(i), Op::Remove(i)])
            .collect::<Vec<_>>();
        let mut sequences = vec![Vec::new()];
        for _ in 0..len {
            sequences = sequences
                .into_iter()
                .flat_map(|seq| {
                    ops.iter().map(move |op| {
                        let mut next = seq.clone();
                        next.push(*op);
                        next
                    })
                })
                .collect();
        }
        sequences
    }

    #[test]
    fn selection_and_available_partition_the_catalog() {
        let catalog = catalog();
        let all_ids = catalog.iter().map(|s| s.id).collect::<BTreeSet<_>>();

        for len in 0..=4 {
            for sequence in all_sequences(len) {
                let mut selection = BookingSelection::new();
                for op in &sequence {
                    selection = match *op {
                        Op::Add(i) => selection.add(&catalog, id(i)),
                        Op::Remove(i) => selection.remove(id(i)),
                    };
                }

                let selected = selection
                    .acts()
                    .iter()
                    .map(|a| a.service_id)
                    .collect::<BTreeSet<_>>();
                let available = selection
                    .available(&catalog)
                    .iter()
                    .map(|s| s.id)
                    .collect::<BTreeSet<_>>();

                assert!(
                    selected.is_disjoint(&available),
                    "overlap after {sequence:?}"
                );
                assert_eq!(
                    selected.union(&available).copied().collect::<BTreeSet<_>>(),
                    all_ids,
                    "lost a service after {sequence:?}"
                );
                assert_eq!(selected.len(), selection.acts().len());
            }
        }
    }

    #[test]
    fn add_defaults_price_and_is_idempotent() {
        let catalog = catalog();
        let selection = BookingSelection::new().add(&catalog, id(2));

        assert_eq!(
            selection.acts(),
            &[SelectedAct {
                service_id: id(2),
                billed_price: 60.0,
                note: String::new(),
            }]
        );

        let edited = selection.update_act(id(2), 45.0, "remise");
        let again = edited.clone().add(&catalog, id(2));
        assert_eq!(again, edited);
    }

    #[test]
    fn unknown_or_unselected_ids_are_ignored() {
        let catalog = catalog();
        let selection = BookingSelection::new().add(&catalog, id(9));
        assert!(selection.is_empty());

        let selection = BookingSelection::new().add(&catalog, id(1));
        assert_eq!(selection.clone().remove(id(3)), selection);
    }

    #[test]
    fn available_is_sorted_by_id() {
        let catalog = catalog();
        let selection = BookingSelection::new()
            .add(&catalog, id(1))
            .add(&catalog, id(3))
            .remove(id(1));

        let available = selection
            .available(&catalog)
            .iter()
            .map(|s| s.id.get())
            .collect::<Vec<_>>();
        assert_eq!(available, vec![1, 2]);
    }

    #[test]
    fn posted_acts_are_filtered_against_catalog() {
        let catalog = catalog();
        let acts = vec![
            SelectedAct {
                service_id: id(1),
                billed_price: 30.0,
                note: "a".into(),
            },
            SelectedAct {
                service_id: id(8),
                billed_price: 10.0,
                note: String::new(),
            },
            SelectedAct {
                service_id: id(1),
                billed_price: 99.0,
                note: "dup".into(),
            },
        ];

        let selection = BookingSelection::from_acts(&catalog, acts);

        assert_eq!(selection.acts().len(), 1);
        assert_eq!(selection.acts()[0].billed_price, 30.0);
        assert_eq!(selection.total(), 30.0);
    }

    #[test]
    fn payload_nests_references_and_acts() {
        let catalog = catalog();
        let draft = AppointmentDraft {
            dentist_id: DentistId::new(2).unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            time: "10:30".into(),
            details: "Contrôle annuel".into(),
            selection: BookingSelection::new()
                .add(&catalog, id(3))
                .update_act(id(3), 70.0, "fidélité"),
        };

        let payload = draft.into_payload(PatientId::new(7).unwrap());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "date": "2025-03-14",
                "time": "10:30",
                "status": "pending",
                "details": "Contrôle annuel",
                "patient": {"id": 7},
                "dentist": {"id": 2},
                "acts": [{"service": {"id": 3}, "billed_price": 70.0, "note": "fidélité"}],
            })
        );
    }
}
