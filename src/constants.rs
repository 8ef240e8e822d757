//! Static enumerations offered by the form selectors.

/// Diplomas an aide-soignant can register with.
pub const DIPLOMAS: &[&str] = &[
    "Aide en chirurgie bucco-dentaire",
    "Assistance en parodontologie",
    "Aide en pédodontie",
    "Assistance en implantologie",
    "Diplôme d'État de Docteur en Chirurgie Dentaire",
    "Certificat d'études supérieures de chirurgie dentaire",
];

/// Social coverage schemes a patient can declare.
pub const SOCIAL_COVERAGES: &[&str] = &[
    "CNOPS",
    "CNSS",
    "Assurance privée",
    "Mutuelle générale",
    "Remboursement",
    "Santé publique",
    "Médecin de la famille",
    "Autre",
];

pub const SERVICE_TYPES: &[&str] = &[
    "Dentisterie générale",
    "Diagnostic et soins courants",
    "Parodontologie",
    "Radiologie et imagerie dentaire",
    "Actes chirurgicaux",
    "Endodontie",
    "Esthétique dentaire",
    "Implantologie",
];

pub const PUBLICATION_CATEGORIES: &[&str] = &[
    "Article scientifique",
    "Étude de cas",
    "Lancement d'un produit ou service",
    "Actualités/innovation",
    "Hygiène",
    "Prévention",
];

pub const BLOOD_GROUPS: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Sex codes paired with their display label.
pub const SEXES: &[(&str, &str)] = &[("M", "Masculin"), ("F", "Féminin")];

/// Appointment slots offered by the booking page.
pub const TIME_SLOTS: &[&str] = &[
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "14:00", "14:30", "15:00", "15:30",
    "16:00", "16:30", "17:00",
];
