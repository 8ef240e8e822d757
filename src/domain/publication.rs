use serde::{Deserialize, Serialize};

use crate::domain::types::PublicationId;

/// Article shown on the publications feed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Publication {
    pub id: PublicationId,
    pub titre: String,
    #[serde(default)]
    pub extrait: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub auteur: String,
    #[serde(default)]
    pub categorie: String,
}

/// Payload posted to `/publications`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewPublication {
    pub titre: String,
    pub extrait: String,
    pub date: String,
    pub auteur: String,
    pub categorie: String,
}
