use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::publication::NewPublication;
use crate::forms::{FieldErrors, date_format, trim_in_place};

/// Staff form writing a new article.
///
/// The page offers file and poster pickers, but only the text fields are
/// transmitted.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct PublicationForm {
    #[validate(length(min = 1, message = "Le titre est requis"))]
    pub title: String,
    #[validate(
        length(min = 1, message = "La date est requise"),
        custom(function = "date_format")
    )]
    pub date: String,
    #[validate(length(min = 1, message = "La catégorie est requise"))]
    pub category: String,
    #[validate(length(min = 1, message = "Le résumé est requis"))]
    pub summary: String,
}

/// Removes every tag (and the content of scripts and styles) from `value`.
///
/// The backend stores plain text and the pages escape it on render, so the
/// entities ammonia emits for text are turned back into characters.
fn strip_markup(value: &str) -> String {
    let cleaned = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(value)
        .to_string();
    cleaned
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

impl PublicationForm {
    pub fn check(&mut self) -> Result<(), FieldErrors> {
        for field in [
            &mut self.title,
            &mut self.date,
            &mut self.category,
            &mut self.summary,
        ] {
            trim_in_place(field);
        }
        self.validate().map_err(|errors| FieldErrors::from(&errors))
    }

    /// Payload signed by `author`; markup in the free text is stripped.
    pub fn to_new_publication(&self, author: &str) -> NewPublication {
        NewPublication {
            titre: strip_markup(&self.title),
            extrait: strip_markup(&self.summary),
            date: self.date.clone(),
            auteur: author.to_string(),
            categorie: self.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_markup_is_sanitized() {
        let mut form = PublicationForm {
            title: "Brossage".into(),
            date: "2025-01-15".into(),
            category: "Hygiène".into(),
            summary: "Deux fois par jour<script>alert(1)</script>".into(),
        };
        assert!(form.check().is_ok());

        let payload = form.to_new_publication("Sophie Martin");
        assert_eq!(payload.extrait, "Deux fois par jour");
        assert_eq!(payload.auteur, "Sophie Martin");
    }

    #[test]
    fn plain_text_is_sent_unescaped() {
        let form = PublicationForm {
            title: "Soins & prévention".into(),
            date: "2025-01-15".into(),
            category: "Prévention".into(),
            summary: "Brossez <2 min> matin & soir, <b>sans</b> forcer".into(),
        };

        let payload = form.to_new_publication("Dr. Sophie Martin");

        assert_eq!(payload.titre, "Soins & prévention");
        assert_eq!(payload.extrait, "Brossez <2 min> matin & soir, sans forcer");
    }

    #[test]
    fn required_fields() {
        let mut form = PublicationForm {
            date: "15/01/2025".into(),
            ..PublicationForm::default()
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors.get("date"), Some("Date invalide"));
        assert!(errors.contains("title"));
        assert!(errors.contains("category"));
        assert!(errors.contains("summary"));
    }
}
