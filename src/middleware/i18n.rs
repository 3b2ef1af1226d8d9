// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::config::AppState;

// Idioma da requisição (ex: "pt", "fr", "en")
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl FromRequestParts<AppState> for Locale {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first() // O idioma de maior peso (ex: "fr-FR")
                    .map(|tag_string| primary_subtag(tag_string))
            })
            .unwrap_or_else(|| state.default_locale.clone());

        Ok(Locale(lang))
    }
}

// "pt-BR" -> "pt", "EN" -> "en"
fn primary_subtag(tag: &str) -> String {
    tag.split('-').next().unwrap_or(tag).to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_primary_language() {
        assert_eq!(primary_subtag("pt-BR"), "pt");
        assert_eq!(primary_subtag("fr"), "fr");
        assert_eq!(primary_subtag("EN-us"), "en");
    }
}
