// src/common/i18n.rs
//
// Catálogo de mensagens expostas ao cliente. Idiomas: en, pt, fr.
// Idioma desconhecido cai no inglês.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    ValidationFailed,
    InvalidPayload,
    SaleNotFound,
    SaleDeleted,
    CreateFailed,
    FetchFailed,
    UpdateFailed,
    DeleteFailed,
    AnalyticsFailed,
}

pub fn translate(key: MessageKey, lang: &str) -> &'static str {
    use MessageKey::*;

    match (key, lang) {
        (ValidationFailed, "pt") => "Um ou mais campos são inválidos.",
        (ValidationFailed, "fr") => "Un ou plusieurs champs sont invalides.",
        (ValidationFailed, _) => "One or more fields are invalid.",

        (InvalidPayload, "pt") => "Corpo da requisição inválido.",
        (InvalidPayload, "fr") => "Corps de la requête invalide.",
        (InvalidPayload, _) => "Invalid request body.",

        (SaleNotFound, "pt") => "Venda não encontrada.",
        (SaleNotFound, "fr") => "Vente introuvable.",
        (SaleNotFound, _) => "Sale not found.",

        (SaleDeleted, "pt") => "Venda excluída com sucesso.",
        (SaleDeleted, "fr") => "Vente supprimée avec succès",
        (SaleDeleted, _) => "Sale deleted successfully.",

        (CreateFailed, "pt") => "Erro ao criar a venda.",
        (CreateFailed, "fr") => "Erreur lors de la création de la vente",
        (CreateFailed, _) => "Error while creating the sale.",

        (FetchFailed, "pt") => "Erro ao buscar as vendas.",
        (FetchFailed, "fr") => "Erreur lors de la récupération des ventes",
        (FetchFailed, _) => "Error while fetching sales.",

        (UpdateFailed, "pt") => "Erro ao atualizar a venda.",
        (UpdateFailed, "fr") => "Erreur lors de la mise à jour de la vente",
        (UpdateFailed, _) => "Error while updating the sale.",

        (DeleteFailed, "pt") => "Erro ao excluir a venda.",
        (DeleteFailed, "fr") => "Erreur lors de la suppression de la vente",
        (DeleteFailed, _) => "Error while deleting the sale.",

        (AnalyticsFailed, "pt") => "Erro ao calcular as análises de vendas.",
        (AnalyticsFailed, "fr") => "Erreur lors de la récupération des analyses",
        (AnalyticsFailed, _) => "Error while computing sales analytics.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english() {
        assert_eq!(translate(MessageKey::SaleNotFound, "de"), "Sale not found.");
        assert_eq!(translate(MessageKey::SaleNotFound, "fr"), "Vente introuvable.");
    }
}
