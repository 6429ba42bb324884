//! # Product Commands

use tracing::debug;

use celidone_core::validation::ValidationSummary;
use celidone_core::ProdutoDraft;

use crate::state::EngineState;

/// Validates the product form and lists every failure.
///
/// ## Checks
/// - `codigo` follows `PRD-0000`
/// - fabric, color, pattern, costume type, texture, size, status and sex
///   are filled in
/// - `preco` is a positive number
/// - size, status and sex come from their closed sets
pub fn validate_produto(state: &EngineState, draft: Option<ProdutoDraft>) -> ValidationSummary {
    let report = state.validation.validate_produto(draft.as_ref());
    debug!(errors = report.errors().len(), "validate_produto command");
    report.summary()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProdutoDraft {
        ProdutoDraft {
            codigo: Some("PRD-0042".into()),
            tecido: Some("Cetim".into()),
            cor: Some("Azul".into()),
            estampa: Some("Lisa".into()),
            tipo_traje: Some("Vestido".into()),
            textura: Some("Lisa".into()),
            tamanho: Some("M".into()),
            status: Some("disponivel".into()),
            sexo: Some("feminino".into()),
            preco: Some(450.0),
        }
    }

    #[test]
    fn test_valid_product() {
        let summary = validate_produto(&EngineState::default(), Some(draft()));
        assert!(summary.is_valid);
        assert!(summary.errors.is_empty());
    }

    #[test]
    fn test_every_failure_is_listed() {
        let mut product = draft();
        product.codigo = Some("42".into());
        product.preco = Some(0.0);

        let summary = validate_produto(&EngineState::default(), Some(product));
        assert!(!summary.is_valid);
        assert_eq!(
            summary.errors,
            vec![
                "Código deve seguir o padrão PRD-0000",
                "Preço deve ser maior que zero"
            ]
        );
    }

    #[test]
    fn test_missing_form() {
        let summary = validate_produto(&EngineState::default(), None);
        assert_eq!(summary.errors, vec!["Dados do produto: campo obrigatório"]);
    }
}
