use crate::checks::TaxCheck;
use crate::config::ReconConfig;
use crate::model::{Checklist, TaxTotals};
use crate::reconstruct::reconstruct;

/// Evaluate `checks` against the values as extracted, corroborating the
/// fields of every check that passes.
pub fn run_checks<D: TaxTotals + ?Sized>(
    doc: &mut D,
    checks: &[TaxCheck],
    config: &ReconConfig,
) -> Checklist {
    let mut checklist = Checklist::default();
    for check in checks {
        let passed = check.evaluate(&*doc, &config.tolerance);
        log::debug!("{check}: {}", if passed { "pass" } else { "fail" });
        if passed {
            check.corroborate(doc);
        }
        checklist.record(check.name(), passed);
    }
    checklist
}

/// Run the checks, then the reconstruction pipeline.
///
/// The order matters: checks only ever see extracted values, and the
/// checklist is final before any total is reconstructed.
pub fn reconcile<D: TaxTotals + ?Sized>(
    doc: &mut D,
    checks: &[TaxCheck],
    config: &ReconConfig,
) -> Checklist {
    let checklist = run_checks(doc, checks, config);
    let applied = reconstruct(doc);
    if !applied.is_empty() {
        log::debug!("reconstructed {} total(s)", applied.len());
    }
    checklist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{amount, approx, taxes, Totals};

    #[test]
    fn passing_check_boosts_before_reconstruction() {
        let mut doc = Totals {
            taxes: taxes(&[(20.0, 10.99, 0.5), (10.0, 40.12, 0.1)]),
            total_incl: amount(507.25, 0.6),
            ..Totals::default()
        };
        let checklist = reconcile(&mut doc, &TaxCheck::ALL, &ReconConfig::default());

        assert_eq!(checklist.get("taxes_match_total_incl"), Some(true));
        assert_eq!(checklist.get("taxes_match_total_excl"), Some(false));
        assert_eq!(checklist.get("taxes_plus_total_excl_match_total_incl"), Some(false));

        assert!(doc.taxes.iter().all(|t| t.confidence == 1.0));
        assert_eq!(doc.total_incl.confidence, 1.0);
        // Reconstructed from corroborated inputs.
        assert!(approx(doc.total_tax.value.unwrap(), 51.11));
        assert_eq!(doc.total_tax.confidence, 1.0);
        assert!(approx(doc.total_excl.value.unwrap(), 456.14));
        assert_eq!(doc.total_excl.confidence, 1.0);
    }

    #[test]
    fn checklist_ignores_reconstructed_values() {
        // taxes + excl would match incl, but excl is only reconstructed.
        let mut doc = Totals {
            taxes: taxes(&[(20.0, 20.0, 0.5)]),
            total_incl: amount(120.0, 0.5),
            ..Totals::default()
        };
        let checklist = reconcile(&mut doc, &TaxCheck::ALL, &ReconConfig::default());
        assert_eq!(checklist.get("taxes_plus_total_excl_match_total_incl"), Some(false));
        assert_eq!(doc.total_excl.value, Some(100.0));
    }

    #[test]
    fn failing_checks_leave_confidences() {
        let mut doc = Totals {
            taxes: taxes(&[(20.0, 10.9, 0.5), (10.0, 40.12, 0.1)]),
            total_incl: amount(507.25, 0.6),
            ..Totals::default()
        };
        let checklist = run_checks(&mut doc, &[TaxCheck::TaxesMatchTotalIncl], &ReconConfig::default());
        assert_eq!(checklist.len(), 1);
        assert_eq!(checklist.get("taxes_match_total_incl"), Some(false));
        assert_eq!(doc.taxes[0].confidence, 0.5);
        assert_eq!(doc.total_incl.confidence, 0.6);
    }

    #[test]
    fn tolerance_comes_from_config() {
        let mut doc = Totals {
            taxes: taxes(&[(20.0, 20.0, 0.5)]),
            total_excl: amount(100.0, 0.5),
            total_incl: amount(120.05, 0.5),
            ..Totals::default()
        };
        let strict = run_checks(&mut doc.clone(), &TaxCheck::ALL, &ReconConfig::default());
        assert_eq!(strict.get("taxes_plus_total_excl_match_total_incl"), Some(false));

        let loose = ReconConfig::from_toml("[tolerance]\nsum_slack = 0.1\n").unwrap();
        let relaxed = run_checks(&mut doc, &TaxCheck::ALL, &loose);
        assert_eq!(relaxed.get("taxes_plus_total_excl_match_total_incl"), Some(true));
    }
}
