// ============================================================================
// Formatage : montants, dates, rendements
// ============================================================================
// Conventions allemandes (de-DE), comme Intl.NumberFormat("de-DE") :
// - Montant : "5.500.000,00 €" (point pour les milliers, virgule décimale)
// - Date    : "15.1.2024" (jour.mois.année, sans zéro devant)
//
// CONCEPT RUST : Calcul en centimes entiers
// - On arrondit à 2 décimales puis on passe en u128 (centimes)
// - Plus de problème d'arrondi flottant pendant le découpage
// ============================================================================

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Symbole de la devise unique de l'application
pub const CURRENCY_SYMBOL: &str = "€";

/// Formate un montant EUR en notation allemande
///
/// # Exemple
/// format_currency(dec!(5500000)) == "5.500.000,00 €"
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    // Décimal -> centimes entiers (toujours positif ici)
    let cents = (rounded.abs() * Decimal::ONE_HUNDRED)
        .trunc()
        .to_u128()
        .unwrap_or(0);

    let euros = group_thousands(cents / 100);
    let fraction = cents % 100;

    format!(
        "{}{},{:02} {}",
        if negative { "-" } else { "" },
        euros,
        fraction,
        CURRENCY_SYMBOL
    )
}

/// Insère un point tous les trois chiffres en partant de la droite
fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    grouped
}

/// Formate une date courte allemande : "1.2.2024"
pub fn format_date(date: &DateTime<Utc>) -> String {
    format!("{}.{}.{}", date.day(), date.month(), date.year())
}

/// Formate un rendement : "+12.5%"
///
/// Le rendement est affiché tel qu'il est stocké (pas d'arrondi),
/// avec un "+" devant les valeurs positives.
pub fn format_return_rate(rate: Decimal) -> String {
    let rate = rate.normalize();
    if rate.is_sign_negative() && !rate.is_zero() {
        format!("{}%", rate)
    } else {
        format!("+{}%", rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency_german_grouping() {
        assert_eq!(format_currency(dec!(5500000)), "5.500.000,00 €");
        assert_eq!(format_currency(dec!(562500)), "562.500,00 €");
        assert_eq!(format_currency(dec!(50)), "50,00 €");
        assert_eq!(format_currency(dec!(1000)), "1.000,00 €");
        assert_eq!(format_currency(dec!(999.999)), "1.000,00 €");
    }

    #[test]
    fn test_format_currency_small_and_negative() {
        assert_eq!(format_currency(Decimal::ZERO), "0,00 €");
        assert_eq!(format_currency(dec!(0.5)), "0,50 €");
        assert_eq!(format_currency(dec!(-1234.5)), "-1.234,50 €");
        assert_eq!(format_currency(dec!(-0.001)), "0,00 €");
    }

    #[test]
    fn test_format_date_without_padding() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(format_date(&date), "15.1.2024");

        let date = Utc.with_ymd_and_hms(2024, 11, 5, 12, 30, 0).unwrap();
        assert_eq!(format_date(&date), "5.11.2024");
    }

    #[test]
    fn test_format_return_rate() {
        assert_eq!(format_return_rate(dec!(12.5)), "+12.5%");
        assert_eq!(format_return_rate(dec!(8.30)), "+8.3%");
        assert_eq!(format_return_rate(dec!(-2)), "-2%");
    }
}
