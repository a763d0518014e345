// ============================================================================
// Formulaires de paiement : retrait et dépôt
// ============================================================================
// Machine à états d'un formulaire :
//
//   Idle ──submit──> Submitting ──outcome──> Succeeded(msg) | Failed(msg)
//     ^                                            │
//     └──────────────── nouveau submit ────────────┘
//
// Validation du retrait, dans l'ordre (le provider n'est appelé qu'à la fin) :
// 1. montant > 0            sinon "Bitte geben Sie einen gültigen Betrag ein."
// 2. montant <= solde dispo sinon "Unzureichendes Guthaben."
// 3. méthode choisie, adresse non vide
//
// Le dépôt saute la vérification du solde et n'a pas de champ adresse.
//
// CONCEPT RUST : Enum avec données pour la state machine
// - SubmitState::Failed(String) porte le message à afficher
// - Impossible d'avoir un message sans état terminal
// ============================================================================

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::DataProvider;
use crate::models::{Outcome, PaymentMethod};

/// Solde disponible au retrait par défaut (EUR)
pub const DEFAULT_AVAILABLE_BALANCE: Decimal = dec!(5500000);

/// Montant minimum affiché en indication (pas une règle de validation)
pub const MINIMUM_AMOUNT: Decimal = dec!(50);

/// Message affiché quand le provider échoue techniquement
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Ein Fehler ist aufgetreten. Bitte versuchen Sie es erneut.";

/// Nombre max de décimales saisissables (pas de 0,01)
const MAX_DECIMALS: usize = 2;

/// Erreurs de validation locale
///
/// Le message Display est celui affiché à l'utilisateur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Bitte geben Sie einen gültigen Betrag ein.")]
    InvalidAmount,

    #[error("Unzureichendes Guthaben.")]
    InsufficientBalance,

    #[error("Bitte wählen Sie eine Zahlungsmethode.")]
    MissingMethod,

    #[error("Bitte geben Sie Ihre Wallet-Adresse oder Kontodetails ein.")]
    MissingAddress,

    #[error("Die Anfrage wird bereits verarbeitet.")]
    AlreadySubmitting,
}

/// Type de formulaire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Withdrawal,
    Deposit,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Withdrawal => "Auszahlung",
            FormKind::Deposit => "Einzahlung",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormKind::Withdrawal => "Auszahlung anfordern",
            FormKind::Deposit => "Einzahlung anfordern",
        }
    }
}

/// Champ ayant le focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    Method,
    Address,
}

/// État de soumission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

/// Requête validée, prête à partir vers le provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub kind: FormKind,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub address: String,
}

/// Formulaire de dépôt ou de retrait
#[derive(Debug, Clone)]
pub struct PaymentForm {
    pub kind: FormKind,

    /// Montant tel que saisi (parsé au submit)
    pub amount: String,

    /// None tant que l'utilisateur n'a rien choisi
    pub method: Option<PaymentMethod>,

    /// Adresse de wallet ou coordonnées bancaires (retrait uniquement)
    pub address: String,

    pub focus: FormField,
    pub state: SubmitState,

    /// Plafond du retrait
    pub available_balance: Decimal,
}

impl PaymentForm {
    /// Formulaire de retrait plafonné à `available_balance`
    pub fn withdrawal(available_balance: Decimal) -> Self {
        Self {
            kind: FormKind::Withdrawal,
            amount: String::new(),
            method: None,
            address: String::new(),
            focus: FormField::Amount,
            state: SubmitState::Idle,
            available_balance,
        }
    }

    /// Formulaire de dépôt
    pub fn deposit() -> Self {
        Self {
            kind: FormKind::Deposit,
            ..Self::withdrawal(Decimal::ZERO)
        }
    }

    /// Champs du formulaire, dans l'ordre du focus
    pub fn fields(&self) -> &'static [FormField] {
        match self.kind {
            FormKind::Withdrawal => &[FormField::Amount, FormField::Method, FormField::Address],
            FormKind::Deposit => &[FormField::Amount, FormField::Method],
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    // ========================================================================
    // Saisie
    // ========================================================================

    fn focus_index(&self) -> usize {
        self.fields()
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0)
    }

    /// Focus sur le champ suivant (Tab)
    pub fn focus_next(&mut self) {
        let fields = self.fields();
        self.focus = fields[(self.focus_index() + 1) % fields.len()];
    }

    /// Focus sur le champ précédent (Shift-Tab)
    pub fn focus_previous(&mut self) {
        let fields = self.fields();
        self.focus = fields[(self.focus_index() + fields.len() - 1) % fields.len()];
    }

    /// Ajoute un caractère au champ qui a le focus
    ///
    /// Le montant n'accepte que des chiffres et un séparateur décimal,
    /// avec deux décimales au plus. Rien n'est modifiable pendant l'envoi.
    pub fn input_char(&mut self, c: char) {
        if self.is_submitting() {
            return;
        }

        match self.focus {
            FormField::Amount => {
                if accepts_amount_char(&self.amount, c) {
                    self.amount.push(c);
                }
            }
            FormField::Address => {
                if !c.is_control() {
                    self.address.push(c);
                }
            }
            FormField::Method => {}
        }
    }

    /// Supprime le dernier caractère du champ qui a le focus
    pub fn backspace(&mut self) {
        if self.is_submitting() {
            return;
        }

        match self.focus {
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Address => {
                self.address.pop();
            }
            FormField::Method => self.method = None,
        }
    }

    /// Méthode suivante (→), Bitcoin si rien n'est choisi
    pub fn next_method(&mut self) {
        if self.is_submitting() {
            return;
        }
        self.method = Some(match self.method {
            Some(method) => method.next(),
            None => PaymentMethod::ALL[0],
        });
    }

    /// Méthode précédente (←), PayPal si rien n'est choisi
    pub fn previous_method(&mut self) {
        if self.is_submitting() {
            return;
        }
        self.method = Some(match self.method {
            Some(method) => method.previous(),
            None => PaymentMethod::ALL[PaymentMethod::ALL.len() - 1],
        });
    }

    /// Montant saisi, s'il est lisible
    pub fn parsed_amount(&self) -> Option<Decimal> {
        parse_amount(&self.amount)
    }

    /// true si le montant saisi est sous le minimum indicatif
    pub fn below_minimum(&self) -> bool {
        self.parsed_amount()
            .map(|amount| amount > Decimal::ZERO && amount < MINIMUM_AMOUNT)
            .unwrap_or(false)
    }

    // ========================================================================
    // Soumission
    // ========================================================================

    /// Valide le formulaire et passe en Submitting
    ///
    /// - Ok(request) : l'appelant doit envoyer la requête au provider
    ///   puis appeler complete()
    /// - Err(FormError) : l'état est Failed(message), rien n'est envoyé
    /// - Err(AlreadySubmitting) : l'état n'est pas modifié
    pub fn begin_submit(&mut self) -> Result<PaymentRequest, FormError> {
        if self.is_submitting() {
            warn!(kind = ?self.kind, "Submit ignored, request already in flight");
            return Err(FormError::AlreadySubmitting);
        }

        // Un nouveau submit efface le résultat précédent
        self.state = SubmitState::Idle;

        match self.validate() {
            Ok(request) => {
                info!(kind = ?self.kind, amount = %request.amount, method = request.method.value(), "Payment form submitted");
                self.state = SubmitState::Submitting;
                Ok(request)
            }
            Err(e) => {
                info!(kind = ?self.kind, reason = %e, "Payment form rejected locally");
                self.state = SubmitState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn validate(&self) -> Result<PaymentRequest, FormError> {
        let amount = match self.parsed_amount() {
            Some(amount) if amount > Decimal::ZERO => amount,
            // Nombre bien formé mais trop grand pour Decimal : forcément au-delà du solde
            None if self.kind == FormKind::Withdrawal && is_oversized_amount(&self.amount) => {
                return Err(FormError::InsufficientBalance);
            }
            _ => return Err(FormError::InvalidAmount),
        };

        if self.kind == FormKind::Withdrawal && amount > self.available_balance {
            return Err(FormError::InsufficientBalance);
        }

        let method = self.method.ok_or(FormError::MissingMethod)?;

        let address = self.address.trim().to_string();
        if self.kind == FormKind::Withdrawal && address.is_empty() {
            return Err(FormError::MissingAddress);
        }

        Ok(PaymentRequest {
            kind: self.kind,
            amount,
            method,
            address,
        })
    }

    /// Applique le résultat du provider
    ///
    /// Succès : le formulaire est vidé. Échec : les champs restent remplis
    /// pour correction.
    pub fn complete(&mut self, outcome: Outcome) {
        if outcome.success {
            self.amount.clear();
            self.method = None;
            self.address.clear();
            self.focus = FormField::Amount;
            self.state = SubmitState::Succeeded(outcome.message);
        } else {
            self.state = SubmitState::Failed(outcome.message);
        }
    }

    /// Validation + appel provider + résultat, en une fois
    ///
    /// Utilisé quand l'appelant peut attendre directement (tests, scripts) ;
    /// l'event loop passe par le worker avec begin_submit()/complete().
    pub async fn submit(&mut self, provider: &dyn DataProvider) -> &SubmitState {
        if let Ok(request) = self.begin_submit() {
            let outcome = dispatch(provider, &request).await;
            self.complete(outcome);
        }
        &self.state
    }
}

/// Envoie une requête validée au provider
///
/// Une erreur technique devient un Outcome d'échec avec le message générique.
pub async fn dispatch(provider: &dyn DataProvider, request: &PaymentRequest) -> Outcome {
    let result = match request.kind {
        FormKind::Withdrawal => {
            provider
                .process_withdrawal(request.amount, request.method, &request.address)
                .await
        }
        FormKind::Deposit => provider.process_deposit(request.amount, request.method).await,
    };

    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(kind = ?request.kind, error = ?e, "Payment request failed");
            Outcome::failure(GENERIC_FAILURE_MESSAGE)
        }
    }
}

/// Parse un montant saisi ("100", "100.5", "100,50")
///
/// La virgule allemande est acceptée comme séparateur décimal.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// true si la saisie est un nombre positif bien formé que Decimal ne peut
/// pas représenter (plus de 28 chiffres significatifs)
fn is_oversized_amount(input: &str) -> bool {
    let input = input.trim();
    let well_formed = input.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && input.matches(['.', ',']).count() <= 1
        && input.chars().any(|c| matches!(c, '1'..='9'));

    well_formed && parse_amount(input).is_none()
}

/// Contrainte de saisie du montant
fn accepts_amount_char(current: &str, c: char) -> bool {
    let separator = current.find(['.', ',']);

    match c {
        '0'..='9' => match separator {
            Some(pos) => current.len() - pos - 1 < MAX_DECIMALS,
            None => true,
        },
        '.' | ',' => separator.is_none(),
        _ => false,
    }
}
