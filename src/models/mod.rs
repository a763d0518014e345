// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod investment;     // Placements
pub mod outcome;        // Résultat {success, message} des écritures
pub mod payment_method; // Moyens de paiement des formulaires
pub mod transaction;    // Mouvements du compte
pub mod user;           // Profil utilisateur

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use investboard::models::transaction::Transaction;
// On peut faire : use investboard::models::Transaction;
pub use investment::{Investment, InvestmentStatus};
pub use outcome::Outcome;
pub use payment_method::PaymentMethod;
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
pub use user::UserProfile;
