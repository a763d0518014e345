// ============================================================================
// Module : views
// ============================================================================
// Modèles d'affichage des écrans, indépendants du terminal :
// tout ce qui est calculé ici est testable sans ratatui.
// ============================================================================

pub mod dashboard;    // Chargement + cartes + listes du dashboard
pub mod payment_form; // Formulaires de retrait et de dépôt

pub use dashboard::{load_dashboard, DashboardData, DashboardState};
pub use payment_form::{FormError, FormField, FormKind, PaymentForm, PaymentRequest, SubmitState};
