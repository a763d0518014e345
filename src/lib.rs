// ============================================================================
// InvestBoard - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;    // DataProvider : démo et HTTP
pub mod app;    // État de l'application
pub mod config; // Arguments CLI + configuration
pub mod format; // Montants et dates au format allemand
pub mod models; // Structures de données
pub mod ui;     // Interface utilisateur
pub mod views;  // Modèles d'affichage (dashboard, formulaires)
pub mod worker; // Thread async en arrière-plan
