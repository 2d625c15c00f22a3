pub mod appointment;
pub mod artist;
pub mod auth;
pub mod client;
pub mod dashboard;
pub mod inventory;
pub mod sale;

/// Formulários mandam "" para campos opcionais vazios.
pub(crate) fn blank_to_none(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = None;
    }
}
