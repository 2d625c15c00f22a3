pub mod appointment_service;
pub mod artist_service;
pub mod client_service;
pub mod dashboard_service;
pub mod finance_service;
pub mod inventory_service;
pub mod relationship_service;
pub mod sale_service;

pub use appointment_service::AppointmentService;
pub use artist_service::ArtistService;
pub use client_service::ClientService;
pub use dashboard_service::DashboardService;
pub use inventory_service::InventoryService;
pub use sale_service::SaleService;
