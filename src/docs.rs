// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Clients ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Artists ---
        handlers::artists::create_artist,
        handlers::artists::list_artists,
        handlers::artists::get_artist,
        handlers::artists::update_artist,
        handlers::artists::delete_artist,

        // --- Appointments ---
        handlers::appointments::create_appointment,
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::delete_appointment,

        // --- INVENTORY ---
        handlers::inventory::create_item,
        handlers::inventory::list_items,
        handlers::inventory::list_low_stock,
        handlers::inventory::stock_report,
        handlers::inventory::get_item,
        handlers::inventory::update_item,
        handlers::inventory::adjust_stock,
        handlers::inventory::delete_item,

        // --- Sales ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,

        // --- Dashboard ---
        handlers::dashboard::get_stats,

        // --- Upload ---
        handlers::upload::upload_images,
    ),
    components(
        schemas(
            // --- Clients ---
            models::client::Client,
            models::client::CreateClientPayload,
            models::client::UpdateClientPayload,

            // --- Artists ---
            models::artist::Artist,
            models::artist::CreateArtistPayload,
            models::artist::UpdateArtistPayload,

            // --- Appointments ---
            models::appointment::AppointmentStatus,
            models::appointment::Appointment,
            models::appointment::AppointmentDetail,
            models::appointment::CreateAppointmentPayload,
            models::appointment::UpdateAppointmentPayload,

            // --- Inventory ---
            models::inventory::InventoryCategory,
            models::inventory::StockStatus,
            models::inventory::InventoryItem,
            models::inventory::InventoryItemView,
            models::inventory::StockReport,
            models::inventory::CreateInventoryItemPayload,
            models::inventory::UpdateInventoryItemPayload,
            models::inventory::AdjustStockPayload,

            // --- Sales ---
            models::sale::PaymentStatus,
            models::sale::Sale,
            models::sale::SaleDetail,
            models::sale::CreateSalePayload,
            models::sale::UpdateSalePayload,

            // --- DASHBOARD ---
            models::dashboard::DashboardStats,

            // --- Upload ---
            handlers::upload::UploadResponse,
        )
    ),
    tags(
        (name = "Clients", description = "Cadastro de Clientes"),
        (name = "Artists", description = "Cadastro de Artistas"),
        (name = "Appointments", description = "Agenda de Sessões"),
        (name = "Inventory", description = "Estoque de Materiais"),
        (name = "Sales", description = "Vendas, Sinais e Saldos"),
        (name = "Dashboard", description = "Indicadores do Estúdio"),
        (name = "Upload", description = "Imagens de Referência")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
