use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::Modify;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rota API",
        version = "1.0.0",
        description = "Roster generation, shift reassignment and swap requests for a four-person rota"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Staff
        crate::handlers::staff_handler::get_staff,

        // Rosters
        crate::handlers::rosters_handler::list_rosters,
        crate::handlers::rosters_handler::preview_roster,
        crate::handlers::rosters_handler::create_roster,
        crate::handlers::rosters_handler::get_active_roster,
        crate::handlers::rosters_handler::get_roster,
        crate::handlers::rosters_handler::activate_roster,
        crate::handlers::rosters_handler::delete_roster,
        crate::handlers::rosters_handler::get_roster_hours,
        crate::handlers::rosters_handler::compare_rosters,
        crate::handlers::rosters_handler::export_roster,

        // Shifts
        crate::handlers::shifts_handler::get_shift,
        crate::handlers::shifts_handler::update_shift,

        // Swaps
        crate::handlers::swaps_handler::get_swaps,
        crate::handlers::swaps_handler::create_swap_request,
        crate::handlers::swaps_handler::respond_to_swap_request,

        // Notifications
        crate::handlers::notifications_handler::get_notifications,
        crate::handlers::notifications_handler::mark_notification_read,
    ),
    components(
        schemas(
            // Engine types
            crate::rota::StaffMember,
            crate::rota::ShiftCategory,
            crate::rota::Shift,
            crate::rota::StaffHours,
            crate::rota::ShiftComparison,
            crate::rota::SwapStatus,

            // Stored models
            crate::models::RosterSummary,
            crate::models::Roster,
            crate::models::RosterShift,
            crate::models::RosterPreview,
            crate::models::RosterHours,
            crate::models::RosterComparison,
            crate::models::SwapRequest,
            crate::models::Notification,
            crate::handlers::staff_handler::StaffOption,

            // Input models
            crate::models::GenerateRosterInput,
            crate::models::UpdateShiftInput,
            crate::models::RosterMutationResponse,
            crate::models::CreateSwapRequestInput,
            crate::models::RespondSwapInput,
            crate::models::NotificationMutationResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "staff", description = "Staff directory"),
        (name = "rosters", description = "Roster generation, activation, comparison and export"),
        (name = "shifts", description = "Shift reassignment"),
        (name = "swaps", description = "Shift swap requests"),
        (name = "notifications", description = "Per-staff notifications"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                    crate::middleware::admin_auth::ADMIN_KEY_HEADER,
                ))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_rota_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/rosters",
            "/api/rosters/{id}",
            "/api/rosters/compare",
            "/api/shifts/{uuid}",
            "/api/swaps/{id}/respond",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("admin_key")));
    }
}
