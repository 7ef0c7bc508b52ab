use tillboard_application::PositionPermissionService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub position_permission_service: PositionPermissionService,
}
