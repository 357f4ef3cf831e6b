use ecam_auth::Role;
use ecam_models::{
    AdminDto, CountResponse, CreateAdminDto, CreateStudentDto, CreateTeacherDto, ErrorResponse,
    LoginRequest, LoginResponse, MeResponse, MessageResponse, StudentDto, TeacherDto,
    UpdateAdminDto, UpdateStudentDto, UpdateTeacherDto,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::health::{HealthResponse, ReadyResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_me,
        crate::modules::health::health,
        crate::modules::health::ready,
        crate::modules::crud::controller::list_rows,
        crate::modules::crud::controller::count_rows,
        crate::modules::crud::controller::get_row,
        crate::modules::crud::controller::create_row,
        crate::modules::crud::controller::update_row,
        crate::modules::crud::controller::delete_row,
    ),
    components(
        schemas(
            Role,
            LoginRequest,
            LoginResponse,
            MeResponse,
            AdminDto,
            CreateAdminDto,
            UpdateAdminDto,
            StudentDto,
            CreateStudentDto,
            UpdateStudentDto,
            TeacherDto,
            CreateTeacherDto,
            UpdateTeacherDto,
            CountResponse,
            MessageResponse,
            ErrorResponse,
            HealthResponse,
            ReadyResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token introspection"),
        (name = "CRUD", description = "Table-keyed access to admins, students and teachers (admin only)"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    info(
        title = "ECAM API",
        version = "0.1.0",
        description = "Identity and role management for ECAM: persons, admins, students and teachers behind JWT role guards.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_crud_and_auth_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/auth/login"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/crud/{table}/by/{id}"));
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
