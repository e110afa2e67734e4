use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Proposal API",
        version = "1.0.0",
        description = r#"
# Proposal Management API

An API for drafting, pricing and tracking commercial proposals for printing
equipment rental and outsourcing contracts.

## Features

- **Proposal Lifecycle**: Draft, negotiate, approve or reject proposals
- **Line Item Pricing**: Per-item totals, monthly production and fixed rates
- **Completeness Validation**: Field-level validation reports for the editor
- **Role-Based Visibility**: Admins see everything; supervisors see their
  team's proposals; managers see their own
- **Client & Product Registers**: CRUD plus bulk import and bulk delete

## Authentication

Requests act as a directory user identified by the `x-user-id` header.
Obtain a user via `POST /api/v1/users/login`.

## Pagination

Client and product list endpoints support `page` and `per_page` query
parameters.
        "#
    ),
    servers(
        (url = "http://localhost:8080/api/v1", description = "Local development")
    ),
    tags(
        (name = "Proposals", description = "Proposal lifecycle and pricing endpoints"),
        (name = "Clients", description = "Client register endpoints"),
        (name = "Products", description = "Product register endpoints"),
        (name = "Catalog", description = "Equipment and manager catalog endpoints"),
        (name = "Users", description = "Directory and team management endpoints"),
        (name = "Health", description = "Health check endpoints")
    ),
    components(
        schemas(
            // Proposal types
            crate::models::Proposal,
            crate::models::ProposalItem,
            crate::models::ProposalTotals,
            crate::models::ProposalStatus,
            crate::models::ContractType,
            crate::models::Classification,
            crate::models::Opportunity,
            crate::models::Equipment,
            crate::models::Manager,
            crate::services::proposals::ProposalDetails,
            crate::services::proposals::ItemInput,
            crate::handlers::proposals::SetTermRequest,
            crate::handlers::proposals::SetStatusRequest,

            // Validation report types
            crate::services::validation::ProposalValidation,
            crate::services::validation::ItemValidation,
            crate::services::validation::ProposalField,
            crate::services::validation::ItemField,

            // Register types
            crate::models::Client,
            crate::models::NewClient,
            crate::models::Product,
            crate::models::NewProduct,
            crate::handlers::clients::BulkDeleteRequest,

            // Directory types
            crate::models::user::User,
            crate::models::user::UserRole,
            crate::auth::NewUser,
            crate::auth::UserUpdate,
            crate::handlers::users::LoginRequest,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Proposal API"));
        assert!(json.contains("ProposalTotals"));
    }
}
