//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all resources
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "REST API for products, inventory, orders and users backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/inventory", api = domain_inventory::ApiDoc),
        (path = "/api/orders", api = domain_orders::ApiDoc),
        (path = "/api/users", api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths_are_nested() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/products/{id}"));
        assert!(paths.contains_key("/api/inventory/query"));
        assert!(paths.contains_key("/api/orders/{id}"));
        assert!(paths.contains_key("/api/users/query"));
    }
}
