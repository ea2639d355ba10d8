//! Order request validation.
//!
//! Carts reference products by id. The cart's shape is checked first, then
//! the products repository is asked for every product.

use axum_helpers::errors::validation_message;
use domain_products::{ProductRepository, validation::require_product};
use resource_query::{
    FilterRequest, ListQuery, UpdateManyRequest, UpdateRequest, ValidationError, ValidationResult,
    require_id, require_update_fields,
};
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{Cart, CreateOrder, ORDERS, OrderFilter, OrderUpdate};
use crate::repository::OrderRepository;

pub fn validate_list_query(query: &ListQuery<OrderFilter>) -> ValidationResult {
    resource_query::validate_list_query(&ORDERS, query)
}

pub fn validate_filter_request(request: &FilterRequest<OrderFilter>) -> ValidationResult {
    resource_query::validate_filter_request(&ORDERS, request)
}

/// Non-empty, ids without surrounding whitespace, every quantity at least
/// one.
pub fn check_cart(cart: &Cart) -> ValidationResult {
    if cart.is_empty() {
        return Err(ValidationError::bad_request("provide at least one product in cart"));
    }

    if let Some(product_id) = cart.keys().find(|id| id.trim() != id.as_str()) {
        return Err(ValidationError::bad_request(format!(
            "product id \"{product_id}\" in cart must not have surrounding whitespace"
        )));
    }

    if let Some((product_id, count)) = cart.iter().find(|(_, count)| **count < 1) {
        return Err(ValidationError::bad_request(format!(
            "count of product {product_id} must be 1 or greater, got {count}"
        )));
    }

    Ok(())
}

/// Every product in the cart is stored.
pub async fn require_cart_products<P: ProductRepository + ?Sized>(
    products: &P,
    cart: &Cart,
) -> OrderResult<()> {
    for product_id in cart.keys() {
        require_product(products, product_id).await?;
    }
    Ok(())
}

pub async fn validate_cart<P: ProductRepository + ?Sized>(
    products: &P,
    cart: &Cart,
) -> OrderResult<()> {
    check_cart(cart)?;
    require_cart_products(products, cart).await
}

pub async fn validate_create<P: ProductRepository + ?Sized>(
    products: &P,
    input: &CreateOrder,
) -> OrderResult<()> {
    input
        .validate()
        .map_err(|e| ValidationError::bad_request(validation_message(&e)))?;

    validate_cart(products, &input.cart).await
}

/// Field checks of a single-order update; cart products are looked up
/// separately.
pub fn validate_update_request(
    request: &UpdateRequest<OrderUpdate>,
) -> ValidationResult<&OrderUpdate> {
    let fields = require_update_fields(request.update_fields.as_ref())?;
    if let Some(cart) = &fields.cart {
        check_cart(cart)?;
    }
    Ok(fields)
}

pub async fn validate_update_many<P: ProductRepository + ?Sized>(
    products: &P,
    request: &UpdateManyRequest<OrderFilter, OrderUpdate>,
) -> OrderResult<()> {
    resource_query::validate_update_many(&ORDERS, request)?;
    if let Some(cart) = request.update_fields.as_ref().and_then(|f| f.cart.as_ref()) {
        validate_cart(products, cart).await?;
    }
    Ok(())
}

/// Non-blank id of a stored order.
pub async fn require_order<'a, R: OrderRepository + ?Sized>(
    repository: &R,
    id: &'a str,
) -> OrderResult<&'a str> {
    let id = require_id(Some(id))?;
    if !repository.exists(id).await? {
        return Err(OrderError::NotFound(id.to_string()));
    }
    Ok(id)
}
