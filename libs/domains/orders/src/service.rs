//! Order Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use domain_products::ProductRepository;
use resource_query::{
    CollectionResponse, CommandResult, FilterRequest, ListQuery, Page, UpdateManyRequest,
    UpdateRequest, require_id,
};

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderFilter, OrderUpdate};
use crate::repository::OrderRepository;
use crate::validation;

/// Order service; carts are checked against the product catalogue.
pub struct OrderService<R: OrderRepository, P: ProductRepository> {
    repository: Arc<R>,
    products: Arc<P>,
}

impl<R: OrderRepository, P: ProductRepository> OrderService<R, P> {
    pub fn new(repository: R, products: P) -> Self {
        Self {
            repository: Arc::new(repository),
            products: Arc::new(products),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self, page: Page) -> OrderResult<CollectionResponse<Order>> {
        self.query_orders(ListQuery::paged(Some(page))).await
    }

    #[instrument(skip(self, query))]
    pub async fn query_orders(
        &self,
        query: ListQuery<OrderFilter>,
    ) -> OrderResult<CollectionResponse<Order>> {
        validation::validate_list_query(&query)?;

        let orders = self.repository.get_many(&query).await?;
        let count = self.repository.count(&FilterRequest::from(&query)).await?;

        Ok(CollectionResponse::ok(orders, count, query.page.as_ref()))
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str) -> OrderResult<CollectionResponse<Order>> {
        let id = require_id(Some(id))?;
        let order = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        Ok(CollectionResponse::single(order))
    }

    #[instrument(skip(self, input), fields(client_id = %input.client_id))]
    pub async fn create_order(&self, input: CreateOrder) -> OrderResult<CollectionResponse<Order>> {
        validation::validate_create(self.products.as_ref(), &input).await?;

        let order = self.repository.create(Order::new(input)).await?;
        Ok(CollectionResponse::created(order))
    }

    #[instrument(skip(self, request))]
    pub async fn update_order(
        &self,
        id: &str,
        request: UpdateRequest<OrderUpdate>,
    ) -> OrderResult<CollectionResponse<Order>> {
        let id = require_id(Some(id))?;
        let fields = validation::validate_update_request(&request)?;
        validation::require_order(self.repository.as_ref(), id).await?;
        if let Some(cart) = &fields.cart {
            validation::require_cart_products(self.products.as_ref(), cart).await?;
        }

        let order = self
            .repository
            .update(id, fields)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        Ok(CollectionResponse::single(order))
    }

    #[instrument(skip(self, request))]
    pub async fn update_orders(
        &self,
        request: UpdateManyRequest<OrderFilter, OrderUpdate>,
    ) -> OrderResult<CommandResult> {
        validation::validate_update_many(self.products.as_ref(), &request).await?;

        let modified = self.repository.update_many(&request).await?;
        Ok(CommandResult::affected(modified))
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: &str) -> OrderResult<CommandResult> {
        let id = validation::require_order(self.repository.as_ref(), id).await?;

        let deleted = self.repository.delete(id).await?;
        Ok(CommandResult::affected(deleted))
    }

    #[instrument(skip(self, request))]
    pub async fn delete_orders(
        &self,
        request: FilterRequest<OrderFilter>,
    ) -> OrderResult<CommandResult> {
        validation::validate_filter_request(&request)?;

        let deleted = self.repository.delete_many(&request).await?;
        Ok(CommandResult::affected(deleted))
    }
}

impl<R: OrderRepository, P: ProductRepository> Clone for OrderService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            products: Arc::clone(&self.products),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cart, OrderStatus};
    use crate::repository::MockOrderRepository;
    use domain_products::MockProductRepository;
    use resource_query::ErrorKind;

    fn order_input(lines: &[(&str, i64)]) -> CreateOrder {
        CreateOrder {
            client_id: "c1".into(),
            status: OrderStatus::Pending,
            cart: lines.iter().map(|(id, n)| (id.to_string(), *n)).collect::<Cart>(),
        }
    }

    #[tokio::test]
    async fn test_create_with_missing_product_is_not_found() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create().never();
        let mut products = MockProductRepository::new();
        products.expect_exists().returning(|id| Ok(id != "ghost"));

        let service = OrderService::new(repo, products);
        let err = service
            .create_order(order_input(&[("p1", 1), ("ghost", 2)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OrderError::Validation(e) if e.kind == ErrorKind::NotFound
        ));
    }

    #[tokio::test]
    async fn test_create_stores_order() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create()
            .withf(|order| order.client_id == "c1" && order.cart.len() == 2)
            .returning(Ok);
        let mut products = MockProductRepository::new();
        products.expect_exists().times(2).returning(|_| Ok(true));

        let service = OrderService::new(repo, products);
        let response = service
            .create_order(order_input(&[("p1", 1), ("p2", 4)]))
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.collection[0].status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_status() {
        let mut repo = MockOrderRepository::new();
        repo.expect_exists().returning(|_| Ok(true));
        repo.expect_update()
            .withf(|id, fields| id == "o1" && fields.status == Some(OrderStatus::Paid))
            .returning(|id, _| {
                let mut order = Order::new(order_input(&[("p1", 1)]));
                order.id = id.to_string();
                order.status = OrderStatus::Paid;
                Ok(Some(order))
            });

        let service = OrderService::new(repo, MockProductRepository::new());
        let request = UpdateRequest::new(OrderUpdate {
            status: Some(OrderStatus::Paid),
            cart: None,
        });
        let response = service.update_order("o1", request).await.unwrap();

        assert_eq!(response.collection[0].id, "o1");
        assert_eq!(response.collection[0].status, OrderStatus::Paid);
    }

    #[tokio::test]
    async fn test_update_missing_order() {
        let mut repo = MockOrderRepository::new();
        repo.expect_exists().returning(|_| Ok(false));

        let service = OrderService::new(repo, MockProductRepository::new());
        let request = UpdateRequest::new(OrderUpdate {
            status: Some(OrderStatus::Shipped),
            cart: None,
        });
        let err = service.update_order("o9", request).await.unwrap_err();

        assert_eq!(err.to_string(), "order o9 not found");
    }

    #[tokio::test]
    async fn test_malformed_cart_rejected_before_lookups() {
        let mut repo = MockOrderRepository::new();
        repo.expect_exists().never();
        let mut products = MockProductRepository::new();
        products.expect_exists().never();

        let service = OrderService::new(repo, products);
        let request = UpdateRequest::new(OrderUpdate {
            status: None,
            cart: Some([("p1".to_string(), 0)].into_iter().collect()),
        });
        let err = service.update_order("o9", request).await.unwrap_err();

        assert!(matches!(
            err,
            OrderError::Validation(e) if e.message == "count of product p1 must be 1 or greater, got 0"
        ));
    }
}
