//! Order endpoints. An order and its items are always written together.

use actix_web::{HttpResponse, web};

use bookstore_core::domain::{NewOrder, NewOrderItem, Order, OrderStatus, present};
use bookstore_core::error::RepoError;
use bookstore_shared::MessageResponse;
use bookstore_shared::dto::{CreateOrderRequest, UpdateStatusRequest};
use bookstore_web::{AppError, AppResult};

use crate::state::OrderState;

fn order_not_found() -> AppError {
    AppError::NotFound("Order not found".to_string())
}

fn missing_as_not_found(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound => order_not_found(),
        other => other.into(),
    }
}

async fn find_order(state: &OrderState, id: i32) -> AppResult<Order> {
    state.orders.find_by_id(id).await?.ok_or_else(order_not_found)
}

/// POST /orders
///
/// Every item is validated before anything is written, so a bad item
/// leaves no partial order behind.
pub async fn create_order(
    state: web::Data<OrderState>,
    body: web::Json<CreateOrderRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let (Some(user_id), Some(shipping_address), Some(items)) = (
        present(request.user_id),
        present(request.shipping_address),
        request.items,
    ) else {
        return Err(AppError::bad_request(
            "Missing required fields: user_id, shipping_address, items",
        ));
    };

    let items = items
        .into_iter()
        .map(|item| NewOrderItem::new(item.book_id, item.quantity, item.price_at_purchase))
        .collect::<Result<Vec<_>, _>>()?;
    let new_order = NewOrder::new(user_id, shipping_address, items)?;

    let order = state.orders.create(new_order).await?;
    tracing::info!(
        order_id = order.id,
        user_id = %order.user_id,
        items = order.items.len(),
        total_amount = order.total_amount,
        "Order created"
    );
    Ok(HttpResponse::Created().json(order))
}

/// GET /orders
pub async fn list_orders(state: web::Data<OrderState>) -> AppResult<HttpResponse> {
    let orders = state.orders.find_all().await?;
    Ok(HttpResponse::Ok().json(orders))
}

/// GET /orders/{id} - items nested.
pub async fn get_order(
    state: web::Data<OrderState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let order = find_order(&state, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// GET /orders/{id}/items
pub async fn list_order_items(
    state: web::Data<OrderState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let order = find_order(&state, id.into_inner()).await?;
    let items = state.orders.items_for_order(order.id).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// PUT /orders/{id}/status
pub async fn update_order_status(
    state: web::Data<OrderState>,
    id: web::Path<i32>,
    body: web::Json<UpdateStatusRequest>,
) -> AppResult<HttpResponse> {
    let Some(status) = present(body.into_inner().status) else {
        return Err(AppError::bad_request("Status is required"));
    };
    let status: OrderStatus = status.parse()?;

    let id = id.into_inner();
    let order = state
        .orders
        .update_status(id, status)
        .await
        .map_err(missing_as_not_found)?;

    tracing::info!(order_id = id, status = %status, "Order status updated");
    Ok(HttpResponse::Ok().json(order))
}

/// DELETE /orders/{id} - removes the items too.
pub async fn delete_order(
    state: web::Data<OrderState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state.orders.delete(id).await.map_err(missing_as_not_found)?;

    tracing::info!(order_id = id, "Order deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Order deleted successfully")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    use crate::testing::{test_app, test_state};

    fn two_books() -> Value {
        json!({
            "user_id": 42,
            "shipping_address": "1 Library Lane",
            "items": [
                {"book_id": "b1", "quantity": 2, "price_at_purchase": 9.99},
                {"book_id": "b2", "quantity": "1", "price_at_purchase": "5.00"},
            ]
        })
    }

    #[actix_web::test]
    async fn test_create_order_computes_total() {
        let app = test::init_service(test_app(test_state().await)).await;

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(two_books())
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert!((body["total_amount"].as_f64().unwrap() - 24.98).abs() < 1e-9);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["user_id"], "42");
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["items"][1]["quantity"], 1);
    }

    #[actix_web::test]
    async fn test_invalid_item_persists_nothing() {
        let app = test::init_service(test_app(test_state().await)).await;

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({
                "user_id": "42",
                "shipping_address": "1 Library Lane",
                "items": [
                    {"book_id": "b1", "quantity": 2, "price_at_purchase": 9.99},
                    {"book_id": "b2", "quantity": -1, "price_at_purchase": 5.00},
                ]
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body["detail"],
            "Quantity and price_at_purchase must be positive for items"
        );

        let req = test::TestRequest::get().uri("/orders").to_request();
        let orders: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(orders, json!([]));
    }

    #[actix_web::test]
    async fn test_create_order_requires_fields_and_items() {
        let app = test::init_service(test_app(test_state().await)).await;

        for payload in [
            json!({"shipping_address": "1 Library Lane", "items": []}),
            json!({"user_id": 1, "shipping_address": "1 Library Lane", "items": []}),
            json!({"user_id": 1, "shipping_address": "1 Library Lane", "items": [{"book_id": "b1"}]}),
        ] {
            let req = test::TestRequest::post()
                .uri("/orders")
                .set_json(payload)
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_get_order_and_items() {
        let app = test::init_service(test_app(test_state().await)).await;

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(two_books())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = &created["id"];

        let req = test::TestRequest::get()
            .uri(&format!("/orders/{id}"))
            .to_request();
        let order: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(order["items"], created["items"]);

        let req = test::TestRequest::get()
            .uri(&format!("/orders/{id}/items"))
            .to_request();
        let items: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(items[0]["book_id"], "b1");
        assert_eq!(items[0]["order_id"], *id);

        let req = test::TestRequest::get().uri("/orders/999/items").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_status() {
        let app = test::init_service(test_app(test_state().await)).await;

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(two_books())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/orders/{}/status", created["id"]);

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"status": "shipped"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "shipped");
        assert_eq!(body["total_amount"], created["total_amount"]);

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"status": "lost"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri("/orders/999/status")
            .set_json(json!({"status": "shipped"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_order() {
        let app = test::init_service(test_app(test_state().await)).await;

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(two_books())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/orders/{}", created["id"]);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::delete().uri(&uri).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
