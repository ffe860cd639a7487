//! Payment endpoints.

use actix_web::{HttpResponse, web};

use bookstore_core::domain::{NewPayment, PaymentStatus, present};
use bookstore_core::error::RepoError;
use bookstore_shared::MessageResponse;
use bookstore_shared::dto::{CreatePaymentRequest, UpdateStatusRequest};
use bookstore_web::{AppError, AppResult};

use crate::state::PaymentState;

fn payment_not_found() -> AppError {
    AppError::NotFound("Payment not found".to_string())
}

fn missing_as_not_found(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound => payment_not_found(),
        other => other.into(),
    }
}

/// POST /payments - the outcome is decided before the row is written.
pub async fn create_payment(
    state: web::Data<PaymentState>,
    body: web::Json<CreatePaymentRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let (Some(order_id), Some(user_id), Some(amount), Some(currency), Some(payment_method)) = (
        present(request.order_id),
        present(request.user_id),
        request.amount,
        present(request.currency),
        present(request.payment_method),
    ) else {
        return Err(AppError::bad_request(
            "Missing required fields: order_id, user_id, amount, currency, payment_method",
        ));
    };

    let new_payment = NewPayment::new(order_id, user_id, amount, currency, payment_method)?;
    let status = state.decider.decide(&new_payment);
    let payment = state.payments.create(new_payment.with_status(status)).await?;

    tracing::info!(
        payment_id = payment.id,
        order_id = %payment.order_id,
        transaction_id = %payment.transaction_id,
        status = %payment.status,
        "Payment recorded"
    );
    Ok(HttpResponse::Created().json(payment))
}

/// GET /payments
pub async fn list_payments(state: web::Data<PaymentState>) -> AppResult<HttpResponse> {
    let payments = state.payments.find_all().await?;
    Ok(HttpResponse::Ok().json(payments))
}

/// GET /payments/{id}
pub async fn get_payment(
    state: web::Data<PaymentState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let payment = state
        .payments
        .find_by_id(id.into_inner())
        .await?
        .ok_or_else(payment_not_found)?;
    Ok(HttpResponse::Ok().json(payment))
}

/// GET /payments/order/{order_id} - 404 when the order has no payments.
pub async fn payments_for_order(
    state: web::Data<PaymentState>,
    order_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let payments = state.payments.find_by_order(&order_id).await?;
    if payments.is_empty() {
        return Err(AppError::NotFound(
            "No payments found for this order".to_string(),
        ));
    }
    Ok(HttpResponse::Ok().json(payments))
}

/// PUT /payments/{id}/status
pub async fn update_payment_status(
    state: web::Data<PaymentState>,
    id: web::Path<i32>,
    body: web::Json<UpdateStatusRequest>,
) -> AppResult<HttpResponse> {
    let Some(status) = present(body.into_inner().status) else {
        return Err(AppError::bad_request("Status is required"));
    };
    let status: PaymentStatus = status.parse()?;

    let id = id.into_inner();
    let payment = state
        .payments
        .update_status(id, status)
        .await
        .map_err(missing_as_not_found)?;

    tracing::info!(payment_id = id, status = %status, "Payment status updated");
    Ok(HttpResponse::Ok().json(payment))
}

/// DELETE /payments/{id}
pub async fn delete_payment(
    state: web::Data<PaymentState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state
        .payments
        .delete(id)
        .await
        .map_err(missing_as_not_found)?;

    tracing::info!(payment_id = id, "Payment deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Payment deleted successfully")))
}
