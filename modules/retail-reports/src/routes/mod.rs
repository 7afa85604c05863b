pub mod expense_history;
pub mod failure;
pub mod sales_report;

use axum::{
    middleware::from_fn,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::health::{health, ready};
use crate::middleware::trace_id::trace_id_middleware;
use crate::store::ReportingStore;

/// Build the application router over an injected store
pub fn app(store: Arc<dyn ReportingStore>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/ready", get(ready))
        .route(
            "/getAllExpensesData",
            get(expense_history::get_all_expenses_data),
        )
        .route(
            "/deleteExpenseData/{id}",
            delete(expense_history::delete_expense_data),
        )
        .route(
            "/monthlySalesReport",
            get(sales_report::monthly_sales_report),
        )
        .route("/monthlySalesData", get(sales_report::monthly_sales_data))
        .route(
            "/yearlySalesReport",
            get(sales_report::yearly_sales_report),
        )
        .with_state(store)
        .layer(from_fn(trace_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
