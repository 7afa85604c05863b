//! Sales Report API Routes
//!
//! Provides the monthly/yearly sales reports and the per-customer delivery
//! summary.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::failure::FailureResponse;
use crate::params::{MonthlyReportQuery, Pagination, ReportWindow};
use crate::services::customer_delivery_service::{self, CustomerDelivery};
use crate::services::sales_report_service::{self, SalesReport, YearlySalesReport};
use crate::store::ReportingStore;

#[derive(Debug, Serialize)]
pub struct SalesReportResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: SalesReport,
}

#[derive(Debug, Serialize)]
pub struct YearlySalesReportResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: YearlySalesReport,
}

/// Query parameters for the delivery summary
#[derive(Debug, Default, Deserialize)]
pub struct SalesDataQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SalesDataResponse {
    #[serde(rename = "Results")]
    pub results: Vec<CustomerDelivery>,
    #[serde(rename = "TotalDeliveries")]
    pub total_deliveries: i64,
    #[serde(rename = "currentPage")]
    pub current_page: i64,
    #[serde(rename = "perPage")]
    pub per_page: i64,
}

/// Handler for GET /monthlySalesReport
///
/// `month` and `year` are optional and filter independently; without them
/// the report covers all time.
pub async fn monthly_sales_report(
    State(store): State<Arc<dyn ReportingStore>>,
    query: Result<Query<MonthlyReportQuery>, QueryRejection>,
) -> Result<Json<SalesReportResponse>, FailureResponse> {
    let query = query.map(|Query(q)| q).unwrap_or_else(|rejection| {
        tracing::warn!(error = %rejection, "Unreadable report filter, reporting all time");
        MonthlyReportQuery::default()
    });
    let window = ReportWindow::from(&query);

    let report = sales_report_service::monthly_report(store.as_ref(), window)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, month = ?window.month, year = ?window.year, "Failed to build monthly sales report");
            FailureResponse::monthly_report()
        })?;

    Ok(Json(SalesReportResponse {
        success: true,
        report,
    }))
}

/// Handler for GET /yearlySalesReport
///
/// Always reports the current calendar year of the server's local clock.
pub async fn yearly_sales_report(
    State(store): State<Arc<dyn ReportingStore>>,
) -> Result<Json<YearlySalesReportResponse>, FailureResponse> {
    let year = chrono::Local::now().year();

    let report = sales_report_service::yearly_report(store.as_ref(), year)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, year, "Failed to build yearly sales report");
            FailureResponse::yearly_report()
        })?;

    Ok(Json(YearlySalesReportResponse {
        success: true,
        report,
    }))
}

/// Handler for GET /monthlySalesData
///
/// Paginated like /getAllExpensesData; `search` matches first name, last
/// name or city, case-insensitively.
pub async fn monthly_sales_data(
    State(store): State<Arc<dyn ReportingStore>>,
    query: Result<Query<SalesDataQuery>, QueryRejection>,
) -> Result<Json<SalesDataResponse>, FailureResponse> {
    let query = query.map(|Query(q)| q).unwrap_or_else(|rejection| {
        tracing::warn!(error = %rejection, "Unreadable delivery query, using defaults");
        SalesDataQuery::default()
    });
    let pagination = Pagination::from_params(query.page.as_deref(), query.limit.as_deref());
    let search = query.search.unwrap_or_default();

    let page = customer_delivery_service::monthly_sales_data(store.as_ref(), pagination, &search)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, page = pagination.page, limit = pagination.limit, "Failed to list customer deliveries");
            FailureResponse::delivery_status()
        })?;

    Ok(Json(SalesDataResponse {
        results: page.rows,
        total_deliveries: page.total_count,
        current_page: page.page,
        per_page: page.limit,
    }))
}
