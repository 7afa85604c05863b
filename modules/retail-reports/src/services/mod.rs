pub mod customer_delivery_service;
pub mod expense_history_service;
pub mod sales_aggregation;
pub mod sales_report_service;
