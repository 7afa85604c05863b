pub mod customer_delivery_repo;
pub mod expense_history_repo;
pub mod sales_repo;
