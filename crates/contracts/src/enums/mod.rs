pub mod kpi_category;
pub mod tier;
