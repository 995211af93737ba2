pub mod balance_service;
pub mod conversion_service;
pub mod format_service;
pub mod report_service;
