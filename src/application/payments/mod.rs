//! Payment-return handling

pub mod service;
pub mod vnpay;

pub use service::PaymentReturnService;
pub use vnpay::VnpayReturn;
