//! Outbound integrations for storefront.
//!
//! # Services
//!
//! - `inquiries` - Forwards connect form submissions to the studio's webhook

pub mod inquiries;

pub use inquiries::{Delivery, InquiryDeliveryError, InquiryNotifier};
