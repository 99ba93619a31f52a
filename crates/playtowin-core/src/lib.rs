//! # playtowin-core: Pure Business Logic for the Promotions API
//!
//! Domain types, money arithmetic, field validation and the discount engine.
//! Nothing in here touches a database, a socket or the clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Play-to-Win Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │   handlers ──► services ──► envelope {status,message,code,data} │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ playtowin-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ discount  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ LineItem  │  │   rules   │  │   │
//! │  │   │  CartItem │  │Percentage │  │ Strategy  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 playtowin-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Category, Product, Campaign, Cart, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`discount`] - The five discount strategies
//! - [`error`] - Domain error types
//! - [`validation`] - Request field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use playtowin_core::discount::{DiscountStrategy, LineItem};
//! use playtowin_core::Money;
//!
//! let items = vec![
//!     LineItem::new("shoes", 1, Money::from_major(600)),
//!     LineItem::new("hats", 1, Money::from_major(400)),
//! ];
//!
//! let strategy = DiscountStrategy::Points { points: 500 };
//! // 500 points would be 500.00 off, but points cover at most 20%
//! assert_eq!(strategy.apply(&items).unwrap(), Money::from_major(800));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::{DiscountStrategy, LineItem};
pub use error::{CoreError, CoreResult, DiscountError, DiscountResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single cart line.
pub const MAX_ITEM_QUANTITY: i64 = 999;
