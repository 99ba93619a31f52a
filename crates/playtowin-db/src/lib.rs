//! # playtowin-db: Database Layer for the Promotions API
//!
//! SQLite persistence with sqlx: one pool, embedded migrations, and a
//! repository per resource.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Play-to-Win Data Flow                            │
//! │                                                                         │
//! │  axum handler (GET /discounts/points/{cart_id})                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   playtowin-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ CategoryRepo   │   │              │   │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo    │   │ 001_initial_ │   │   │
//! │  │   │ Connection    │    │ CampaignRepo   │   │   schema.sql │   │   │
//! │  │   │ Management    │    │ DiscountRule.. │   │              │   │   │
//! │  │   │               │    │ UserRepo       │   │              │   │   │
//! │  │   │               │    │ CartRepo       │   │              │   │   │
//! │  │   │               │    │ CartItemRepo   │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               SQLite Database (DATABASE_PATH)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use playtowin_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("playtowin.db")).await?;
//! let items = db.cart_items().find_by_cart_id(&cart_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::campaign::CampaignRepository;
pub use repository::cart::CartRepository;
pub use repository::cart_item::CartItemRepository;
pub use repository::category::CategoryRepository;
pub use repository::discount_rule::DiscountRuleRepository;
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
