//! # Domain Types
//!
//! Core domain types used throughout the promotions API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog                 Promotions               Shopping              │
//! │  ┌──────────────┐        ┌──────────────┐         ┌──────────────┐      │
//! │  │  Category    │        │  Campaign    │◄──┐     │    Cart      │      │
//! │  │  Product     │        │ DiscountRule │───┘     │  CartItem    │      │
//! │  └──────────────┘        └──────────────┘         └──────┬───────┘      │
//! │                                                          │ owned by     │
//! │  Value types                                             ▼              │
//! │  ┌──────────────┐  ┌──────────────┐               ┌──────────────┐      │
//! │  │ Money (cents)│  │ Percentage   │               │    User      │      │
//! │  └──────────────┘  │ (bps, signed)│               │ (Role)       │      │
//! │                    └──────────────┘               └──────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity is identified by a UUID v4 string `id`. Monetary columns are
//! stored as integer cents (`*_cents`) with a `Money` accessor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::discount::LineItem;
use crate::money::Money;

// =============================================================================
// Percentage
// =============================================================================

/// A percentage in basis points (1 bp = 0.01%).
///
/// Signed on purpose: a caller may ask for `-5%`, and the discount engine
/// must be able to see and reject it.
///
/// ```rust
/// use playtowin_core::types::Percentage;
///
/// let p = Percentage::from_percent(12.5);
/// assert_eq!(p.bps(), 1250);
/// assert!(p.is_within_range());
/// assert!(!Percentage::from_percent(100.01).is_within_range());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(i64);

impl Percentage {
    /// 100%.
    pub const HUNDRED: Percentage = Percentage(10_000);

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: i64) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a decimal percent value (`12.5` → 1250 bps).
    ///
    /// Rounding never moves a value into `0..=100`: a negative input stays
    /// negative and anything above 100 stays above [`Percentage::HUNDRED`].
    /// Infinities saturate and NaN maps to zero.
    pub fn from_percent(pct: f64) -> Self {
        // `as` saturates and sends NaN to 0
        let bps = (pct * 100.0).round() as i64;
        if pct < 0.0 && bps >= 0 {
            Percentage(-1)
        } else if pct > 100.0 && bps <= Self::HUNDRED.0 {
            Percentage(Self::HUNDRED.0 + 1)
        } else {
            Percentage(bps)
        }
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Returns the value as a percent (display only).
    #[inline]
    pub fn as_percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    /// True when `0% <= self <= 100%`.
    #[inline]
    pub const fn is_within_range(&self) -> bool {
        self.0 >= 0 && self.0 <= Self::HUNDRED.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

// =============================================================================
// Role
// =============================================================================

/// Authorization role carried in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Self-registered shopper.
    User,
    /// May manage the catalog, campaigns and discount rules.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description for listings.
    pub description: String,

    /// Long-form content for the product page.
    pub content: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Image URL.
    pub image: String,

    /// Units sold so far.
    pub sold: i64,

    /// Units in stock.
    pub stock: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Campaign
// =============================================================================

/// A time-boxed promotional campaign scoped to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub category: String,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Checks whether the campaign is active and `at` lies inside its window.
    pub fn is_running_at(&self, at: DateTime<Utc>) -> bool {
        self.is_active && self.start_date <= at && at <= self.end_date
    }
}

// =============================================================================
// Discount Rule
// =============================================================================

/// The kind of discount a stored rule describes.
///
/// Mirrors the five engine strategies; `Special` is the threshold
/// ("buy N get discount") strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    FixedAmount,
    Percentage,
    Category,
    Points,
    Special,
}

/// Discount configuration attached to a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DiscountRule {
    pub id: String,
    pub campaign_id: String,
    pub discount_type: DiscountType,
    pub amount_cents: i64,
    pub percentage_bps: i64,
    pub item_category: String,
    pub points_ratio: f64,
    pub max_discount_bps: i64,
    pub threshold_amount_cents: i64,
    pub discount_percentage_threshold_bps: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Name of the owning campaign, filled in by lookups.
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub campaign_name: Option<String>,
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// The password hash and the current refresh token never leave the server;
/// use [`UserProfile`] for responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Cart {
    pub id: String,
    pub user_id: String,
    pub total_amount_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A product line in a cart.
///
/// `category`, `unit_price_cents` and `total_price_cents` are written by the
/// client and trusted as given. The `product_*` fields are a read-only
/// projection joined from the products table and are `None` when the product
/// no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CartItem {
    pub id: String,
    pub cart_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub category: String,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub product_name: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub product_description: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub product_image: Option<String>,
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub product_price_cents: Option<i64>,
}

impl CartItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the stored line total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }

    /// Projects this cart item into a discount engine input.
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            category: self.category.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price(),
            total_price: self.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_percentage_from_percent() {
        assert_eq!(Percentage::from_percent(10.0).bps(), 1000);
        assert_eq!(Percentage::from_percent(8.25).bps(), 825);
        assert_eq!(Percentage::from_percent(-5.0).bps(), -500);
        assert_eq!(Percentage::from_percent(f64::NAN).bps(), 0);
        assert!(!Percentage::from_percent(f64::INFINITY).is_within_range());
    }

    #[test]
    fn test_percentage_rounding_keeps_out_of_range() {
        assert!(!Percentage::from_percent(100.004).is_within_range());
        assert!(!Percentage::from_percent(-0.004).is_within_range());
        assert!(Percentage::from_percent(99.996).is_within_range());
        assert_eq!(Percentage::from_percent(100.0), Percentage::HUNDRED);
        assert!((Percentage::from_bps(825).as_percent() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_percentage_range() {
        assert!(Percentage::zero().is_within_range());
        assert!(Percentage::HUNDRED.is_within_range());
        assert!(!Percentage::from_bps(-1).is_within_range());
        assert!(!Percentage::from_bps(10_001).is_within_range());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(Role::default(), Role::User);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_discount_type_serialization() {
        let json = serde_json::to_string(&DiscountType::FixedAmount).unwrap();
        assert_eq!(json, "\"fixed_amount\"");
        let parsed: DiscountType = serde_json::from_str("\"special\"").unwrap();
        assert_eq!(parsed, DiscountType::Special);
    }

    #[test]
    fn test_campaign_window() {
        let now = Utc::now();
        let campaign = Campaign {
            id: "c".to_string(),
            name: "Summer".to_string(),
            category: "clothing".to_string(),
            is_active: true,
            start_date: now - Duration::days(1),
            end_date: now + Duration::days(6),
            created_at: now,
            updated_at: now,
        };
        assert!(campaign.is_running_at(now));
        assert!(!campaign.is_running_at(now + Duration::days(7)));

        let paused = Campaign { is_active: false, ..campaign };
        assert!(!paused.is_running_at(now));
    }

    #[test]
    fn test_user_hides_secrets() {
        let now = Utc::now();
        let user = User {
            id: "u".to_string(),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::User,
            refresh_token: Some("token".to_string()),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("refresh_token"));

        let profile = UserProfile::from(&user);
        assert_eq!(profile.email, "ann@example.com");
    }

    #[test]
    fn test_cart_item_to_line_item() {
        let now = Utc::now();
        let item = CartItem {
            id: "i".to_string(),
            cart_id: "c".to_string(),
            product_id: "p".to_string(),
            quantity: 2,
            category: "shoes".to_string(),
            unit_price_cents: 1500,
            total_price_cents: 3000,
            created_at: now,
            updated_at: now,
            product_name: None,
            product_description: None,
            product_image: None,
            product_price_cents: None,
        };
        let line = item.to_line_item();
        assert_eq!(line.category, "shoes");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price.cents(), 1500);
        assert_eq!(line.total_price.cents(), 3000);
    }
}
