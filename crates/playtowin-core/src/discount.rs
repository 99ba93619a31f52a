//! # Discount Engine
//!
//! Stateless discount strategies over a cart's line items.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Discount Calculation                              │
//! │                                                                         │
//! │  &[LineItem]                                                            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  validate_line_items ── empty? ──────────────► EmptyCart                │
//! │      │                  qty/price <= 0? ─────► InvalidLineItem          │
//! │      ▼                                                                  │
//! │  strategy params ────── out of range? ───────► Invalid*                 │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  subtotal = Σ total_price ── overflow? ──────► TotalOverflow            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ┌────────────┬────────────┬────────────┬────────────┬────────────┐     │
//! │  │   fixed    │ percentage │  category  │   points   │ threshold  │     │
//! │  │ sub - amt  │ sub×(1-p)  │ match×(1-p)│ sub - min( │ sub - ⌊sub │     │
//! │  │            │            │ + others   │ pts, 20%)  │ /t⌋ × d    │     │
//! │  └────────────┴────────────┴────────────┴────────────┴────────────┘     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  max(0, result)                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use playtowin_core::discount::{self, LineItem};
//! use playtowin_core::money::Money;
//! use playtowin_core::types::Percentage;
//!
//! let items = vec![LineItem::new("shoes", 2, Money::from_major(500))];
//!
//! let total = discount::percentage(&items, Percentage::from_percent(10.0)).unwrap();
//! assert_eq!(total, Money::from_major(900));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DiscountError, DiscountResult};
use crate::money::Money;
use crate::types::{DiscountType, Percentage};

/// Share of the subtotal that loyalty points may cover.
pub const POINTS_CAP: Percentage = Percentage::from_bps(2_000);

// =============================================================================
// Line Item
// =============================================================================

/// One product line fed to the engine.
///
/// `total_price` is taken as given; the engine never recomputes it from
/// `quantity × unit_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub category: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total_price: Money,
}

impl LineItem {
    /// Builds a line whose total is `unit_price × quantity`.
    pub fn new(category: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        LineItem {
            category: category.into(),
            quantity,
            unit_price,
            total_price: unit_price * quantity,
        }
    }

    fn is_valid(&self) -> bool {
        self.quantity > 0 && self.unit_price.is_positive() && self.total_price.is_positive()
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Checks the preconditions every strategy shares.
///
/// Fails on the first offending item; the index is zero-based.
pub fn validate_line_items(items: &[LineItem]) -> DiscountResult<()> {
    if items.is_empty() {
        return Err(DiscountError::EmptyCart);
    }

    match items.iter().position(|item| !item.is_valid()) {
        Some(index) => Err(DiscountError::InvalidLineItem { index }),
        None => Ok(()),
    }
}

/// Pre-discount subtotal: the sum of each item's `total_price`.
///
/// Fails with [`DiscountError::TotalOverflow`] when the sum leaves `i64`.
pub fn subtotal(items: &[LineItem]) -> DiscountResult<Money> {
    items.iter().try_fold(Money::zero(), |acc, item| {
        acc.checked_add(item.total_price)
            .ok_or(DiscountError::TotalOverflow)
    })
}

fn check_percentage(pct: Percentage) -> DiscountResult<()> {
    if pct.is_within_range() {
        Ok(())
    } else {
        Err(DiscountError::InvalidPercentage)
    }
}

// =============================================================================
// Strategies
// =============================================================================

/// Takes a flat amount off the subtotal.
///
/// ```rust
/// use playtowin_core::discount::{fixed_amount, LineItem};
/// use playtowin_core::money::Money;
///
/// let items = vec![LineItem::new("toys", 1, Money::from_cents(1_000))];
/// assert_eq!(fixed_amount(&items, Money::from_cents(250)).unwrap().cents(), 750);
/// assert_eq!(fixed_amount(&items, Money::from_cents(5_000)).unwrap(), Money::zero());
/// ```
pub fn fixed_amount(items: &[LineItem], amount: Money) -> DiscountResult<Money> {
    validate_line_items(items)?;
    if amount.is_negative() {
        return Err(DiscountError::InvalidAmount);
    }

    Ok((subtotal(items)? - amount).floor_at_zero())
}

/// Takes a percentage off the whole subtotal.
pub fn percentage(items: &[LineItem], pct: Percentage) -> DiscountResult<Money> {
    validate_line_items(items)?;
    check_percentage(pct)?;

    Ok(subtotal(items)?.apply_percentage_discount(pct).floor_at_zero())
}

/// Takes a percentage off the items of one category only.
///
/// The whole cart is scanned before deciding the category is absent; a match
/// anywhere is enough. Each matching line is discounted and rounded on its own.
pub fn category(items: &[LineItem], category: &str, pct: Percentage) -> DiscountResult<Money> {
    validate_line_items(items)?;
    if category.is_empty() {
        return Err(DiscountError::InvalidCategory);
    }
    check_percentage(pct)?;
    subtotal(items)?;

    // discounted lines never exceed their totals, so the sum fits
    let mut matched = false;
    let mut total = Money::zero();
    for item in items {
        if item.category == category {
            matched = true;
            total += item.total_price.apply_percentage_discount(pct);
        } else {
            total += item.total_price;
        }
    }

    if !matched {
        return Err(DiscountError::CategoryNotFound(category.to_string()));
    }

    Ok(total.floor_at_zero())
}

/// Redeems loyalty points, one point per whole currency unit, capped at
/// [`POINTS_CAP`] of the subtotal.
pub fn points(items: &[LineItem], points: i64) -> DiscountResult<Money> {
    validate_line_items(items)?;
    if points < 0 {
        return Err(DiscountError::InvalidPoints);
    }

    let subtotal = subtotal(items)?;
    let cap = subtotal.percentage_of(POINTS_CAP);
    let discount = Money::from_major(points).min(cap);

    Ok((subtotal - discount).floor_at_zero())
}

/// "Buy N get discount": `discount` off for every full multiple of
/// `threshold` in the subtotal.
///
/// Below the threshold the subtotal comes back unchanged.
///
/// ```rust
/// use playtowin_core::discount::{threshold, LineItem};
/// use playtowin_core::money::Money;
///
/// let items = vec![LineItem::new("food", 1, Money::from_major(1000))];
/// let total = threshold(&items, Money::from_major(300), Money::from_major(50)).unwrap();
/// assert_eq!(total, Money::from_major(850));
/// ```
pub fn threshold(items: &[LineItem], threshold: Money, discount: Money) -> DiscountResult<Money> {
    validate_line_items(items)?;
    if !threshold.is_positive() {
        return Err(DiscountError::InvalidThreshold);
    }
    if !discount.is_positive() {
        return Err(DiscountError::InvalidAmount);
    }

    let subtotal = subtotal(items)?;
    if subtotal < threshold {
        return Ok(subtotal);
    }

    let multiples = subtotal.cents() / threshold.cents();
    let total_discount = Money::from_cents(multiples.saturating_mul(discount.cents()));

    Ok((subtotal - total_discount).floor_at_zero())
}

// =============================================================================
// Strategy Value
// =============================================================================

/// A discount strategy with its parameters, selected as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountStrategy {
    FixedAmount { amount: Money },
    Percentage { percentage: Percentage },
    Category { category: String, percentage: Percentage },
    Points { points: i64 },
    Threshold { threshold: Money, discount: Money },
}

impl DiscountStrategy {
    /// Runs the strategy over the given line items.
    pub fn apply(&self, items: &[LineItem]) -> DiscountResult<Money> {
        match self {
            DiscountStrategy::FixedAmount { amount } => fixed_amount(items, *amount),
            DiscountStrategy::Percentage { percentage: pct } => percentage(items, *pct),
            DiscountStrategy::Category {
                category: name,
                percentage: pct,
            } => category(items, name, *pct),
            DiscountStrategy::Points { points: pts } => points(items, *pts),
            DiscountStrategy::Threshold {
                threshold: limit,
                discount,
            } => threshold(items, *limit, *discount),
        }
    }

    /// The stored rule type this strategy corresponds to.
    pub fn kind(&self) -> DiscountType {
        match self {
            DiscountStrategy::FixedAmount { .. } => DiscountType::FixedAmount,
            DiscountStrategy::Percentage { .. } => DiscountType::Percentage,
            DiscountStrategy::Category { .. } => DiscountType::Category,
            DiscountStrategy::Points { .. } => DiscountType::Points,
            DiscountStrategy::Threshold { .. } => DiscountType::Special,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
