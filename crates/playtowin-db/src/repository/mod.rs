//! # Repositories
//!
//! One repository per resource, each a thin wrapper over the shared pool.
//!
//! ```text
//! Database ──┬── categories()     → CategoryRepository
//!            ├── products()       → ProductRepository
//!            ├── campaigns()      → CampaignRepository
//!            ├── discount_rules() → DiscountRuleRepository  (joins campaign name)
//!            ├── users()          → UserRepository
//!            ├── carts()          → CartRepository
//!            └── cart_items()     → CartItemRepository      (joins product)
//! ```
//!
//! Every repository offers `create`, `find_by_id`, `find_all`, `update` and
//! `delete`. `find_by_id`, `update` and `delete` fail with
//! [`DbError::NotFound`](crate::DbError::NotFound) for an unknown id.

pub mod campaign;
pub mod cart;
pub mod cart_item;
pub mod category;
pub mod discount_rule;
pub mod product;
pub mod user;

#[cfg(test)]
pub(crate) mod fixtures {
    //! Entity builders shared by the repository tests.

    use chrono::{Duration, Utc};
    use playtowin_core::{
        Campaign, Cart, CartItem, Category, DiscountRule, DiscountType, Product, Role, User,
    };
    use uuid::Uuid;

    use crate::{Database, DbConfig};

    pub async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn category(name: &str) -> Category {
        let now = Utc::now();
        Category {
            id: id(),
            name: name.to_string(),
            description: format!("All things {}", name),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn product(name: &str, price_cents: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id(),
            name: name.to_string(),
            description: "desc".to_string(),
            content: "content".to_string(),
            price_cents,
            image: "https://img.example.com/p.png".to_string(),
            sold: 0,
            stock: 10,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn campaign(name: &str) -> Campaign {
        let now = Utc::now();
        Campaign {
            id: id(),
            name: name.to_string(),
            category: "shoes".to_string(),
            is_active: true,
            start_date: now,
            end_date: now + Duration::days(7),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn discount_rule(campaign_id: &str) -> DiscountRule {
        let now = Utc::now();
        DiscountRule {
            id: id(),
            campaign_id: campaign_id.to_string(),
            discount_type: DiscountType::Percentage,
            amount_cents: 0,
            percentage_bps: 1_000,
            item_category: "shoes".to_string(),
            points_ratio: 1.0,
            max_discount_bps: 2_000,
            threshold_amount_cents: 0,
            discount_percentage_threshold_bps: 0,
            created_at: now,
            updated_at: now,
            campaign_name: None,
        }
    }

    pub fn user(email: &str) -> User {
        let now = Utc::now();
        User {
            id: id(),
            name: "Ann".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn cart(user_id: &str) -> Cart {
        let now = Utc::now();
        Cart {
            id: id(),
            user_id: user_id.to_string(),
            total_amount_cents: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn cart_item(cart_id: &str, product_id: &str, quantity: i64, unit_cents: i64) -> CartItem {
        let now = Utc::now();
        CartItem {
            id: id(),
            cart_id: cart_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
            category: "shoes".to_string(),
            unit_price_cents: unit_cents,
            total_price_cents: unit_cents * quantity,
            created_at: now,
            updated_at: now,
            product_name: None,
            product_description: None,
            product_image: None,
            product_price_cents: None,
        }
    }
}
