//! Database Models

// Serde helpers
pub mod serde_helpers;

// Identity
pub mod user;

// Catalog
pub mod product;

// Orders
pub mod order;

// Balance ledger
pub mod recharge;

// System
pub mod payment_config;

// Re-exports
pub use user::{Role, StoreLevel, User, UserCreate, UserId, UserResponse, UserStatus, UserUpdate};
pub use product::{Product, ProductId, ProductPublic, ProductUpdate};
pub use order::{Order, OrderActivity, OrderDetail, OrderId, OrderListPage, OrderStatus};
pub use recharge::{Recharge, RechargeId, RechargeStatus, RechargeWithUser};
pub use payment_config::{PaymentConfig, PaymentConfigUpdate};
