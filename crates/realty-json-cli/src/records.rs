//! Record types for the service's search, object, product and order endpoints.
//!
//! Each response record implements [`FromObject`] by listing its fields; the
//! outbound order request builds a [`Node`] graph for the serializer.

use chrono::NaiveDateTime;
use realty_json::extract::{
    get_bool, get_date_time, get_decimal, get_int, get_object, get_object_array, get_text,
};
use realty_json::{FromObject, Node, Object};
use rust_decimal::Decimal;
use serde::Serialize;

fn text(object: &Object, key: &str) -> Option<String> {
    get_text(object, key).map(str::to_string)
}

/// Basic information about a real-estate object, as returned by search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectBaseInfo {
    pub cadastral_number: String,
    pub address: String,
    pub object_type: Option<String>,
    pub area: Option<Decimal>,
    pub cadastral_price: Option<Decimal>,
    pub status: Option<String>,
}

impl FromObject for ObjectBaseInfo {
    fn from_object(object: &Object) -> Option<Self> {
        Some(ObjectBaseInfo {
            cadastral_number: text(object, "Number")?,
            address: text(object, "Address")?,
            object_type: text(object, "ObjectType"),
            area: get_decimal(object, "Area"),
            cadastral_price: get_decimal(object, "kad_price"),
            status: text(object, "Status"),
        })
    }
}

/// Full object card with the products already ordered for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectData {
    pub info: ObjectInfo,
    pub products: Vec<OrderItem>,
}

impl FromObject for ObjectData {
    fn from_object(object: &Object) -> Option<Self> {
        Some(ObjectData {
            info: get_object(object, "object", ObjectInfo::from_object)?,
            // An unreadable product list does not invalidate the object card.
            products: get_object_array(object, "products", OrderItem::from_object)
                .unwrap_or_default(),
        })
    }
}

/// Full information about a real-estate object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectInfo {
    pub cadastral_number: String,
    pub address: String,
    pub area: Decimal,
    pub name: Option<String>,
    pub info: Option<String>,
    pub object_type: Option<String>,
    pub region: Option<String>,
    pub permitted_use: Option<String>,
    pub ownership_form: Option<String>,
    pub land_category: Option<String>,
    /// `-1` when the registry lists no owners.
    pub owners_count: i64,
    pub level: Option<i64>,
    pub is_canceled: Option<bool>,
    pub cadastral_price: Option<Decimal>,
    pub cadastral_engineer: Option<String>,
    pub registered_at: Option<NaiveDateTime>,
    pub building_area: Option<Decimal>,
    pub building_type: Option<String>,
    pub year_built: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub date: Option<NaiveDateTime>,
    pub price_added_at: Option<NaiveDateTime>,
    pub price_approved_at: Option<NaiveDateTime>,
    pub price_determined_at: Option<NaiveDateTime>,
}

impl FromObject for ObjectInfo {
    fn from_object(object: &Object) -> Option<Self> {
        Some(ObjectInfo {
            cadastral_number: text(object, "Number")?,
            address: text(object, "Address")?,
            area: get_decimal(object, "Area")?,
            name: text(object, "Name"),
            info: text(object, "Info"),
            object_type: text(object, "ObjectType"),
            region: text(object, "Region"),
            permitted_use: text(object, "PermittedUse"),
            ownership_form: text(object, "FormOfOwnership"),
            land_category: text(object, "LandCategory"),
            owners_count: get_int(object, "OwnersCount").unwrap_or(-1),
            level: get_int(object, "Level"),
            is_canceled: get_bool(object, "IsCanceled"),
            cadastral_price: get_decimal(object, "KadPrice"),
            cadastral_engineer: text(object, "KadEngineer"),
            registered_at: get_date_time(object, "DateOfKadReg"),
            building_area: get_decimal(object, "AreaOKC"),
            building_type: text(object, "TypeOKC"),
            year_built: get_date_time(object, "YearBuilt"),
            updated_at: get_date_time(object, "UpdatedAt"),
            date: get_date_time(object, "Date"),
            price_added_at: get_date_time(object, "DateOfPriceAdded"),
            price_approved_at: get_date_time(object, "PriceApprovalDate"),
            price_determined_at: get_date_time(object, "PriceDeterminationDate"),
        })
    }
}

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub product_type: String,
    pub is_active: bool,
}

impl FromObject for ProductInfo {
    fn from_object(object: &Object) -> Option<Self> {
        Some(ProductInfo {
            id: text(object, "product_id")?,
            name: text(object, "product_name")?,
            title: text(object, "product_name_ru")?,
            description: text(object, "product_description")?,
            price: get_decimal(object, "product_price")?,
            product_type: text(object, "product_type")?,
            is_active: get_bool(object, "product_active")?,
        })
    }
}

/// A created order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderInfo {
    pub id: String,
    pub items: Vec<OrderInfoItem>,
    pub total_price: Decimal,
    pub is_account_balance_used: bool,
    pub account_info: Option<AccountInfo>,
}

impl FromObject for OrderInfo {
    fn from_object(object: &Object) -> Option<Self> {
        Some(OrderInfo {
            id: text(object, "id")?,
            items: get_object_array(object, "order_items", OrderInfoItem::from_object)?,
            total_price: get_decimal(object, "total_amount")?,
            is_account_balance_used: get_bool(object, "use_account_balance")?,
            account_info: get_object(object, "account_info", AccountInfo::from_object),
        })
    }
}

/// One ordered product within an [`OrderInfo`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderInfoItem {
    pub order_item_id: String,
    pub product_name: String,
    pub object_key: String,
    pub coupon_id: String,
    pub price: Decimal,
}

impl FromObject for OrderInfoItem {
    fn from_object(object: &Object) -> Option<Self> {
        Some(OrderInfoItem {
            order_item_id: text(object, "order_item_id")?,
            product_name: text(object, "product_name")?,
            object_key: text(object, "object_key")?,
            coupon_id: text(object, "coupon_id")?,
            price: get_decimal(object, "price")?,
        })
    }
}

/// Account balance movement caused by an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountInfo {
    pub not_enough_money: bool,
    pub current_balance: Decimal,
    pub previous_balance: Decimal,
    pub paid_amount: Decimal,
}

impl FromObject for AccountInfo {
    fn from_object(object: &Object) -> Option<Self> {
        Some(AccountInfo {
            not_enough_money: get_bool(object, "not_enough_money")?,
            current_balance: get_decimal(object, "balance_current")?,
            previous_balance: get_decimal(object, "balance_before")?,
            paid_amount: get_decimal(object, "amount")?,
        })
    }
}

/// Status of an order and its products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStatusInfo {
    pub order_id: String,
    pub owner_id: String,
    pub source: String,
    pub paid: bool,
    pub created_at: NaiveDateTime,
    pub items: Vec<OrderItem>,
    pub transaction_id: String,
}

impl FromObject for OrderStatusInfo {
    fn from_object(object: &Object) -> Option<Self> {
        Some(OrderStatusInfo {
            order_id: text(object, "OrderID")?,
            owner_id: text(object, "OwnerID")?,
            source: text(object, "source").unwrap_or_default(),
            paid: get_bool(object, "Paid")?,
            created_at: get_date_time(object, "CreatedAt")?,
            items: get_object_array(object, "OrderItem", OrderItem::from_object)?,
            transaction_id: text(object, "transaction_id")?,
        })
    }
}

/// Status of one ordered product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub order_item_id: String,
    pub order_id: String,
    pub product_id: String,
    pub paid: bool,
    /// Price after discount.
    pub price: Decimal,
    pub discount: Decimal,
    pub quantity: Decimal,
    pub status: String,
    pub rosreestr_request_id: Option<String>,
    pub product_name: String,
    pub metadata: ItemMetadata,
    /// Set once `status` is `done`.
    pub zip_link: Option<String>,
    /// Set once `status` is `done`.
    pub pdf_link: Option<String>,
    pub statuses: Vec<OrderItemStatus>,
}

impl FromObject for OrderItem {
    fn from_object(object: &Object) -> Option<Self> {
        Some(OrderItem {
            order_item_id: text(object, "OrderItemID")?,
            order_id: text(object, "OrderID")?,
            product_id: text(object, "ProductID")?,
            price: get_decimal(object, "Price")?,
            discount: get_decimal(object, "Discount")?,
            quantity: get_decimal(object, "Amount")?,
            status: text(object, "status")?,
            product_name: text(object, "ProductName")?,
            metadata: get_object(object, "ItemMetadata", ItemMetadata::from_object)?,
            paid: get_bool(object, "paid")?,
            statuses: get_object_array(object, "item_statuses", OrderItemStatus::from_object)?,
            rosreestr_request_id: text(object, "rosreestr_request_id"),
            zip_link: text(object, "download_link_zip"),
            pdf_link: text(object, "download_link_pdf"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemMetadata {
    pub order_item_id: String,
    pub cadastral_number: String,
    pub address: Option<String>,
    pub requested_at: Option<NaiveDateTime>,
}

impl FromObject for ItemMetadata {
    fn from_object(object: &Object) -> Option<Self> {
        Some(ItemMetadata {
            order_item_id: text(object, "order_item_id")?,
            cadastral_number: text(object, "kadastr_number")?,
            address: text(object, "address"),
            requested_at: get_date_time(object, "requested_at"),
        })
    }
}

/// One entry of an ordered product's status history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemStatus {
    pub id: String,
    pub order_item_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl FromObject for OrderItemStatus {
    fn from_object(object: &Object) -> Option<Self> {
        Some(OrderItemStatus {
            id: text(object, "ID")?,
            order_item_id: text(object, "OrderItemID")?,
            name: text(object, "Status")?,
            created_at: get_date_time(object, "CreatedAt")?,
        })
    }
}

/// Request body for creating an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub items: Vec<OrderRequestItem>,
    pub use_account_balance: bool,
}

impl OrderRequest {
    pub fn to_node(&self) -> Node {
        Node::map([
            (
                "order_items",
                Node::list(self.items.iter().map(OrderRequestItem::to_node)),
            ),
            ("use_account_balance", Node::from(self.use_account_balance)),
        ])
    }
}

/// A single requested product.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequestItem {
    pub product_name: String,
    pub object_key: String,
    pub coupon_id: Option<String>,
}

impl OrderRequestItem {
    pub fn to_node(&self) -> Node {
        let mut fields = vec![
            ("product_name", Node::from(self.product_name.as_str())),
            ("object_key", Node::from(self.object_key.as_str())),
        ];
        if let Some(coupon) = self.coupon_id.as_deref().filter(|c| !c.is_empty()) {
            fields.push(("coupon_id", Node::from(coupon)));
        }
        Node::map(fields)
    }
}
