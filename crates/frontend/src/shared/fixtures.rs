//! Демонстрационные данные на случай, когда бэкенд недоступен

use contracts::domain::a001_category::aggregate::{Category, CategoryId, CategoryStatus};
use contracts::domain::a002_product::aggregate::{
    Product, ProductDto, ProductId, Shipping, StockStatus, Supplier,
};
use contracts::domain::common::{AggregateId, EntityMetadata};
use uuid::Uuid;

const SAMPLE_AUTHOR: &str = "Admin";

fn category(n: u128, title: &str, parent: Option<u128>) -> Category {
    Category::with_metadata(
        CategoryId::new(Uuid::from_u128(n)),
        title,
        Some(format!("Sample {} category", title.to_lowercase())),
        CategoryStatus::Active,
        parent.map(|p| CategoryId::new(Uuid::from_u128(p))),
        EntityMetadata::new(SAMPLE_AUTHOR),
    )
}

pub fn sample_categories() -> Vec<Category> {
    vec![
        category(1, "Electronics", None),
        category(2, "Mobiles", Some(1)),
        category(3, "Laptops", Some(1)),
        category(4, "Clothing", None),
        category(5, "Men's Wear", Some(4)),
        category(6, "Home & Kitchen", None),
    ]
}

/// Категории без родителя
pub fn sample_parent_categories() -> Vec<Category> {
    sample_categories()
        .into_iter()
        .filter(Category::is_top_level)
        .collect()
}

fn product(n: u128, name: &str, category: u128, price: f64, mrp: f64, stock: i64) -> Product {
    let data = ProductDto {
        name: name.to_string(),
        slug: contracts::domain::a002_product::slug::generate_slug(name),
        sku: format!("{:06}", 100000 + n),
        category: CategoryId::new(Uuid::from_u128(category)).as_string(),
        price,
        mrp: Some(mrp),
        discount_price: None,
        stock_quantity: stock,
        stock_status: if stock > 0 {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        },
        description: format!("{} sample description", name),
        specification: "Sample specification".to_string(),
        colour: "Black".to_string(),
        size: String::new(),
        variants: Vec::new(),
        brand: "Sample".to_string(),
        weight: String::new(),
        dimensions: String::new(),
        tags: vec!["sample".to_string()],
        warranty: "1 year".to_string(),
        return_policy: "7 days return".to_string(),
        barcode: format!("890{:010}", n),
        hsn_code: "8517".to_string(),
        supplier: Some(Supplier {
            name: "Sample Traders".to_string(),
            contact: "9876543210".to_string(),
            email: "sample.traders@gmail.com".to_string(),
        }),
        shipping: Some(Shipping {
            charges: 0.0,
            delivery_time: "3-5 days".to_string(),
            restrictions: "None".to_string(),
        }),
        is_active: true,
    };
    Product::with_metadata(
        ProductId::new(Uuid::from_u128(1000 + n)),
        data,
        Vec::new(),
        EntityMetadata::new(SAMPLE_AUTHOR),
    )
}

pub fn sample_products() -> Vec<Product> {
    vec![
        product(1, "Smartphone X1", 2, 14999.0, 17999.0, 25),
        product(2, "Ultrabook 14", 3, 54990.0, 61990.0, 8),
        product(3, "Cotton Polo Shirt", 5, 799.0, 1299.0, 0),
    ]
}
