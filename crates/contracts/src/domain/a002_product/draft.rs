//! Черновик товара: значения полей в том виде, в каком их ввёл пользователь.
//!
//! Обновление поля возвращает новый черновик (`with_field`), вложенные
//! объекты поставщика и доставки адресуются путями `supplier.name`,
//! `supplier[name]` или `shipping.deliveryTime`.

use super::aggregate::{Product, ProductDto, Shipping, StockStatus, Supplier};
use super::slug::generate_slug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub const PRICE_ABOVE_MRP_ADVISORY: &str = "Selling price cannot be higher than MRP";

/// Ключ multipart-части с файлом изображения
pub const IMAGES_WIRE_KEY: &str = "images";

/// Ключ multipart-части с именем сохранённого изображения, которое надо убрать
pub const REMOVED_IMAGES_WIRE_KEY: &str = "removeImages";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field: {0}")]
pub struct FieldPathError(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierDraft {
    pub name: String,
    pub contact: String,
    pub email: String,
}

impl SupplierDraft {
    fn is_blank(&self) -> bool {
        self.name.is_empty() && self.contact.is_empty() && self.email.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDraft {
    pub charges: String,
    #[serde(rename = "deliveryTime")]
    pub delivery_time: String,
    pub restrictions: String,
}

impl ShippingDraft {
    fn is_blank(&self) -> bool {
        self.charges.is_empty() && self.delivery_time.is_empty() && self.restrictions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub slug: String,
    pub category: String,
    pub sku: String,
    pub price: String,
    pub mrp: String,
    #[serde(rename = "discountPrice")]
    pub discount_price: String,
    #[serde(rename = "stockQuantity")]
    pub stock_quantity: String,
    #[serde(rename = "stockStatus")]
    pub stock_status: String,
    pub description: String,
    pub specification: String,
    pub colour: String,
    pub size: String,
    /// Варианты через запятую
    pub variants: String,
    pub brand: String,
    pub weight: String,
    pub dimensions: String,
    /// Теги через запятую
    pub tags: String,
    pub warranty: String,
    #[serde(rename = "returnPolicy")]
    pub return_policy: String,
    pub barcode: String,
    pub supplier: SupplierDraft,
    #[serde(rename = "hsnCode")]
    pub hsn_code: String,
    pub shipping: ShippingDraft,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            category: String::new(),
            sku: String::new(),
            price: String::new(),
            mrp: String::new(),
            discount_price: String::new(),
            stock_quantity: String::new(),
            stock_status: StockStatus::InStock.as_str().to_string(),
            description: String::new(),
            specification: String::new(),
            colour: String::new(),
            size: String::new(),
            variants: String::new(),
            brand: String::new(),
            weight: String::new(),
            dimensions: String::new(),
            tags: String::new(),
            warranty: String::new(),
            return_policy: String::new(),
            barcode: String::new(),
            supplier: SupplierDraft::default(),
            hsn_code: String::new(),
            shipping: ShippingDraft::default(),
            is_active: true,
        }
    }
}

/// Путь к редактируемому полю черновика
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Slug,
    Category,
    Sku,
    Price,
    Mrp,
    DiscountPrice,
    StockQuantity,
    StockStatus,
    Description,
    Specification,
    Colour,
    Size,
    Variants,
    Brand,
    Weight,
    Dimensions,
    Tags,
    Warranty,
    ReturnPolicy,
    Barcode,
    HsnCode,
    SupplierName,
    SupplierContact,
    SupplierEmail,
    ShippingCharges,
    ShippingDeliveryTime,
    ShippingRestrictions,
    IsActive,
}

impl ProductField {
    pub const ALL: [ProductField; 29] = [
        ProductField::Name,
        ProductField::Slug,
        ProductField::Category,
        ProductField::Sku,
        ProductField::Price,
        ProductField::Mrp,
        ProductField::DiscountPrice,
        ProductField::StockQuantity,
        ProductField::StockStatus,
        ProductField::Description,
        ProductField::Specification,
        ProductField::Colour,
        ProductField::Size,
        ProductField::Variants,
        ProductField::Brand,
        ProductField::Weight,
        ProductField::Dimensions,
        ProductField::Tags,
        ProductField::Warranty,
        ProductField::ReturnPolicy,
        ProductField::Barcode,
        ProductField::HsnCode,
        ProductField::SupplierName,
        ProductField::SupplierContact,
        ProductField::SupplierEmail,
        ProductField::ShippingCharges,
        ProductField::ShippingDeliveryTime,
        ProductField::ShippingRestrictions,
        ProductField::IsActive,
    ];

    /// Ключ поля в multipart-запросе
    pub fn wire_key(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Slug => "slug",
            ProductField::Category => "category",
            ProductField::Sku => "sku",
            ProductField::Price => "price",
            ProductField::Mrp => "mrp",
            ProductField::DiscountPrice => "discountPrice",
            ProductField::StockQuantity => "stockQuantity",
            ProductField::StockStatus => "stockStatus",
            ProductField::Description => "description",
            ProductField::Specification => "specification",
            ProductField::Colour => "colour",
            ProductField::Size => "size",
            ProductField::Variants => "variants",
            ProductField::Brand => "brand",
            ProductField::Weight => "weight",
            ProductField::Dimensions => "dimensions",
            ProductField::Tags => "tags",
            ProductField::Warranty => "warranty",
            ProductField::ReturnPolicy => "returnPolicy",
            ProductField::Barcode => "barcode",
            ProductField::HsnCode => "hsnCode",
            ProductField::SupplierName => "supplier[name]",
            ProductField::SupplierContact => "supplier[contact]",
            ProductField::SupplierEmail => "supplier[email]",
            ProductField::ShippingCharges => "shipping[charges]",
            ProductField::ShippingDeliveryTime => "shipping[deliveryTime]",
            ProductField::ShippingRestrictions => "shipping[restrictions]",
            ProductField::IsActive => "isActive",
        }
    }
}

impl FromStr for ProductField {
    type Err = FieldPathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        // supplier[name] -> supplier.name
        let normalized = path.trim().replace('[', ".").replace(']', "");
        let field = match normalized.as_str() {
            "name" => ProductField::Name,
            "slug" => ProductField::Slug,
            "category" => ProductField::Category,
            "sku" => ProductField::Sku,
            "price" => ProductField::Price,
            "mrp" => ProductField::Mrp,
            "discountPrice" | "discount_price" => ProductField::DiscountPrice,
            "stockQuantity" | "stock_quantity" => ProductField::StockQuantity,
            "stockStatus" | "stock_status" => ProductField::StockStatus,
            "description" => ProductField::Description,
            "specification" => ProductField::Specification,
            "colour" => ProductField::Colour,
            "size" => ProductField::Size,
            "variants" => ProductField::Variants,
            "brand" => ProductField::Brand,
            "weight" => ProductField::Weight,
            "dimensions" => ProductField::Dimensions,
            "tags" => ProductField::Tags,
            "warranty" => ProductField::Warranty,
            "returnPolicy" | "return_policy" => ProductField::ReturnPolicy,
            "barcode" => ProductField::Barcode,
            "hsnCode" | "hsn_code" => ProductField::HsnCode,
            "supplier.name" => ProductField::SupplierName,
            "supplier.contact" => ProductField::SupplierContact,
            "supplier.email" => ProductField::SupplierEmail,
            "shipping.charges" => ProductField::ShippingCharges,
            "shipping.deliveryTime" | "shipping.delivery_time" => {
                ProductField::ShippingDeliveryTime
            }
            "shipping.restrictions" => ProductField::ShippingRestrictions,
            "isActive" | "is_active" => ProductField::IsActive,
            _ => return Err(FieldPathError(path.to_string())),
        };
        Ok(field)
    }
}

/// Разобрать число так, как его вводят в поле цены
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Список через запятую -> обрезанные непустые элементы без повторов
pub fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

/// Число для поля ввода: `1499`, `799.5`; без экспоненты и без `.0`
fn format_decimal(value: f64) -> String {
    value.to_string()
}

impl ProductDraft {
    pub fn get(&self, field: ProductField) -> String {
        match field {
            ProductField::Name => self.name.clone(),
            ProductField::Slug => self.slug.clone(),
            ProductField::Category => self.category.clone(),
            ProductField::Sku => self.sku.clone(),
            ProductField::Price => self.price.clone(),
            ProductField::Mrp => self.mrp.clone(),
            ProductField::DiscountPrice => self.discount_price.clone(),
            ProductField::StockQuantity => self.stock_quantity.clone(),
            ProductField::StockStatus => self.stock_status.clone(),
            ProductField::Description => self.description.clone(),
            ProductField::Specification => self.specification.clone(),
            ProductField::Colour => self.colour.clone(),
            ProductField::Size => self.size.clone(),
            ProductField::Variants => self.variants.clone(),
            ProductField::Brand => self.brand.clone(),
            ProductField::Weight => self.weight.clone(),
            ProductField::Dimensions => self.dimensions.clone(),
            ProductField::Tags => self.tags.clone(),
            ProductField::Warranty => self.warranty.clone(),
            ProductField::ReturnPolicy => self.return_policy.clone(),
            ProductField::Barcode => self.barcode.clone(),
            ProductField::HsnCode => self.hsn_code.clone(),
            ProductField::SupplierName => self.supplier.name.clone(),
            ProductField::SupplierContact => self.supplier.contact.clone(),
            ProductField::SupplierEmail => self.supplier.email.clone(),
            ProductField::ShippingCharges => self.shipping.charges.clone(),
            ProductField::ShippingDeliveryTime => self.shipping.delivery_time.clone(),
            ProductField::ShippingRestrictions => self.shipping.restrictions.clone(),
            ProductField::IsActive => self.is_active.to_string(),
        }
    }

    /// Новый черновик с изменённым полем.
    ///
    /// Изменение названия пересчитывает slug.
    pub fn with_field(&self, field: ProductField, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut next = self.clone();
        match field {
            ProductField::Name => {
                next.slug = generate_slug(&value);
                next.name = value;
            }
            ProductField::Slug => next.slug = value,
            ProductField::Category => next.category = value,
            ProductField::Sku => next.sku = value,
            ProductField::Price => next.price = value,
            ProductField::Mrp => next.mrp = value,
            ProductField::DiscountPrice => next.discount_price = value,
            ProductField::StockQuantity => next.stock_quantity = value,
            ProductField::StockStatus => next.stock_status = value,
            ProductField::Description => next.description = value,
            ProductField::Specification => next.specification = value,
            ProductField::Colour => next.colour = value,
            ProductField::Size => next.size = value,
            ProductField::Variants => next.variants = value,
            ProductField::Brand => next.brand = value,
            ProductField::Weight => next.weight = value,
            ProductField::Dimensions => next.dimensions = value,
            ProductField::Tags => next.tags = value,
            ProductField::Warranty => next.warranty = value,
            ProductField::ReturnPolicy => next.return_policy = value,
            ProductField::Barcode => next.barcode = value,
            ProductField::HsnCode => next.hsn_code = value,
            ProductField::SupplierName => next.supplier.name = value,
            ProductField::SupplierContact => next.supplier.contact = value,
            ProductField::SupplierEmail => next.supplier.email = value,
            ProductField::ShippingCharges => next.shipping.charges = value,
            ProductField::ShippingDeliveryTime => next.shipping.delivery_time = value,
            ProductField::ShippingRestrictions => next.shipping.restrictions = value,
            ProductField::IsActive => {
                next.is_active = !matches!(value.trim(), "false" | "0" | "off" | "")
            }
        }
        next
    }

    /// То же, что `with_field`, но по строковому пути
    pub fn with_path(&self, path: &str, value: impl Into<String>) -> Result<Self, FieldPathError> {
        let field: ProductField = path.parse()?;
        Ok(self.with_field(field, value))
    }

    /// Предупреждение, если цена продажи выше MRP (не блокирует ввод)
    pub fn price_advisory(&self) -> Option<&'static str> {
        match (parse_decimal(&self.price), parse_decimal(&self.mrp)) {
            (Some(price), Some(mrp)) if price > mrp => Some(PRICE_ABOVE_MRP_ADVISORY),
            _ => None,
        }
    }

    /// Привести черновик к типизированному DTO.
    ///
    /// Списки разбиваются по запятым, числа приводятся к числовым типам,
    /// полностью пустые вложенные объекты становятся `None`.
    pub fn normalize(&self) -> ProductDto {
        let supplier = (!self.supplier.is_blank()).then(|| Supplier {
            name: self.supplier.name.trim().to_string(),
            contact: self.supplier.contact.trim().to_string(),
            email: self.supplier.email.trim().to_string(),
        });
        let shipping = (!self.shipping.is_blank()).then(|| Shipping {
            charges: parse_decimal(&self.shipping.charges).unwrap_or(0.0),
            delivery_time: self.shipping.delivery_time.trim().to_string(),
            restrictions: self.shipping.restrictions.trim().to_string(),
        });

        ProductDto {
            name: self.name.trim().to_string(),
            slug: self.slug.trim().to_string(),
            sku: self.sku.trim().to_string(),
            category: self.category.trim().to_string(),
            price: parse_decimal(&self.price).unwrap_or(0.0),
            mrp: parse_decimal(&self.mrp),
            discount_price: parse_decimal(&self.discount_price),
            stock_quantity: parse_integer(&self.stock_quantity).unwrap_or(0),
            stock_status: StockStatus::from_code(self.stock_status.trim()).unwrap_or_default(),
            description: self.description.trim().to_string(),
            specification: self.specification.trim().to_string(),
            colour: self.colour.trim().to_string(),
            size: self.size.trim().to_string(),
            variants: split_list(&self.variants),
            brand: self.brand.trim().to_string(),
            weight: self.weight.trim().to_string(),
            dimensions: self.dimensions.trim().to_string(),
            tags: split_list(&self.tags),
            warranty: self.warranty.trim().to_string(),
            return_policy: self.return_policy.trim().to_string(),
            barcode: self.barcode.trim().to_string(),
            hsn_code: self.hsn_code.trim().to_string(),
            supplier,
            shipping,
            is_active: self.is_active,
        }
    }

    /// Черновик для редактирования сохранённого товара
    pub fn from_product(product: &Product) -> Self {
        let data = &product.data;
        Self {
            name: data.name.clone(),
            slug: data.slug.clone(),
            category: data.category.clone(),
            sku: data.sku.clone(),
            price: format_decimal(data.price),
            mrp: data.mrp.map(format_decimal).unwrap_or_default(),
            discount_price: data.discount_price.map(format_decimal).unwrap_or_default(),
            stock_quantity: data.stock_quantity.to_string(),
            stock_status: data.stock_status.as_str().to_string(),
            description: data.description.clone(),
            specification: data.specification.clone(),
            colour: data.colour.clone(),
            size: data.size.clone(),
            variants: data.variants.join(", "),
            brand: data.brand.clone(),
            weight: data.weight.clone(),
            dimensions: data.dimensions.clone(),
            tags: data.tags.join(", "),
            warranty: data.warranty.clone(),
            return_policy: data.return_policy.clone(),
            barcode: data.barcode.clone(),
            supplier: data
                .supplier
                .as_ref()
                .map(|s| SupplierDraft {
                    name: s.name.clone(),
                    contact: s.contact.clone(),
                    email: s.email.clone(),
                })
                .unwrap_or_default(),
            hsn_code: data.hsn_code.clone(),
            shipping: data
                .shipping
                .as_ref()
                .map(|s| ShippingDraft {
                    charges: format_decimal(s.charges),
                    delivery_time: s.delivery_time.clone(),
                    restrictions: s.restrictions.clone(),
                })
                .unwrap_or_default(),
            is_active: data.is_active,
        }
    }

    /// Непустые поля как пары ключ/значение для multipart-запроса
    pub fn multipart_fields(&self) -> Vec<(&'static str, String)> {
        ProductField::ALL
            .iter()
            .map(|field| (field.wire_key(), self.get(*field)))
            .filter(|(_, value)| !value.trim().is_empty())
            .collect()
    }
}
