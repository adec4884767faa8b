//! Проверка черновика товара перед отправкой.
//!
//! Правила проверяются по порядку, возвращается первое нарушение.

use super::draft::{parse_decimal, parse_integer, ProductDraft};
use thiserror::Error;

/// Префикс временной категории, которая ещё не создана на сервере
pub const PLACEHOLDER_CATEGORY_PREFIX: &str = "temp_";

pub const NAME_LENGTH: (usize, usize) = (3, 500);
pub const DESCRIPTION_LENGTH: (usize, usize) = (10, 1000);
pub const SPECIFICATION_LENGTH: (usize, usize) = (5, 1000);
pub const MIN_SUPPLIER_NAME: usize = 3;
pub const MIN_TERMS_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProductViolation {
    #[error("Please fill in all required fields (Name, SKU, Price, Description, Category, Brand, Colour)")]
    MissingRequired,
    #[error("SKU must contain digits only")]
    SkuNotNumeric,
    #[error("Please enter a valid product name or slug (3 to 500 characters)")]
    NameOrSlugLength,
    #[error("Description must be between 10 and 1000 characters")]
    DescriptionLength,
    #[error("Specification must be between 5 and 1000 characters")]
    SpecificationLength,
    #[error("Please select a valid category or create categories first")]
    PlaceholderCategory,
    #[error("Please upload at least one product image")]
    NoImages,
    #[error("Price must be a number")]
    PriceNotNumeric,
    #[error("Price must be greater than 0")]
    PriceNotPositive,
    #[error("MRP must be a number")]
    MrpNotNumeric,
    #[error("Selling price cannot be higher than MRP")]
    PriceAboveMrp,
    #[error("Discount price must be a number")]
    DiscountNotNumeric,
    #[error("Discount price cannot be more than selling price")]
    DiscountAbovePrice,
    #[error("Stock quantity must be a whole number")]
    StockNotInteger,
    #[error("Stock quantity cannot be negative")]
    NegativeStock,
    #[error("Please enter a valid supplier name (min 3 characters)")]
    SupplierName,
    #[error("Please enter a valid 10 digit contact number")]
    SupplierContact,
    #[error("Please enter a valid Gmail address (ending with @gmail.com)")]
    SupplierEmail,
    #[error("Please fill in all shipping details")]
    ShippingIncomplete,
    #[error("Please enter a valid shipping charge")]
    ShippingCharges,
    #[error("Please enter a valid barcode (digits only)")]
    Barcode,
    #[error("HSN must be 2, 4, or 6 digits")]
    HsnCode,
    #[error("Please enter valid warranty information (min 5 characters)")]
    Warranty,
    #[error("Please enter valid return policy information (min 5 characters)")]
    ReturnPolicy,
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn length_within(value: &str, (min, max): (usize, usize)) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}

/// 10 цифр, первая от 6 до 9
fn is_valid_contact(value: &str) -> bool {
    value.len() == 10 && is_digits(value) && value.starts_with(['6', '7', '8', '9'])
}

/// `local@gmail.com`, local из `[A-Za-z0-9._%+-]`
fn is_valid_gmail(value: &str) -> bool {
    match value.strip_suffix("@gmail.com") {
        Some(local) => {
            !local.is_empty()
                && local
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
        }
        None => false,
    }
}

fn is_valid_hsn(value: &str) -> bool {
    matches!(value.len(), 2 | 4 | 6) && is_digits(value)
}

/// Проверить черновик.
///
/// `image_count`: число изображений товара: новые и уже сохранённые.
pub fn validate_product(draft: &ProductDraft, image_count: usize) -> Result<(), ProductViolation> {
    use ProductViolation::*;

    let name = draft.name.trim();
    let slug = draft.slug.trim();
    let sku = draft.sku.trim();
    let price = draft.price.trim();
    let category = draft.category.trim();
    let description = draft.description.trim();

    let required = [
        name,
        price,
        description,
        category,
        sku,
        draft.brand.trim(),
        draft.colour.trim(),
    ];
    if required.iter().any(|v| v.is_empty()) {
        return Err(MissingRequired);
    }

    if !is_digits(sku) {
        return Err(SkuNotNumeric);
    }
    if !length_within(name, NAME_LENGTH) || !length_within(slug, NAME_LENGTH) {
        return Err(NameOrSlugLength);
    }
    if !length_within(description, DESCRIPTION_LENGTH) {
        return Err(DescriptionLength);
    }
    if !length_within(draft.specification.trim(), SPECIFICATION_LENGTH) {
        return Err(SpecificationLength);
    }
    if category.starts_with(PLACEHOLDER_CATEGORY_PREFIX) {
        return Err(PlaceholderCategory);
    }
    if image_count == 0 {
        return Err(NoImages);
    }

    let price = parse_decimal(price).ok_or(PriceNotNumeric)?;
    if price <= 0.0 {
        return Err(PriceNotPositive);
    }

    let mrp = draft.mrp.trim();
    if !mrp.is_empty() {
        let mrp = parse_decimal(mrp).ok_or(MrpNotNumeric)?;
        if price > mrp {
            return Err(PriceAboveMrp);
        }
    }

    let discount = draft.discount_price.trim();
    if !discount.is_empty() {
        let discount = parse_decimal(discount).ok_or(DiscountNotNumeric)?;
        if discount > price {
            return Err(DiscountAbovePrice);
        }
    }

    let stock = draft.stock_quantity.trim();
    if !stock.is_empty() {
        let stock = parse_integer(stock).ok_or(StockNotInteger)?;
        if stock < 0 {
            return Err(NegativeStock);
        }
    }

    let supplier = &draft.supplier;
    if supplier.name.trim().chars().count() < MIN_SUPPLIER_NAME {
        return Err(SupplierName);
    }
    if !is_valid_contact(supplier.contact.trim()) {
        return Err(SupplierContact);
    }
    if !is_valid_gmail(supplier.email.trim()) {
        return Err(SupplierEmail);
    }

    let shipping = &draft.shipping;
    let charges = shipping.charges.trim();
    if charges.is_empty()
        || shipping.delivery_time.trim().is_empty()
        || shipping.restrictions.trim().is_empty()
    {
        return Err(ShippingIncomplete);
    }
    match parse_decimal(charges) {
        Some(value) if value >= 0.0 => {}
        _ => return Err(ShippingCharges),
    }

    if !is_digits(draft.barcode.trim()) {
        return Err(Barcode);
    }
    if !is_valid_hsn(draft.hsn_code.trim()) {
        return Err(HsnCode);
    }
    if draft.warranty.trim().chars().count() < MIN_TERMS_LENGTH {
        return Err(Warranty);
    }
    if draft.return_policy.trim().chars().count() < MIN_TERMS_LENGTH {
        return Err(ReturnPolicy);
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::super::draft::{ProductDraft, ProductField};

    /// Черновик, проходящий все проверки
    pub fn valid_draft() -> ProductDraft {
        [
            (ProductField::Name, "Desk Lamp"),
            (ProductField::Category, "0b9a3a56-6f1c-4a55-9e62-4a7c3c1b2d10"),
            (ProductField::Sku, "100234"),
            (ProductField::Price, "100"),
            (ProductField::Mrp, "150"),
            (ProductField::DiscountPrice, "90"),
            (ProductField::StockQuantity, "25"),
            (ProductField::Description, "Adjustable LED desk lamp"),
            (ProductField::Specification, "5W LED, USB-C"),
            (ProductField::Colour, "Black"),
            (ProductField::Brand, "Lumo"),
            (ProductField::Tags, "lamp, office"),
            (ProductField::Warranty, "1 year"),
            (ProductField::ReturnPolicy, "7 days return"),
            (ProductField::Barcode, "8901234567890"),
            (ProductField::HsnCode, "9405"),
            (ProductField::SupplierName, "Acme Lights"),
            (ProductField::SupplierContact, "9876543210"),
            (ProductField::SupplierEmail, "sales.acme@gmail.com"),
            (ProductField::ShippingCharges, "40"),
            (ProductField::ShippingDeliveryTime, "3-5 days"),
            (ProductField::ShippingRestrictions, "None"),
        ]
        .into_iter()
        .fold(ProductDraft::default(), |draft, (field, value)| {
            draft.with_field(field, value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::valid_draft;
    use super::*;
    use crate::domain::a002_product::draft::ProductField;

    fn check(draft: &ProductDraft) -> Result<(), ProductViolation> {
        validate_product(draft, 1)
    }

    #[test]
    fn complete_draft_passes() {
        assert_eq!(check(&valid_draft()), Ok(()));
    }

    #[test]
    fn missing_required_fires_before_everything_else() {
        // SKU тоже невалиден, но сначала проверяется наличие полей
        let draft = valid_draft()
            .with_field(ProductField::Sku, "ABC")
            .with_field(ProductField::Colour, "  ");
        assert_eq!(check(&draft), Err(ProductViolation::MissingRequired));
        assert_eq!(
            validate_product(&ProductDraft::default(), 0),
            Err(ProductViolation::MissingRequired)
        );
    }

    #[test]
    fn each_required_field_is_checked() {
        let required = [
            ProductField::Name,
            ProductField::Price,
            ProductField::Description,
            ProductField::Category,
            ProductField::Sku,
            ProductField::Brand,
            ProductField::Colour,
        ];
        for field in required {
            let draft = valid_draft().with_field(field, "   ");
            assert_eq!(
                validate_product(&draft, 0),
                Err(ProductViolation::MissingRequired),
                "{:?}",
                field
            );
        }
    }

    #[test]
    fn sku_must_be_digits() {
        let draft = valid_draft().with_field(ProductField::Sku, "12a4");
        assert_eq!(check(&draft), Err(ProductViolation::SkuNotNumeric));

        let draft = valid_draft().with_field(ProductField::Sku, "AB123");
        assert_eq!(check(&draft), Err(ProductViolation::SkuNotNumeric));

        let draft = valid_draft().with_field(ProductField::Sku, "12345");
        assert_eq!(check(&draft), Ok(()));
    }

    #[test]
    fn name_and_slug_length() {
        let short = valid_draft().with_field(ProductField::Name, "TV");
        assert_eq!(check(&short), Err(ProductViolation::NameOrSlugLength));

        // Название из трёх символов, но slug из них получается короче
        let punct = valid_draft().with_field(ProductField::Name, "A!!");
        assert_eq!(check(&punct), Err(ProductViolation::NameOrSlugLength));

        let long = valid_draft().with_field(ProductField::Name, "x".repeat(501));
        assert_eq!(check(&long), Err(ProductViolation::NameOrSlugLength));
    }

    #[test]
    fn description_and_specification_bounds() {
        let draft = valid_draft().with_field(ProductField::Description, "Too short");
        assert_eq!(check(&draft), Err(ProductViolation::DescriptionLength));

        let draft = valid_draft().with_field(ProductField::Specification, "5W");
        assert_eq!(check(&draft), Err(ProductViolation::SpecificationLength));
    }

    #[test]
    fn placeholder_category_is_rejected() {
        let draft = valid_draft().with_field(ProductField::Category, "temp_1");
        assert_eq!(check(&draft), Err(ProductViolation::PlaceholderCategory));
        assert_eq!(
            ProductViolation::PlaceholderCategory.to_string(),
            "Please select a valid category or create categories first"
        );
    }

    #[test]
    fn at_least_one_image() {
        assert_eq!(
            validate_product(&valid_draft(), 0),
            Err(ProductViolation::NoImages)
        );
    }

    #[test]
    fn price_rules() {
        let zero = valid_draft().with_field(ProductField::Price, "0");
        assert_eq!(check(&zero), Err(ProductViolation::PriceNotPositive));

        let text = valid_draft().with_field(ProductField::Price, "abc");
        assert_eq!(check(&text), Err(ProductViolation::PriceNotNumeric));
    }

    #[test]
    fn price_above_mrp_fails_and_below_passes() {
        let above = valid_draft()
            .with_field(ProductField::Price, "150")
            .with_field(ProductField::Mrp, "100");
        assert_eq!(check(&above), Err(ProductViolation::PriceAboveMrp));
        assert_eq!(
            ProductViolation::PriceAboveMrp.to_string(),
            "Selling price cannot be higher than MRP"
        );

        let below = valid_draft()
            .with_field(ProductField::Price, "100")
            .with_field(ProductField::Mrp, "150");
        assert_eq!(check(&below), Ok(()));

        let no_mrp = valid_draft().with_field(ProductField::Mrp, "");
        assert_eq!(check(&no_mrp), Ok(()));
    }

    #[test]
    fn discount_and_stock() {
        let discount = valid_draft().with_field(ProductField::DiscountPrice, "120");
        assert_eq!(check(&discount), Err(ProductViolation::DiscountAbovePrice));

        let stock = valid_draft().with_field(ProductField::StockQuantity, "-1");
        assert_eq!(check(&stock), Err(ProductViolation::NegativeStock));

        let fractional = valid_draft().with_field(ProductField::StockQuantity, "2.5");
        assert_eq!(check(&fractional), Err(ProductViolation::StockNotInteger));
    }

    #[test]
    fn supplier_rules() {
        let name = valid_draft().with_field(ProductField::SupplierName, "Al");
        assert_eq!(check(&name), Err(ProductViolation::SupplierName));

        for contact in ["5876543210", "987654321", "98765432100", "98765x3210"] {
            let draft = valid_draft().with_field(ProductField::SupplierContact, contact);
            assert_eq!(check(&draft), Err(ProductViolation::SupplierContact), "{contact}");
        }

        for email in ["sales@yahoo.com", "@gmail.com", "sa les@gmail.com", "sales@gmail.co"] {
            let draft = valid_draft().with_field(ProductField::SupplierEmail, email);
            assert_eq!(check(&draft), Err(ProductViolation::SupplierEmail), "{email}");
        }
        let plus = valid_draft().with_field(ProductField::SupplierEmail, "a+b_c%d@gmail.com");
        assert_eq!(check(&plus), Ok(()));
    }

    #[test]
    fn shipping_rules() {
        let missing = valid_draft().with_field(ProductField::ShippingRestrictions, "");
        assert_eq!(check(&missing), Err(ProductViolation::ShippingIncomplete));

        let negative = valid_draft().with_field(ProductField::ShippingCharges, "-5");
        assert_eq!(check(&negative), Err(ProductViolation::ShippingCharges));

        let free = valid_draft().with_field(ProductField::ShippingCharges, "0");
        assert_eq!(check(&free), Ok(()));
    }

    #[test]
    fn barcode_and_hsn() {
        let barcode = valid_draft().with_field(ProductField::Barcode, "");
        assert_eq!(check(&barcode), Err(ProductViolation::Barcode));

        let hsn = valid_draft().with_field(ProductField::HsnCode, "123");
        assert_eq!(check(&hsn), Err(ProductViolation::HsnCode));
        assert_eq!(ProductViolation::HsnCode.to_string(), "HSN must be 2, 4, or 6 digits");

        for ok in ["12", "1234", "123456"] {
            let draft = valid_draft().with_field(ProductField::HsnCode, ok);
            assert_eq!(check(&draft), Ok(()));
        }
    }

    #[test]
    fn warranty_and_return_policy_are_trimmed() {
        let warranty = valid_draft().with_field(ProductField::Warranty, "  1 yr  ");
        assert_eq!(check(&warranty), Err(ProductViolation::Warranty));

        let policy = valid_draft().with_field(ProductField::ReturnPolicy, "none");
        assert_eq!(check(&policy), Err(ProductViolation::ReturnPolicy));
    }
}
