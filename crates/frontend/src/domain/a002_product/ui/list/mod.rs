use crate::domain::a001_category::api as category_api;
use crate::domain::a002_product::api;
use crate::shared::api_utils::asset_url;
use crate::shared::components::notice::{Notice, NoticeKind};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, sort_list, SearchInput, Sortable};
use contracts::domain::a001_category::tree::CategoryTree;
use contracts::domain::a002_product::aggregate::{Product, ProductListFilter, StockStatus};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos_router::components::A;
use std::cmp::Ordering;

/// Представление списка товаров
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductView {
    Table,
    Grid,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub brand: String,
    pub colour: String,
    pub price: f64,
    pub mrp: Option<f64>,
    pub stock_quantity: i64,
    pub stock_status: StockStatus,
    pub is_active: bool,
    pub image: Option<String>,
}

impl ProductRow {
    fn new(product: Product, categories: &CategoryTree) -> Self {
        Self {
            id: product.base.id.as_string(),
            category: categories.title_of(&product.data.category),
            image: product.images.first().map(|img| asset_url(&img.url)),
            name: product.data.name,
            sku: product.data.sku,
            brand: product.data.brand,
            colour: product.data.colour,
            price: product.data.price,
            mrp: product.data.mrp,
            stock_quantity: product.data.stock_quantity,
            stock_status: product.data.stock_status,
            is_active: product.data.is_active,
        }
    }
}

impl Sortable for ProductRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "price" => self.price.total_cmp(&other.price),
            "stock" => self.stock_quantity.cmp(&other.stock_quantity),
            "sku" => self.sku.cmp(&other.sku),
            _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
        }
    }
}

/// Цена в рупиях с разделителями тысяч: `₹14,999`, `₹799.50`
pub fn format_price(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    match cents % 100 {
        0 => format!("{}₹{}", sign, grouped),
        fraction => format!("{}₹{}.{:02}", sign, grouped, fraction),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ProductList(mode: ProductView) -> impl IntoView {
    let (rows, set_rows) = signal::<Vec<ProductRow>>(Vec::new());
    let (advisory, set_advisory) = signal::<Option<String>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);
    let filter = RwSignal::new(ProductListFilter::default());
    let category_options = RwSignal::new(Vec::<(String, String)>::new());
    let (sort_field, set_sort_field) = signal("name".to_string());
    let (sort_ascending, set_sort_ascending) = signal(true);

    let fetch = move || {
        let current = filter.get_untracked();
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            // Названия категорий нужны только для отображения
            let categories = category_api::load_categories()
                .await
                .map(|listing| listing.items)
                .unwrap_or_default();
            let tree = CategoryTree::new(categories);
            category_options.try_set(
                tree.all()
                    .iter()
                    .map(|c| (c.base.id.as_string(), c.title.clone()))
                    .collect(),
            );

            match api::load_products(&current).await {
                Ok(listing) => {
                    set_rows.try_set(
                        listing
                            .items
                            .into_iter()
                            .map(|p| ProductRow::new(p, &tree))
                            .collect(),
                    );
                    set_advisory.try_set(listing.advisory);
                    set_error.try_set(None);
                }
                Err(e) => {
                    log::error!("Failed to load products: {}", e);
                    set_error.try_set(Some(e.surface("Failed to load products")));
                }
            }
            set_loading.try_set(false);
        });
    };

    Effect::new(move |_| {
        filter.track();
        fetch();
    });

    let sorted_rows = move || {
        let mut items = rows.get();
        sort_list(&mut items, &sort_field.get(), sort_ascending.get());
        items
    };

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            set_sort_ascending.update(|asc| *asc = !*asc);
        } else {
            set_sort_field.set(field.to_string());
            set_sort_ascending.set(true);
        }
    };

    let handle_delete = move |id: String, name: String| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!(
                    "Are you sure you want to delete \"{}\"?",
                    name
                ))
                .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::delete_product(&id).await {
                Ok(()) => fetch(),
                Err(e) => {
                    set_error.try_set(Some(e.surface("Failed to delete product")));
                }
            }
        });
    };

    let header = move |label: &'static str, field: &'static str| {
        view! {
            <th class="table__header-cell table__header-cell--sortable" on:click=move |_| toggle_sort(field)>
                {label}
                {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
            </th>
        }
    };

    let table_view = move || {
        view! {
            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            {header("Product", "name")}
                            {header("SKU", "sku")}
                            <th class="table__header-cell">{"Category"}</th>
                            {header("Price", "price")}
                            {header("Stock", "stock")}
                            <th class="table__header-cell">{"Brand"}</th>
                            <th class="table__header-cell">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || sorted_rows().into_iter().map(|row| {
                            let edit_href = format!("/products/edit/{}", row.id);
                            let id = row.id.clone();
                            let name = row.name.clone();
                            view! {
                                <tr class="table__row" class:table__row--inactive=!row.is_active>
                                    <td class="table__cell">
                                        <div class="product-info">
                                            {match row.image.clone() {
                                                Some(src) => view! { <img class="product-image" src=src alt=row.name.clone() /> }.into_any(),
                                                None => view! { <div class="product-image product-image--empty">{icon("image")}</div> }.into_any(),
                                            }}
                                            <div class="product-name-info">
                                                <span class="product-name">{row.name.clone()}</span>
                                                {(!row.colour.is_empty()).then(|| view! {
                                                    <small class="product-color">{format!("Color: {}", row.colour)}</small>
                                                })}
                                            </div>
                                        </div>
                                    </td>
                                    <td class="table__cell"><span class="sku-code">{row.sku.clone()}</span></td>
                                    <td class="table__cell">{row.category.clone()}</td>
                                    <td class="table__cell price">
                                        <span class="selling-price">{format_price(row.price)}</span>
                                        {row.mrp.map(|mrp| view! {
                                            <small class="mrp-price">{format!("MRP: {}", format_price(mrp))}</small>
                                        })}
                                    </td>
                                    <td class="table__cell">
                                        <span class=format!("stock-badge stock-badge--{}", row.stock_status.as_str().to_lowercase())>
                                            {format!("{} ({})", row.stock_status.display_name(), row.stock_quantity)}
                                        </span>
                                    </td>
                                    <td class="table__cell">{if row.brand.is_empty() { "N/A".to_string() } else { row.brand.clone() }}</td>
                                    <td class="table__cell table__cell--actions">
                                        <A href=edit_href attr:class="action-btn edit" attr:title="Edit">{icon("edit")}</A>
                                        <button class="action-btn delete" title="Delete" on:click=move |_| handle_delete(id.clone(), name.clone())>
                                            {icon("delete")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        }
    };

    let grid_view = move || {
        view! {
            <div class="product-grid">
                {move || sorted_rows().into_iter().map(|row| {
                    let edit_href = format!("/products/edit/{}", row.id);
                    let id = row.id.clone();
                    let name = row.name.clone();
                    view! {
                        <div class="product-card" class:product-card--inactive=!row.is_active>
                            <div class="product-card__image">
                                {match row.image.clone() {
                                    Some(src) => view! { <img src=src alt=row.name.clone() /> }.into_any(),
                                    None => icon("image"),
                                }}
                            </div>
                            <div class="product-card__body">
                                <div class="product-card__title">{row.name.clone()}</div>
                                <div class="product-card__meta">{format!("{} · SKU {}", row.category, row.sku)}</div>
                                <div class="product-card__price">
                                    <span class="selling-price">{format_price(row.price)}</span>
                                    {row.mrp.filter(|mrp| *mrp > row.price).map(|mrp| view! {
                                        <s class="mrp-price">{format_price(mrp)}</s>
                                    })}
                                </div>
                                <div class="product-card__stock">{row.stock_status.display_name()}</div>
                            </div>
                            <div class="product-card__actions">
                                <A href=edit_href attr:class="btn btn-secondary">{icon("edit")}{"Edit"}</A>
                                <button class="btn btn-danger" on:click=move |_| handle_delete(id.clone(), name.clone())>
                                    {icon("delete")}
                                </button>
                            </div>
                        </div>
                    }
                }).collect_view()}
            </div>
        }
    };

    view! {
        <div class="page">
            <PageHeader
                title="Product List".to_string()
                subtitle=Signal::derive(move || Some(format!("Manage your products inventory ({} products)", rows.get().len())))
            >
                <A href="/products/create" attr:class="btn btn-primary">
                    {icon("plus")}
                    {"Add Product"}
                </A>
                {match mode {
                    ProductView::Table => view! {
                        <A href="/products/grid" attr:class="btn btn-secondary">{icon("grid")}{"Grid View"}</A>
                    }.into_any(),
                    ProductView::Grid => view! {
                        <A href="/products/list" attr:class="btn btn-secondary">{icon("list")}{"Table View"}</A>
                    }.into_any(),
                }}
            </PageHeader>

            <div class="filter-panel">
                <SearchInput
                    placeholder="Search by name or SKU"
                    on_change=Callback::new(move |text: String| {
                        filter.update(|f| f.search = Some(text).filter(|t| !t.trim().is_empty()));
                    })
                />
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.category = Some(value).filter(|v| !v.is_empty()));
                }>
                    <option value="">{"All categories"}</option>
                    {move || category_options.get().into_iter().map(|(value, label)| view! {
                        <option value=value>{label}</option>
                    }).collect_view()}
                </select>
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.stock_status = StockStatus::from_code(&value));
                }>
                    <option value="">{"Any stock"}</option>
                    {StockStatus::all().into_iter().map(|status| view! {
                        <option value=status.as_str()>{status.display_name()}</option>
                    }).collect_view()}
                </select>
            </div>

            <Notice kind=NoticeKind::Warning message=advisory />
            <Notice kind=NoticeKind::Error message=error />

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="loading">{"Loading products..."}</div> }
            >
                <Show
                    when=move || !rows.get().is_empty()
                    fallback=|| view! {
                        <div class="empty-state">
                            <p>{"No products found."}</p>
                            <A href="/products/create" attr:class="btn btn-primary">{"Add your first product"}</A>
                        </div>
                    }
                >
                    {move || match mode {
                        ProductView::Table => table_view().into_any(),
                        ProductView::Grid => grid_view().into_any(),
                    }}
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(format_price(14999.0), "₹14,999");
        assert_eq!(format_price(799.5), "₹799.50");
        assert_eq!(format_price(1234567.0), "₹1,234,567");
        assert_eq!(format_price(0.0), "₹0");
    }

    #[test]
    fn rows_sort_by_price_numerically() {
        let row = |name: &str, price: f64| ProductRow {
            id: name.to_string(),
            name: name.to_string(),
            sku: String::new(),
            category: String::new(),
            brand: String::new(),
            colour: String::new(),
            price,
            mrp: None,
            stock_quantity: 0,
            stock_status: StockStatus::InStock,
            is_active: true,
            image: None,
        };
        let mut rows = vec![row("a", 900.0), row("b", 1000.0), row("c", 95.0)];
        sort_list(&mut rows, "price", true);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
