use super::view_model::ProductDetailsViewModel;
use crate::shared::api_utils::asset_url;
use crate::shared::components::notice::{Notice, NoticeKind};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::shared::preview::candidates_from;
use contracts::domain::a002_product::aggregate::{Product, StockStatus};
use contracts::domain::common::AggregateRoot;
use contracts::domain::a002_product::draft::ProductField;
use contracts::domain::a002_product::form::PRODUCT_GRID_ROUTE;
use contracts::shared::image_staging::{ACCEPTED_IMAGE_TYPES, MAX_STAGED_IMAGES};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};
use wasm_bindgen::JsCast;

/// Атрибут `name` элемента, на котором произошло событие
fn target_name(ev: &web_sys::Event) -> Option<String> {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.get_attribute("name"))
}

/// Однострочное поле; изменения идут через путь из `name`
fn text_input(
    vm: ProductDetailsViewModel,
    field: ProductField,
    label: &'static str,
    placeholder: &'static str,
) -> impl IntoView {
    let key = field.wire_key();
    view! {
        <div class="form-group">
            <label for=key>{label}</label>
            <input
                type="text"
                id=key
                name=key
                placeholder=placeholder
                prop:value=move || vm.value(field)
                on:input=move |ev| {
                    if let Some(name) = target_name(&ev) {
                        vm.set_path(&name, event_target_value(&ev));
                    }
                }
            />
        </div>
    }
}

fn text_area(
    vm: ProductDetailsViewModel,
    field: ProductField,
    label: &'static str,
    placeholder: &'static str,
) -> impl IntoView {
    let key = field.wire_key();
    view! {
        <div class="form-group">
            <label for=key>{label}</label>
            <textarea
                id=key
                name=key
                rows="4"
                placeholder=placeholder
                prop:value=move || vm.value(field)
                on:input=move |ev| {
                    if let Some(name) = target_name(&ev) {
                        vm.set_path(&name, event_target_value(&ev));
                    }
                }
            />
        </div>
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[component]
pub fn ProductDetails() -> impl IntoView {
    let id = use_params_map().with_untracked(|params| params.get("id"));
    let navigate = use_navigate();

    let vm = ProductDetailsViewModel::new();
    vm.load(id);

    let title = Signal::derive(move || {
        if vm.is_edit_mode() {
            format!("Edit {}", Product::element_name())
        } else {
            format!("Create {}", Product::element_name())
        }
    });
    let (dragging, set_dragging) = signal(false);

    let existing_images = move || {
        vm.form.with(|f| {
            f.existing_images()
                .iter()
                .map(|img| (asset_url(&img.url), img.file_name.clone()))
                .collect::<Vec<_>>()
        })
    };
    let staged_images = move || {
        vm.form.with(|f| {
            f.images()
                .iter()
                .map(|img| (img.id, img.preview.clone(), img.name.clone(), img.size))
                .collect::<Vec<_>>()
        })
    };
    let image_count = move || vm.form.with(|f| f.existing_images().len() + f.images().len());
    // Во время отправки список файлов не меняется
    let can_add_images = move || vm.form.with(|f| !f.is_loading() && f.remaining_slots() > 0);

    view! {
        <div class="page details-container product-details">
            <PageHeader title=title>
                <A href=PRODUCT_GRID_ROUTE attr:class="btn btn-secondary">
                    {icon("grid")}
                    {"Back to products"}
                </A>
            </PageHeader>

            <Notice kind=NoticeKind::Warning message=vm.advisory />
            <Notice kind=NoticeKind::Error message=Signal::derive(move || vm.error()) />
            <Notice kind=NoticeKind::Success message=Signal::derive(move || vm.success()) />

            <form
                class="details-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    let navigate = navigate.clone();
                    vm.save_command(move |path| navigate(path, Default::default()));
                }
            >
                <section class="content-card">
                    <h3>{"Basic Information"}</h3>
                    <div class="form-row">
                        {text_input(vm, ProductField::Name, "Product Name *", "Enter product name")}
                        <div class="form-group">
                            <label for="slug">{"Slug"}</label>
                            <input type="text" id="slug" readonly prop:value=move || vm.value(ProductField::Slug) />
                        </div>
                    </div>
                    <div class="form-row">
                        {text_input(vm, ProductField::Sku, "SKU *", "Digits only")}
                        <div class="form-group">
                            <label for="category">{"Category *"}</label>
                            <select
                                id="category"
                                name=ProductField::Category.wire_key()
                                prop:value=move || vm.value(ProductField::Category)
                                on:change=move |ev| vm.set_field(ProductField::Category, event_target_value(&ev))
                            >
                                {move || vm.categories.get().into_iter().map(|choice| view! {
                                    <option value=choice.value>{choice.label}</option>
                                }).collect_view()}
                            </select>
                        </div>
                    </div>
                    <div class="form-row">
                        {text_input(vm, ProductField::Brand, "Brand *", "Enter brand")}
                        {text_input(vm, ProductField::Colour, "Colour *", "Enter colour")}
                        {text_input(vm, ProductField::Size, "Size", "S, M, L, XL")}
                    </div>
                    <div class="form-row">
                        {text_input(vm, ProductField::Variants, "Variants", "Comma separated")}
                        {text_input(vm, ProductField::Tags, "Tags", "Comma separated")}
                    </div>
                </section>

                <section class="content-card">
                    <h3>{"Pricing & Inventory"}</h3>
                    <div class="form-row">
                        {text_input(vm, ProductField::Price, "Selling Price *", "0.00")}
                        {text_input(vm, ProductField::Mrp, "MRP", "0.00")}
                        {text_input(vm, ProductField::DiscountPrice, "Discount Price", "0.00")}
                    </div>
                    {move || vm.price_advisory().map(|text| view! {
                        <div class="price-advisory">{text}</div>
                    })}
                    <div class="form-row">
                        {text_input(vm, ProductField::StockQuantity, "Stock Quantity", "0")}
                        <div class="form-group">
                            <label for="stockStatus">{"Stock Status"}</label>
                            <select
                                id="stockStatus"
                                prop:value=move || vm.value(ProductField::StockStatus)
                                on:change=move |ev| vm.set_field(ProductField::StockStatus, event_target_value(&ev))
                            >
                                {StockStatus::all().into_iter().map(|status| view! {
                                    <option value=status.as_str()>{status.display_name()}</option>
                                }).collect_view()}
                            </select>
                        </div>
                        <div class="form-group form-group--checkbox">
                            <label>
                                <input
                                    type="checkbox"
                                    prop:checked=move || vm.form.with(|f| f.draft().is_active)
                                    on:change=move |ev| vm.set_field(ProductField::IsActive, event_target_checked(&ev).to_string())
                                />
                                {"Active"}
                            </label>
                        </div>
                    </div>
                </section>

                <section class="content-card">
                    <h3>{"Description"}</h3>
                    {text_area(vm, ProductField::Description, "Description *", "10 to 1000 characters")}
                    {text_area(vm, ProductField::Specification, "Specification", "5 to 1000 characters")}
                </section>

                <section class="content-card">
                    <h3>{"Product Details"}</h3>
                    <div class="form-row">
                        {text_input(vm, ProductField::Weight, "Weight", "e.g. 500g")}
                        {text_input(vm, ProductField::Dimensions, "Dimensions", "L x W x H")}
                    </div>
                    <div class="form-row">
                        {text_input(vm, ProductField::Warranty, "Warranty", "e.g. 1 year")}
                        {text_input(vm, ProductField::ReturnPolicy, "Return Policy", "e.g. 7 days return")}
                    </div>
                    <div class="form-row">
                        {text_input(vm, ProductField::Barcode, "Barcode", "Digits only")}
                        {text_input(vm, ProductField::HsnCode, "HSN Code", "2, 4 or 6 digits")}
                    </div>
                </section>

                <section class="content-card">
                    <h3>{"Supplier"}</h3>
                    <div class="form-row">
                        {text_input(vm, ProductField::SupplierName, "Supplier Name", "Min 3 characters")}
                        {text_input(vm, ProductField::SupplierContact, "Contact Number", "10 digit mobile number")}
                        {text_input(vm, ProductField::SupplierEmail, "Email", "name@gmail.com")}
                    </div>
                </section>

                <section class="content-card">
                    <h3>{"Shipping"}</h3>
                    <div class="form-row">
                        {text_input(vm, ProductField::ShippingCharges, "Shipping Charges", "0.00")}
                        {text_input(vm, ProductField::ShippingDeliveryTime, "Delivery Time", "e.g. 3-5 days")}
                        {text_input(vm, ProductField::ShippingRestrictions, "Restrictions", "e.g. None")}
                    </div>
                </section>

                <section class="content-card">
                    <h3>{move || format!("Product Images ({}/{})", image_count(), MAX_STAGED_IMAGES)}</h3>

                    <Show when=can_add_images>
                        <label
                            class="image-dropzone"
                            class:image-dropzone--active=move || dragging.get()
                            on:dragover=move |ev: web_sys::DragEvent| {
                                ev.prevent_default();
                                set_dragging.set(true);
                            }
                            on:dragleave=move |_| set_dragging.set(false)
                            on:drop=move |ev: web_sys::DragEvent| {
                                ev.prevent_default();
                                set_dragging.set(false);
                                let files = ev.data_transfer().and_then(|dt| dt.files());
                                vm.stage_images(candidates_from(files));
                            }
                        >
                            {icon("upload")}
                            <span>{"Click or drag images here (JPG, PNG, GIF, WebP, max 5MB each)"}</span>
                            <input
                                type="file"
                                multiple
                                accept=ACCEPTED_IMAGE_TYPES.join(",")
                                class="visually-hidden"
                                on:change=move |ev| {
                                    let input = event_target::<web_sys::HtmlInputElement>(&ev);
                                    vm.stage_images(candidates_from(input.files()));
                                    // Повторный выбор того же файла должен снова вызвать change
                                    input.set_value("");
                                }
                            />
                        </label>
                    </Show>

                    <div class="image-previews">
                        {move || existing_images().into_iter().map(|(src, name)| {
                            let file_name = name.clone();
                            view! {
                                <div class="image-preview image-preview--saved">
                                    <img src=src alt=name.clone() />
                                    <span class="image-preview__name">{name}</span>
                                    <button
                                        type="button"
                                        class="image-preview__remove"
                                        title="Remove"
                                        disabled=move || vm.is_loading()
                                        on:click=move |_| vm.remove_existing_image(&file_name)
                                    >
                                        {icon("x")}
                                    </button>
                                </div>
                            }
                        }).collect_view()}
                        {move || staged_images().into_iter().map(|(id, src, name, size)| view! {
                            <div class="image-preview">
                                <img src=src alt=name.clone() />
                                <span class="image-preview__name">{format!("{} ({})", name, format_size(size))}</span>
                                <button
                                    type="button"
                                    class="image-preview__remove"
                                    title="Remove"
                                    disabled=move || vm.is_loading()
                                    on:click=move |_| vm.remove_image(id)
                                >
                                    {icon("x")}
                                </button>
                            </div>
                        }).collect_view()}
                    </div>
                </section>

                <div class="details-actions">
                    <button type="submit" class="btn btn-primary" disabled=move || vm.is_loading()>
                        {icon("save")}
                        {move || match (vm.is_loading(), vm.is_edit_mode()) {
                            (true, _) => "Saving...",
                            (false, true) => "Update Product",
                            (false, false) => "Create Product",
                        }}
                    </button>
                    <A href=PRODUCT_GRID_ROUTE attr:class="btn btn-secondary">
                        {icon("cancel")}
                        {"Cancel"}
                    </A>
                </div>
            </form>
        </div>
    }
}
