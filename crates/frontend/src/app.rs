use crate::domain::a001_category::ui::details::CategoryDetails;
use crate::domain::a001_category::ui::list::CategoryList;
use crate::domain::a002_product::ui::details::ProductDetails;
use crate::domain::a002_product::ui::list::{ProductList, ProductView};
use crate::shared::icons::icon;
use contracts::domain::a002_product::form::PRODUCT_GRID_ROUTE;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes, A};
use leptos_router::hooks::use_location;
use leptos_router::path;

/// Боковая навигация
#[component]
fn Sidebar() -> impl IntoView {
    let location = use_location();
    let section_class = move |prefix: &'static str| {
        if location.pathname.get().starts_with(prefix) {
            "nav-item active"
        } else {
            "nav-item"
        }
    };

    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <span class="logo-text">{"Catalog Admin"}</span>
            </div>
            <div class="sidebar-section">
                <A href="/products/list" attr:class=move || section_class("/products")>
                    <span class="nav-icon">{icon("products")}</span>
                    <span class="nav-text">{"Products"}</span>
                </A>
                <A href="/categories/list" attr:class=move || section_class("/categories")>
                    <span class="nav-icon">{icon("categories")}</span>
                    <span class="nav-text">{"Categories"}</span>
                </A>
            </div>
        </nav>
    }
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="app-content">
                    <Routes fallback=|| view! { <Redirect path=PRODUCT_GRID_ROUTE /> }>
                        <Route path=path!("/categories/list") view=CategoryList />
                        <Route path=path!("/categories/create") view=CategoryDetails />
                        <Route path=path!("/categories/edit/:id") view=CategoryDetails />
                        <Route path=path!("/products/list") view=|| view! { <ProductList mode=ProductView::Table /> } />
                        <Route path=path!("/products/grid") view=|| view! { <ProductList mode=ProductView::Grid /> } />
                        <Route path=path!("/products/create") view=ProductDetails />
                        <Route path=path!("/products/edit/:id") view=ProductDetails />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
