use crate::domain::a001_category::api;
use crate::shared::components::notice::{Notice, NoticeKind};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a001_category::tree::{CategoryNode, CategoryTree};
use contracts::domain::common::{AggregateId, AggregateRoot};
use leptos::prelude::*;
use leptos_router::components::A;

/// Строка таблицы категорий с уровнем вложенности
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub parent: String,
    pub depth: usize,
    pub has_children: bool,
}

impl CategoryRow {
    fn new(category: &Category, tree: &CategoryTree, depth: usize, has_children: bool) -> Self {
        Self {
            id: category.base.id.as_string(),
            title: category.title.clone(),
            description: category
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "-".to_string()),
            status: category.status.to_string(),
            parent: match category.parent {
                Some(parent) => tree.title_of(&parent.as_string()),
                None => "-".to_string(),
            },
            depth,
            has_children,
        }
    }
}

/// Дерево в плоский список: родитель, затем его потомки
pub fn flatten_tree(tree: &CategoryTree) -> Vec<CategoryRow> {
    fn walk(node: &CategoryNode<'_>, tree: &CategoryTree, depth: usize, out: &mut Vec<CategoryRow>) {
        out.push(CategoryRow::new(
            node.category,
            tree,
            depth,
            !node.children.is_empty(),
        ));
        for child in &node.children {
            walk(child, tree, depth + 1, out);
        }
    }

    let mut rows = Vec::with_capacity(tree.len());
    for node in tree.nodes() {
        walk(&node, tree, 0, &mut rows);
    }
    rows
}

#[component]
#[allow(non_snake_case)]
pub fn CategoryList() -> impl IntoView {
    let (rows, set_rows) = signal::<Vec<CategoryRow>>(Vec::new());
    let (advisory, set_advisory) = signal::<Option<String>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api::load_categories().await {
                Ok(listing) => {
                    let tree = CategoryTree::new(listing.items);
                    set_rows.set(flatten_tree(&tree));
                    set_advisory.set(listing.advisory);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load categories: {}", e);
                    set_error.set(Some(e.surface("Failed to load categories")));
                }
            }
            set_loading.set(false);
        });
    };

    let handle_delete = move |id: String, title: String| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!(
                    "Are you sure you want to delete \"{}\"?",
                    title
                ))
                .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        wasm_bindgen_futures::spawn_local(async move {
            match api::delete_category(&id).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e.surface("Failed to delete category"))),
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader
                title=Category::list_name().to_string()
                subtitle=Signal::derive(move || Some(format!("{} categories", rows.get().len())))
            >
                <A href="/categories/create" attr:class="btn btn-primary">
                    {icon("plus")}
                    {"Add Category"}
                </A>
                <button class="btn btn-secondary" on:click=move |_| fetch()>
                    {icon("refresh")}
                    {"Refresh"}
                </button>
            </PageHeader>

            <Notice kind=NoticeKind::Warning message=advisory />
            <Notice kind=NoticeKind::Error message=error />

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="loading">{"Loading categories..."}</div> }
            >
                <Show
                    when=move || !rows.get().is_empty()
                    fallback=|| view! {
                        <div class="empty-state">
                            <p>{"No categories yet."}</p>
                            <A href="/categories/create" attr:class="btn btn-primary">{"Create the first category"}</A>
                        </div>
                    }
                >
                    <div class="table">
                        <table class="table__data table--striped">
                            <thead class="table__head">
                                <tr>
                                    <th class="table__header-cell">{"Title"}</th>
                                    <th class="table__header-cell">{"Description"}</th>
                                    <th class="table__header-cell">{"Parent"}</th>
                                    <th class="table__header-cell">{"Status"}</th>
                                    <th class="table__header-cell">{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || rows.get().into_iter().map(|row| {
                                    let edit_href = format!("/categories/edit/{}", row.id);
                                    let id = row.id.clone();
                                    let title = row.title.clone();
                                    let indent = format!("padding-left: {}px;", 8 + row.depth * 20);
                                    let status_class = format!("status-badge status-badge--{}", row.status.to_lowercase());
                                    view! {
                                        <tr class="table__row">
                                            <td class="table__cell" style=indent>
                                                {if row.has_children { icon("folder-open") } else { icon("categories") }}
                                                <span class="category-title">{row.title}</span>
                                            </td>
                                            <td class="table__cell">{row.description}</td>
                                            <td class="table__cell">{row.parent}</td>
                                            <td class="table__cell">
                                                <span class=status_class>{row.status}</span>
                                            </td>
                                            <td class="table__cell table__cell--actions">
                                                <A href=edit_href attr:class="action-btn edit" attr:title="Edit">
                                                    {icon("edit")}
                                                </A>
                                                <button
                                                    class="action-btn delete"
                                                    title="Delete"
                                                    on:click=move |_| handle_delete(id.clone(), title.clone())
                                                >
                                                    {icon("delete")}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
