use super::view_model::CategoryDetailsViewModel;
use crate::shared::components::notice::{Notice, NoticeKind};
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use contracts::domain::a001_category::aggregate::{Category, CategoryStatus};
use contracts::domain::common::AggregateRoot;
use contracts::domain::a001_category::form::{CategoryField, CATEGORY_LIST_ROUTE};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

#[component]
pub fn CategoryDetails() -> impl IntoView {
    let id = use_params_map().with_untracked(|params| params.get("id"));
    let navigate = use_navigate();

    let vm = CategoryDetailsViewModel::new();
    vm.load(id);

    let title = Signal::derive(move || {
        if vm.is_edit_mode() {
            format!("Edit {}", Category::element_name())
        } else {
            format!("Create {}", Category::element_name())
        }
    });

    view! {
        <div class="page details-container category-details">
            <PageHeader title=title>
                <A href=CATEGORY_LIST_ROUTE attr:class="btn btn-secondary">
                    {icon("list")}
                    {"Back to list"}
                </A>
            </PageHeader>

            <Notice kind=NoticeKind::Warning message=vm.advisory />
            <Notice kind=NoticeKind::Error message=Signal::derive(move || vm.error()) />
            <Notice kind=NoticeKind::Success message=Signal::derive(move || vm.success()) />

            <form
                class="details-form content-card"
                on:submit=move |ev| {
                    ev.prevent_default();
                    let navigate = navigate.clone();
                    vm.save_command(move |path| navigate(path, Default::default()));
                }
            >
                <div class="form-group">
                    <label for="title">{"Title *"}</label>
                    <input
                        type="text"
                        id="title"
                        placeholder="Enter category title"
                        prop:value=move || vm.form.with(|f| f.draft().title.clone())
                        on:input=move |ev| vm.set_field(CategoryField::Title, event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="description">{"Description"}</label>
                    <textarea
                        id="description"
                        rows="3"
                        placeholder="Enter category description"
                        prop:value=move || vm.form.with(|f| f.draft().description.clone().unwrap_or_default())
                        on:input=move |ev| vm.set_field(CategoryField::Description, event_target_value(&ev))
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="status">{"Status"}</label>
                        <select
                            id="status"
                            prop:value=move || vm.form.with(|f| f.draft().status.as_str().to_string())
                            on:change=move |ev| vm.set_field(CategoryField::Status, event_target_value(&ev))
                        >
                            {CategoryStatus::all().into_iter().map(|status| view! {
                                <option value=status.as_str()>{status.as_str()}</option>
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="parent">{"Parent Category"}</label>
                        <select
                            id="parent"
                            prop:value=move || vm.form.with(|f| f.draft().parent.clone().unwrap_or_default())
                            on:change=move |ev| vm.set_field(CategoryField::Parent, event_target_value(&ev))
                        >
                            <option value="">{"None (top level)"}</option>
                            {move || vm.parent_options().into_iter().map(|(value, label)| view! {
                                <option value=value>{label}</option>
                            }).collect_view()}
                        </select>
                    </div>
                </div>

                <div class="details-actions">
                    <button type="submit" class="btn btn-primary" disabled=move || vm.is_loading()>
                        {icon("save")}
                        {move || match (vm.is_loading(), vm.is_edit_mode()) {
                            (true, _) => "Saving...",
                            (false, true) => "Update Category",
                            (false, false) => "Create Category",
                        }}
                    </button>
                    <A href=CATEGORY_LIST_ROUTE attr:class="btn btn-secondary">
                        {icon("cancel")}
                        {"Cancel"}
                    </A>
                </div>
            </form>
        </div>
    }
}
