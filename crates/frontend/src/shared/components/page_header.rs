use leptos::prelude::*;

/// Заголовок страницы списка или формы с блоком действий справа
#[component]
pub fn PageHeader(
    #[prop(into)] title: Signal<String>,

    #[prop(optional, into)] subtitle: MaybeProp<String>,

    /// Кнопки и ссылки (пустой фрагмент, если не нужны)
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__content">
                <div class="page-header__text">
                    <h1 class="page-header__title">{move || title.get()}</h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page-header__actions">
                {children()}
            </div>
        </div>
    }
}
