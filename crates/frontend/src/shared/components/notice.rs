use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Warning,
    Success,
}

impl NoticeKind {
    fn modifier(self) -> &'static str {
        match self {
            NoticeKind::Error => "notice--error",
            NoticeKind::Warning => "notice--warning",
            NoticeKind::Success => "notice--success",
        }
    }

    fn mark(self) -> &'static str {
        match self {
            NoticeKind::Error | NoticeKind::Warning => "⚠",
            NoticeKind::Success => "✓",
        }
    }
}

/// Строка сообщения над формой или списком; пустое значение ничего не рисует
#[component]
pub fn Notice(kind: NoticeKind, #[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class=format!("notice {}", kind.modifier())>
                    <span class="notice__icon">{kind.mark()}</span>
                    <span class="notice__text">{text}</span>
                </div>
            }
        })
    }
}
