//! Состояние отправки формы: фаза, видимая ошибка, сообщение об успехе.

use std::time::Duration;

/// Фаза жизненного цикла формы
///
/// `Editing → Validating → Submitting → Succeeded`; ошибка валидации или
/// хранилища возвращает форму в `Editing` с текстом ошибки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Validating,
    Submitting,
    Succeeded,
}

/// Результат завершения отправки, который UI превращает в побочные эффекты
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Запись сохранена: показать сообщение и перейти к списку после задержки
    Saved {
        message: String,
        redirect_to: &'static str,
        delay: Duration,
    },
    /// Хранилище вернуло ошибку, черновик сохранён для исправления
    Failed(String),
    /// Ответ пришёл, когда форма ничего не отправляла
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStatus {
    phase: FormPhase,
    error: Option<String>,
    success: Option<String>,
}

impl FormStatus {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Флаг загрузки для блокировки повторной отправки
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FormPhase::Validating | FormPhase::Submitting)
    }

    /// Пользователь снова редактирует форму
    pub fn resume_editing(&mut self) {
        if self.phase == FormPhase::Succeeded {
            self.phase = FormPhase::Editing;
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Начать проверку; возвращает `false`, если отправка уже идёт
    pub fn start_validation(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.phase = FormPhase::Validating;
        self.error = None;
        self.success = None;
        true
    }

    pub fn reject(&mut self, message: impl Into<String>) {
        self.phase = FormPhase::Editing;
        self.error = Some(message.into());
    }

    pub fn start_submission(&mut self) {
        self.phase = FormPhase::Submitting;
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.phase = FormPhase::Succeeded;
        self.error = None;
        self.success = Some(message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = FormPhase::Editing;
        self.error = Some(message.into());
    }
}
