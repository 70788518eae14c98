use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "notice notice-info",
            Self::Error => "notice notice-error",
        }
    }
}

/// Message shown above the map after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: AttrValue,
}

impl Notice {
    pub fn info(message: impl Into<AttrValue>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<AttrValue>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub notice: Option<Notice>,
    #[prop_or_default]
    pub on_dismiss: Callback<()>,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(p: &Props) -> Html {
    let Some(notice) = p.notice.clone() else {
        return Html::default();
    };
    let role = if notice.kind == NoticeKind::Error {
        "alert"
    } else {
        "status"
    };
    let dismiss = {
        let cb = p.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class={notice.kind.class()} role={role}>
            <span class="notice-message">{ notice.message }</span>
            <button class="notice-dismiss" aria-label="Dismiss" onclick={dismiss}>{ "×" }</button>
        </div>
    }
}
