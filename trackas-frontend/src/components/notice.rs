use leptos::*;

use trackas_core::notice::{Notice, NoticeLevel};

#[component]
pub fn NoticeBanner(notice: Notice) -> impl IntoView {
    let class = match notice.level {
        NoticeLevel::Success => "bg-green-100 text-green-800",
        NoticeLevel::Warning => "bg-yellow-100 text-yellow-800",
        NoticeLevel::Error => "bg-red-100 text-red-800",
    };
    view! {
      <p class=format!("px-3 py-1 mb-2 rounded {class}")>{ notice.message }</p>
    }
}
