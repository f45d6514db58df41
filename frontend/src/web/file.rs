//! 文件与下载相关的 DOM 操作

use modelgen_shared::Timestamp;
use modelgen_shared::date::{FixedOffset, offset_from_js_minutes};
use wasm_bindgen::JsCast;

/// 当前时间
pub fn now() -> Timestamp {
    Timestamp::from_millis_f64(js_sys::Date::now())
}

/// 浏览器本地时区相对 UTC 的偏移
pub fn local_offset() -> FixedOffset {
    offset_from_js_minutes(js_sys::Date::new_0().get_timezone_offset())
}

/// 取出 `<input type="file">` 中选择的文件，并清空输入框以便再次选择同一文件
pub fn take_selected_files(input: &web_sys::HtmlInputElement) -> Vec<web_sys::File> {
    let files = input
        .files()
        .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default();
    input.set_value("");
    files
}

/// 为本地文件创建预览地址，使用后需调用 `revoke_object_url`
pub fn object_url(file: &web_sys::File) -> Option<String> {
    web_sys::Url::create_object_url_with_blob(file).ok()
}

pub fn revoke_object_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

/// 通过临时 `<a download>` 触发下载
pub fn download(url: &str, file_name: &str) {
    let anchor = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.create_element("a").ok())
        .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok());

    match anchor {
        Some(a) => {
            a.set_href(url);
            a.set_download(file_name);
            a.set_target("_blank");
            a.click();
        }
        None => log::error!("[Download] unable to create anchor for {}", file_name),
    }
}

/// 浏览器确认对话框；无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
