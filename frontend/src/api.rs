//! BaaS HTTP 客户端
//!
//! 用 gloo-net 实现核心库中的 `AuthClient` / `Database` / `ObjectStorage` / `ImageAi`。
//! 所有请求都携带 `X-Project-Id` 头并使用 cookie 凭据。

use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedSender};
use futures::stream::LocalBoxStream;
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::task::spawn_local;
use modelgen::{
    AuthClient, Database, ImageAi, ObjectStorage, StudioError, StudioErrorKind, StudioResult,
};
use modelgen_shared::protocol::{
    ApiRequest, CreateRecordRequest, CurrentUserRequest, DeleteRecordRequest,
    GenerateImageRequest, HttpMethod, ImageResponse, ListQuery, ListRecordsRequest, LogoutRequest,
    ModifyImageRequest, UPLOAD_PATH, UpdateRecordRequest, UploadOptions, UploadedObject,
    login_path,
};
use modelgen_shared::{HEADER_PROJECT_ID, SessionState, User};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::RequestCredentials;

#[derive(Clone)]
pub struct BaasClient {
    base_url: String,
    project_id: String,
    /// 认证事件订阅者；发送失败（接收端已丢弃）的会被移除
    subscribers: Rc<RefCell<Vec<UnboundedSender<SessionState>>>>,
}

impl BaasClient {
    pub fn new(base_url: &str, project_id: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn builder(&self, method: HttpMethod, path: &str) -> RequestBuilder {
        let url = self.url(path);
        let builder = match method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Patch => Request::patch(&url),
            HttpMethod::Delete => Request::delete(&url),
        };
        builder
            .header(HEADER_PROJECT_ID, &self.project_id)
            .credentials(RequestCredentials::Include)
    }

    /// 发送一个 JSON 请求；非 2xx 响应映射为 `failure` 类别的错误（401 除外）
    async fn send<R: ApiRequest>(&self, req: &R, failure: StudioErrorKind) -> StudioResult<R::Response> {
        let path = req.path();
        let builder = self.builder(R::METHOD, &path);
        let request = match R::METHOD {
            HttpMethod::Get | HttpMethod::Delete => builder.build(),
            HttpMethod::Post | HttpMethod::Patch => builder.json(req),
        }
        .map_err(|e| StudioError::network(e.to_string()).in_op_with("baas.build", path.clone()))?;

        let res = request
            .send()
            .await
            .map_err(|e| StudioError::network(e.to_string()).in_op_with("baas.send", path.clone()))?;
        parse_response(res, failure)
            .await
            .map_err(|e| e.in_op_with("baas.response", path))
    }

    fn broadcast(&self, state: SessionState) {
        self.subscribers
            .borrow_mut()
            .retain(|tx| tx.unbounded_send(state.clone()).is_ok());
    }

    /// 重新查询当前用户并广播结果
    ///
    /// 查询失败（包括未登录）时广播登出状态。
    pub async fn refresh_session(&self) {
        let state = match self.me().await {
            Ok(user) => SessionState::signed_in(user),
            Err(e) => {
                if e.kind != StudioErrorKind::Unauthenticated {
                    log::warn!("[Auth] session check failed: {}", e);
                }
                SessionState::signed_out()
            }
        };
        self.broadcast(state);
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    res: Response,
    failure: StudioErrorKind,
) -> StudioResult<T> {
    let status = res.status();
    let text = res
        .text()
        .await
        .map_err(|e| StudioError::network(e.to_string()))?;

    if status == 401 {
        return Err(StudioError::unauthenticated(error_message(status, &text)));
    }
    if !res.ok() {
        return Err(StudioError::new(failure, error_message(status, &text)));
    }

    let body = if text.trim().is_empty() { "null" } else { &text };
    Ok(serde_json::from_str(body)?)
}

/// 从错误响应体中提取消息：优先 JSON 的 `error` / `message` 字段
fn error_message(status: u16, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["error", "message"]
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
    });
    from_json
        .or_else(|| {
            let body = body.trim();
            (!body.is_empty()).then(|| body.to_string())
        })
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

// =========================================================
// Auth
// =========================================================

#[async_trait::async_trait(?Send)]
impl AuthClient for BaasClient {
    fn auth_events(&self) -> LocalBoxStream<'static, SessionState> {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers.borrow_mut().push(tx);
        // 先推送一次当前状态
        let client = self.clone();
        spawn_local(async move { client.refresh_session().await });
        rx.boxed_local()
    }

    async fn login(&self) -> StudioResult<()> {
        let window = web_sys::window().ok_or_else(|| StudioError::network("window unavailable"))?;
        let here = window.location().href().unwrap_or_default();
        window
            .location()
            .set_href(&self.url(&login_path(&here)))
            .map_err(|e| StudioError::network(format!("{:?}", e)).in_op("auth.login"))
    }

    async fn logout(&self) -> StudioResult<()> {
        self.send(&LogoutRequest, StudioErrorKind::Network)
            .await
            .map_err(|e| e.in_op("auth.logout"))?;
        self.broadcast(SessionState::signed_out());
        Ok(())
    }

    async fn me(&self) -> StudioResult<User> {
        self.send(&CurrentUserRequest, StudioErrorKind::Network)
            .await
            .map_err(|e| e.in_op("auth.me"))
    }
}

// =========================================================
// Database
// =========================================================

#[async_trait::async_trait(?Send)]
impl Database for BaasClient {
    async fn list(&self, collection: &str, query: &ListQuery) -> StudioResult<Vec<Value>> {
        self.send(
            &ListRecordsRequest { collection, query },
            StudioErrorKind::Persistence,
        )
        .await
    }

    async fn create(&self, collection: &str, record: Value) -> StudioResult<Value> {
        self.send(
            &CreateRecordRequest {
                collection,
                record: &record,
            },
            StudioErrorKind::Persistence,
        )
        .await
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> StudioResult<()> {
        self.send(
            &UpdateRecordRequest {
                collection,
                id,
                patch: &patch,
            },
            StudioErrorKind::Persistence,
        )
        .await
        .map(|_| ())
    }

    async fn delete(&self, collection: &str, id: &str) -> StudioResult<()> {
        self.send(
            &DeleteRecordRequest { collection, id },
            StudioErrorKind::Persistence,
        )
        .await
        .map(|_| ())
    }
}

// =========================================================
// Storage
// =========================================================

#[async_trait::async_trait(?Send)]
impl ObjectStorage for BaasClient {
    type File = web_sys::File;

    async fn upload(
        &self,
        file: &web_sys::File,
        path: &str,
        options: UploadOptions,
    ) -> StudioResult<UploadedObject> {
        let js_err = |e: wasm_bindgen::JsValue| StudioError::upload(format!("{:?}", e));

        let form = web_sys::FormData::new().map_err(js_err)?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(js_err)?;
        form.append_with_str("path", path).map_err(js_err)?;
        form.append_with_str("upsert", if options.upsert { "true" } else { "false" })
            .map_err(js_err)?;

        let request = self
            .builder(HttpMethod::Post, UPLOAD_PATH)
            .body(form)
            .map_err(|e| StudioError::upload(e.to_string()))?;
        let res = request
            .send()
            .await
            .map_err(|e| StudioError::network(e.to_string()).in_op_with("storage.upload", path))?;
        parse_response(res, StudioErrorKind::Upload)
            .await
            .map_err(|e| e.in_op_with("storage.upload", path))
    }
}

// =========================================================
// AI
// =========================================================

#[async_trait::async_trait(?Send)]
impl ImageAi for BaasClient {
    async fn generate_image(&self, req: &GenerateImageRequest) -> StudioResult<ImageResponse> {
        self.send(req, StudioErrorKind::Generation).await
    }

    async fn modify_image(&self, req: &ModifyImageRequest) -> StudioResult<ImageResponse> {
        self.send(req, StudioErrorKind::Generation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_fields() {
        assert_eq!(
            error_message(400, r#"{"error":"blocked by safety system"}"#),
            "blocked by safety system"
        );
        assert_eq!(error_message(429, "rate limit hit"), "rate limit hit");
        assert_eq!(error_message(500, ""), "Request failed with status 500");
    }

    #[test]
    fn test_broadcast_reaches_clones_and_drops_closed_receivers() {
        let client = BaasClient::new("https://baas.example/", "p1");
        let (live_tx, mut live_rx) = mpsc::unbounded();
        let (closed_tx, closed_rx) = mpsc::unbounded();
        client.subscribers.borrow_mut().push(live_tx);
        client.subscribers.borrow_mut().push(closed_tx);
        drop(closed_rx);

        // 克隆共享同一订阅列表
        client.clone().broadcast(SessionState::signed_out());

        assert_eq!(client.subscribers.borrow().len(), 1);
        assert_eq!(live_rx.try_next().unwrap(), Some(SessionState::signed_out()));
    }
}
