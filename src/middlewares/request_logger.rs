/*!
 * 请求日志中间件
 *
 * 为每个请求分配 `X-Request-Id`（沿用客户端传入的值，否则生成 UUID v4），
 * 写入请求扩展与响应头，并在请求结束时记录方法、路径、状态码与耗时。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::App;
 * use crate::middlewares::RequestLogger;
 *
 * App::new().wrap(RequestLogger);
 * ```
 *
 * 处理程序中可通过 `RequestLogger::extract_request_id(&req)` 读取当前请求 ID。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, time::Instant};
use tracing::{info, warn};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 当前请求的 ID，存放在请求扩展中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

#[derive(Clone)]
pub struct RequestLogger;

// 辅助函数：读取客户端传入的请求 ID，缺失或不合法时生成新的
fn resolve_request_id(req: &ServiceRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            let started = Instant::now();
            let request_id = resolve_request_id(&req);
            let method = req.method().to_string();
            let path = req.path().to_string();

            req.extensions_mut().insert(RequestId(request_id.clone()));

            let mut res = srv.call(req).await?;

            let status = res.status();
            let elapsed_ms = started.elapsed().as_millis();

            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            if status.is_server_error() {
                warn!(
                    request_id = %request_id,
                    "{} {} -> {} ({} ms)",
                    method,
                    path,
                    status.as_u16(),
                    elapsed_ms
                );
            } else {
                info!(
                    request_id = %request_id,
                    "{} {} -> {} ({} ms)",
                    method,
                    path,
                    status.as_u16(),
                    elapsed_ms
                );
            }

            Ok(res)
        })
    }
}

// 辅助函数：从请求中提取请求 ID
impl RequestLogger {
    /// 此函数应该在应用了 RequestLogger 中间件的路由处理程序中使用
    pub fn extract_request_id(req: &actix_web::HttpRequest) -> Option<String> {
        req.extensions().get::<RequestId>().map(|id| id.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};

    async fn echo_request_id(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(RequestLogger::extract_request_id(&req).unwrap_or_default())
    }

    #[actix_web::test]
    async fn test_generates_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(RequestLogger)
                .route("/", web::get().to(echo_request_id)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .unwrap();
        assert!(uuid::Uuid::parse_str(&header).is_ok());

        let body = test::read_body(resp).await;
        assert_eq!(body, header.as_bytes());
    }

    #[actix_web::test]
    async fn test_keeps_client_request_id() {
        let app = test::init_service(
            App::new()
                .wrap(RequestLogger)
                .route("/", web::get().to(echo_request_id)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, "abc-123"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");
    }
}
