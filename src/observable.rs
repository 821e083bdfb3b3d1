pub(crate) mod future;

use crate::config::{self, Config, RequestOptions, ValidateStatus};
use crate::{Error, Method, Response};
use bytes::Bytes;
use future::ResponseFuture;
use futures::stream::{self, Once};
use headers::{ContentType, Header, HeaderMapExt};
use http::header::{self, HeaderValue, IntoHeaderName};
use http_body::Body;
use http_body_util::Full;
use serde::Serialize;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower::Service;

type Request = http::Request<Full<Bytes>>;

/// A request that is sent anew on every subscription.
#[derive(Clone, Debug)]
pub struct Observable<S, B = ()> {
    service: S,
    config: Arc<Config>,
    method: Method,
    path: String,
    body: Option<B>,
    options: RequestOptions,
}

impl<S, B> Observable<S, B> {
    pub(crate) fn new(
        service: S,
        config: Arc<Config>,
        method: Method,
        path: String,
        body: Option<B>,
    ) -> Self {
        Self {
            service,
            config,
            method,
            path,
            body,
            options: RequestOptions::default(),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    // Merged over anything set so far; later values win.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = mem::take(&mut self.options).merge(options);
        self
    }

    pub fn header<K>(mut self, key: K, value: HeaderValue) -> Self
    where
        K: IntoHeaderName,
    {
        self.options = mem::take(&mut self.options).header(key, value);
        self
    }

    pub fn typed_header<H>(mut self, header: H) -> Self
    where
        H: Header,
    {
        self.options = mem::take(&mut self.options).typed_header(header);
        self
    }

    pub fn extension<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.options = mem::take(&mut self.options).extension(value);
        self
    }

    pub fn validate_status(mut self, f: ValidateStatus) -> Self {
        self.options = mem::take(&mut self.options).validate_status(f);
        self
    }
}

impl<S, B> Observable<S, B>
where
    B: Serialize,
{
    fn request<SE, BE>(&self) -> Result<Request, Error<SE, BE>> {
        let mut headers = config::headers(&self.config, &self.options);
        let body = match &self.body {
            Some(body) => {
                let body = serde_json::to_vec(body).map_err(Error::Json)?;
                if !headers.contains_key(header::CONTENT_TYPE) {
                    headers.typed_insert(ContentType::json());
                }
                Full::new(Bytes::from(body))
            }
            None => Full::new(Bytes::new()),
        };
        let mut builder = http::Request::builder()
            .method(http::Method::from(self.method))
            .uri(config::uri(&self.config.base_url, &self.path));
        if let Some(h) = builder.headers_mut() {
            *h = headers;
        }
        if let Some(e) = builder.extensions_mut() {
            *e = config::extensions(&self.config, &self.options);
        }
        builder.body(body).map_err(Error::Http)
    }

    pub fn call<U>(&self) -> ResponseFuture<S, U>
    where
        S: Service<Request, Response = http::Response<U>> + Clone,
        U: Body,
    {
        future::oneshot(
            self.service.clone(),
            self.request(),
            config::validate_status(&self.config, &self.options),
        )
    }

    pub fn stream<U>(&self) -> Once<ResponseFuture<S, U>>
    where
        S: Service<Request, Response = http::Response<U>> + Clone,
        U: Body,
    {
        stream::once(self.call())
    }

    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn subscribe<U, F, G>(&self, on_success: F, on_failure: G) -> Subscription
    where
        S: Service<Request, Response = http::Response<U>> + Clone + Send + 'static,
        S::Future: Send,
        S::Error: Send + 'static,
        U: Body + Send + 'static,
        U::Data: Send,
        U::Error: Send + 'static,
        F: FnOnce(Response) + Send + 'static,
        G: FnOnce(Error<S::Error, U::Error>) + Send + 'static,
    {
        #[cfg(feature = "telemetry")]
        tracing::debug!(
            method = %self.method,
            uri = %config::uri(&self.config.base_url, &self.path),
            "subscribe"
        );

        let f = self.call();
        let closed = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn({
            let closed = closed.clone();
            async move {
                let result = f.await;
                if closed.swap(true, Ordering::AcqRel) {
                    #[cfg(feature = "telemetry")]
                    tracing::trace!("notification suppressed after unsubscribe");
                    return;
                }
                match result {
                    Ok(response) => {
                        #[cfg(feature = "telemetry")]
                        tracing::trace!(status = %response.status, "success");
                        on_success(response)
                    }
                    Err(e) => {
                        #[cfg(feature = "telemetry")]
                        tracing::trace!(status = ?e.status(), "failure");
                        on_failure(e)
                    }
                }
            }
        });
        Subscription {
            closed,
            handle: handle.abort_handle(),
        }
    }
}

/// Dropping it does not cancel the request.
#[derive(Debug)]
pub struct Subscription {
    closed: Arc<AtomicBool>,
    handle: tokio::task::AbortHandle,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            #[cfg(feature = "telemetry")]
            tracing::debug!("unsubscribe");
            self.handle.abort();
        }
    }

    /// Whether the subscription has completed or been cancelled.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
