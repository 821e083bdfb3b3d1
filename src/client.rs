use crate::config::{Config, RequestOptions};
use crate::method::{validate_method, Method, UnsupportedMethodError};
use crate::observable::Observable;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Client<S> {
    config: Arc<Config>,
    service: S,
}

impl<S> Client<S> {
    pub fn new(config: Config, service: S) -> Self {
        Self {
            config: Arc::new(config),
            service,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<S> Client<S>
where
    S: Clone,
{
    pub fn get<P>(&self, path: P) -> Observable<S>
    where
        P: Into<String>,
    {
        self.request(Method::Get, path, None)
    }

    pub fn post<P, B>(&self, path: P, body: Option<B>) -> Observable<S, B>
    where
        P: Into<String>,
    {
        self.request(Method::Post, path, body)
    }

    pub fn put<P, B>(&self, path: P, body: Option<B>) -> Observable<S, B>
    where
        P: Into<String>,
    {
        self.request(Method::Put, path, body)
    }

    pub fn patch<P, B>(&self, path: P, body: Option<B>) -> Observable<S, B>
    where
        P: Into<String>,
    {
        self.request(Method::Patch, path, body)
    }

    pub fn delete<P>(&self, path: P) -> Observable<S>
    where
        P: Into<String>,
    {
        self.request(Method::Delete, path, None)
    }

    // Unsupported methods fail here, never through a subscriber's callbacks.
    pub fn make_request<P, B>(
        &self,
        method: &str,
        path: P,
        body: Option<B>,
        options: RequestOptions,
    ) -> Result<Observable<S, B>, UnsupportedMethodError>
    where
        P: Into<String>,
    {
        let method = validate_method(method)?;
        Ok(self.request(method, path, body).with_options(options))
    }

    pub fn request<P, B>(&self, method: Method, path: P, body: Option<B>) -> Observable<S, B>
    where
        P: Into<String>,
    {
        Observable::new(
            self.service.clone(),
            self.config.clone(),
            method,
            path.into(),
            body,
        )
    }
}
