use headers::{Header, HeaderMapExt};
use http::header::{self, HeaderMap, HeaderValue, IntoHeaderName};
use http::{Extensions, StatusCode};

pub type ValidateStatus = fn(StatusCode) -> bool;

/// `extensions` are copied into each outgoing request for the transport.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub headers: HeaderMap,
    pub extensions: Extensions,
    pub validate_status: ValidateStatus,
}

impl Config {
    pub fn new<U>(base_url: U) -> Self
    where
        U: Into<String>,
    {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn header<K>(mut self, key: K, value: HeaderValue) -> Self
    where
        K: IntoHeaderName,
    {
        self.headers.insert(key, value);
        self
    }

    pub fn typed_header<H>(mut self, header: H) -> Self
    where
        H: Header,
    {
        self.headers.typed_insert(header);
        self
    }

    pub fn extension<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions.insert(value);
        self
    }

    pub fn validate_status(mut self, f: ValidateStatus) -> Self {
        self.validate_status = f;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        Self {
            base_url: String::new(),
            headers,
            extensions: Extensions::new(),
            validate_status: is_success,
        }
    }
}

fn is_success(status: StatusCode) -> bool {
    status.is_success()
}

/// Per-call settings, taking precedence over [`Config`].
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub extensions: Extensions,
    pub validate_status: Option<ValidateStatus>,
}

impl RequestOptions {
    pub fn header<K>(mut self, key: K, value: HeaderValue) -> Self
    where
        K: IntoHeaderName,
    {
        self.headers.insert(key, value);
        self
    }

    pub fn typed_header<H>(mut self, header: H) -> Self
    where
        H: Header,
    {
        self.headers.typed_insert(header);
        self
    }

    pub fn extension<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions.insert(value);
        self
    }

    pub fn validate_status(mut self, f: ValidateStatus) -> Self {
        self.validate_status = Some(f);
        self
    }

    pub(crate) fn merge(self, other: Self) -> Self {
        let mut extensions = self.extensions;
        extensions.extend(other.extensions);
        Self {
            headers: merge_headers(&self.headers, &other.headers),
            extensions,
            validate_status: other.validate_status.or(self.validate_status),
        }
    }
}

// A header named in `other` replaces every value of that name in `base`.
fn merge_headers(base: &HeaderMap, other: &HeaderMap) -> HeaderMap {
    let mut headers = base.clone();
    for name in other.keys() {
        headers.remove(name);
    }
    for (name, value) in other {
        headers.append(name, value.clone());
    }
    headers
}

pub(crate) fn headers(config: &Config, options: &RequestOptions) -> HeaderMap {
    merge_headers(&config.headers, &options.headers)
}

pub(crate) fn extensions(config: &Config, options: &RequestOptions) -> Extensions {
    let mut extensions = config.extensions.clone();
    extensions.extend(options.extensions.clone());
    extensions
}

pub(crate) fn validate_status(config: &Config, options: &RequestOptions) -> ValidateStatus {
    options.validate_status.unwrap_or(config.validate_status)
}

pub(crate) fn uri(base_url: &str, path: &str) -> String {
    if base_url.is_empty() || is_absolute(path) {
        path.to_owned()
    } else if path.is_empty() {
        base_url.to_owned()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/'),
        )
    }
}

// `scheme://...` or protocol-relative `//...`
fn is_absolute(path: &str) -> bool {
    if path.starts_with("//") {
        return true;
    }
    match path.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}
