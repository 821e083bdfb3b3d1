use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported request method: {0:?}")]
pub struct UnsupportedMethodError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const ALL: [Self; 5] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

// ASCII case-insensitive.
pub fn validate_method(method: &str) -> Result<Method, UnsupportedMethodError> {
    Method::ALL
        .into_iter()
        .find(|m| m.as_str().eq_ignore_ascii_case(method))
        .ok_or_else(|| UnsupportedMethodError(method.to_owned()))
}

impl FromStr for Method {
    type Err = UnsupportedMethodError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_method(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Patch => http::Method::PATCH,
            Method::Delete => http::Method::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_method, Method, UnsupportedMethodError};

    #[test]
    fn test_validate_method() {
        assert_eq!(validate_method("GET"), Ok(Method::Get));
        assert_eq!(validate_method("post"), Ok(Method::Post));
        assert_eq!(validate_method("Put"), Ok(Method::Put));
        assert_eq!(validate_method("pAtCh"), Ok(Method::Patch));
        assert_eq!(validate_method("delete"), Ok(Method::Delete));
    }

    #[test]
    fn test_validate_method_unsupported() {
        for method in ["HEAD", "TRACE", "OPTIONS", "CONNECT", "", " GET", "GETS"] {
            assert_eq!(
                validate_method(method),
                Err(UnsupportedMethodError(method.to_owned())),
            );
        }
    }

    #[test]
    fn test_method_into_http() {
        for method in Method::ALL {
            assert_eq!(http::Method::from(method).as_str(), method.as_str());
            assert_eq!(method.to_string().parse(), Ok(method));
        }
    }
}
