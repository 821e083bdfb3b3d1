use crate::config::ValidateStatus;
use crate::{Error, Response};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use std::future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tower::ServiceExt;

type Request = http::Request<Full<Bytes>>;

pub(super) fn oneshot<S, U>(
    service: S,
    request: Result<Request, Error<S::Error, U::Error>>,
    validate_status: ValidateStatus,
) -> ResponseFuture<S, U>
where
    S: tower::Service<Request>,
    U: http_body::Body,
{
    match request {
        Ok(request) => ResponseFuture(State::S0(service.oneshot(request), validate_status)),
        Err(e) => ResponseFuture(State::S1(Some(e))),
    }
}

#[pin_project::pin_project]
pub struct ResponseFuture<S, U>(#[pin] State<S, U>)
where
    S: tower::Service<Request>,
    U: http_body::Body;

#[pin_project::pin_project(project = StateProj)]
#[allow(clippy::large_enum_variant)]
enum State<S, U>
where
    S: tower::Service<Request>,
    U: http_body::Body,
{
    S0(#[pin] tower::util::Oneshot<S, Request>, ValidateStatus),
    S1(Option<Error<S::Error, U::Error>>),
    S2(
        #[pin] http_body_util::combinators::Collect<U>,
        Option<(http::response::Parts, ValidateStatus)>,
    ),
}

impl<S, U> future::Future for ResponseFuture<S, U>
where
    S: tower::Service<Request, Response = http::Response<U>>,
    U: http_body::Body,
{
    type Output = Result<Response, Error<S::Error, U::Error>>;
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        loop {
            match this.0.as_mut().project() {
                StateProj::S0(f, validate_status) => {
                    let validate_status = *validate_status;
                    let response = ready!(f.poll(cx)).map_err(Error::Service)?;
                    let (parts, body) = response.into_parts();
                    this.0
                        .set(State::S2(body.collect(), Some((parts, validate_status))));
                }
                StateProj::S1(state) => {
                    let e = state.take().unwrap();
                    break Poll::Ready(Err(e));
                }
                StateProj::S2(f, state) => {
                    let body = ready!(f.poll(cx)).map_err(Error::Body)?;
                    let (parts, validate_status) = state.take().unwrap();
                    let response = Response::from_parts(parts, body.to_bytes());
                    if validate_status(response.status) {
                        break Poll::Ready(Ok(response));
                    } else {
                        break Poll::Ready(Err(Error::Status(response)));
                    }
                }
            }
        }
    }
}
